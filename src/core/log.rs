use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use rusqlite::Connection;

const MAX_OP_WIDTH: usize = 48;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

fn strip_ansi(s: &str) -> String {
    match regex::Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Colour of the operation word
fn color_for_operation(op: &str) -> Colour {
    match op {
        "job_add" | "scenario_add" => Colour::Green,
        "scenario_del" => Colour::Red,
        "job_edit" | "scenario_edit" | "settings" => Colour::Yellow,
        "targets" | "curve" | "actual" | "daily" => Colour::Cyan,
        "time" => Colour::White,
        "migration_applied" | "recalc" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Audit rows, oldest first. `operation` keeps only rows whose
    /// operation starts with the given prefix.
    pub fn load(conn: &Connection, operation: Option<&str>) -> AppResult<Vec<LogEntry>> {
        let mut stmt =
            conn.prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

        let rows = stmt.query_map([], |row| {
            Ok(LogEntry {
                id: row.get(0)?,
                date: row.get(1)?,
                operation: row.get(2)?,
                target: row.get(3)?,
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            let entry = r?;
            if operation.is_none_or(|p| entry.operation.starts_with(p)) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    pub fn print_log(pool: &mut DbPool, operation: Option<&str>) -> AppResult<()> {
        let entries = Self::load(&pool.conn, operation)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rendered: Vec<(String, String)> = entries
            .iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone());

                let op = color_for_operation(&e.operation).paint(e.operation.as_str()).to_string();
                let mut op_target = if e.target.is_empty() {
                    op
                } else {
                    format!("{op} ({})", e.target)
                };

                // truncate on the visible text, then recolour the operation word
                let visible = strip_ansi(&op_target);
                if visible.chars().count() > MAX_OP_WIDTH {
                    let cut: String = visible.chars().take(MAX_OP_WIDTH - 1).collect();
                    op_target = match cut.split_once(' ') {
                        Some((word, rest)) => {
                            format!("{} {}…", color_for_operation(word).paint(word), rest)
                        }
                        None => format!("{}…", color_for_operation(&cut).paint(cut.as_str())),
                    };
                }
                (date, op_target)
            })
            .collect();

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = rendered.iter().map(|(d, _)| d.len()).max().unwrap_or(10);
        let op_w = rendered
            .iter()
            .map(|(_, op)| strip_ansi(op).chars().count())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (e, (date, op_target)) in entries.iter().zip(rendered.iter()) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(op_target).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id, date, op_target, padding, e.message
            );
        }

        Ok(())
    }
}
