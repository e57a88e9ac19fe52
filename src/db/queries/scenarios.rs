use super::invalid_text;
use crate::errors::{AppError, AppResult};
use crate::models::scenario::{Scenario, ScenarioInputs, ScenarioResults};
use rusqlite::{Connection, OptionalExtension, Row, named_params, params};

fn from_json<T: serde::de::DeserializeOwned>(col: &str, raw: &str) -> rusqlite::Result<T> {
    serde_json::from_str(raw).map_err(|_| invalid_text(col, raw))
}

pub fn map_row(row: &Row) -> rusqlite::Result<Scenario> {
    let assumptions: String = row.get("assumptions")?;
    let results: String = row.get("results")?;

    Ok(Scenario {
        id: row.get("id")?,
        organization_id: row.get("organization_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        version: row.get("version")?,
        is_baseline: row.get("is_baseline")?,
        inputs: from_json::<ScenarioInputs>("assumptions", &assumptions)?,
        results: from_json::<ScenarioResults>("results", &results)?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_scenario(conn: &Connection, s: &Scenario) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO scenarios (
            organization_id, name, description, version, is_baseline,
            assumptions, results, created_at, updated_at
         ) VALUES (:org, :name, :description, :version, :is_baseline,
                   :assumptions, :results, :created_at, :updated_at)",
        named_params! {
            ":org": s.organization_id,
            ":name": s.name,
            ":description": s.description,
            ":version": s.version,
            ":is_baseline": s.is_baseline,
            ":assumptions": serde_json::to_string(&s.inputs)?,
            ":results": serde_json::to_string(&s.results)?,
            ":created_at": s.created_at,
            ":updated_at": s.updated_at,
        },
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_scenario(conn: &Connection, s: &Scenario) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE scenarios SET
            name = :name, description = :description, version = :version,
            is_baseline = :is_baseline, assumptions = :assumptions, results = :results,
            updated_at = :updated_at
         WHERE id = :id AND organization_id = :org",
        named_params! {
            ":id": s.id,
            ":org": s.organization_id,
            ":name": s.name,
            ":description": s.description,
            ":version": s.version,
            ":is_baseline": s.is_baseline,
            ":assumptions": serde_json::to_string(&s.inputs)?,
            ":results": serde_json::to_string(&s.results)?,
            ":updated_at": s.updated_at,
        },
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("scenario #{}", s.id)));
    }
    Ok(())
}

/// Drop the baseline flag from every scenario of `org` except `keep_id`.
pub fn clear_baselines(conn: &Connection, org: &str, keep_id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE scenarios SET is_baseline = 0
         WHERE organization_id = ?1 AND id <> ?2 AND is_baseline = 1",
        params![org, keep_id],
    )?)
}

pub fn load_scenario(conn: &Connection, org: &str, id: i64) -> AppResult<Option<Scenario>> {
    let mut stmt =
        conn.prepare("SELECT * FROM scenarios WHERE id = ?1 AND organization_id = ?2")?;
    Ok(stmt.query_row(params![id, org], map_row).optional()?)
}

pub fn load_baseline(conn: &Connection, org: &str) -> AppResult<Option<Scenario>> {
    let mut stmt =
        conn.prepare("SELECT * FROM scenarios WHERE organization_id = ?1 AND is_baseline = 1")?;
    Ok(stmt.query_row([org], map_row).optional()?)
}

pub fn load_scenarios(conn: &Connection, org: &str) -> AppResult<Vec<Scenario>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM scenarios WHERE organization_id = ?1
         ORDER BY is_baseline DESC, name ASC, id ASC",
    )?;
    let rows = stmt.query_map([org], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_scenario(conn: &Connection, org: &str, id: i64) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM scenarios WHERE id = ?1 AND organization_id = ?2",
        params![id, org],
    )?;
    Ok(n > 0)
}

pub fn count_baselines(conn: &Connection, org: &str) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM scenarios WHERE organization_id = ?1 AND is_baseline = 1",
        [org],
        |row| row.get(0),
    )?)
}
