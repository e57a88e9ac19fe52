use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::fs;
use std::io::{Write, stdin, stdout};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally replacing the copy with
    /// a `.zip`. Returns the final path, or `None` if the user declined to
    /// overwrite an existing file.
    pub fn backup(db_path: &str, dest_file: &str, compress: bool, force: bool) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::NotFound(format!("database {}", src.display())));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !force && !confirm_overwrite(dest)? {
            println!("❌ Backup cancelled by user.");
            return Ok(None);
        }

        fs::copy(src, dest)?;
        println!("✅ Backup created: {}", dest.display());

        let final_path = if compress {
            let compressed = compress_backup(dest)?;
            if compressed.as_path() != dest {
                match fs::remove_file(dest) {
                    Ok(()) => println!("🗑️ Removed uncompressed backup: {}", dest.display()),
                    Err(e) => eprintln!("⚠️ Failed to remove uncompressed backup: {e}"),
                }
            }
            compressed
        } else {
            dest.to_path_buf()
        };

        // best effort: a failed audit row does not undo the backup
        if let Ok(conn) = Connection::open(src) {
            let _ = ttlog(
                &conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(Some(final_path))
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    println!(
        "⚠️  The file '{}' already exists.\nDo you want to overwrite it? [y/N]: ",
        dest.display()
    );
    print!("> ");
    stdout().flush()?;

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Compress a backup into a sibling `.zip`
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "paintledger.sqlite".to_string());

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options).map_err(std::io::Error::other)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    println!("📦 Compressed: {}", zip_path.display());
    Ok(zip_path)
}
