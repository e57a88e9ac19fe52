use crate::config::Config;
use crate::config::migrate::check_config_file;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Effective configuration, after `--db` / `--org` overrides.
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    pub fn check(path: &Path, fix: bool) -> AppResult<Vec<String>> {
        check_config_file(path, fix)
    }

    /// Open `path` in `editor`, falling back to $EDITOR / $VISUAL and then
    /// to the platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let requested = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{requested}'"));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{requested}' not available, falling back to '{default_editor}'"
            )),
        }

        match Command::new(&default_editor).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{default_editor}'"));
                Ok(())
            }
            _ => Err(AppError::Config(format!(
                "failed to edit configuration file with '{default_editor}'"
            ))),
        }
    }
}
