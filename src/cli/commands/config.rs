use crate::config::Config;
use crate::errors::AppResult;

use crate::cli::parser::Commands;
use std::path::Path;
use std::process::Command;

/// Spawn an editor on the config file; false when the editor is missing
/// or exits non-zero.
fn launch_editor(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!(
                "{}",
                serde_yaml::to_string(&cfg)
                    .unwrap_or_else(|e| format!("<unserializable config: {}>", e))
            );
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let env_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad"
                    } else {
                        "nano"
                    }
                    .to_string()
                });

            // Requested editor first, environment default as fallback.
            let mut candidates = vec![env_editor];
            if let Some(requested) = editor {
                candidates.insert(0, requested.clone());
            }
            candidates.dedup();

            match candidates.iter().find(|ed| launch_editor(ed, &path)) {
                Some(ed) => {
                    println!("✅ Configuration file edited successfully using '{}'", ed);
                }
                None => {
                    eprintln!(
                        "❌ Failed to edit configuration file; tried: {}",
                        candidates.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}
