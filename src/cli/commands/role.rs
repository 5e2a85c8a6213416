use crate::cli::parser::{Commands, RoleAction};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{grant_role, load_member_roles};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Maintain the role directory consumed by the role gate.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Role { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            RoleAction::Grant { member, role } => {
                let created = grant_role(&pool.conn, member, role)?;

                if created {
                    let _ = ttlog(&pool.conn, "role_grant", member, &format!("role {}", role));
                    success(format!("Granted role '{}' to {}.", role, member));
                } else {
                    info(format!("{} already holds role '{}'.", member, role));
                }
            }

            RoleAction::List { member } => {
                let roles = load_member_roles(&pool.conn, member)?;

                if roles.is_empty() {
                    println!("{} holds no roles.", member);
                } else {
                    let mut sorted: Vec<&String> = roles.iter().collect();
                    sorted.sort();
                    println!("Roles for {}:", member);
                    for r in sorted {
                        println!("  - {}", r);
                    }
                }
            }
        }
    }

    Ok(())
}
