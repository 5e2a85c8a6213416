use crate::cli::parser::{Commands, TokenAction};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{list_tokens, upsert_token};
use crate::errors::{AppError, AppResult};
use crate::models::token::Token;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Utc};

/// Seed and inspect the token store.
///
/// Token VALUES come from the external rotating QR generator; this
/// command only registers what that generator displayed, it never
/// derives tokens itself.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Token { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            TokenAction::Add {
                token,
                category,
                expires,
            } => {
                let expires_at: DateTime<Utc> = DateTime::parse_from_rfc3339(expires)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| AppError::InvalidInstant(expires.to_string()))?;

                upsert_token(
                    &pool.conn,
                    &Token {
                        token: token.clone(),
                        category: category.clone(),
                        expires_at,
                    },
                )?;

                let _ = ttlog(
                    &pool.conn,
                    "token_add",
                    token,
                    &format!("category {} valid until {}", category, expires),
                );

                success(format!(
                    "Token registered for '{}' (expires {}).",
                    category, expires
                ));
            }

            TokenAction::List => {
                let tokens = list_tokens(&pool.conn)?;
                if tokens.is_empty() {
                    println!("No tokens stored.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("token", 24),
                    Column::new("category", 10),
                    Column::new("expires_at", 25),
                ]);
                for t in &tokens {
                    table.add_row(vec![
                        t.token.clone(),
                        t.category.clone(),
                        t.expires_at.to_rfc3339(),
                    ]);
                }
                println!("{}", table.render());
            }
        }
    }

    Ok(())
}
