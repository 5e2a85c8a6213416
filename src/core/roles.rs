//! Role gate for leadership-only categories.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::collections::{HashMap, HashSet};

/// Category → required role set, built once from configuration.
///
/// Constructed from an explicit value rather than ambient state so the
/// gate can be exercised with arbitrary role sets in tests.
pub struct RoleGate {
    gated: HashMap<String, Vec<String>>,
}

impl RoleGate {
    pub fn new(gated: HashMap<String, Vec<String>>) -> Self {
        Self { gated }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let gated = cfg
            .categories
            .iter()
            .filter(|c| !c.required_roles.is_empty())
            .map(|c| (c.name.clone(), c.required_roles.clone()))
            .collect();
        Self::new(gated)
    }

    pub fn is_gated(&self, category: &str) -> bool {
        self.gated.contains_key(category)
    }

    /// Pass iff the category is ungated, or the member holds ANY of the
    /// required roles (logical OR). Failure is `LeadershipRequired`, a
    /// user-actionable kind: the caller offers a role-upgrade path
    /// instead of a dead end.
    pub fn authorize(
        &self,
        member_id: &str,
        category: &str,
        held_roles: &HashSet<String>,
    ) -> AppResult<()> {
        let Some(required) = self.gated.get(category) else {
            return Ok(());
        };

        if required.iter().any(|r| held_roles.contains(r)) {
            return Ok(());
        }

        Err(AppError::LeadershipRequired(format!(
            "member '{}' holds none of the roles required for '{}' ({})",
            member_id,
            category,
            required.join(", ")
        )))
    }
}
