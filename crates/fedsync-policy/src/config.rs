//! Role configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PolicyResult;

/// The three institution-level roles the policy grants against
///
/// Any role may be left unset; an absent role simply receives no grants.
/// Configured once at startup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Service role, Read+Write on everything the policy touches
    pub backend: Option<String>,
    /// Institution administrator role, read-only
    pub admin: Option<String>,
    /// Institution-scoped submitter role, read-only
    pub submitter: Option<String>,
}

impl RoleConfig {
    pub fn load(path: impl AsRef<Path>) -> PolicyResult<Self> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn from_toml(contents: &str) -> PolicyResult<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_roles_optional() {
        let config = RoleConfig::from_toml("").unwrap();
        assert!(config.backend.is_none());
        assert!(config.admin.is_none());
        assert!(config.submitter.is_none());
    }

    #[test]
    fn test_parse_roles() {
        let config = RoleConfig::from_toml(
            r#"
            backend = "http://repo.local/rest/roles/backend"
            admin = "http://repo.local/rest/roles/admin"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.backend.as_deref(),
            Some("http://repo.local/rest/roles/backend")
        );
        assert!(config.submitter.is_none());
    }
}
