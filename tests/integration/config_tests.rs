//! Configuration integration tests
//!
//! Loading from YAML files, validation failures and file round-trips.

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;
    use tenant_rbac::config::Config;
    use tenant_rbac::{RbacError, RbacSystem};

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// A full configuration file loads every section
    #[tokio::test]
    async fn test_load_full_config() {
        let file = write_config(
            r#"
rbac:
  schema_path: /etc/rbac/schema.yaml
  admin_role_name: Owner
  admin_permission: platform.owner
  default_enabled_modules: [crm, tasks]
logging:
  level: debug
  json: true
"#,
        );

        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.rbac().schema_path, Some(PathBuf::from("/etc/rbac/schema.yaml")));
        assert_eq!(config.rbac().admin_role_name, "Owner");
        assert_eq!(config.rbac().admin_permission, "platform.owner");
        assert_eq!(config.rbac().default_enabled_modules, vec!["crm", "tasks"]);
        assert_eq!(config.logging().level, "debug");
        assert!(config.logging().json);
    }

    /// Missing sections fall back to defaults
    #[tokio::test]
    async fn test_load_partial_config() {
        let file = write_config("logging:\n  level: warn\n");

        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.rbac, Default::default());
        assert_eq!(config.logging().level, "warn");
    }

    /// Invalid values are rejected at load time
    #[tokio::test]
    async fn test_load_invalid_config() {
        let file = write_config("rbac:\n  admin_permission: \"admin..full\"\n");

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, RbacError::Config(_)));
        assert!(err.to_string().contains("RBAC config error"));
    }

    /// Saved YAML loads back to the same configuration
    #[tokio::test]
    async fn test_yaml_round_trip() {
        let mut config = Config::default();
        config.rbac.admin_role_name = "Owner".to_string();
        config.logging.level = "trace".to_string();

        let file = write_config(&assert_ok!(config.to_yaml()));
        let loaded = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(loaded, config);
    }

    /// Configured admin settings shape the bootstrap role
    #[tokio::test]
    async fn test_config_drives_bootstrap() {
        let file = write_config(
            r#"
rbac:
  admin_role_name: Owner
  admin_permission: platform.owner
  default_enabled_modules: [tasks]
"#,
        );
        let config = assert_ok!(Config::from_file(file.path()).await);
        let rbac = assert_ok!(RbacSystem::new(config.rbac()).await);

        let mut owner = tenant_rbac::core::models::User::new("owner@example.com", None);
        let (tenant, role) = rbac.bootstrap_tenant("Acme", "acme", vec![], &mut owner);

        assert_eq!(role.name, "Owner");
        assert_eq!(tenant.enabled_modules, vec!["tasks"]);
        let principal = rbac.principal(&owner, &[role]);
        assert!(principal.permissions.contains("platform.owner"));
        assert!(rbac.is_tenant_admin(&principal));
    }
}
