//! Permission engine integration tests
//!
//! Drives schema loading, role lifecycle, merging and evaluation through the
//! public API, the way a request pipeline would.

#[cfg(test)]
mod tests {
    use crate::common::{RoleFactory, TenantFixture, UserFactory};
    use crate::{assert_err, assert_ok};
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tenant_rbac::config::RbacConfig;
    use tenant_rbac::{
        AccessContext, AccessPolicy, EffectivePermissionSet, PermissionValue, PermissionsDocument,
        RbacError, RbacSystem, authorize,
    };
    use uuid::Uuid;

    const SUPPORT_SCHEMA: &str = r#"
support:
  label: Support
  resources:
    tickets:
      label: Tickets
      actions:
        view:
          type: scope
          options: [own, team, all]
        close:
          type: boolean
"#;

    // ==================== End-to-end scenario ====================

    /// Two roles merge into the documented effective set
    #[test]
    fn test_two_role_merge_scenario() {
        let fixture = TenantFixture::new();
        let tenant_id = fixture.tenant.id;
        let role_a = RoleFactory::from_json(
            tenant_id,
            "A",
            json!({"crm": {"leads": {"view": "team", "create": true}}}),
        );
        let role_b = RoleFactory::from_json(
            tenant_id,
            "B",
            json!({"crm": {"leads": {"view": "all", "delete": true}}}),
        );

        let user = UserFactory::member(tenant_id);
        let effective = fixture.rbac.effective_permissions(&user, &[role_a, role_b]);

        let expected: EffectivePermissionSet = [
            ("crm.leads.view", PermissionValue::from("all")),
            ("crm.leads.create", PermissionValue::from(true)),
            ("crm.leads.delete", PermissionValue::from(true)),
        ]
        .into_iter()
        .collect();
        assert_eq!(effective, expected);
    }

    /// A user with no roles is denied everything
    #[test]
    fn test_user_without_roles() {
        let fixture = TenantFixture::new();
        let user = UserFactory::member(fixture.tenant.id);
        let principal = fixture.rbac.principal(&user, &[]);

        assert!(principal.permissions.is_empty());
        for path in fixture.rbac.schema().paths() {
            assert!(!fixture.rbac.authorize(&principal, &path, &AccessContext::for_user(&user)));
        }
    }

    /// Own-scope edits are limited to the actor's own records
    #[test]
    fn test_own_scope_request_flow() {
        let fixture = TenantFixture::new();
        let rep = UserFactory::member(fixture.tenant.id);
        let colleague = UserFactory::member(fixture.tenant.id);
        let principal = fixture
            .rbac
            .principal(&rep, &[RoleFactory::sales_rep(fixture.tenant.id)]);

        let own_lead = AccessContext::for_user(&rep).owned_by(rep.id);
        let colleague_lead = AccessContext::for_user(&rep).owned_by(colleague.id);

        assert!(fixture.rbac.authorize(&principal, "crm.leads.edit", &own_lead));
        assert!(!fixture.rbac.authorize(&principal, "crm.leads.edit", &colleague_lead));
        assert!(fixture.rbac.authorize(&principal, "crm.leads.create", &colleague_lead));
        assert!(!fixture.rbac.authorize(&principal, "crm.leads.delete", &own_lead));
    }

    /// Adding a manager role widens the rep's scope
    #[test]
    fn test_role_stacking_widens_scope() {
        let fixture = TenantFixture::new();
        let tenant_id = fixture.tenant.id;
        let mut user = UserFactory::member(tenant_id);
        let rep_role = RoleFactory::sales_rep(tenant_id);
        let manager_role = RoleFactory::sales_manager(tenant_id);
        let catalog = vec![rep_role.clone(), manager_role.clone()];

        fixture.rbac.assign_roles(&mut user, std::slice::from_ref(&rep_role));
        let roles = fixture.rbac.roles_for_user(&user, &catalog);
        let before = fixture.rbac.principal(&user, &roles);

        fixture.rbac.assign_roles(&mut user, &catalog);
        let roles = fixture.rbac.roles_for_user(&user, &catalog);
        let after = fixture.rbac.principal(&user, &roles);

        let other_record = AccessContext::for_user(&user).owned_by(Uuid::new_v4());
        assert!(!fixture.rbac.authorize(&before, "crm.leads.view", &other_record));
        assert!(fixture.rbac.authorize(&after, "crm.leads.view", &other_record));
        assert_eq!(
            after.permissions.get("crm.leads.edit"),
            Some(&PermissionValue::from("team"))
        );
        // Rep-only grants survive the merge
        assert!(after.permissions.contains("crm.activities.create"));
    }

    /// Roles from another tenant never reach the effective set
    #[test]
    fn test_cross_tenant_roles_are_isolated() {
        let acme = TenantFixture::new();
        let globex = TenantFixture::new();
        let mut user = UserFactory::member(acme.tenant.id);
        let foreign = RoleFactory::sales_manager(globex.tenant.id);
        let catalog = vec![foreign.clone(), RoleFactory::sales_rep(acme.tenant.id)];

        let assigned = acme.rbac.assign_roles(&mut user, &catalog);
        assert_eq!(assigned, 1);
        assert!(!user.has_role(&foreign.id));

        let roles = acme.rbac.roles_for_user(&user, &catalog);
        let principal = acme.rbac.principal(&user, &roles);
        assert!(!principal.permissions.contains("crm.leads.delete"));
    }

    /// Edits to a role are visible on the next resolution
    #[test]
    fn test_role_update_applies_on_next_resolution() {
        let fixture = TenantFixture::new();
        let user = UserFactory::member(fixture.tenant.id);
        let mut role = RoleFactory::sales_rep(fixture.tenant.id);
        let ctx = AccessContext::for_user(&user);

        let before = fixture.rbac.principal(&user, std::slice::from_ref(&role));
        assert!(!fixture.rbac.authorize(&before, "tasks.tasks.create", &ctx));

        role.set_permissions(PermissionsDocument::new().grant("tasks.tasks.create", true));
        let after = fixture.rbac.principal(&user, std::slice::from_ref(&role));
        assert!(fixture.rbac.authorize(&after, "tasks.tasks.create", &ctx));
        assert!(!fixture.rbac.authorize(&after, "crm.leads.create", &ctx));
    }

    // ==================== Bootstrap and administration ====================

    /// The bootstrap admin holds the escape hatch and nothing else
    #[test]
    fn test_bootstrap_admin() {
        let fixture = TenantFixture::new();
        let principal = fixture
            .rbac
            .principal(&fixture.admin, std::slice::from_ref(&fixture.admin_role));

        assert_eq!(fixture.admin.tenant_id, Some(fixture.tenant.id));
        assert!(fixture.rbac.is_tenant_admin(&principal));
        assert_eq!(principal.permissions.len(), 1);
        assert!(!fixture.rbac.authorize(&principal, "crm.leads.view", &AccessContext::new()));
    }

    /// Role names collide only within a tenant
    #[test]
    fn test_create_role_conflict() {
        let fixture = TenantFixture::new();
        let existing = vec![fixture.admin_role.clone()];

        let err = assert_err!(fixture.rbac.create_role(
            &existing,
            fixture.tenant.id,
            "Admin",
            PermissionsDocument::new(),
            Some(fixture.admin.id),
        ));
        assert!(matches!(err, RbacError::Conflict(_)));
        assert!(err.is_client_error());

        let role = assert_ok!(fixture.rbac.create_role(
            &existing,
            fixture.tenant.id,
            "Support",
            PermissionsDocument::new().grant("crm.leads.view", "all"),
            Some(fixture.admin.id),
        ));
        assert_eq!(role.created_by, Some(fixture.admin.id));
        assert!(role.is_active);
    }

    /// Super admins bypass evaluation and carry no permissions
    #[test]
    fn test_super_admin_bypass() {
        let fixture = TenantFixture::new();
        let root = UserFactory::super_admin();
        let principal = fixture
            .rbac
            .principal(&root, &[RoleFactory::sales_rep(fixture.tenant.id)]);

        assert!(principal.permissions.is_empty());
        assert!(fixture.rbac.authorize(&principal, "crm.leads.delete", &AccessContext::new()));
        assert!(AccessPolicy::SuperAdmin.check(&principal, &AccessContext::new()));
        assert!(fixture.rbac.is_tenant_admin(&principal));
    }

    /// Detailed checks explain denials
    #[test]
    fn test_detailed_check() {
        let fixture = TenantFixture::new();
        let rep = UserFactory::member(fixture.tenant.id);
        let principal = fixture
            .rbac
            .principal(&rep, &[RoleFactory::sales_rep(fixture.tenant.id)]);

        let check = fixture.rbac.check_permission_detailed(
            &principal,
            "crm.leads.edit",
            &AccessContext::for_user(&rep).owned_by(Uuid::new_v4()),
        );
        assert!(!check.granted);
        assert_eq!(check.path, "crm.leads.edit");
        assert!(check.denial_reason.unwrap().contains("does not allow access"));
    }

    // ==================== Custom schemas ====================

    /// A schema file named in the configuration replaces the built-in catalog
    #[tokio::test]
    async fn test_system_with_schema_file() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(SUPPORT_SCHEMA.as_bytes()).unwrap();

        let config = RbacConfig {
            schema_path: Some(file.path().to_path_buf()),
            ..RbacConfig::default()
        };
        let rbac = assert_ok!(RbacSystem::new(&config).await);

        assert_eq!(rbac.schema().module_keys().collect::<Vec<_>>(), vec!["support"]);
        assert!(rbac.schema().contains("support.tickets.close"));
        assert!(!rbac.schema().contains("crm.leads.view"));

        let tenant_id = Uuid::new_v4();
        let agent = RoleFactory::from_json(tenant_id, "Agent", json!({"support": {"tickets": {"view": "own"}}}));
        let lead = RoleFactory::from_json(tenant_id, "Lead", json!({"support": {"tickets": {"view": "team"}}}));
        let user = UserFactory::member(tenant_id);

        let effective = rbac.effective_permissions(&user, &[lead, agent]);
        assert_eq!(effective.get("support.tickets.view"), Some(&PermissionValue::from("team")));
    }

    /// A broken schema file fails construction
    #[tokio::test]
    async fn test_system_with_invalid_schema_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(br#"{"crm": {"label": "", "resources": {}}}"#).unwrap();

        let config = RbacConfig {
            schema_path: Some(file.path().to_path_buf()),
            ..RbacConfig::default()
        };
        let err = assert_err!(RbacSystem::new(&config).await);
        assert!(matches!(err, RbacError::Schema(_)));
    }

    /// Grants outside the schema still flow through merge and evaluation
    #[test]
    fn test_paths_outside_schema_propagate() {
        let fixture = TenantFixture::new();
        let role = RoleFactory::from_json(
            fixture.tenant.id,
            "Reports",
            json!({"reports": {"sales": {"view": "all"}}}),
        );
        let user = UserFactory::member(fixture.tenant.id);
        let effective = fixture.rbac.effective_permissions(&user, &[role]);

        assert!(!fixture.rbac.schema().contains("reports.sales.view"));
        assert!(authorize(&effective, "reports.sales.view", &AccessContext::new()));
    }
}
