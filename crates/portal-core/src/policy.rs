//! Access Policy Engine
//!
//! Decides which capabilities a (role, tenant) pair can see. Pure: the same
//! inputs always give the same ordered list, and nothing is mutated.

use crate::capability::CapabilityId;
use crate::catalog::{Descriptor, DescriptorSet};
use crate::model::{Role, TenantConfig, TenantId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tenants whose listed roles see the whole catalog
#[derive(Debug, Clone, Default)]
pub struct TenantOverrides {
    full_catalog: HashMap<TenantId, Vec<Role>>,
    legacy_marker: Option<String>,
}

impl TenantOverrides {
    /// No overrides at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Grant `role` the full catalog on `tenant_id`
    pub fn grant(mut self, tenant_id: impl Into<TenantId>, role: Role) -> Self {
        let roles = self.full_catalog.entry(tenant_id.into()).or_default();
        if role.is_known() && !roles.contains(&role) {
            roles.push(role);
        }
        self
    }

    /// Also treat any tenant whose display name contains `marker` as
    /// privileged for [`Role::SuperAdmin`].
    ///
    /// Display names are not controlled by us, so any tenant can opt itself
    /// in by renaming. Only enable this for demo deployments.
    pub fn with_legacy_marker(mut self, marker: &str) -> Self {
        let marker = marker.trim();
        if marker.is_empty() {
            return self;
        }
        warn!(
            marker,
            "display-name privileged override enabled; any tenant named like this gets the full catalog"
        );
        self.legacy_marker = Some(marker.to_lowercase());
        self
    }

    pub fn grants_full_catalog(&self, role: Role, tenant: &TenantConfig) -> bool {
        if !role.is_known() {
            return false;
        }

        if self
            .full_catalog
            .get(&tenant.tenant_id)
            .is_some_and(|roles| roles.contains(&role))
        {
            return true;
        }

        match &self.legacy_marker {
            Some(marker) if role == Role::SuperAdmin => {
                tenant.display_name.to_lowercase().contains(marker.as_str())
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_catalog.is_empty() && self.legacy_marker.is_none()
    }
}

/// Access policy over a descriptor set
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    catalog: Arc<DescriptorSet>,
    overrides: TenantOverrides,
}

impl AccessPolicy {
    pub fn new(catalog: Arc<DescriptorSet>, overrides: TenantOverrides) -> Self {
        Self { catalog, overrides }
    }

    pub fn catalog(&self) -> &DescriptorSet {
        &self.catalog
    }

    /// Is the full-catalog override in effect for this pair?
    pub fn is_privileged(&self, role: Role, tenant: &TenantConfig) -> bool {
        tenant.is_well_formed() && self.overrides.grants_full_catalog(role, tenant)
    }

    /// Visible capabilities in catalog order.
    ///
    /// Unknown roles and malformed tenants see nothing. Sentinels are never
    /// included.
    pub fn visible_capabilities(&self, role: Role, tenant: &TenantConfig) -> Vec<&Descriptor> {
        if !role.is_known() || !tenant.is_well_formed() {
            debug!(%role, tenant_id = %tenant.tenant_id, tenant_type = %tenant.tenant_type, "denying malformed policy input");
            return Vec::new();
        }

        if self.overrides.grants_full_catalog(role, tenant) {
            info!(%role, tenant_id = %tenant.tenant_id, "privileged override: exposing full catalog");
            return self.catalog.loadable().collect();
        }

        self.catalog
            .loadable()
            .filter(|d| Self::admits(d, role, tenant))
            .collect()
    }

    fn admits(d: &Descriptor, role: Role, tenant: &TenantConfig) -> bool {
        d.allowed_roles.admits(&role) && d.allowed_tenant_types.admits(&tenant.tenant_type)
    }

    /// Names of the visible capabilities
    pub fn visible_ids(&self, role: Role, tenant: &TenantConfig) -> HashSet<CapabilityId> {
        self.visible_capabilities(role, tenant)
            .into_iter()
            .map(|d| d.name)
            .collect()
    }

    /// Single-capability form of [`Self::visible_capabilities`]
    pub fn is_visible(&self, role: Role, tenant: &TenantConfig, id: CapabilityId) -> bool {
        if !role.is_known() || !tenant.is_well_formed() {
            return false;
        }

        match self.catalog.get_id(id) {
            Some(d) if !d.is_sentinel() => {
                self.overrides.grants_full_catalog(role, tenant) || Self::admits(d, role, tenant)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Scope};
    use crate::model::TenantType;
    use proptest::prelude::*;

    const HQ: &str = "campus-hq";

    fn policy() -> AccessPolicy {
        let catalog = Arc::new(DescriptorSet::builtin().unwrap());
        AccessPolicy::new(catalog, TenantOverrides::none().grant(HQ, Role::SuperAdmin))
    }

    fn school() -> TenantConfig {
        TenantConfig::new("springfield", "Springfield High", TenantType::School)
    }

    fn names(list: &[&Descriptor]) -> Vec<CapabilityId> {
        list.iter().map(|d| d.name).collect()
    }

    #[test]
    fn test_student_at_school() {
        let policy = policy();
        let visible = names(&policy.visible_capabilities(Role::Student, &school()));

        assert!(visible.contains(&CapabilityId::AiTutor));
        assert!(visible.contains(&CapabilityId::Homework));
        assert!(!visible.contains(&CapabilityId::SmartHrManager));
        // School-only tenant type filter
        assert!(!visible.contains(&CapabilityId::Hostel));
        assert!(!visible.contains(&CapabilityId::Overview));
    }

    #[test]
    fn test_tenant_type_filter() {
        let policy = policy();
        let iti = TenantConfig::new("iti-7", "Govt ITI Pune", TenantType::Iti);

        let visible = names(&policy.visible_capabilities(Role::Student, &iti));
        assert!(visible.contains(&CapabilityId::TradeWorkshop));
        assert!(!visible.contains(&CapabilityId::Homework));
        assert!(!visible.contains(&CapabilityId::ClinicalRotations));
    }

    #[test]
    fn test_privileged_override() {
        let policy = policy();
        let hq = TenantConfig::new(HQ, "Campus HQ", TenantType::School);

        let visible = names(&policy.visible_capabilities(Role::SuperAdmin, &hq));
        let expected: Vec<_> = CapabilityId::loadable().collect();
        assert_eq!(visible, expected);
        assert!(policy.is_privileged(Role::SuperAdmin, &hq));

        // Other roles on the same tenant are filtered normally
        assert!(!policy.is_privileged(Role::Admin, &hq));
        let admin = names(&policy.visible_capabilities(Role::Admin, &hq));
        assert!(!admin.contains(&CapabilityId::AiTutor));
    }

    #[test]
    fn test_display_name_does_not_grant_by_default() {
        let policy = policy();
        let impostor = TenantConfig::new("other", "campus-hq Academy", TenantType::School);
        assert!(!policy.is_privileged(Role::SuperAdmin, &impostor));
    }

    #[test]
    fn test_legacy_marker() {
        let catalog = Arc::new(DescriptorSet::builtin().unwrap());
        let policy = AccessPolicy::new(catalog, TenantOverrides::none().with_legacy_marker("GodMode"));
        let demo = TenantConfig::new("demo-1", "Demo GODMODE School", TenantType::School);

        assert!(policy.is_privileged(Role::SuperAdmin, &demo));
        assert!(!policy.is_privileged(Role::Teacher, &demo));
    }

    #[test]
    fn test_unknown_role_sees_nothing() {
        let policy = policy();
        assert!(policy.visible_capabilities(Role::Unknown, &school()).is_empty());

        // Role-agnostic descriptors are still denied
        assert!(!policy.is_visible(Role::Unknown, &school(), CapabilityId::NoticeBoard));
    }

    #[test]
    fn test_malformed_tenant_sees_nothing() {
        let policy = policy();
        let blank = TenantConfig::new("", "Springfield High", TenantType::School);
        let untyped = TenantConfig::new("springfield", "Springfield High", TenantType::Unknown);
        let untyped_hq = TenantConfig::new(HQ, "Campus HQ", TenantType::Unknown);

        assert!(policy.visible_capabilities(Role::Student, &blank).is_empty());
        assert!(policy.visible_capabilities(Role::Student, &untyped).is_empty());
        assert!(policy.visible_capabilities(Role::SuperAdmin, &untyped_hq).is_empty());
    }

    #[test]
    fn test_role_agnostic_descriptor() {
        let catalog = DescriptorSet::new(vec![Descriptor::new(
            CapabilityId::NoticeBoard,
            Category::Communication,
            Scope::Any,
            Scope::Any,
            "Notices",
            "Announcements",
            "megaphone",
        )])
        .unwrap();
        let policy = AccessPolicy::new(Arc::new(catalog), TenantOverrides::none());

        for role in Role::KNOWN {
            assert_eq!(policy.visible_capabilities(role, &school()).len(), 1);
        }
    }

    fn any_role() -> impl Strategy<Value = Role> {
        let mut roles = Role::KNOWN.to_vec();
        roles.push(Role::Unknown);
        prop::sample::select(roles)
    }

    fn any_tenant() -> impl Strategy<Value = TenantConfig> {
        let mut types = TenantType::KNOWN.to_vec();
        types.push(TenantType::Unknown);
        (
            prop::sample::select(types),
            prop::sample::select(vec!["springfield", HQ, "", "iti-7"]),
            prop::sample::select(vec!["Springfield High", "Campus HQ", "GodMode Demo"]),
        )
            .prop_map(|(tenant_type, id, name)| TenantConfig::new(id, name, tenant_type))
    }

    proptest! {
        #[test]
        fn visible_is_subset_of_catalog(role in any_role(), tenant in any_tenant()) {
            let policy = policy();
            for d in policy.visible_capabilities(role, &tenant) {
                prop_assert_eq!(policy.catalog().get_id(d.name), Some(d));
                prop_assert!(!d.is_sentinel());
            }
        }

        #[test]
        fn visible_respects_role_membership(role in any_role(), tenant in any_tenant()) {
            let policy = policy();
            prop_assume!(!policy.is_privileged(role, &tenant));
            for d in policy.visible_capabilities(role, &tenant) {
                prop_assert!(d.allowed_roles.admits(&role));
                prop_assert!(d.allowed_tenant_types.admits(&tenant.tenant_type));
            }
        }

        #[test]
        fn visible_is_idempotent(role in any_role(), tenant in any_tenant()) {
            let policy = policy();
            let first = names(&policy.visible_capabilities(role, &tenant));
            let second = names(&policy.visible_capabilities(role, &tenant));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn visible_preserves_catalog_order(role in any_role(), tenant in any_tenant()) {
            let policy = policy();
            let order: HashMap<_, _> = policy
                .catalog()
                .all()
                .iter()
                .enumerate()
                .map(|(pos, d)| (d.name, pos))
                .collect();
            let positions: Vec<_> = policy
                .visible_capabilities(role, &tenant)
                .iter()
                .map(|d| order[&d.name])
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn is_visible_agrees_with_list(role in any_role(), tenant in any_tenant()) {
            let policy = policy();
            let visible = policy.visible_ids(role, &tenant);
            for &id in CapabilityId::ALL {
                prop_assert_eq!(policy.is_visible(role, &tenant, id), visible.contains(&id));
            }
        }

        #[test]
        fn unknown_role_is_denied(tenant in any_tenant()) {
            prop_assert!(policy().visible_capabilities(Role::Unknown, &tenant).is_empty());
        }
    }
}
