//! Registry: descriptor set, implementation map and policy, validated together

use crate::capability::CapabilityId;
use crate::catalog::{Descriptor, DescriptorSet};
use crate::dispatcher::Dispatcher;
use crate::error::RegistryResult;
use crate::implementation::ImplementationMap;
use crate::model::{SessionUser, TenantConfig};
use crate::policy::{AccessPolicy, TenantOverrides};
use crate::validation;
use std::sync::Arc;
use tracing::info;

/// Process-wide, read-only capability registry
#[derive(Debug, Clone)]
pub struct Registry {
    descriptors: Arc<DescriptorSet>,
    implementations: Arc<ImplementationMap>,
    policy: AccessPolicy,
}

impl Registry {
    /// Assemble a registry, failing on any coverage defect
    pub fn new(
        descriptors: DescriptorSet,
        implementations: ImplementationMap,
        overrides: TenantOverrides,
    ) -> RegistryResult<Self> {
        validation::validate(&descriptors, &implementations)?;

        info!(
            capabilities = descriptors.len(),
            loaders = implementations.len(),
            overrides = !overrides.is_empty(),
            "capability registry ready"
        );

        let descriptors = Arc::new(descriptors);
        Ok(Self {
            policy: AccessPolicy::new(descriptors.clone(), overrides),
            descriptors,
            implementations: Arc::new(implementations),
        })
    }

    /// Built-in catalog and bindings
    pub fn builtin(overrides: TenantOverrides) -> RegistryResult<Self> {
        Self::new(DescriptorSet::builtin()?, ImplementationMap::builtin(), overrides)
    }

    pub fn descriptors(&self) -> &DescriptorSet {
        &self.descriptors
    }

    pub fn implementations(&self) -> &Arc<ImplementationMap> {
        &self.implementations
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn visible_capabilities(&self, user: &SessionUser, tenant: &TenantConfig) -> Vec<&Descriptor> {
        self.policy.visible_capabilities(user.role, tenant)
    }

    /// Dispatcher for one session, limited to what the user can see
    pub fn dispatcher(&self, user: SessionUser, tenant: &TenantConfig) -> Dispatcher {
        let admitted = self.policy.visible_ids(user.role, tenant);
        Dispatcher::restricted(self.implementations.clone(), user, admitted)
    }

    pub fn is_visible(&self, user: &SessionUser, tenant: &TenantConfig, id: CapabilityId) -> bool {
        self.policy.is_visible(user.role, tenant, id)
    }
}
