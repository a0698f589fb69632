//! Startup checks for the registry

use crate::catalog::{Descriptor, DescriptorSet, Scope};
use crate::error::{RegistryError, RegistryResult};
use crate::implementation::ImplementationMap;
use crate::model::{Role, TenantType};
use std::collections::HashSet;

/// Uniqueness and scope checks over raw descriptors
pub fn check_descriptors(descriptors: &[Descriptor]) -> Vec<RegistryError> {
    let mut seen = HashSet::new();
    let mut defects = Vec::new();

    for d in descriptors {
        if !seen.insert(d.name) {
            defects.push(RegistryError::DuplicateName(d.name));
        }
        if d.is_sentinel() {
            continue;
        }
        if d.allowed_roles.is_empty() {
            defects.push(RegistryError::EmptyRoles(d.name));
        }
        if d.allowed_tenant_types.is_empty() {
            defects.push(RegistryError::EmptyTenantTypes(d.name));
        }
        // Catalog typos decode as Unknown and would hide the capability from everyone
        if matches!(&d.allowed_roles, Scope::Only(roles) if roles.contains(&Role::Unknown)) {
            defects.push(RegistryError::UnrecognisedRole(d.name));
        }
        if matches!(&d.allowed_tenant_types, Scope::Only(types) if types.contains(&TenantType::Unknown)) {
            defects.push(RegistryError::UnrecognisedTenantType(d.name));
        }
    }

    defects
}

/// Every non-sentinel descriptor has a loader and every loader a descriptor
pub fn check_coverage(descriptors: &DescriptorSet, implementations: &ImplementationMap) -> Vec<RegistryError> {
    let mut defects: Vec<_> = descriptors
        .loadable()
        .filter(|d| !implementations.contains(d.name))
        .map(|d| RegistryError::MissingLoader(d.name))
        .collect();

    for id in implementations.ids() {
        if id.is_sentinel() {
            defects.push(RegistryError::SentinelBound(id));
        } else if !descriptors.contains(id) {
            defects.push(RegistryError::OrphanLoader(id));
        }
    }

    defects
}

/// Fail on the first coverage problem set
pub fn validate(descriptors: &DescriptorSet, implementations: &ImplementationMap) -> RegistryResult<()> {
    match RegistryError::from_defects(check_coverage(descriptors, implementations)) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
