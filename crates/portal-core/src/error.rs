//! Error types for the portal core

use crate::capability::CapabilityId;
use thiserror::Error;

/// Registry configuration defect.
///
/// Raised while the descriptor set or implementation map is being built.
/// These are fatal at startup and never shown to an end user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two descriptors share a name
    #[error("duplicate capability name: {0}")]
    DuplicateName(CapabilityId),

    /// Descriptor restricts roles but lists none
    #[error("capability {0} has an empty role list and is not role-agnostic")]
    EmptyRoles(CapabilityId),

    /// Descriptor restricts tenant types but lists none
    #[error("capability {0} has an empty tenant type list")]
    EmptyTenantTypes(CapabilityId),

    /// Descriptor without an implementation
    #[error("no loader bound for capability {0}")]
    MissingLoader(CapabilityId),

    /// Implementation without a descriptor
    #[error("loader bound for unregistered capability {0}")]
    OrphanLoader(CapabilityId),

    /// Sentinel names cannot carry an implementation
    #[error("sentinel {0} cannot be bound to a loader")]
    SentinelBound(CapabilityId),

    /// More than one loader for the same name
    #[error("capability {0} is bound more than once")]
    DuplicateLoader(CapabilityId),

    /// Role list names a role we do not recognise
    #[error("capability {0} lists an unrecognised role")]
    UnrecognisedRole(CapabilityId),

    /// Tenant type list names a type we do not recognise
    #[error("capability {0} lists an unrecognised tenant type")]
    UnrecognisedTenantType(CapabilityId),

    /// Catalog file could not be read or parsed
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Several defects at once
    #[error("{} registry defects", .0.len())]
    Multiple(Vec<RegistryError>),
}

impl RegistryError {
    /// Collapse a defect list into a single error
    pub fn from_defects(mut defects: Vec<RegistryError>) -> Option<Self> {
        match defects.len() {
            0 => None,
            1 => defects.pop(),
            _ => Some(Self::Multiple(defects)),
        }
    }
}

/// Failure fetching a component implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("implementation for {capability} is unavailable: {reason}")]
    Unavailable { capability: CapabilityId, reason: String },

    #[error("load failed: {0}")]
    Failed(String),
}

/// Failure during a component's initial render
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("mount failed: {0}")]
pub struct MountError(pub String);

/// Result type for registry construction
pub type RegistryResult<T> = Result<T, RegistryError>;
