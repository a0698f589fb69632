//! Tenant and Session Model
//!
//! These values come from the authentication and tenant-resolution layer.
//! The core only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// User ID
pub type UserId = Uuid;

/// Stable tenant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Wrap a raw tenant id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank ids are treated as malformed tenant input
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for TenantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persona of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Parent,
    Staff,
    Admin,
    /// Top-level administrator, eligible for the full-catalog override
    SuperAdmin,
    Principal,
    Director,
    Company,
    College,
    /// Anything the auth layer sent that we do not recognise
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Every recognised role, in declaration order
    pub const KNOWN: [Role; 10] = [
        Role::Student,
        Role::Teacher,
        Role::Parent,
        Role::Staff,
        Role::Admin,
        Role::SuperAdmin,
        Role::Principal,
        Role::Director,
        Role::Company,
        Role::College,
    ];

    /// Parse a role name; unrecognised input maps to [`Role::Unknown`]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "student" => Self::Student,
            "teacher" => Self::Teacher,
            "parent" => Self::Parent,
            "staff" => Self::Staff,
            "admin" => Self::Admin,
            "super_admin" | "superadmin" => Self::SuperAdmin,
            "principal" => Self::Principal,
            "director" => Self::Director,
            "company" => Self::Company,
            "college" => Self::College,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Parent => "parent",
            Self::Staff => "staff",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
            Self::Principal => "principal",
            Self::Director => "director",
            Self::Company => "company",
            Self::College => "college",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Self::Unknown
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of institution a tenant represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantType {
    School,
    College,
    University,
    Iti,
    MedicalInstitute,
    CoachingCenter,
    Company,
    #[serde(other)]
    Unknown,
}

impl TenantType {
    /// Every recognised tenant type, in declaration order
    pub const KNOWN: [TenantType; 7] = [
        TenantType::School,
        TenantType::College,
        TenantType::University,
        TenantType::Iti,
        TenantType::MedicalInstitute,
        TenantType::CoachingCenter,
        TenantType::Company,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::School => "school",
            Self::College => "college",
            Self::University => "university",
            Self::Iti => "iti",
            Self::MedicalInstitute => "medical_institute",
            Self::CoachingCenter => "coaching_center",
            Self::Company => "company",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TenantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tenant configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Stable tenant ID
    pub tenant_id: TenantId,
    /// Display name
    pub display_name: String,
    /// Institution type
    pub tenant_type: TenantType,
}

impl TenantConfig {
    pub fn new(tenant_id: impl Into<String>, display_name: &str, tenant_type: TenantType) -> Self {
        Self {
            tenant_id: TenantId::new(tenant_id),
            display_name: display_name.to_string(),
            tenant_type,
        }
    }

    /// A tenant we can make visibility decisions for
    pub fn is_well_formed(&self) -> bool {
        !self.tenant_id.is_blank() && self.tenant_type != TenantType::Unknown
    }
}

/// Signed-in user as seen by mounted components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub role: Role,
    pub display_name: String,
}

impl SessionUser {
    pub fn new(id: UserId, role: Role, display_name: &str) -> Self {
        Self {
            id,
            role,
            display_name: display_name.to_string(),
        }
    }
}
