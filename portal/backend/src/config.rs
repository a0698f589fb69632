//! Portal configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file at all) gives a working local setup.

use portal_core::{DescriptorSet, ImplementationMap, Registry, RegistryError, Role, TenantOverrides};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Development-only signing secret
pub const DEV_JWT_SECRET: &str = "campus-portal-dev-secret-change-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("privileged tenant {tenant_id:?} lists an unrecognised role")]
    UnknownPrivilegedRole { tenant_id: String },

    #[error("privileged tenant entry has a blank tenant_id")]
    BlankPrivilegedTenant,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Socket address to bind
    pub listen: String,
    /// Tracing filter used when RUST_LOG is unset
    pub log_filter: String,
    pub auth: AuthConfig,
    /// Replacement capability catalog; the built-in one when unset
    pub catalog_path: Option<PathBuf>,
    /// Tenants with a full-catalog override
    pub privileged_tenants: Vec<PrivilegedTenant>,
    /// Display-name substring that also grants the override. Demo use only.
    pub legacy_privileged_marker: Option<String>,
    pub daily_cache: DailyCacheConfig,
    pub sessions: SessionConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            log_filter: "info".to_string(),
            auth: AuthConfig::default(),
            catalog_path: None,
            privileged_tenants: Vec::new(),
            legacy_privileged_marker: None,
            daily_cache: DailyCacheConfig::default(),
            sessions: SessionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
        }
    }
}

/// One `[[privileged_tenants]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrivilegedTenant {
    pub tenant_id: String,
    #[serde(default = "default_privileged_roles")]
    pub roles: Vec<Role>,
}

fn default_privileged_roles() -> Vec<Role> {
    vec![Role::SuperAdmin]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DailyCacheConfig {
    pub ttl_secs: u64,
    pub max_entries: u64,
}

impl Default for DailyCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 24 * 60 * 60,
            max_entries: 10_000,
        }
    }
}

impl DailyCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Bounds on the per-session dispatcher table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Drop a session's navigation state after this long without a request
    pub idle_secs: u64,
    pub max_entries: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_secs: 30 * 60,
            max_entries: 100_000,
        }
    }
}

impl SessionConfig {
    pub fn idle(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }
}

impl PortalConfig {
    /// Load from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.auth.jwt_secret == DEV_JWT_SECRET
    }

    /// Override records, rejecting entries that would silently grant nothing
    pub fn overrides(&self) -> Result<TenantOverrides, ConfigError> {
        let mut overrides = TenantOverrides::none();
        for tenant in &self.privileged_tenants {
            if tenant.tenant_id.trim().is_empty() {
                return Err(ConfigError::BlankPrivilegedTenant);
            }
            for &role in &tenant.roles {
                if !role.is_known() {
                    return Err(ConfigError::UnknownPrivilegedRole {
                        tenant_id: tenant.tenant_id.clone(),
                    });
                }
                overrides = overrides.grant(tenant.tenant_id.as_str(), role);
            }
        }
        Ok(match &self.legacy_privileged_marker {
            Some(marker) => overrides.with_legacy_marker(marker),
            None => overrides,
        })
    }

    /// Build and validate the registry this config describes
    pub fn registry(&self) -> Result<Registry, ConfigError> {
        let descriptors = match &self.catalog_path {
            Some(path) => DescriptorSet::from_path(path)?,
            None => DescriptorSet::builtin()?,
        };
        let implementations = ImplementationMap::builtin_for(descriptors.loadable().map(|d| d.name));
        Ok(Registry::new(descriptors, implementations, self.overrides()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{TenantConfig, TenantType};

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = PortalConfig::from_toml_str("").unwrap();
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.log_filter, "info");
        assert!(config.uses_dev_secret());
        assert!(config.privileged_tenants.is_empty());
        assert_eq!(config.daily_cache.ttl(), Duration::from_secs(86_400));
        assert!(config.overrides().unwrap().is_empty());
    }

    #[test]
    fn test_full_file() {
        let config = PortalConfig::from_toml_str(
            r#"
            listen = "127.0.0.1:3000"
            log_filter = "portal_core=debug"
            legacy_privileged_marker = "Headquarters"

            [auth]
            jwt_secret = "s3cret"

            [[privileged_tenants]]
            tenant_id = "campus-hq"

            [[privileged_tenants]]
            tenant_id = "district-office"
            roles = ["super_admin", "director"]

            [daily_cache]
            ttl_secs = 60

            [sessions]
            idle_secs = 600
            "#,
        )
        .unwrap();

        assert_eq!(config.listen, "127.0.0.1:3000");
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert!(!config.uses_dev_secret());
        assert_eq!(config.daily_cache.ttl_secs, 60);
        assert_eq!(config.daily_cache.max_entries, 10_000);
        assert_eq!(config.sessions.idle(), Duration::from_secs(600));
        assert_eq!(config.sessions.max_entries, 100_000);
        assert_eq!(
            config.privileged_tenants[0],
            PrivilegedTenant {
                tenant_id: "campus-hq".into(),
                roles: vec![Role::SuperAdmin],
            }
        );
        assert_eq!(config.privileged_tenants[1].roles, vec![Role::SuperAdmin, Role::Director]);
    }

    #[test]
    fn test_overrides_from_records() {
        let config = PortalConfig::from_toml_str(
            r#"
            [[privileged_tenants]]
            tenant_id = "campus-hq"
            "#,
        )
        .unwrap();
        let overrides = config.overrides().unwrap();

        let hq = TenantConfig::new("campus-hq", "Campus HQ", TenantType::College);
        let other = TenantConfig::new("springfield", "Campus HQ", TenantType::College);
        assert!(overrides.grants_full_catalog(Role::SuperAdmin, &hq));
        assert!(!overrides.grants_full_catalog(Role::Admin, &hq));
        assert!(!overrides.grants_full_catalog(Role::SuperAdmin, &other));
    }

    #[test]
    fn test_registry_from_reduced_catalog() {
        let dir = std::env::temp_dir().join(format!("portal-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let catalog = dir.join("catalog.toml");
        std::fs::write(
            &catalog,
            r#"
            [[capability]]
            name = "canteen"
            category = "campus_life"
            allowed_roles = "any"
            allowed_tenant_types = "any"

            [capability.display]
            title = "Canteen"
            short_description = "Menus and meal passes"
            icon = "utensils"
            "#,
        )
        .unwrap();

        let config = PortalConfig {
            catalog_path: Some(catalog),
            ..PortalConfig::default()
        };
        let registry = config.registry().unwrap();
        assert_eq!(registry.descriptors().len(), 1);
        assert_eq!(registry.implementations().len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_misspelled_privileged_role_rejected() {
        let config = PortalConfig::from_toml_str(
            r#"
            [[privileged_tenants]]
            tenant_id = "campus-hq"
            roles = ["superadmin"]
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.overrides(),
            Err(ConfigError::UnknownPrivilegedRole { ref tenant_id }) if tenant_id == "campus-hq"
        ));
        assert!(matches!(config.registry(), Err(ConfigError::UnknownPrivilegedRole { .. })));
    }

    #[test]
    fn test_blank_privileged_tenant_rejected() {
        let config = PortalConfig::from_toml_str(
            r#"
            [[privileged_tenants]]
            tenant_id = "  "
            "#,
        )
        .unwrap();

        assert!(matches!(config.overrides(), Err(ConfigError::BlankPrivilegedTenant)));
    }

    #[test]
    fn test_misspelled_catalog_role_rejected() {
        let dir = std::env::temp_dir().join(format!("portal-config-typo-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let catalog = dir.join("catalog.toml");
        std::fs::write(
            &catalog,
            r#"
            [[capability]]
            name = "canteen"
            category = "campus_life"
            allowed_roles = ["studnet"]

            [capability.display]
            title = "Canteen"
            short_description = "Menus and meal passes"
            icon = "utensils"
            "#,
        )
        .unwrap();

        let config = PortalConfig {
            catalog_path: Some(catalog),
            ..PortalConfig::default()
        };
        assert!(matches!(
            config.registry(),
            Err(ConfigError::Registry(RegistryError::UnrecognisedRole(_)))
        ));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = PortalConfig::load(Some(Path::new("/nonexistent/portal.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
