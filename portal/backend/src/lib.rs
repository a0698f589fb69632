//! Campus Portal API
//!
//! Axum host for the portal core: authenticates the caller, serves the
//! composed dashboard, and keeps one dispatcher per signed-in session.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use auth::{JwtKeys, Session};
use axum::{
    routing::{get, post},
    Router,
};
use config::{ConfigError, PortalConfig, SessionConfig};
use handlers::*;
use models::OverviewSummary;
use moka::sync::Cache;
use portal_core::{DailyCache, Dispatcher, Registry, Role, TenantId, UserId};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// One user acting as one role on one tenant. Navigation state and the
/// overview summary both depend on all three.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub user: UserId,
    pub tenant: TenantId,
    pub role: Role,
}

impl SessionKey {
    pub fn of(session: &Session) -> Self {
        Self {
            user: session.user.id,
            tenant: session.tenant.tenant_id.clone(),
            role: session.user.role,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub keys: Arc<JwtKeys>,
    pub overview: DailyCache<OverviewSummary, SessionKey>,
    sessions: Cache<SessionKey, Dispatcher>,
}

impl AppState {
    pub fn new(
        registry: Registry,
        keys: JwtKeys,
        overview: DailyCache<OverviewSummary, SessionKey>,
        sessions: &SessionConfig,
    ) -> Self {
        let sessions = Cache::builder()
            .max_capacity(sessions.max_entries)
            .time_to_idle(sessions.idle())
            .build();

        Self {
            registry: Arc::new(registry),
            keys: Arc::new(keys),
            overview,
            sessions,
        }
    }

    pub fn from_config(config: &PortalConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.registry()?,
            JwtKeys::from_secret(&config.auth.jwt_secret),
            DailyCache::new(config.daily_cache.max_entries, config.daily_cache.ttl()),
            &config.sessions,
        ))
    }

    /// The caller's dispatcher, created on first use or after it went idle
    pub fn dispatcher(&self, session: &Session) -> Dispatcher {
        self.sessions.get_with(SessionKey::of(session), || {
            self.registry.dispatcher(session.user.clone(), &session.tenant)
        })
    }

    /// Live sessions, after pending evictions have been applied
    pub fn session_count(&self) -> u64 {
        self.sessions.run_pending_tasks();
        self.sessions.entry_count()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Dashboard
        .route("/api/capabilities", get(list_capabilities))
        .route("/api/overview", get(overview))
        // Navigation
        .route("/api/navigation", get(get_navigation).post(select_capability))
        .route("/api/navigation/retry", post(retry))
        .route("/api/navigation/back", post(back))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
