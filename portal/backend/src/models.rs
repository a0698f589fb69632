//! API request and response bodies

use crate::auth::Session;
use chrono::NaiveDate;
use portal_core::{compose, Category, Registry, Role, TenantConfig, TileGroup};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: String,
}

/// Tile groups for the caller's dashboard
#[derive(Debug, Serialize)]
pub struct CatalogView<'a> {
    pub tenant: &'a TenantConfig,
    pub role: Role,
    pub privileged: bool,
    pub query: &'a str,
    pub total: usize,
    pub groups: Vec<TileGroup<'a>>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub capability: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub title: &'static str,
    pub count: usize,
}

/// Landing-page summary, computed once per user per day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewSummary {
    pub date: NaiveDate,
    pub greeting: String,
    pub tenant: String,
    pub capabilities: usize,
    pub categories: Vec<CategoryCount>,
}

impl OverviewSummary {
    pub fn build(registry: &Registry, session: &Session, date: NaiveDate) -> Self {
        let visible = registry.visible_capabilities(&session.user, &session.tenant);
        let categories = compose(&visible, "")
            .into_iter()
            .map(|group| CategoryCount {
                category: group.category,
                title: group.title,
                count: group.tiles.len(),
            })
            .collect();

        Self {
            date,
            greeting: format!("Welcome, {}", session.user.display_name),
            tenant: session.tenant.display_name.clone(),
            capabilities: visible.len(),
            categories,
        }
    }
}
