//! The contract every site module fulfils.

use async_trait::async_trait;
use axum::Router;

use crate::settings::Settings;

/// Handed to modules while the site boots
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

/// One schema change owned by a module.
///
/// `id` must be unique within its module; ids are applied in sort order and
/// recorded so a change never runs twice.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// A slice of the site: its pages, its schema and its lifecycle hooks
#[async_trait]
pub trait Module: Sync + Send {
    /// Registry key, unique across the site
    fn name(&self) -> &'static str;

    /// Runs once after migrations, before any request is served
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Pages served by this module, merged at the site root
    fn routes(&self) -> Router {
        Router::new()
    }

    fn migrations(&self) -> Vec<Migration> {
        Vec::new()
    }

    /// Runs after every module has initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs on shutdown, in reverse registration order
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
