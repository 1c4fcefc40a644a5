//! Bookstore catalog site
//!
//! Wires the book store, page templates and site modules into a server.

pub mod modules;
pub mod utils;
pub mod views;

use std::future::Future;

use anyhow::Context;
use bookstore_db::StoreHandle;
use bookstore_http::router::{with_method_override, SiteService};
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Everything the site needs at runtime
pub struct Site {
    pub registry: ModuleRegistry,
    pub store: StoreHandle,
}

impl Site {
    /// Register the site modules over an existing store
    pub fn with_store(store: StoreHandle) -> anyhow::Result<Self> {
        let views = views::load().context("failed to compile page templates")?;

        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, store.clone(), views)?;

        Ok(Self { registry, store })
    }

    /// Open the configured store and register the site modules
    pub async fn open(settings: &Settings) -> anyhow::Result<Self> {
        let store = bookstore_db::connect(&settings.database)
            .await
            .context("failed to open book store")?;
        Self::with_store(store)
    }

    /// Apply every module's pending migrations
    pub async fn migrate(&self) -> anyhow::Result<usize> {
        let migrations = self.registry.collect_migrations();
        let applied = self
            .store
            .migrate(&migrations)
            .await
            .context("failed to apply migrations")?;
        tracing::info!(applied, total = migrations.len(), "migrations complete");
        Ok(applied)
    }

    /// The routed site, ready to serve
    pub fn service(&self, settings: &Settings) -> SiteService {
        with_method_override(bookstore_http::build_router(&self.registry, settings))
    }

    /// Migrate, start modules, serve until `shutdown`, then stop and close
    pub async fn serve(
        self,
        settings: &Settings,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        self.migrate().await?;

        let ctx = InitCtx { settings };
        self.registry.init_modules(&ctx).await?;
        self.registry.start_modules(&ctx).await?;

        let served = bookstore_http::start_server(&self.registry, settings, shutdown).await;

        if let Err(error) = self.registry.stop_modules().await {
            tracing::error!(%error, "failed to stop modules cleanly");
        }
        self.store.close().await;

        served
    }
}

/// Run the site until Ctrl+C or SIGTERM
pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        static_dir = %settings.server.static_dir,
        "bookstore starting"
    );

    Site::open(settings)
        .await?
        .serve(settings, bookstore_http::shutdown_signal())
        .await
}
