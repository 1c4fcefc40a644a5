pub mod books;
pub mod pages;

use bookstore_db::StoreHandle;
use bookstore_http::Views;
use bookstore_kernel::ModuleRegistry;

/// Register every site module with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    store: StoreHandle,
    views: Views,
) -> anyhow::Result<()> {
    registry.register(pages::create_module(views.clone()))?;
    registry.register(books::create_module(store, views))?;
    Ok(())
}
