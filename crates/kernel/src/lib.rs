//! Kernel of the bookstore site: layered settings, the module lifecycle and
//! the handler outcome type shared by every module.

pub mod module;
pub mod outcome;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Migration, Module};
pub use outcome::Outcome;
pub use registry::ModuleRegistry;
pub use settings::Settings;
