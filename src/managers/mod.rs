pub mod bower;
mod exec;
pub mod npm;
pub mod registry;
pub mod traits;

pub use registry::ManagerRegistry;
pub use traits::{PackageProvider, ProviderFactory};
