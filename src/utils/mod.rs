// Shared utilities module
pub mod errors;
pub mod logging;
pub mod config_loader;
pub mod report;

pub use errors::*;
pub use logging::*;
pub use config_loader::*;
pub use report::*;
