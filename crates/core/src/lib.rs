pub mod config;
pub mod context;
pub mod error;
pub mod fingerprint;
pub mod issue;
pub mod scan;

pub use config::Config;
pub use context::ScanContext;
pub use error::*;
pub use fingerprint::*;
pub use issue::*;
pub use scan::*;
