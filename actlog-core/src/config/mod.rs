//! Configuration system.
//! TOML-based, layered: environment (`ACTLOG_*`) > config file > defaults.

pub mod actlog_config;
pub mod analysis_config;
pub mod category_config;
pub mod defaults;
pub mod observability_config;
pub mod router_config;
pub mod session_config;
pub mod store_config;

pub use actlog_config::ActlogConfig;
pub use analysis_config::AnalysisConfig;
pub use category_config::{CategoryConfig, CategoryFilter, CategoryRule};
pub use observability_config::ObservabilityConfig;
pub use router_config::RouterConfig;
pub use session_config::SessionConfig;
pub use store_config::StoreConfig;
