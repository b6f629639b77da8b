//! Error handling for Storyline.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod contract_error;
pub mod curator_load_error;
pub mod error_code;
pub mod graph_load_error;
pub mod session_error;
pub mod telemetry_error;

pub use config_error::ConfigError;
pub use contract_error::ContractError;
pub use curator_load_error::CuratorLoadError;
pub use error_code::StorylineErrorCode;
pub use graph_load_error::GraphLoadError;
pub use session_error::SessionError;
pub use telemetry_error::TelemetryError;
