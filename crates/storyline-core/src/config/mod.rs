//! Configuration system for Storyline.
//! TOML-based, 3-layer resolution: env > project > user > defaults.

pub mod analytics_config;
pub mod graph_config;
pub mod session_config;
pub mod storyline_config;

pub use analytics_config::AnalyticsConfig;
pub use graph_config::GraphConfig;
pub use session_config::SessionConfig;
pub use storyline_config::StorylineConfig;
