//! QuickLook Library
//!
//! EC2 instance and EBS volume price lookup: the cascading selection
//! resolver, the comparison list, the pricing API gateway and the TUI.

pub mod app;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod error;
pub mod gateway;
pub mod logic;
pub mod report;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use config_file::QuicklookConfig;
pub use error::QuicklookError;
pub use gateway::{Gateway, GatewayError, HttpGateway};
pub use logic::cascade::{Effect, Event, SessionDefaults, SessionState};
pub use logic::comparison::{AddOutcome, ComparisonKey, ComparisonList};
pub use types::{Architecture, FocusField, Validity};
