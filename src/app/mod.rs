//! Application orchestration module

pub mod execution;
pub mod initialization;
pub mod repository;

pub use execution::{run_report, write_report};
pub use initialization::{configure_logging, create_colour_manager, load_configuration, report_settings};
pub use repository::resolve_repositories;
