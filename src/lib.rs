pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod git;
pub mod logging;
pub mod metrics;
pub mod process;
pub mod readme;
pub mod report;
pub mod workdir;
