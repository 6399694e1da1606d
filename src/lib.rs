// ABOUTME: Library root for stagehand - startup-time deployment orchestration.
// ABOUTME: The CLI binary is in main.rs.

pub mod config;
pub mod error;
pub mod host;
pub mod orchestrate;
pub mod registry;
pub mod types;
