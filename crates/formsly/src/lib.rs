//! Formsly: dynamic forms, request intake, and signer approval workflows.

pub mod config;
pub mod error;
pub mod forms;
pub mod telemetry;
