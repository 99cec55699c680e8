//! Worker thread that owns the Tokio runtime, the HTTP client, and stdin intake.

pub mod commands;
pub mod icons;
pub mod runtime;
