//! Logging and trace export setup for Routinely.

pub mod tracing_setup;
