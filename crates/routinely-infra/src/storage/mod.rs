//! Persistent state storage for Routinely.

pub mod json_file;
