//! Database and configuration models shared across the leads service.

pub mod config;
pub mod lead;
