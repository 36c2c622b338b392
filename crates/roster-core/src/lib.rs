//! Core roster library (config, logging, backend capabilities, records, session).

pub mod backend;
pub mod config;
pub mod logging;
pub mod records;
pub mod session;
