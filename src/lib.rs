//! Relinker - A versioned URL shortener
//!
//! Every assignment of a short code is kept: reassigning a code appends a
//! new version to its history, and expiration is evaluated lazily against
//! the newest version only. Writes go through a double-submit confirmation
//! (the same random token in the query string and a `SameSite=Strict`
//! cookie) so a cross-site link cannot change a mapping.
//!
//! # Architecture
//! - `storage`: versioned histories, the reader/writer guard, the journal
//! - `services`: expiration directives, confirmation gate, link service
//! - `api`: HTTP gateway routes and Basic authentication
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging and panic handling

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
