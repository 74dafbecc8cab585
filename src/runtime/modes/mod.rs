//! Mode routing
//!
//! - Server mode (HTTP gateway, the default)
//! - CLI mode (one-shot helper commands)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
