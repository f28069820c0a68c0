//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / blockchain / token / commands
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer on stderr)
//! ```
//!
//! # Design Decisions
//! - Quiet by default (`warn`); `-v`/`-vv` or `RUST_LOG` for detail
//! - Addresses and hashes are logged, keys and RPC secrets never are

pub mod logging;

pub use logging::init_logging;
