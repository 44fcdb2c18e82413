//! Pay Matrix CLI
//!
//! `paymatrix` works on a JSON snapshot store (`--store`, default
//! `paymatrix.json`):
//!
//! ```text
//! paymatrix grades --add 1 2 3
//! paymatrix seed
//! paymatrix add --grade 3 --pair 1=8000 --pair 2=8500
//! paymatrix show --format html
//! paymatrix delete <level-id> --yes
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod cli;
mod commands;
mod logging;

pub use cli::command;
pub use commands::{execute, parse_pair};
pub use logging::{init as init_logging, LogFormat};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
