// src/lib.rs
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod output;
pub mod resolver;
pub mod types;
pub mod wordlist;

pub use cli::Args;
pub use dispatcher::Dispatcher;
pub use engine::SubprobeEngine;
pub use resolver::{DnsResolver, Resolve};
pub use types::{Config, Found, NotFound, Resolution, ResultSet, ScanReport, SubprobeError, Unresolved};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
