pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{build_service, RpcClient, RpcNamingContract, RpcWalletProvider};
pub use core::{MintOrchestrator, MintOutcome, NameService, Session, SessionManager};
pub use utils::error::{MintError, Result};
