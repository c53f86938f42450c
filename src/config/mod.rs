pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::validation::{
    validate_address, validate_range, validate_tld, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Address of the deployed naming contract.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x93cA1E6471dF0A2028C1aa255DaB2EFa3f7451B5";

/// The fixed top-level suffix every minted name lives under.
pub const DEFAULT_TLD: &str = ".che";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "che-mint")]
#[command(about = "Mint .che domains from the command line")]
pub struct CliConfig {
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    pub rpc_endpoint: String,

    #[arg(long, default_value = DEFAULT_CONTRACT_ADDRESS)]
    pub contract_address: String,

    #[arg(long, default_value = DEFAULT_TLD)]
    pub tld: String,

    #[arg(long, default_value = "120")]
    pub confirmation_timeout_secs: u64,

    #[arg(long, help = "Domain label to mint (without the TLD suffix)")]
    pub label: Option<String>,

    #[arg(long, default_value = "", help = "Text record to attach to the domain")]
    pub record: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn rpc_endpoint(&self) -> &str {
        &self.rpc_endpoint
    }

    fn contract_address(&self) -> &str {
        &self.contract_address
    }

    fn tld(&self) -> &str {
        &self.tld
    }

    fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_url("rpc_endpoint", &self.rpc_endpoint)?;
        validate_address("contract_address", &self.contract_address)?;
        validate_tld("tld", &self.tld)?;
        validate_range("confirmation_timeout_secs", self.confirmation_timeout_secs, 1, 3600)?;
        Ok(())
    }
}
