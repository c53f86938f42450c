use crate::core::ConfigProvider;
use crate::utils::error::{MintError, Result};
use crate::utils::validation::{
    validate_address, validate_non_empty_string, validate_range, validate_tld, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub provider: ProviderConfig,
    pub contract: ContractConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub tld: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub rpc_endpoint: String,
    pub confirmation_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    pub address: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MintError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MintError::InvalidConfigValue {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values. Unset
    /// variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl ConfigProvider for TomlConfig {
    fn rpc_endpoint(&self) -> &str {
        &self.provider.rpc_endpoint
    }

    fn contract_address(&self) -> &str {
        &self.contract.address
    }

    fn tld(&self) -> &str {
        self.service.tld.as_deref().unwrap_or(super::DEFAULT_TLD)
    }

    fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.confirmation_timeout_secs.unwrap_or(120))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("service.name", &self.service.name)?;
        validate_url("provider.rpc_endpoint", &self.provider.rpc_endpoint)?;
        validate_address("contract.address", &self.contract.address)?;
        if let Some(tld) = &self.service.tld {
            validate_tld("service.tld", tld)?;
        }
        if let Some(secs) = self.provider.confirmation_timeout_secs {
            validate_range("provider.confirmation_timeout_secs", secs, 1, 3600)?;
        }
        Ok(())
    }
}
