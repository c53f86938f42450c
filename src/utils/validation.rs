use crate::domain::model::Address;
use crate::utils::error::{MintError, Result};
use url::Url;

/// Minimum label length the contract will accept.
pub const MIN_LABEL_LEN: usize = 3;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks a non-empty label against the contract's constraints. The contract
/// only enforces a minimum length; anything else it prices by character count.
/// Empty labels are not an error at this layer (the orchestrator treats them
/// as idle input), so callers must not pass one.
pub fn validate_label(label: &str) -> Result<()> {
    if label.chars().count() < MIN_LABEL_LEN {
        return Err(MintError::DomainTooShort {
            label: label.to_string(),
            min: MIN_LABEL_LEN,
        });
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MintError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_address(field_name: &str, value: &str) -> Result<()> {
    Address::new(value).map_err(|_| MintError::InvalidConfigValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: "expected 0x-prefixed 20-byte hex address".to_string(),
    })?;
    Ok(())
}

pub fn validate_tld(field_name: &str, tld: &str) -> Result<()> {
    if !tld.starts_with('.') || tld.len() < 2 {
        return Err(MintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: tld.to_string(),
            reason: "TLD must start with '.' followed by at least one character".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MintError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
