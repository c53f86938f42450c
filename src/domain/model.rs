use crate::utils::error::{MintError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet account address: `0x` followed by 40 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let hex = value
            .strip_prefix("0x")
            .ok_or_else(|| MintError::InvalidAddress {
                value: value.clone(),
            })?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MintError::InvalidAddress { value });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash of a submitted transaction, as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle for a submitted, not-yet-confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTx {
    pub hash: TxHash,
}

/// A quantity of the native token, stored as base units (wei).
///
/// Prices in this crate are written as decimal strings ("0.5") and converted
/// to wei before they are attached to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NativeAmount(u128);

const WEI_PER_UNIT: u128 = 1_000_000_000_000_000_000;
const DECIMALS: usize = 18;

impl NativeAmount {
    pub fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    /// Parses a decimal string ("0.5", "1", "0.000000000000000001") into wei.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: &str| MintError::InvalidAmount {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("amount cannot be empty"));
        }

        let (whole, frac) = match value.split_once('.') {
            Some((w, f)) => (w, f),
            None => (value, ""),
        };
        if frac.len() > DECIMALS {
            return Err(invalid("more than 18 fractional digits"));
        }
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("not a decimal number"));
        }

        let whole_part: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("whole part overflows"))?
        };
        let mut frac_part: u128 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| invalid("fraction overflows"))?
        };
        frac_part *= 10u128.pow((DECIMALS - frac.len()) as u32);

        let wei = whole_part
            .checked_mul(WEI_PER_UNIT)
            .and_then(|w| w.checked_add(frac_part))
            .ok_or_else(|| invalid("amount overflows"))?;
        Ok(Self(wei))
    }

    pub fn wei(&self) -> u128 {
        self.0
    }

    /// Hex quantity form used in RPC transaction params ("0x6f05b59d3b20000").
    pub fn to_wei_hex(&self) -> String {
        format!("{:#x}", self.0)
    }
}

impl fmt::Display for NativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / WEI_PER_UNIT;
        let frac = self.0 % WEI_PER_UNIT;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let frac = format!("{:018}", frac);
        write!(f, "{}.{}", whole, frac.trim_end_matches('0'))
    }
}

/// The pending form state: the label being registered and its text record.
///
/// Cleared only after a fully successful mint; a partial failure leaves both
/// fields populated so the user can retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintRequest {
    pub label: String,
    pub record: String,
}

/// Price tier by label length: 3 chars = 0.5, 4 chars = 0.3, 5+ = 0.1.
///
/// Labels shorter than 3 characters are rejected by validation before any
/// price is computed.
pub fn price_for_label(label: &str) -> NativeAmount {
    let wei = match label.chars().count() {
        3 => 500_000_000_000_000_000,
        4 => 300_000_000_000_000_000,
        _ => 100_000_000_000_000_000,
    };
    NativeAmount::from_wei(wei)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Failure,
}

/// Confirmation result of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub status: ReceiptStatus,
    pub tx_hash: TxHash,
}

/// Which phase of the two-phase mint a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintStage {
    Registration,
    RecordSet,
}

impl fmt::Display for MintStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MintStage::Registration => f.write_str("registration"),
            MintStage::RecordSet => f.write_str("record-set"),
        }
    }
}

/// Outcome of a `mint` call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// Empty label: nothing to do yet, no transaction was issued.
    Idle,
    /// Both transactions confirmed.
    Minted { registration: TxHash, record: TxHash },
}
