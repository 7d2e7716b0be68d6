//! crates/parl_core/src/ids.rs
//! Party name token. ASCII-only, strict shape; no I/O.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const TOKEN_MAX_LEN: usize = 64;

/// Token for party/coalition names: ^[A-Za-z0-9_.:+-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let bs = s.as_bytes();
    if bs.is_empty() || bs.len() > TOKEN_MAX_LEN {
        return false;
    }
    bs.iter().all(|&b| {
        b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'+' | b'-')
    })
}

/// Name of a party or coalition, unique within one allocation run.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct PartyId(String);

impl PartyId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PartyId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_token(s) {
            Ok(PartyId(s.to_string()))
        } else {
            Err(CoreError::InvalidToken)
        }
    }
}

impl TryFrom<&str> for PartyId {
    type Error = CoreError;
    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for PartyId {
    type Error = CoreError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_token(&value) {
            Ok(PartyId(value))
        } else {
            Err(CoreError::InvalidToken)
        }
    }
}

impl From<PartyId> for String {
    #[inline]
    fn from(id: PartyId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_accept_party_names() {
        for ok in ["PS", "PSD", "AD", "PSD+CDS", "Livre-2024", "a.b:c_d"] {
            assert!(ok.parse::<PartyId>().is_ok(), "{ok} should parse");
        }
    }

    #[test]
    fn tokens_reject_empty_spaces_and_long() {
        assert_eq!("".parse::<PartyId>(), Err(CoreError::InvalidToken));
        assert_eq!("Bloco de Esquerda".parse::<PartyId>(), Err(CoreError::InvalidToken));
        assert_eq!("Ç".parse::<PartyId>(), Err(CoreError::InvalidToken));
        let long = "x".repeat(TOKEN_MAX_LEN + 1);
        assert!(long.parse::<PartyId>().is_err());
        assert!("x".repeat(TOKEN_MAX_LEN).parse::<PartyId>().is_ok());
    }
}
