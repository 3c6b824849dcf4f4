// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tagged binary values exchanged with the read-only API and the wallet.
//!
//! Every value starts with a one-byte type tag followed by a tag-specific
//! payload. Only the subset of types the counter contract produces or accepts
//! is supported; anything else is a [`DecodeError`], never a silent default.

use std::fmt;

use super::c32::{C32Error, StandardPrincipal, HASH160_LEN};

pub mod tags {
    pub const INT: u8 = 0x00;
    pub const UINT: u8 = 0x01;
    pub const BOOL_TRUE: u8 = 0x03;
    pub const BOOL_FALSE: u8 = 0x04;
    pub const PRINCIPAL_STANDARD: u8 = 0x05;
    pub const PRINCIPAL_CONTRACT: u8 = 0x06;
    pub const RESPONSE_OK: u8 = 0x07;
    pub const RESPONSE_ERR: u8 = 0x08;
    pub const OPTIONAL_NONE: u8 = 0x09;
    pub const OPTIONAL_SOME: u8 = 0x0a;
}

const INT_LEN: usize = 16;
const MAX_CONTRACT_NAME_LEN: usize = 128;
/// Deepest nesting of wrapper types (response, optional) accepted on decode.
pub const MAX_VALUE_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("empty payload")]
    Empty,
    #[error("unknown type tag {0:#04x}")]
    UnknownTag(u8),
    #[error("payload truncated: needed {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
    #[error("invalid contract name")]
    InvalidContractName,
    #[error("value nested deeper than {MAX_VALUE_DEPTH} levels")]
    TooDeep,
    #[error("invalid principal: {0}")]
    Principal(#[from] C32Error),
    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },
}

/// A contract name: 1 to 128 ASCII characters, starting with a letter, made
/// of letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractName(String);

impl ContractName {
    pub fn new(name: &str) -> Result<Self, DecodeError> {
        Self::from_bytes(name.as_bytes())
    }

    fn from_bytes(name: &[u8]) -> Result<Self, DecodeError> {
        let valid = (1..=MAX_CONTRACT_NAME_LEN).contains(&name.len())
            && name.first().is_some_and(u8::is_ascii_alphabetic)
            && name
                .iter()
                .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_');
        if !valid {
            return Err(DecodeError::InvalidContractName);
        }
        Ok(Self(String::from_utf8_lossy(name).into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarityValue {
    Int(i128),
    UInt(u128),
    Bool(bool),
    Principal(StandardPrincipal),
    ContractPrincipal {
        issuer: StandardPrincipal,
        name: ContractName,
    },
    ResponseOk(Box<ClarityValue>),
    ResponseErr(Box<ClarityValue>),
    OptionalNone,
    OptionalSome(Box<ClarityValue>),
}

impl ClarityValue {
    /// Decodes a hex payload, with or without a `0x` prefix.
    pub fn decode_hex(text: &str) -> Result<Self, DecodeError> {
        let text = text.trim();
        let text = text.strip_prefix("0x").unwrap_or(text);
        Self::decode(&hex::decode(text)?)
    }

    /// Decodes exactly one value; leftover bytes are an error.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let mut reader = Reader {
            bytes,
            offset: 0,
            depth: 0,
        };
        let value = reader.value()?;
        match reader.remaining() {
            0 => Ok(value),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    /// `0x`-prefixed hex, the form the API and wallets exchange.
    pub fn encode_hex(&self) -> String {
        format!("0x{}", hex::encode(self.encode()))
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Int(v) => {
                out.push(tags::INT);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Self::UInt(v) => {
                out.push(tags::UINT);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Self::Bool(true) => out.push(tags::BOOL_TRUE),
            Self::Bool(false) => out.push(tags::BOOL_FALSE),
            Self::Principal(p) => {
                out.push(tags::PRINCIPAL_STANDARD);
                encode_principal(p, out);
            }
            Self::ContractPrincipal { issuer, name } => {
                out.push(tags::PRINCIPAL_CONTRACT);
                encode_principal(issuer, out);
                let name = name.as_str().as_bytes();
                // ContractName caps the length at MAX_CONTRACT_NAME_LEN.
                out.push(name.len() as u8);
                out.extend_from_slice(name);
            }
            Self::ResponseOk(inner) => {
                out.push(tags::RESPONSE_OK);
                inner.encode_into(out);
            }
            Self::ResponseErr(inner) => {
                out.push(tags::RESPONSE_ERR);
                inner.encode_into(out);
            }
            Self::OptionalNone => out.push(tags::OPTIONAL_NONE),
            Self::OptionalSome(inner) => {
                out.push(tags::OPTIONAL_SOME);
                inner.encode_into(out);
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Bool(_) => "bool",
            Self::Principal(_) => "principal",
            Self::ContractPrincipal { .. } => "contract principal",
            Self::ResponseOk(_) => "response ok",
            Self::ResponseErr(_) => "response err",
            Self::OptionalNone | Self::OptionalSome(_) => "optional",
        }
    }

    pub fn expect_uint(&self) -> Result<u128, DecodeError> {
        match self {
            Self::UInt(v) => Ok(*v),
            other => Err(other.mismatch("uint")),
        }
    }

    pub fn expect_bool(&self) -> Result<bool, DecodeError> {
        match self {
            Self::Bool(v) => Ok(*v),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn expect_principal(&self) -> Result<StandardPrincipal, DecodeError> {
        match self {
            Self::Principal(p) => Ok(*p),
            other => Err(other.mismatch("principal")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> DecodeError {
        DecodeError::UnexpectedType {
            expected,
            found: self.type_name(),
        }
    }
}

impl fmt::Display for ClarityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "u{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Principal(p) => write!(f, "'{p}"),
            Self::ContractPrincipal { issuer, name } => write!(f, "'{issuer}.{name}"),
            Self::ResponseOk(inner) => write!(f, "(ok {inner})"),
            Self::ResponseErr(inner) => write!(f, "(err {inner})"),
            Self::OptionalNone => f.write_str("none"),
            Self::OptionalSome(inner) => write!(f, "(some {inner})"),
        }
    }
}

impl From<u128> for ClarityValue {
    fn from(value: u128) -> Self {
        Self::UInt(value)
    }
}

impl From<bool> for ClarityValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<StandardPrincipal> for ClarityValue {
    fn from(value: StandardPrincipal) -> Self {
        Self::Principal(value)
    }
}

fn encode_principal(principal: &StandardPrincipal, out: &mut Vec<u8>) {
    out.push(principal.version);
    out.extend_from_slice(&principal.hash160);
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::Truncated {
                offset: self.offset,
                needed: len - self.remaining(),
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn int_bytes(&mut self) -> Result<[u8; INT_LEN], DecodeError> {
        let mut buf = [0u8; INT_LEN];
        buf.copy_from_slice(self.take(INT_LEN)?);
        Ok(buf)
    }

    fn principal(&mut self) -> Result<StandardPrincipal, DecodeError> {
        let version = self.byte()?;
        let mut hash160 = [0u8; HASH160_LEN];
        hash160.copy_from_slice(self.take(HASH160_LEN)?);
        Ok(StandardPrincipal::new(version, hash160)?)
    }

    fn nested(&mut self) -> Result<Box<ClarityValue>, DecodeError> {
        if self.depth >= MAX_VALUE_DEPTH {
            return Err(DecodeError::TooDeep);
        }
        self.depth += 1;
        let inner = self.value();
        self.depth -= 1;
        Ok(Box::new(inner?))
    }

    fn value(&mut self) -> Result<ClarityValue, DecodeError> {
        let tag = self.byte()?;
        let value = match tag {
            tags::INT => ClarityValue::Int(i128::from_be_bytes(self.int_bytes()?)),
            tags::UINT => ClarityValue::UInt(u128::from_be_bytes(self.int_bytes()?)),
            tags::BOOL_TRUE => ClarityValue::Bool(true),
            tags::BOOL_FALSE => ClarityValue::Bool(false),
            tags::PRINCIPAL_STANDARD => ClarityValue::Principal(self.principal()?),
            tags::PRINCIPAL_CONTRACT => {
                let issuer = self.principal()?;
                let len = usize::from(self.byte()?);
                let name = ContractName::from_bytes(self.take(len)?)?;
                ClarityValue::ContractPrincipal { issuer, name }
            }
            tags::RESPONSE_OK => ClarityValue::ResponseOk(self.nested()?),
            tags::RESPONSE_ERR => ClarityValue::ResponseErr(self.nested()?),
            tags::OPTIONAL_NONE => ClarityValue::OptionalNone,
            tags::OPTIONAL_SOME => ClarityValue::OptionalSome(self.nested()?),
            other => return Err(DecodeError::UnknownTag(other)),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::c32::versions;
    use pretty_assertions::assert_eq;

    const OWNER_HEX: &str = "0x0516a46ff88886c2ef9762d970b4d2c63678835bd39d";

    #[test]
    fn decodes_uint() {
        let value = ClarityValue::decode_hex("0x010000000000000000000000000000002a").unwrap();
        assert_eq!(value, ClarityValue::UInt(42));
        assert_eq!(value.expect_uint(), Ok(42));
    }

    #[test]
    fn decodes_without_prefix() {
        let value = ClarityValue::decode_hex("0100000000000000000000000000000000").unwrap();
        assert_eq!(value, ClarityValue::UInt(0));
    }

    #[test]
    fn decodes_negative_int() {
        let value = ClarityValue::decode_hex("0x00ffffffffffffffffffffffffffffffff").unwrap();
        assert_eq!(value, ClarityValue::Int(-1));
    }

    #[test]
    fn decodes_bools() {
        assert_eq!(ClarityValue::decode_hex("0x03"), Ok(ClarityValue::Bool(true)));
        assert_eq!(ClarityValue::decode_hex("0x04"), Ok(ClarityValue::Bool(false)));
    }

    #[test]
    fn decodes_principal_to_address() {
        let hex = "0x0516a46ff88886c2ef9762d970b4d2c63678835bd39d";
        let principal = ClarityValue::decode_hex(hex)
            .unwrap()
            .expect_principal()
            .unwrap();
        assert_eq!(principal.version, versions::MAINNET_SINGLE_SIG);
        assert_eq!(
            principal.to_string(),
            "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7"
        );
    }

    #[test]
    fn decodes_nested_response() {
        let value = ClarityValue::decode_hex("0x0801000000000000000000000000000003e9").unwrap();
        assert_eq!(
            value,
            ClarityValue::ResponseErr(Box::new(ClarityValue::UInt(1001)))
        );
        assert_eq!(value.to_string(), "(err u1001)");
    }

    #[test]
    fn decodes_contract_principal() {
        let mut bytes = hex::decode(&OWNER_HEX[2..]).unwrap();
        bytes[0] = tags::PRINCIPAL_CONTRACT;
        bytes.push(7);
        bytes.extend_from_slice(b"counter");
        match ClarityValue::decode(&bytes).unwrap() {
            ClarityValue::ContractPrincipal { issuer, name } => {
                assert_eq!(issuer.version, versions::MAINNET_SINGLE_SIG);
                assert_eq!(name.as_str(), "counter");
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_contract_name() {
        let mut bytes = hex::decode(&OWNER_HEX[2..]).unwrap();
        bytes[0] = tags::PRINCIPAL_CONTRACT;
        bytes.push(3);
        bytes.extend_from_slice(b"1ab");
        assert_eq!(
            ClarityValue::decode(&bytes),
            Err(DecodeError::InvalidContractName)
        );
    }

    #[test]
    fn contract_names_are_validated_when_built() {
        assert_eq!(ContractName::new("counter").unwrap().as_str(), "counter");
        let too_long = "a".repeat(MAX_CONTRACT_NAME_LEN + 1);
        for bad in ["", "1ab", "has space", too_long.as_str()] {
            assert_eq!(ContractName::new(bad), Err(DecodeError::InvalidContractName));
        }

        let issuer = ClarityValue::decode_hex(OWNER_HEX)
            .unwrap()
            .expect_principal()
            .unwrap();
        let name = ContractName::new(&"a".repeat(MAX_CONTRACT_NAME_LEN)).unwrap();
        let value = ClarityValue::ContractPrincipal { issuer, name };
        assert_eq!(ClarityValue::decode(&value.encode()), Ok(value));
    }

    #[test]
    fn limits_nesting_depth() {
        let at_limit = "0a".repeat(MAX_VALUE_DEPTH) + "03";
        assert!(ClarityValue::decode_hex(&at_limit).is_ok());

        let too_deep = "0a".repeat(MAX_VALUE_DEPTH + 1) + "03";
        assert_eq!(ClarityValue::decode_hex(&too_deep), Err(DecodeError::TooDeep));

        let hostile = "07".repeat(200_000) + "03";
        assert_eq!(ClarityValue::decode_hex(&hostile), Err(DecodeError::TooDeep));
    }

    #[test]
    fn rejects_unknown_tag() {
        assert_eq!(
            ClarityValue::decode_hex("0x0c"),
            Err(DecodeError::UnknownTag(0x0c))
        );
    }

    #[test]
    fn rejects_truncated_uint() {
        assert_eq!(
            ClarityValue::decode_hex("0x012a"),
            Err(DecodeError::Truncated {
                offset: 1,
                needed: 15
            })
        );
    }

    #[test]
    fn rejects_short_principal() {
        assert!(matches!(
            ClarityValue::decode_hex("0x0516a46ff888"),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_eq!(
            ClarityValue::decode_hex("0x0300"),
            Err(DecodeError::TrailingBytes(1))
        );
    }

    #[test]
    fn rejects_empty_and_bad_hex() {
        assert_eq!(ClarityValue::decode_hex("0x"), Err(DecodeError::Empty));
        assert!(matches!(
            ClarityValue::decode_hex("0xzz"),
            Err(DecodeError::Hex(_))
        ));
    }

    #[test]
    fn typed_accessors_report_mismatch() {
        assert_eq!(
            ClarityValue::Bool(true).expect_uint(),
            Err(DecodeError::UnexpectedType {
                expected: "uint",
                found: "bool"
            })
        );
        assert!(ClarityValue::UInt(1).expect_bool().is_err());
        assert!(ClarityValue::OptionalNone.expect_principal().is_err());
    }

    #[test]
    fn encodes_function_arguments() {
        assert_eq!(
            ClarityValue::UInt(42).encode_hex(),
            "0x010000000000000000000000000000002a"
        );
        let principal: StandardPrincipal = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7"
            .parse()
            .unwrap();
        assert_eq!(
            ClarityValue::from(principal).encode_hex(),
            "0x0516a46ff88886c2ef9762d970b4d2c63678835bd39d"
        );
    }

    #[test]
    fn encoded_values_decode_back() {
        let value = ClarityValue::OptionalSome(Box::new(ClarityValue::ResponseOk(Box::new(
            ClarityValue::Int(-7),
        ))));
        assert_eq!(ClarityValue::decode(&value.encode()), Ok(value));
    }
}
