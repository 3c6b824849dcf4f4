// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Crockford base-32 ("c32") account addresses.
//!
//! A standard principal is an address version byte plus a 20-byte hash160. It
//! is rendered as `S`, the version as a single c32 digit, then the c32
//! encoding of the hash followed by a 4-byte double-SHA-256 checksum.

use std::{fmt, str::FromStr};

use sha2::{Digest, Sha256};

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const CHECKSUM_LEN: usize = 4;

/// Length of the account hash carried by a principal.
pub const HASH160_LEN: usize = 20;

pub mod versions {
    pub const MAINNET_SINGLE_SIG: u8 = 22;
    pub const MAINNET_MULTI_SIG: u8 = 20;
    pub const TESTNET_SINGLE_SIG: u8 = 26;
    pub const TESTNET_MULTI_SIG: u8 = 21;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum C32Error {
    #[error("address must start with 'S'")]
    MissingPrefix,
    #[error("invalid c32 character {0:?}")]
    InvalidCharacter(char),
    #[error("address version {0} is out of range")]
    InvalidVersion(u8),
    #[error("address payload is {0} bytes, expected {expected}", expected = HASH160_LEN + CHECKSUM_LEN)]
    InvalidLength(usize),
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// An account principal: address version plus hash160.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StandardPrincipal {
    pub version: u8,
    pub hash160: [u8; HASH160_LEN],
}

impl StandardPrincipal {
    pub fn new(version: u8, hash160: [u8; HASH160_LEN]) -> Result<Self, C32Error> {
        if version >= 32 {
            return Err(C32Error::InvalidVersion(version));
        }
        Ok(Self { version, hash160 })
    }

    /// Whether this principal belongs to mainnet.
    pub fn is_mainnet(&self) -> bool {
        matches!(
            self.version,
            versions::MAINNET_SINGLE_SIG | versions::MAINNET_MULTI_SIG
        )
    }
}

impl fmt::Display for StandardPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = Vec::with_capacity(HASH160_LEN + CHECKSUM_LEN);
        payload.extend_from_slice(&self.hash160);
        payload.extend_from_slice(&checksum(self.version, &self.hash160));
        let version = C32_ALPHABET[usize::from(self.version & 0x1f)] as char;
        write!(f, "S{version}{}", encode(&payload))
    }
}

impl FromStr for StandardPrincipal {
    type Err = C32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let rest = s
            .strip_prefix('S')
            .or_else(|| s.strip_prefix('s'))
            .ok_or(C32Error::MissingPrefix)?;
        let mut chars = rest.chars();
        let version = chars.next().ok_or(C32Error::InvalidLength(0))?;
        let version = digit(version)?;
        let payload = decode(chars.as_str())?;
        if payload.len() != HASH160_LEN + CHECKSUM_LEN {
            return Err(C32Error::InvalidLength(payload.len()));
        }
        let (hash, sum) = payload.split_at(HASH160_LEN);
        let mut hash160 = [0u8; HASH160_LEN];
        hash160.copy_from_slice(hash);
        if checksum(version, &hash160) != sum {
            return Err(C32Error::ChecksumMismatch);
        }
        Ok(Self { version, hash160 })
    }
}

fn checksum(version: u8, hash160: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update([version]);
    hasher.update(hash160);
    let digest = Sha256::digest(hasher.finalize());
    let mut sum = [0u8; CHECKSUM_LEN];
    sum.copy_from_slice(&digest[..CHECKSUM_LEN]);
    sum
}

/// Encodes bytes as c32. Each leading zero byte becomes a leading `0`.
pub fn encode(bytes: &[u8]) -> String {
    let mut digits = Vec::with_capacity(bytes.len() * 8 / 5 + 1);
    let mut acc: u32 = 0;
    let mut bits = 0;
    for byte in bytes.iter().rev() {
        acc |= u32::from(*byte) << bits;
        bits += 8;
        while bits >= 5 {
            digits.push(C32_ALPHABET[(acc & 0x1f) as usize]);
            acc >>= 5;
            bits -= 5;
        }
    }
    if bits > 0 {
        digits.push(C32_ALPHABET[(acc & 0x1f) as usize]);
    }
    while digits.last() == Some(&b'0') {
        digits.pop();
    }
    digits.extend(bytes.iter().take_while(|b| **b == 0).map(|_| b'0'));
    digits.iter().rev().map(|d| *d as char).collect()
}

/// Decodes a c32 string. Each leading `0` becomes a leading zero byte.
pub fn decode(text: &str) -> Result<Vec<u8>, C32Error> {
    let digits = text.chars().map(digit).collect::<Result<Vec<_>, _>>()?;
    let mut bytes = Vec::with_capacity(digits.len() * 5 / 8 + 1);
    let mut acc: u32 = 0;
    let mut bits = 0;
    for digit in digits.iter().rev() {
        acc |= u32::from(*digit) << bits;
        bits += 5;
        if bits >= 8 {
            bytes.push((acc & 0xff) as u8);
            acc >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        bytes.push((acc & 0xff) as u8);
    }
    while bytes.last() == Some(&0) {
        bytes.pop();
    }
    bytes.extend(digits.iter().take_while(|d| **d == 0).map(|_| 0u8));
    bytes.reverse();
    Ok(bytes)
}

/// Maps a c32 character to its value, accepting the usual look-alikes.
fn digit(c: char) -> Result<u8, C32Error> {
    let normalized = match c.to_ascii_uppercase() {
        'O' => '0',
        'I' | 'L' => '1',
        other => other,
    };
    C32_ALPHABET
        .iter()
        .position(|d| *d as char == normalized)
        .map(|pos| pos as u8)
        .ok_or(C32Error::InvalidCharacter(c))
}
