// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::core::{
    api::ApiError, c32::C32Error, clarity::DecodeError, dispatch::DispatchError,
    session::SessionError, wallet::WalletError,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    Address(#[from] C32Error),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Wallet(#[from] WalletError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("{0}")]
    Dispatch(#[from] DispatchError),
}
