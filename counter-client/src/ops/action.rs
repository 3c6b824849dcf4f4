// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use eyre::{bail, WrapErr};

use crate::{
    core::{
        dispatch::{Action, ActionDispatcher, Availability, Outcome},
        session::Session,
    },
    utils::{abbreviate_address, color::Color},
    Result,
};

pub async fn connect(session: &Session) -> Result<()> {
    let account = session.sign_in().await?;
    mintln!(
        "Connected: {}",
        abbreviate_address(&account.address.to_string())
    );
    Ok(())
}

pub async fn disconnect(session: &Session) -> Result<()> {
    session.sign_out().await?;
    greyln!("Disconnected");
    Ok(())
}

/// Submits `action` unless the last known state rules it out.
pub async fn run(dispatcher: &ActionDispatcher, action: Action) -> eyre::Result<Outcome> {
    match dispatcher.availability(&action) {
        Availability::Available => {}
        Availability::Paused => bail!("{action} is unavailable while the counter is paused"),
        Availability::OwnerOnly => bail!(
            "{} is restricted to the contract owner",
            action.function_name().pink()
        ),
    }
    dispatcher
        .dispatch(action)
        .await
        .wrap_err("Transaction failed")
}
