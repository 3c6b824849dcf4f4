// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! One-shot actions: sign in, submit a single transaction and report it.

use counter_client::{
    core::{
        c32::StandardPrincipal,
        dispatch::{parse_counter_value, Action},
    },
    ops,
};
use eyre::bail;

use crate::{
    common_args::{stdin_input, ClientArgs, WalletArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct SetCounterArgs {
    /// New counter value
    value: String,
}

#[derive(Debug, clap::Args)]
pub struct TransferOwnershipArgs {
    /// Principal of the new owner
    new_owner: StandardPrincipal,
}

pub async fn increment(client: ClientArgs, wallet: WalletArgs) -> CliResult {
    submit(Action::Increment, client, wallet).await?;
    Ok(())
}

pub async fn decrement(client: ClientArgs, wallet: WalletArgs) -> CliResult {
    submit(Action::Decrement, client, wallet).await?;
    Ok(())
}

pub async fn set_counter(args: SetCounterArgs, client: ClientArgs, wallet: WalletArgs) -> CliResult {
    let value = parse_counter_value(&args.value).map_err(eyre::Error::from)?;
    submit(Action::SetCounter(value), client, wallet).await?;
    Ok(())
}

pub async fn toggle_pause(client: ClientArgs, wallet: WalletArgs) -> CliResult {
    submit(Action::TogglePause, client, wallet).await?;
    Ok(())
}

pub async fn transfer_ownership(
    args: TransferOwnershipArgs,
    client: ClientArgs,
    wallet: WalletArgs,
) -> CliResult {
    submit(Action::TransferOwnership(args.new_owner), client, wallet).await?;
    Ok(())
}

async fn submit(action: Action, client: ClientArgs, wallet: WalletArgs) -> eyre::Result<()> {
    if !wallet.is_configured() {
        bail!("no wallet configured, pass --wallet-endpoint or --prompt-wallet");
    }
    let input = stdin_input();
    let wallet = wallet.build_wallet(client.config().network, &input);
    let dispatcher = client.build_dispatcher(wallet);

    let report = dispatcher.poller().refresh().await;
    if !report.is_complete() {
        log::warn!(
            "contract state is partially unknown, {} queries failed",
            report.failures.len()
        );
    }
    ops::connect(dispatcher.session()).await?;

    // A declined signature is already reported and is not a failure.
    ops::run(&dispatcher, action).await?;
    Ok(())
}
