// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::{
    common_args::{ClientArgs, WalletArgs},
    error::CliResult,
};

mod action;
mod status;
mod watch;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Poll the contract once and print its state
    #[clap(visible_alias = "s")]
    Status,
    /// Interactive console that keeps the state up to date
    #[clap(visible_alias = "w")]
    Watch,
    /// Add one to the counter
    Increment,
    /// Subtract one from the counter
    Decrement,
    /// Set the counter to a new value (owner only)
    SetCounter(action::SetCounterArgs),
    /// Pause or resume the counter (owner only)
    TogglePause,
    /// Transfer ownership of the contract (owner only)
    TransferOwnership(action::TransferOwnershipArgs),
}

pub async fn exec(cmd: Command, client: ClientArgs, wallet: WalletArgs) -> CliResult {
    match cmd {
        Command::Status => status::exec(client).await,
        Command::Watch => watch::exec(client, wallet).await,
        Command::Increment => action::increment(client, wallet).await,
        Command::Decrement => action::decrement(client, wallet).await,
        Command::SetCounter(args) => action::set_counter(args, client, wallet).await,
        Command::TogglePause => action::toggle_pause(client, wallet).await,
        Command::TransferOwnership(args) => {
            action::transfer_ownership(args, client, wallet).await
        }
    }
}
