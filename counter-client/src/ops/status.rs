// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::{
    core::{
        poller::{CounterView, Poller},
        session::Session,
    },
    utils::abbreviate_address,
    Result,
};

/// Runs one poll cycle and prints what is known about the contract.
///
/// Queries that fail are reported as warnings; their fields show the last
/// known value.
pub async fn status(poller: &Poller, session: &Session) -> Result<()> {
    let report = poller.refresh().await;
    for (function, err) in &report.failures {
        warn!(@yellow, "could not read {}: {}", function, err);
    }
    print_view(&poller.view(), session, false);
    Ok(())
}

pub fn print_view(view: &CounterView, session: &Session, loading: bool) {
    let config = session.config();
    greyln!("Contract: {}", config.contract_id().lavender());
    greyln!("Counter: {}", view.counter.mint());
    let owner = view
        .owner
        .map(|owner| abbreviate_address(&owner.to_string()))
        .unwrap_or_else(|| "unknown".into());
    greyln!("Owner: {}", owner.lavender());
    greyln!(
        "Status: {}",
        if view.paused {
            "Paused".red()
        } else {
            "Active".mint()
        }
    );
    match session.address() {
        Some(address) => {
            greyln!(
                "Connected: {}",
                abbreviate_address(&address.to_string()).lavender()
            );
            if session.is_owner(view.owner.as_ref()) {
                mintln!("You are the owner");
            }
        }
        None => greyln!("Connect your wallet to interact with the counter"),
    }
    if loading {
        greyln!("{}", "Processing transaction...".yellow());
    }
}
