// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use counter_client::ops;

use crate::{common_args::ClientArgs, error::CliResult};

pub async fn exec(client: ClientArgs) -> CliResult {
    let dispatcher = client.build_dispatcher(None);
    ops::status(dispatcher.poller(), dispatcher.session()).await?;
    Ok(())
}
