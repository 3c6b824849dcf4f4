// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Prompt shown by the interactive console.
pub const PROMPT: &str = "counter> ";

pub const CONSOLE_HELP: &str = "\
commands:
  inc | increment          add one to the counter
  dec | decrement          subtract one from the counter
  set <n>                  set the counter (owner)
  pause | resume           toggle the pause flag (owner)
  transfer <principal>     hand ownership to another account (owner)
  connect | disconnect     manage the wallet session
  refresh                  poll the contract now
  help                     show this message
  quit                     leave the console";
