// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Interactive console: keeps the contract state on screen and runs commands
//! typed by the user.

use std::io::Write;

use counter_client::{
    core::{
        c32::StandardPrincipal,
        dispatch::{parse_counter_value, Action, ActionDispatcher},
        poller::CounterView,
    },
    ops,
};
use tokio::io::AsyncBufReadExt;

use crate::{
    common_args::{stdin_input, ClientArgs, Input, WalletArgs},
    constants::{CONSOLE_HELP, PROMPT},
    error::CliResult,
    utils::print_error,
};

#[derive(Debug, PartialEq, Eq)]
enum ConsoleCommand {
    Action(Action),
    Connect,
    Disconnect,
    Refresh,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments for {name}"));
    }
    let command = match (name, arg) {
        ("inc" | "increment", None) => ConsoleCommand::Action(Action::Increment),
        ("dec" | "decrement", None) => ConsoleCommand::Action(Action::Decrement),
        ("set", Some(value)) => {
            let value = parse_counter_value(value).map_err(|err| err.to_string())?;
            ConsoleCommand::Action(Action::SetCounter(value))
        }
        ("pause" | "resume", None) => ConsoleCommand::Action(Action::TogglePause),
        ("transfer", Some(owner)) => {
            let owner: StandardPrincipal = owner
                .parse()
                .map_err(|err| format!("invalid principal: {err}"))?;
            ConsoleCommand::Action(Action::TransferOwnership(owner))
        }
        ("connect", None) => ConsoleCommand::Connect,
        ("disconnect", None) => ConsoleCommand::Disconnect,
        ("refresh", None) => ConsoleCommand::Refresh,
        ("help", None) => ConsoleCommand::Help,
        ("quit" | "exit", None) => ConsoleCommand::Quit,
        ("set" | "transfer", None) => return Err(format!("{name} needs an argument")),
        _ => return Err(format!("unknown command {line:?}, try help")),
    };
    Ok(Some(command))
}

/// Reads one line, `None` at end of input.
async fn read_line(input: Input) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    let read = input.lock().await.read_line(&mut line).await?;
    Ok((read > 0).then_some(line))
}

fn prompt() {
    print!("{PROMPT}");
    let _ = std::io::stdout().flush();
}

/// Fields shown to the user; refresh timestamps alone do not trigger a redraw.
fn visible(view: &CounterView) -> (u128, Option<StandardPrincipal>, bool) {
    (view.counter, view.owner, view.paused)
}

pub async fn exec(client: ClientArgs, wallet: WalletArgs) -> CliResult {
    let input = stdin_input();
    let wallet = wallet.build_wallet(client.config().network, &input);
    if wallet.is_none() {
        log::warn!("no wallet configured, actions are disabled");
    }
    let dispatcher = client.build_dispatcher(wallet);
    let poller = dispatcher.poller().clone();
    let mut updates = poller.subscribe();
    let handle = poller.start();

    println!("{CONSOLE_HELP}");
    prompt();
    let mut shown = None;
    let mut next_line = Box::pin(read_line(input.clone()));
    loop {
        tokio::select! {
            line = &mut next_line => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(ConsoleCommand::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Err(err) = run(&dispatcher, command).await {
                            print_error(format!("{err:#}"));
                        }
                    }
                    Ok(None) => {}
                    Err(msg) => print_error(msg),
                }
                prompt();
                next_line = Box::pin(read_line(input.clone()));
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().clone();
                if shown != Some(visible(&view)) {
                    shown = Some(visible(&view));
                    println!();
                    ops::print_view(&view, dispatcher.session(), dispatcher.is_loading());
                    prompt();
                }
            }
        }
    }

    handle.stop();
    Ok(())
}

async fn run(dispatcher: &ActionDispatcher, command: ConsoleCommand) -> eyre::Result<()> {
    let session = dispatcher.session();
    match command {
        ConsoleCommand::Action(action) => {
            ops::run(dispatcher, action).await?;
        }
        ConsoleCommand::Connect => ops::connect(session).await?,
        ConsoleCommand::Disconnect => ops::disconnect(session).await?,
        ConsoleCommand::Refresh => ops::status(dispatcher.poller(), session).await?,
        ConsoleCommand::Help => println!("{CONSOLE_HELP}"),
        ConsoleCommand::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OWNER: &str = "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7";

    #[test]
    fn parses_actions() {
        assert_eq!(
            parse_command("inc\n"),
            Ok(Some(ConsoleCommand::Action(Action::Increment)))
        );
        assert_eq!(
            parse_command("  decrement "),
            Ok(Some(ConsoleCommand::Action(Action::Decrement)))
        );
        assert_eq!(
            parse_command("set 15"),
            Ok(Some(ConsoleCommand::Action(Action::SetCounter(15))))
        );
        assert_eq!(
            parse_command("resume"),
            Ok(Some(ConsoleCommand::Action(Action::TogglePause)))
        );
        assert_eq!(
            parse_command(&format!("transfer {OWNER}")),
            Ok(Some(ConsoleCommand::Action(Action::TransferOwnership(
                OWNER.parse().unwrap()
            ))))
        );
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!(parse_command("connect"), Ok(Some(ConsoleCommand::Connect)));
        assert_eq!(parse_command("quit"), Ok(Some(ConsoleCommand::Quit)));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse_command("set -4"),
            Err("Please enter a valid number".to_string())
        );
        assert!(parse_command("set").is_err());
        assert!(parse_command("transfer nobody").is_err());
        assert!(parse_command("inc 2").is_err());
        assert!(parse_command("launch").is_err());
    }
}
