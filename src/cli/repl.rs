//! `choco repl`: an interactive stand-in for the popup.
//!
//! Every input line is a new query text, fed through the debouncer. Lines
//! starting with `:` are commands:
//!
//! - `:open N` opens result `N` (search engines switch to keyword mode)
//! - `:cancel` leaves search engine mode
//! - `:quit` exits

use std::io::BufRead;

use tokio::sync::mpsc;

use crate::core::debounce::Debouncer;
use crate::core::search::now_millis;
use crate::core::{Search, SearchSession};
use crate::executor::OpenAction;
use crate::preferences::PreferencesStore;

use super::search::render;
use super::Context;

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Query(String),
    Open(usize),
    Cancel,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Input::Query(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("open" | "o"), Some(index)) => match index.parse() {
            Ok(index) => Input::Open(index),
            Err(_) => Input::Unknown(line.to_string()),
        },
        (Some("open" | "o"), None) => Input::Open(0),
        (Some("cancel" | "c"), None) => Input::Cancel,
        (Some("quit" | "q"), None) => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

/// Read stdin on a plain thread; the channel closes at EOF.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
    });

    rx
}

fn show(session: &SearchSession, show_category_name: bool) {
    if let Some(engine) = session.mode().engine() {
        println!("[{}] {}", engine.name, session.text());
    }

    match session.empty_state() {
        Some(state) => println!("{}", state.message()),
        None => print!("{}", render(session.results(), show_category_name, now_millis())),
    }
}

pub async fn run(ctx: &Context) -> anyhow::Result<()> {
    let search = Search::new(&ctx.platform);
    let show_category_name = PreferencesStore::new(ctx.platform.storage.clone())
        .get()
        .await?
        .display_and_behavior
        .show_category_name;

    let mut session = SearchSession::new(search.clone());
    let (debouncer, mut queries) = Debouncer::spawn(ctx.config.debounce());
    let (results_tx, mut results) = mpsc::unbounded_channel();
    let mut lines = spawn_stdin_reader();

    session.update(String::new()).await?;
    show(&session, show_category_name);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };

                match parse_input(&line) {
                    Input::Query(text) => {
                        debouncer.push(text);
                    }
                    Input::Open(index) => {
                        let action = session
                            .open(index, ctx.config.repl.keep_open, ctx.browser.as_ref())
                            .await?;
                        match action {
                            Some(OpenAction::EnterEngineMode(_)) => show(&session, show_category_name),
                            Some(action) => println!("{:?}", action),
                            None => println!("No result {}", index),
                        }
                    }
                    Input::Cancel => {
                        if session.cancel().await? {
                            show(&session, show_category_name);
                        }
                    }
                    Input::Quit => break,
                    Input::Unknown(line) => println!("Unknown command: {}", line),
                }
            }
            Some(text) = queries.recv() => {
                let ticket = session.dispatch(text);
                let search = search.clone();
                let results_tx = results_tx.clone();

                tokio::spawn(async move {
                    let outcome = ticket.run(&search).await;
                    let _ = results_tx.send((ticket.seq, outcome));
                });
            }
            Some((seq, outcome)) = results.recv() => match outcome {
                Ok(items) => {
                    if session.apply(seq, items) {
                        show(&session, show_category_name);
                    }
                }
                Err(e) => tracing::warn!(seq, error = %e, "search failed"),
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("rust book"), Input::Query("rust book".into()));
        assert_eq!(parse_input(""), Input::Query(String::new()));
        assert_eq!(parse_input(":open 3"), Input::Open(3));
        assert_eq!(parse_input(":o"), Input::Open(0));
        assert_eq!(parse_input(" :cancel "), Input::Cancel);
        assert_eq!(parse_input(":q"), Input::Quit);
        assert_eq!(parse_input(":open x"), Input::Unknown(":open x".into()));
        assert_eq!(parse_input(":nope"), Input::Unknown(":nope".into()));
    }
}
