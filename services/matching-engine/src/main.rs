//! Thin stdin driver for the matching engine
//!
//! Translates line commands into engine calls and echoes trades as JSON
//! lines. See `feed` for the command grammar.

mod feed;

use std::io::{self, BufRead, Write};

use matching_engine::MatchingEngine;

use crate::feed::Command;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let engine = MatchingEngine::new();
    tracing::info!("matching engine ready, reading commands from stdin");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match feed::parse(&line) {
            Ok(Command::Add(order)) => {
                for trade in engine.add_order(order) {
                    writeln!(out, "{}", serde_json::to_string(&trade)?)?;
                }
            }
            Ok(Command::Cancel(order_id)) => engine.cancel_order(order_id),
            Ok(Command::Modify(modify)) => {
                for trade in engine.modify_order(modify) {
                    writeln!(out, "{}", serde_json::to_string(&trade)?)?;
                }
            }
            Ok(Command::Size) => writeln!(out, "{}", engine.size())?,
            Ok(Command::Depth) => {
                writeln!(out, "{}", serde_json::to_string(&engine.snapshot())?)?;
            }
            Err(err) => tracing::warn!(%err, line, "dropping bad command"),
        }
    }
    Ok(())
}
