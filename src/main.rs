//! Headless puzzle runner (default binary).
//!
//! Loads a level file, then drives the session with line-delimited JSON
//! intent messages read from stdin, writing ack/error/observation lines to
//! stdout. Rendering and input devices are the host's concern; this binary is
//! the reference host for the protocol.

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use log::info;

use pentomino::adapter::{parse_level, GameAdapter, Outbound};
use pentomino::core::GameSession;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let level_path = args
        .next()
        .ok_or_else(|| anyhow!("usage: pentomino <level.json>"))?;

    let json =
        fs::read_to_string(&level_path).with_context(|| format!("reading {}", level_path))?;
    let def = parse_level(&json)?;
    let session = GameSession::new(&def)
        .map_err(|e| anyhow!("level failed to load: {}", e.message()))?;
    let mut adapter = GameAdapter::new(session);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Initial observation so the host can draw before the first intent.
    let first = Outbound::Observation(adapter.observation());
    writeln!(out, "{}", first.to_json()?)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let solved_before = adapter.session().solved();
        for message in adapter.handle_line(&line) {
            writeln!(out, "{}", message.to_json()?)?;
        }
        out.flush()?;
        if !solved_before && adapter.session().solved() {
            info!("level solved");
        }
    }

    Ok(())
}
