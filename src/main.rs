/* main.rs
 *
 * Copyright 2026 emviolet
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 *
 * SPDX-License-Identifier: GPL-3.0-or-later
 */

//! Headless Klondike player: follows the engine's own hints on seeded deals
//! and reports how far that gets.

use std::collections::HashSet;
use std::process::ExitCode;

use clap::Parser;
use klondike_engine::engine::{Hint, Session};
use klondike_engine::game::MoveTally;
use klondike_engine::{DrawMode, GameConfig};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "klondike-sim")]
#[command(about = "Play seeded Klondike deals by following the hint engine")]
struct Args {
    /// Seed of the first deal; later games use consecutive seeds
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of games to play
    #[arg(short, long, default_value_t = 100)]
    games: u32,

    /// Cards per draw (1 or 3)
    #[arg(long, default_value_t = 3)]
    draw: u8,

    /// Give up on a game after this many actions
    #[arg(long, default_value_t = 2_000)]
    max_actions: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Finish {
    Won,
    Stuck,
    Exhausted,
}

#[derive(Debug, Clone, Serialize)]
struct GameReport {
    seed: u64,
    finish: Finish,
    moves: u32,
    actions: u32,
    foundation_cards: usize,
}

#[derive(Debug, Serialize)]
struct Summary {
    games: u32,
    draw: u8,
    won: usize,
    stuck: usize,
    exhausted: usize,
    win_rate_percent: Option<u32>,
    reports: Vec<GameReport>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(draw_mode) = DrawMode::from_count(args.draw) else {
        eprintln!("unsupported --draw {}, expected 1 or 3", args.draw);
        return ExitCode::FAILURE;
    };
    let config = GameConfig::new(draw_mode);

    let mut session = Session::with_seed(config.clone(), args.seed);
    let mut reports = Vec::with_capacity(args.games as usize);
    for offset in 0..u64::from(args.games) {
        let seed = args.seed.wrapping_add(offset);
        if offset > 0 {
            session.new_game_with_seed(config.clone(), seed);
        }
        let report = play(&mut session, args.max_actions);
        debug!(seed, finish = ?report.finish, moves = report.moves, "game finished");
        reports.push(report);
    }

    let count = |finish: Finish| reports.iter().filter(|r| r.finish == finish).count();
    let summary = Summary {
        games: args.games,
        draw: args.draw,
        won: count(Finish::Won),
        stuck: count(Finish::Stuck),
        exhausted: count(Finish::Exhausted),
        win_rate_percent: session.stats().win_rate_percent(),
        reports,
    };
    info!(won = summary.won, games = summary.games, "simulation complete");

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to encode summary: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Plays the current deal to a win, a stuck position, or the action cap.
///
/// Non-progressive shuffles that lead back to an already seen layout are
/// replaced by a draw so two columns cannot trade a run forever.
fn play(session: &mut Session, max_actions: u32) -> GameReport {
    let mut seen = HashSet::new();
    let mut actions = 0;
    let finish = loop {
        if session.pending_autocomplete().is_some() {
            session.run_autocomplete();
        }
        if session.is_won() {
            break Finish::Won;
        }
        if actions >= max_actions {
            break Finish::Exhausted;
        }
        seen.insert(session.game().board_hash());
        actions += 1;

        match session.hint() {
            Hint::Move(hint) => {
                let revisits = !hint.progressive && {
                    let mut preview = session.game().clone();
                    preview
                        .move_cards(hint.count, hint.from, hint.to, MoveTally::Uncounted)
                        .is_ok()
                        && seen.contains(&preview.board_hash())
                };
                if revisits {
                    if !session.draw().changed() {
                        break Finish::Stuck;
                    }
                } else if !session
                    .attempt_move(hint.source_card_id(), hint.from, hint.to)
                    .accepted
                {
                    break Finish::Stuck;
                }
            }
            Hint::StockCanHelp => {
                if !session.draw().changed() {
                    break Finish::Stuck;
                }
            }
            Hint::Stuck => break Finish::Stuck,
        }
    };
    session.take_events();

    GameReport {
        seed: session.seed(),
        finish,
        moves: session.moves(),
        actions,
        foundation_cards: session.game().foundations().iter().map(Vec::len).sum(),
    }
}
