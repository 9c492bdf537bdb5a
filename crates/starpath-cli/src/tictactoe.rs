//! The `tictactoe` command: a terminal match against the evaluator.
//!
//! The evaluator plays its adjudicated best move; when the horizon
//! leaves a position unresolved it falls back to a random legal move,
//! matching the reference player's behavior.

use anyhow::{anyhow, Result};
use colored::Colorize;
use rand::seq::SliceRandom;

use starpath_tictactoe::{best_move, Action, Board, Evaluation, Player, DEFAULT_DEPTH};

use crate::prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Side {
    X,
    O,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::X => write!(f, "x"),
            Side::O => write!(f, "o"),
        }
    }
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

pub fn cmd_tictactoe(side: Side) -> Result<()> {
    let human: Player = side.into();
    let mut board = Board::empty();
    println!("You are {human}. Enter moves as 'row col' (0-2).");

    while !board.is_terminal() {
        println!("\n{board}\n");
        let action = if board.player_to_move() == human {
            read_move()?
        } else {
            let action = engine_move(&board)?;
            println!("Evaluator plays {} {}", action.row, action.col);
            action
        };

        match board.apply(action) {
            Ok(next) => board = next,
            Err(err) => eprintln!("{} {err}", "error:".red().bold()),
        }
    }

    println!("\n{board}\n");
    match board.winner() {
        Some(winner) if winner == human => println!("{}", "You win.".green().bold()),
        Some(winner) => println!("{}", format!("{winner} wins.").red().bold()),
        None => println!("Draw."),
    }
    Ok(())
}

fn read_move() -> Result<Action> {
    loop {
        let line = prompt("Your move: ")?;
        let mut parts = line.split_whitespace();
        match (
            parts.next().and_then(|p| p.parse().ok()),
            parts.next().and_then(|p| p.parse().ok()),
        ) {
            (Some(row), Some(col)) => return Ok(Action { row, col }),
            _ => eprintln!("{} expected 'row col'", "error:".red().bold()),
        }
    }
}

fn engine_move(board: &Board) -> Result<Action> {
    match best_move(board, DEFAULT_DEPTH) {
        Evaluation::Adjudicated { action, .. } => Ok(action),
        Evaluation::Unresolved => board
            .actions()
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or_else(|| anyhow!("no legal moves on a non-terminal board")),
    }
}
