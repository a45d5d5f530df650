//! Line protocol spoken with the match driver.
//!
//! ```text
//! Init <width> <height> <len_1> ... <len_n>
//! Miss <x> <y>
//! Wound <x> <y>
//! Kill <x> <y>
//! ```
//!
//! Every input line is answered with one `<x> <y>` line naming the next
//! target. End of input ends the session.

use core::fmt;
use core::str::FromStr;
use std::io::{BufRead, Write};

use anyhow::Context;
use log::{info, warn};

use crate::ai::TargetingEngine;
use crate::common::ShotOutcome;
use crate::geometry::{Bounds, Point};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new match.
    Init { bounds: Bounds, fleet: Vec<usize> },
    /// Outcome of the previous target, with the coordinates the driver echoes.
    Report { outcome: ShotOutcome, at: Point },
}

/// Why an input line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber { field: &'static str, value: String },
    InvalidBoardSize { width: i32, height: i32 },
    InvalidShipLength(String),
    EmptyFleet,
    UnexpectedArgument(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Empty => write!(f, "empty line"),
            ProtocolError::UnknownCommand(cmd) => write!(f, "unknown command '{}'", cmd),
            ProtocolError::MissingArgument(field) => write!(f, "missing argument <{}>", field),
            ProtocolError::InvalidNumber { field, value } => {
                write!(f, "invalid <{}> '{}'", field, value)
            }
            ProtocolError::InvalidBoardSize { width, height } => {
                write!(f, "invalid board size {}x{}", width, height)
            }
            ProtocolError::InvalidShipLength(value) => {
                write!(f, "invalid ship length '{}'", value)
            }
            ProtocolError::EmptyFleet => write!(f, "Init names no ships"),
            ProtocolError::UnexpectedArgument(arg) => write!(f, "unexpected argument '{}'", arg),
        }
    }
}

impl std::error::Error for ProtocolError {}

fn parse_int<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
) -> Result<i32, ProtocolError> {
    let token = tokens.next().ok_or(ProtocolError::MissingArgument(field))?;
    token.parse().map_err(|_| ProtocolError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(ProtocolError::Empty)?;
        let outcome = match keyword {
            "Init" => {
                let width = parse_int(&mut tokens, "width")?;
                let height = parse_int(&mut tokens, "height")?;
                let bounds = Bounds::try_new(width, height)
                    .ok_or(ProtocolError::InvalidBoardSize { width, height })?;
                let fleet = tokens
                    .map(|t| match t.parse::<usize>() {
                        Ok(len) if len > 0 => Ok(len),
                        _ => Err(ProtocolError::InvalidShipLength(t.to_string())),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if fleet.is_empty() {
                    return Err(ProtocolError::EmptyFleet);
                }
                return Ok(Command::Init { bounds, fleet });
            }
            "Miss" => ShotOutcome::Miss,
            "Wound" => ShotOutcome::Wound,
            "Kill" => ShotOutcome::Kill,
            other => return Err(ProtocolError::UnknownCommand(other.to_string())),
        };
        let x = parse_int(&mut tokens, "x")?;
        let y = parse_int(&mut tokens, "y")?;
        if let Some(extra) = tokens.next() {
            return Err(ProtocolError::UnexpectedArgument(extra.to_string()));
        }
        Ok(Command::Report {
            outcome,
            at: Point::new(x, y),
        })
    }
}

/// Drives one [`TargetingEngine`] from protocol commands.
pub struct Session {
    engine: TargetingEngine,
    lines: usize,
}

impl Session {
    pub fn new(engine: TargetingEngine) -> Self {
        Self { engine, lines: 0 }
    }

    pub fn engine(&self) -> &TargetingEngine {
        &self.engine
    }

    /// Apply `command` and return the next target.
    ///
    /// Reports are applied to the engine's own last aim. Echoed coordinates
    /// that disagree with it are logged and otherwise ignored.
    pub fn handle(&mut self, command: Command) -> anyhow::Result<Point> {
        match command {
            Command::Init { bounds, fleet } => {
                info!("Init {} with fleet {:?}", bounds, fleet);
                self.engine.reset(bounds, &fleet);
            }
            Command::Report { outcome, at } => {
                if let Some(aim) = self.engine.last_aim() {
                    if aim != at {
                        warn!(
                            "{} reported at {} but last target was {}; using {}",
                            outcome, at, aim, aim
                        );
                    }
                }
                self.engine.record_outcome(outcome)?;
            }
        }
        Ok(self.engine.next_target()?)
    }

    /// Parse and apply one input line.
    pub fn handle_line(&mut self, line: &str) -> anyhow::Result<Point> {
        self.lines += 1;
        let command: Command = line
            .trim()
            .parse()
            .with_context(|| format!("line {}: '{}'", self.lines, line.trim_end()))?;
        self.handle(command)
            .with_context(|| format!("line {}: '{}'", self.lines, line.trim_end()))
    }

    /// Answer every line of `input` on `output` until end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            let target = self.handle_line(&line)?;
            writeln!(output, "{} {}", target.x, target.y).context("failed to write target")?;
            output.flush().context("failed to flush target")?;
        }
        info!("input closed after {} lines", self.lines);
        Ok(())
    }
}
