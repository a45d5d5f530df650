mod ai;
mod board;
mod cellset;
mod common;
mod config;
mod game;
pub mod geometry;
mod logging;
pub mod protocol;
mod ship;

pub use ai::*;
pub use board::*;
pub use cellset::CellSet;
pub use common::*;
pub use config::*;
pub use game::*;
pub use geometry::{Bounds, Orientation, Point};
pub use logging::init_logging;
pub use protocol::{Command, ProtocolError, Session};
pub use ship::*;
