//! Procedural generation of perfect mazes for a grid-based chase game.
//!
//! A maze lives on an odd-sized grid whose cells at odd coordinates form the lattice of rooms;
//! walls between neighbouring rooms are the connectors that carving opens. Every generated maze is
//! perfect: each pair of open rooms is joined by exactly one simple path. Start and exit markers
//! are placed in opposite corners, enemy spawns are scattered over the remaining paths, and the
//! result round-trips through a JSON save format.
//!
//! [`generate`] runs the whole pipeline for a [`MazeRequest`]; [`MazeBuilder`] exposes the
//! individual steps, and [`LevelConfig`] maps the game's level numbers to requests.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod analysis;
pub mod builder;
pub mod cell;
pub mod chooser;
pub mod cli;
pub mod codec;
pub mod context;
pub mod error;
pub mod grid;
pub mod level;

mod app;
mod events;
mod ui;

pub use builder::{generate, Algorithm, MazeBuilder, MazeRequest};
pub use cell::Cell;
pub use context::GenerationContext;
pub use error::{MazeError, MissingMarkers, Result};
pub use grid::{Grid, Pos};
pub use level::{generate_level, LevelConfig, LevelPlan};
