//! Terminal snake on a fixed-size grid.
//!
//! The simulation core is free of terminal I/O: [`game::SnakeGame`] advances
//! a [`board::Board`] one tick at a time, taking direction changes from the
//! shared [`lifecycle::Lifecycle`] that a separate key-reading thread feeds.
//! The snake's body is the tail end of a position history kept in a
//! fixed-capacity [`ring::RingBuffer`].

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod lifecycle;
pub mod ring;
pub mod tempo;
pub mod term;

pub use error::{Result, SnakeError};
