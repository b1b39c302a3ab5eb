//! Game constants.
//!
//! The defaults reproduce the classic 21x21 board. Every value can be
//! overridden from the command line, so they live in a plain struct rather
//! than in `const` items.

use crate::error::{Result, SnakeError};

/// Slowest and fastest starting tempo accepted, in ticks per second.
pub const MIN_TICKS_PER_SECOND: f64 = 0.1;
pub const MAX_TICKS_PER_SECOND: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Board width in cells, wall ring included.
    pub width: usize,
    /// Board height in cells, wall ring included.
    pub height: usize,
    /// Tempo at the start of every game.
    pub base_ticks_per_second: f64,
    /// Added to the tempo each time food is eaten.
    pub tempo_increment_per_food: f64,
    /// Number of history entries the snake covers before it has eaten anything.
    ///
    /// The visible body grows from one cell up to this length as the snake
    /// moves, so a large value makes the snake stretch out across the board.
    pub initial_snake_length: usize,
    /// Pending direction changes kept between ticks; extra key presses are dropped.
    pub input_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 21,
            height: 21,
            base_ticks_per_second: 5.0,
            tempo_increment_per_food: 0.333,
            initial_snake_length: 300,
            input_queue_capacity: 3,
        }
    }
}

impl Config {
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(invalid(format!(
                "board must be at least 3x3 to have an interior, got {}x{}",
                self.width, self.height
            )));
        }
        let tps = self.base_ticks_per_second;
        if !(MIN_TICKS_PER_SECOND..=MAX_TICKS_PER_SECOND).contains(&tps) {
            return Err(invalid(format!(
                "base tempo must be between {} and {} ticks per second, got {}",
                MIN_TICKS_PER_SECOND, MAX_TICKS_PER_SECOND, tps
            )));
        }
        if !self.tempo_increment_per_food.is_finite() || self.tempo_increment_per_food < 0.0 {
            return Err(invalid(format!(
                "tempo increment must not be negative, got {}",
                self.tempo_increment_per_food
            )));
        }
        if self.initial_snake_length == 0 {
            return Err(invalid("initial snake length must be at least 1".to_string()));
        }
        // The tail sits `initial_snake_length` entries back in a history of
        // `cell_count()` slots, so it has to fit strictly inside.
        if self.initial_snake_length >= self.cell_count() {
            return Err(invalid(format!(
                "initial snake length {} does not fit a {}x{} board",
                self.initial_snake_length, self.width, self.height
            )));
        }
        if self.input_queue_capacity == 0 {
            return Err(invalid("input queue capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> SnakeError {
    SnakeError::InvalidConfig(msg)
}
