use rand::Rng;
use tracing::{debug, info, warn};

use crate::board::{Board, Cell};
use crate::config::Config;
use crate::error::{Result, SnakeError};
use crate::lifecycle::{DeathReason, Lifecycle, Status};
use crate::tempo::{Clock, Tempo};

/// What a single tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved: no direction yet, or the game is already over.
    Idle,
    Moved,
    Ate,
    Died(DeathReason),
    /// Food was eaten and there is nowhere left to put the next one.
    Stopped,
}

pub struct SnakeGame<R> {
    board: Board,
    tempo: Tempo,
    ticks: u64,
    rng: R,
    lifecycle: Lifecycle,
}

impl<R: Rng> SnakeGame<R> {
    /// Sets up a fresh board with its first piece of food.
    pub fn new(config: &Config, lifecycle: Lifecycle, rng: R) -> Result<Self> {
        config.validate()?;

        let mut game = SnakeGame {
            board: Board::new(config),
            tempo: Tempo::new(config.base_ticks_per_second, config.tempo_increment_per_food),
            ticks: 0,
            rng,
            lifecycle,
        };

        if let Err(SnakeError::NoSpace) = game.board.place_food(&mut game.rng) {
            warn!("board has no room for the first food");
            game.lifecycle.stop();
        }

        info!(
            width = config.width,
            height = config.height,
            tps = config.base_ticks_per_second,
            length = config.initial_snake_length,
            "new game"
        );
        Ok(game)
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.lifecycle.is_running() {
            return TickOutcome::Idle;
        }

        let dir = match self.lifecycle.apply_next_turn() {
            Some(dir) => dir,
            None => return TickOutcome::Idle,
        };

        self.ticks += 1;

        // The previous head is always inside the wall ring, so one step away
        // is still on the grid.
        let (dx, dy) = dir.delta();
        let (x, y) = self.board.head();
        let (x, y) = (x + dx, y + dy);
        self.board.set_head((x, y));

        let head = self.board.pos(x, y);
        self.board.record(head);
        let neck = self.board.history(1);
        let tail = self.board.history(self.board.snake_length());

        if !self.board.is_in_bounds(x, y) {
            return self.die(DeathReason::WallCollision);
        }
        // The tail leaves its cell this very tick, so following it is fine.
        if self.board.cell(head) == Cell::Body && Some(head) != tail {
            return self.die(DeathReason::SelfCollision);
        }

        let ate = self.board.cell(head) == Cell::Food;
        // After a meal the tail lookup lands on the cell vacated last tick,
        // which may hold fresh food by now.
        if let Some(tail) = tail {
            if tail != head && self.board.cell(tail).is_snake() {
                self.board.set_cell(tail, Cell::Empty);
            }
        }
        self.board.set_cell(head, Cell::Head);
        if let Some(neck) = neck {
            if self.board.cell(neck) == Cell::Head {
                self.board.set_cell(neck, Cell::Body);
            }
        }

        if !ate {
            return TickOutcome::Moved;
        }

        self.tempo.speed_up();
        self.board.grow();
        debug!(
            length = self.board.snake_length(),
            tps = self.tempo.ticks_per_second(),
            "food eaten"
        );

        match self.board.place_food(&mut self.rng) {
            Ok(_) => TickOutcome::Ate,
            Err(_) => {
                info!(ticks = self.ticks, "board is full");
                self.lifecycle.stop();
                TickOutcome::Stopped
            }
        }
    }

    fn die(&mut self, reason: DeathReason) -> TickOutcome {
        self.lifecycle.die(reason);
        TickOutcome::Died(reason)
    }

    /// Runs ticks on `clock` until the game ends, calling `render` after
    /// each one.
    pub fn run<F>(&mut self, clock: &mut Clock, mut render: F) -> Result<Status>
    where
        F: FnMut(&Self) -> Result<()>,
    {
        while self.lifecycle.is_running() {
            clock.wait(self.tempo.tick_interval());
            self.tick();
            if let Err(err) = render(&*self) {
                self.lifecycle.stop();
                return Err(err);
            }
        }
        Ok(self.lifecycle.status())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn tempo(&self) -> &Tempo {
        &self.tempo
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}
