//! State shared between the key reader and the simulation loop, and the
//! sequencing of the death animation.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{info, trace};

use crate::board::Board;
use crate::error::Result;
use crate::input::{Direction, InputQueue};
use crate::tempo::Clock;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathReason::WallCollision => write!(f, "Ran head first into the wall."),
            DeathReason::SelfCollision => write!(f, "Bit its own tail."),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Dead(DeathReason),
    /// Quit by the player, or no room left for food.
    Stopped,
}

#[derive(Debug)]
struct Shared {
    running: bool,
    death: Option<DeathReason>,
    direction: Option<Direction>,
    inputs: InputQueue,
}

/// Cloneable handle to the shared game state. Every field sits behind one
/// mutex and each method holds it only for a few field accesses.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    shared: Arc<Mutex<Shared>>,
}

impl Lifecycle {
    pub fn new(input_capacity: usize) -> Self {
        let shared = Shared {
            running: true,
            death: None,
            direction: None,
            inputs: InputQueue::new(input_capacity),
        };
        Lifecycle { shared: Arc::new(Mutex::new(shared)) }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        // No method can leave the state half-written, so a poisoned lock is safe to reuse.
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_running(&self) -> bool {
        let shared = self.lock();
        shared.running && shared.death.is_none()
    }

    pub fn status(&self) -> Status {
        let shared = self.lock();
        match shared.death {
            Some(reason) => Status::Dead(reason),
            None if shared.running => Status::Running,
            None => Status::Stopped,
        }
    }

    /// Ends the game without a death.
    pub fn stop(&self) {
        self.lock().running = false;
        info!("game stopped");
    }

    /// Records the cause of death. The first cause sticks.
    pub fn die(&self, reason: DeathReason) {
        let mut shared = self.lock();
        if shared.death.is_none() {
            shared.death = Some(reason);
            info!(%reason, "snake died");
        }
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.lock().death
    }

    pub fn direction(&self) -> Option<Direction> {
        self.lock().direction
    }

    /// Queues a direction key. Dropped silently when the queue is full.
    pub fn enqueue(&self, dir: Direction) -> bool {
        let accepted = self.lock().inputs.enqueue(dir);
        if accepted {
            trace!(?dir, "queued input");
        } else {
            trace!(?dir, "input queue full, dropped");
        }
        accepted
    }

    pub fn has_pending(&self) -> bool {
        self.lock().inputs.has_pending()
    }

    /// Drains the input queue up to the first direction that leaves the
    /// current axis, makes it the new direction and throws the rest away.
    /// Returns the direction to move in this tick.
    pub fn apply_next_turn(&self) -> Option<Direction> {
        let mut shared = self.lock();
        while let Some(dir) = shared.inputs.dequeue() {
            if dir.is_turn_from(shared.direction) {
                trace!(?dir, "turn accepted");
                shared.direction = Some(dir);
                shared.inputs.clear();
                break;
            }
        }
        shared.direction
    }
}

/// Walks the dead snake from head to tail, flagging one history entry per step.
#[derive(Debug)]
pub struct Reveal {
    progress: usize,
    length: usize,
}

impl Reveal {
    pub fn new(board: &Board) -> Self {
        Reveal { progress: 0, length: board.snake_length() }
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn is_done(&self) -> bool {
        self.progress > self.length
    }

    /// Flags the next history entry. Returns `false` once offsets
    /// `0..=snake_length` have all been visited.
    pub fn step(&mut self, board: &mut Board) -> bool {
        if self.is_done() {
            return false;
        }
        if let Some(pos) = board.history(self.progress) {
            board.mark_dead(pos);
        }
        self.progress += 1;
        true
    }

    /// Plays the whole reveal, waiting `interval` on `clock` before each step
    /// and handing the board to `render` after it.
    pub fn run<F>(&mut self, board: &mut Board, clock: &mut Clock, interval: Duration, mut render: F) -> Result<()>
    where
        F: FnMut(&Board, usize) -> Result<()>,
    {
        while !self.is_done() {
            clock.wait(interval);
            self.step(board);
            render(board, self.progress)?;
        }
        Ok(())
    }
}
