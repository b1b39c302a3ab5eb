use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ring::RingBuffer;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// What a key press asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

impl Direction {
    pub fn from_char(ch: char) -> Option<Direction> {
        match ch {
            'w' => Some(Up),
            'a' => Some(Left),
            's' => Some(Down),
            'd' => Some(Right),
            _ => None,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Up | Down => Axis::Vertical,
            Left | Right => Axis::Horizontal,
        }
    }

    /// Cell offset of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// A new direction is only taken if it leaves the current axis of travel.
    /// Reversing onto the neck and repeating the current heading are both
    /// refused. Any direction is accepted before the snake has one.
    pub fn is_turn_from(self, current: Option<Direction>) -> bool {
        match current {
            None => true,
            Some(dir) => dir.axis() != self.axis(),
        }
    }
}

impl Command {
    pub fn from_key(ev: &KeyEvent) -> Option<Command> {
        match ev {
            KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL } => Some(Command::Quit),
            KeyEvent { code, modifiers: _ } => match code {
                KeyCode::Up => Some(Command::Turn(Up)),
                KeyCode::Left => Some(Command::Turn(Left)),
                KeyCode::Down => Some(Command::Turn(Down)),
                KeyCode::Right => Some(Command::Turn(Right)),
                KeyCode::Char('x') | KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
                KeyCode::Char(ch) => Direction::from_char(*ch).map(Command::Turn),
                _ => None,
            },
        }
    }
}

/// Pending direction changes, oldest first.
///
/// Not synchronized on its own: it lives inside the shared game state and is
/// only touched while that lock is held.
#[derive(Debug)]
pub struct InputQueue {
    ring: RingBuffer<Direction>,
}

impl InputQueue {
    pub fn new(capacity: usize) -> Self {
        InputQueue { ring: RingBuffer::new(capacity) }
    }

    /// Returns `false` when the queue is full and the key press was dropped.
    pub fn enqueue(&mut self, dir: Direction) -> bool {
        self.ring.push(dir)
    }

    pub fn has_pending(&self) -> bool {
        !self.ring.is_empty()
    }

    pub fn dequeue(&mut self) -> Option<Direction> {
        self.ring.pop().ok()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn clear(&mut self) {
        while self.dequeue().is_some() {}
    }
}
