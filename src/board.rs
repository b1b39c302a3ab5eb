//! The grid and everything the snake leaves on it.
//!
//! Positions are linear indices `y * width + x`. The snake's body is never
//! stored as a list: it is the newest `snake_length` entries of a position
//! history ring sized to the whole grid.

use rand::Rng;

use crate::config::Config;
use crate::error::{Result, SnakeError};
use crate::ring::RingBuffer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Head,
    Body,
    Food,
}

impl Cell {
    pub fn is_snake(self) -> bool {
        matches!(self, Cell::Head | Cell::Body)
    }
}

#[derive(Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    dead: Vec<bool>,
    history: RingBuffer<usize>,
    snake_length: usize,
    initial_length: usize,
    head: (i32, i32),
    // Scratch space for food placement, sized once so ticks never allocate.
    free_cells: Vec<usize>,
}

impl Board {
    /// Builds an initialized board: walls stamped, head in the center.
    pub fn new(config: &Config) -> Self {
        let len = config.cell_count();
        let mut board = Board {
            width: config.width,
            height: config.height,
            cells: vec![Cell::Empty; len],
            dead: vec![false; len],
            history: RingBuffer::new(len),
            snake_length: config.initial_snake_length,
            initial_length: config.initial_snake_length,
            head: (0, 0),
            free_cells: Vec::with_capacity(len),
        };
        board.initialize();
        board
    }

    /// Resets every cell, the death flags and the position history, and puts
    /// the head at the center.
    pub fn initialize(&mut self) {
        let center = (((self.width - 1) / 2) as i32, ((self.height - 1) / 2) as i32);
        self.head = center;
        self.snake_length = self.initial_length;
        self.history.reset();

        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = if (x, y) == center {
                    Cell::Head
                } else if !self.is_in_bounds(x, y) {
                    Cell::Wall
                } else {
                    Cell::Empty
                };
                let pos = self.pos(x, y);
                self.cells[pos] = cell;
                self.dead[pos] = false;
            }
        }

        let start = self.pos(center.0, center.1);
        self.history.record(start);
    }

    /// Puts food on a uniformly chosen empty cell and returns its position.
    /// Fails with [`SnakeError::NoSpace`] when the board is full.
    pub fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        self.free_cells.clear();
        for (pos, cell) in self.cells.iter().enumerate() {
            if *cell == Cell::Empty {
                self.free_cells.push(pos);
            }
        }

        if self.free_cells.is_empty() {
            return Err(SnakeError::NoSpace);
        }

        let pos = self.free_cells[rng.gen_range(0..self.free_cells.len())];
        self.cells[pos] = Cell::Food;
        Ok(pos)
    }

    /// True strictly inside the wall ring.
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 1 && x < self.width as i32 - 1 && y >= 1 && y < self.height as i32 - 1
    }

    /// Linear index of `(x, y)`. Callers keep coordinates on the grid; the
    /// wall ring guarantees the head never steps past it.
    pub fn pos(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }

    pub fn coords(&self, pos: usize) -> (i32, i32) {
        ((pos % self.width) as i32, (pos / self.width) as i32)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn set_cell(&mut self, pos: usize, cell: Cell) {
        self.cells[pos] = cell;
    }

    pub fn is_dead(&self, pos: usize) -> bool {
        self.dead[pos]
    }

    pub fn mark_dead(&mut self, pos: usize) {
        self.dead[pos] = true;
    }

    pub fn head(&self) -> (i32, i32) {
        self.head
    }

    pub fn set_head(&mut self, head: (i32, i32)) {
        self.head = head;
    }

    pub fn snake_length(&self) -> usize {
        self.snake_length
    }

    /// Lengthens the snake by one, keeping the tail inside the history.
    pub fn grow(&mut self) {
        if self.snake_length + 1 < self.history.capacity() {
            self.snake_length += 1;
        }
    }

    pub fn record(&mut self, pos: usize) {
        self.history.record(pos);
    }

    /// Position the head held `distance` moves ago, if any.
    pub fn history(&self, distance: usize) -> Option<usize> {
        self.history.query(distance)
    }

    /// Number of history entries written so far, capped at the grid size.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Cells currently showing the snake, head included.
    pub fn snake_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_snake()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small(width: usize, height: usize) -> Config {
        Config { width, height, initial_snake_length: 3, ..Config::default() }
    }

    #[test]
    fn initialize_stamps_walls_and_center_head() {
        let board = Board::new(&Config::default());
        assert_eq!(board.head(), (10, 10));
        assert_eq!(board.cell(board.pos(10, 10)), Cell::Head);
        for i in 0..21 {
            assert_eq!(board.cell(board.pos(i, 0)), Cell::Wall);
            assert_eq!(board.cell(board.pos(i, 20)), Cell::Wall);
            assert_eq!(board.cell(board.pos(0, i)), Cell::Wall);
            assert_eq!(board.cell(board.pos(20, i)), Cell::Wall);
        }
        assert_eq!(board.cell(board.pos(1, 1)), Cell::Empty);
        assert_eq!(board.snake_length(), 300);
        assert_eq!(board.history(0), Some(board.pos(10, 10)));
        assert_eq!(board.history(1), None);
        assert_eq!(board.snake_cells(), 1);
    }

    #[test]
    fn bounds_exclude_wall_ring() {
        let board = Board::new(&small(5, 4));
        assert!(board.is_in_bounds(1, 1));
        assert!(board.is_in_bounds(3, 2));
        assert!(!board.is_in_bounds(0, 1));
        assert!(!board.is_in_bounds(4, 1));
        assert!(!board.is_in_bounds(1, 3));
        assert!(!board.is_in_bounds(-1, -1));
    }

    #[test]
    fn food_only_lands_on_empty_cells() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut board = Board::new(&small(6, 6));
        for _ in 0..15 {
            let pos = board.place_food(&mut rng).unwrap();
            assert_eq!(board.cell(pos), Cell::Food);
        }
        // 16 interior cells: 1 head, 15 food.
        assert!(matches!(board.place_food(&mut rng), Err(SnakeError::NoSpace)));
        assert_eq!(board.cells().iter().filter(|c| **c == Cell::Food).count(), 15);
        assert_eq!(board.cells().iter().filter(|c| **c == Cell::Wall).count(), 20);
    }

    #[test]
    fn reinitialize_clears_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut board = Board::new(&small(5, 5));
        board.place_food(&mut rng).unwrap();
        board.mark_dead(board.pos(2, 2));
        board.grow();
        board.initialize();
        assert_eq!(board.snake_length(), 3);
        assert!(!board.is_dead(board.pos(2, 2)));
        assert_eq!(board.cells().iter().filter(|c| **c == Cell::Food).count(), 0);
    }

    #[test]
    fn growth_stops_short_of_history_capacity() {
        let mut board = Board::new(&Config { width: 3, height: 3, initial_snake_length: 7, ..Config::default() });
        board.grow();
        assert_eq!(board.snake_length(), 8);
        board.grow();
        assert_eq!(board.snake_length(), 8);
    }

    #[test]
    fn coords_round_trip() {
        let board = Board::new(&small(7, 5));
        let pos = board.pos(3, 4);
        assert_eq!(pos, 31);
        assert_eq!(board.coords(pos), (3, 4));
    }
}
