use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::debug;

use crate::board::{Board, Cell};
use crate::error::Result;
use crate::input::Command;
use crate::lifecycle::{DeathReason, Lifecycle};

const HEAD_CHAR: char = '@';
const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const WALL_CHAR: char = '#';

/// How long the key reader waits for an event before checking whether the
/// game is still on.
const INPUT_POLL: Duration = Duration::from_millis(50);

pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Redraws every cell. Snake cells flagged dead are drawn in red.
    pub fn draw_board(&mut self, board: &Board) -> Result<()> {
        for y in 0..board.height() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16))?;
            for x in 0..board.width() {
                let pos = board.pos(x as i32, y as i32);
                let cell = board.cell(pos);
                let color = match cell {
                    Cell::Head | Cell::Body if board.is_dead(pos) => Some(Color::Red),
                    Cell::Food => Some(Color::Green),
                    _ => None,
                };
                match color {
                    Some(color) => queue!(
                        self.stdout,
                        SetForegroundColor(color),
                        Print(cell_char(cell)),
                        ResetColor
                    )?,
                    None => queue!(self.stdout, Print(cell_char(cell)))?,
                }
            }
        }
        Ok(())
    }

    pub fn draw_game_over(&mut self, board: &Board, reason: DeathReason) -> Result<()> {
        let row = board.height() as u16 + 1;
        let reason = reason.to_string();
        self.print_centered(board.width(), row, "GAME OVER")?;
        self.print_centered(board.width(), row + 2, &reason)
    }

    /// Left-aligned lines starting at `row`, each cleared to the end of line.
    pub fn draw_lines(&mut self, row: u16, lines: &[String]) -> Result<()> {
        for (i, line) in lines.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, row + i as u16),
                terminal::Clear(ClearType::UntilNewLine),
                Print(line)
            )?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    fn print_centered(&mut self, width: usize, row: u16, text: &str) -> Result<()> {
        let col = width.saturating_sub(text.chars().count()) / 2;
        queue!(
            self.stdout,
            cursor::MoveTo(col as u16, row),
            terminal::Clear(ClearType::UntilNewLine),
            Print(text)
        )?;
        Ok(())
    }
}

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => ' ',
        Cell::Wall => WALL_CHAR,
        Cell::Head => HEAD_CHAR,
        Cell::Body => SNAKE_BODY_CHAR,
        Cell::Food => FOOD_CHAR,
    }
}

/// Key reader loop for the input thread.
///
/// Polls with a short timeout so it notices the end of the game on its own
/// and returns instead of having to be killed mid-read.
pub fn gather_input(lifecycle: Lifecycle) -> Result<()> {
    while lifecycle.is_running() {
        if !poll(INPUT_POLL)? {
            continue;
        }
        if let Event::Key(ev) = read()? {
            match Command::from_key(&ev) {
                Some(Command::Turn(dir)) => {
                    lifecycle.enqueue(dir);
                }
                Some(Command::Quit) => {
                    debug!("quit requested");
                    lifecycle.stop();
                }
                None => {}
            }
        }
    }
    Ok(())
}
