use crate::engine::{Engine, MoveOutcome};
use crate::game::MoveError;
use crate::persistence::SnapshotStore;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App<S> {
    engine: Engine<S>,
    cursor: (usize, usize),
    should_quit: bool,
    message: Option<String>,
}

impl<S: SnapshotStore> App<S> {
    pub fn new(engine: Engine<S>) -> Self {
        let size = engine.state().size();
        App {
            engine,
            cursor: (size.width / 2, size.height / 2), // Start in middle
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Up => self.move_cursor(0, -1),
            KeyCode::Down => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place_piece();
            }
            KeyCode::Char('r') => match self.engine.reset() {
                Ok(()) => {
                    self.clamp_cursor();
                    self.message = Some("New game started!".to_string());
                }
                Err(e) => self.report(e),
            },
            KeyCode::Char('l') => match self.engine.load() {
                Ok(true) => {
                    self.clamp_cursor();
                    self.message = Some("Saved game loaded.".to_string());
                }
                Ok(false) => self.message = Some("No saved game found.".to_string()),
                Err(e) => self.report(e),
            },
            _ => {}
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let size = self.engine.state().size();
        let (x, y) = self.cursor;
        self.cursor = (
            x.saturating_add_signed(dx).min(size.width - 1),
            y.saturating_add_signed(dy).min(size.height - 1),
        );
    }

    /// A loaded game may have a smaller board than the current one
    fn clamp_cursor(&mut self) {
        self.move_cursor(0, 0);
    }

    /// Place a piece under the cursor
    fn place_piece(&mut self) {
        let (x, y) = self.cursor;
        match self.engine.make_move(x as i64, y as i64) {
            Ok(MoveOutcome::Accepted(placement)) => {
                if let Some(winner) = placement.winner {
                    let name = &self.engine.state().player(winner).name;
                    self.message = Some(format!("{name} wins!"));
                } else if self.engine.state().board().is_full() {
                    self.message = Some("Board is full! Press 'r' to restart.".to_string());
                }
            }
            Ok(MoveOutcome::Rejected(MoveError::GameOver)) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            Ok(MoveOutcome::Rejected(MoveError::Occupied { .. })) => {
                self.message = Some("Cell is taken!".to_string());
            }
            Ok(MoveOutcome::Rejected(MoveError::OutOfBounds { .. })) => {
                self.message = Some("Off the board!".to_string());
            }
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, err: crate::error::StoreError) {
        tracing::error!(error = %err, "snapshot store failed");
        self.message = Some(format!("Save file error: {err}"));
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, self.engine.state(), self.cursor, &self.message);
    }
}
