//! TUI (Terminal User Interface) frontend
//!
//! Renders the game with Ratatui and feeds key presses back to the game loop.
//!
//! # Architecture
//! - `TuiInterface` owns the terminal and implements [`GameInterface`].
//! - Rendering is a pure function of the [`Game`] plus two message strings,
//!   so it can be exercised against a `TestBackend`.
//!
//! # Keys
//! - While playing: letters type, `BACKSPACE` deletes, `ENTER` submits.
//! - After the game ends: `N` starts a new game.
//! - `ESC` quits at any time.

use crate::evaluator::{LetterStatus, Row};
use crate::game_state::{Game, GameInterface, GameStatus, Key, Transition, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Background and foreground for a letter cell.
fn status_colors(status: LetterStatus) -> (Color, Color) {
    match status {
        LetterStatus::Unknown => (Color::DarkGray, Color::White),
        LetterStatus::Correct => (Color::Green, Color::Black),
        LetterStatus::Present => (Color::Yellow, Color::Black),
        LetterStatus::Absent => (Color::Gray, Color::White),
    }
}

/// Map a terminal key event to a player action.
fn action_for_key(key: KeyEvent, game_over: bool) -> Option<UserAction> {
    // Only Press events; Release and Repeat would double the input
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    {
        debug_log!("action_for_key() - Ignoring key with modifier: {:?}", key.modifiers);
        return None;
    }

    match key.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Char('n' | 'N') if game_over => Some(UserAction::NewGame),
        // Replacement and control characters leak in from escape sequences on alt-tab
        KeyCode::Char(c) if c == '\u{FFFD}' || c.is_control() => None,
        KeyCode::Char(c) => Some(UserAction::Key(Key::Char(c))),
        KeyCode::Backspace => Some(UserAction::Key(Key::Backspace)),
        KeyCode::Enter => Some(UserAction::Key(Key::Enter)),
        _ => None,
    }
}

fn board_height(max_attempts: usize) -> u16 {
    let rows = max_attempts.saturating_mul(ROW_SPACING as usize) + 1;
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Everything the renderer needs.
struct RenderContext<'a> {
    game: &'a Game,
    message: &'a str,
    error_message: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    message: String,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("TuiInterface::new() - Terminal ready");

        Ok(Self {
            terminal,
            message: String::new(),
            error_message: String::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, game: &Game) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game,
            message: &self.message,
            error_message: &self.error_message,
        };
        self.terminal.draw(|f| Self::render_static(f, &ctx))?;
        Ok(())
    }

    fn draw_or_log(&mut self, game: &Game) {
        if let Err(e) = self.draw(game) {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                                      // Title
                Constraint::Length(board_height(ctx.game.max_attempts())), // Board
                Constraint::Min(6),                                         // Keyboard and messages
                Constraint::Length(3),                                      // Status
                Constraint::Length(3),                                      // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx.game);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.game);
        Self::render_instructions(f, chunks[4], ctx.game);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_board(f: &mut Frame, area: Rect, game: &Game) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        for (index, row) in game.grid().iter().enumerate() {
            let y = inner.y + (index as u16).saturating_mul(ROW_SPACING);
            if y >= inner.y + inner.height {
                break;
            }
            let line = Self::row_line(row, game.word_len());
            f.render_widget(
                Paragraph::new(line),
                Rect {
                    x: inner.x,
                    y,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }

    fn row_line(row: &Row, word_len: usize) -> Line<'static> {
        let mut spans = vec![Span::raw("  ")];
        for i in 0..word_len {
            let (letter, status) = row
                .letters()
                .get(i)
                .map_or((' ', LetterStatus::Unknown), |l| (l.value(), l.status()));
            let (bg, fg) = status_colors(status);
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg).bg(bg),
            ));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn keyboard_line(keys: &str, game: &Game) -> Line<'static> {
        let hints = game.letter_hints();
        let mut spans = vec![Span::raw("  ")];
        for c in keys.chars() {
            let style = match hints.get(&c) {
                Some(&status) => {
                    let (bg, fg) = status_colors(status);
                    Style::default().fg(fg).bg(bg)
                }
                None => Style::default().fg(Color::White),
            };
            spans.push(Span::styled(format!(" {c} "), style));
        }
        Line::from(spans)
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .map(|keys| Self::keyboard_line(keys, ctx.game))
            .collect();
        lines.push(Line::from(""));

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.message.to_string(),
                MESSAGE_STYLE,
            )]));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.error_message.to_string(),
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Keyboard").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, game: &Game) {
        let (text, style) = match game.status() {
            GameStatus::Playing => (
                format!(
                    "Attempt {}/{}",
                    game.active_row_index() + 1,
                    game.max_attempts()
                ),
                HEADER_STYLE,
            ),
            GameStatus::Won => (
                format!(
                    "YOU WON in {}/{}!",
                    game.attempts_used(),
                    game.max_attempts()
                ),
                SUCCESS_STYLE,
            ),
            GameStatus::Lost => (
                format!("Out of attempts - the word was {}", game.target()),
                ERROR_STYLE,
            ),
        };
        let paragraph = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, game: &Game) {
        let text = if game.is_over() {
            "N: New Game | ESC: Quit"
        } else {
            "Type letters | ENTER: Submit | BACKSPACE: Delete | ESC: Quit"
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self, game: &Game) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                debug_log!(
                    "handle_input() - Key event received: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                Ok(action_for_key(key, game.is_over()))
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_new_game(&mut self, game: &Game) {
        self.message = format!(
            "New game: {} letters, {} attempts",
            game.word_len(),
            game.max_attempts()
        );
        self.error_message.clear();
        self.draw_or_log(game);
    }

    fn read_action(&mut self, game: &Game) -> Option<UserAction> {
        if self.draw(game).is_err() {
            info_log!("read_action() - Draw failed, returning Exit");
            return Some(UserAction::Exit);
        }
        match self.handle_input(game) {
            Ok(action) => action,
            Err(e) => {
                info_log!("read_action() - Input error {}, returning Exit", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn display_transition(&mut self, game: &Game, key: Key, transition: Transition) {
        self.error_message.clear();
        match (key, transition) {
            (Key::Char(c), Transition::Ignored) if !c.is_ascii_alphabetic() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            (Key::Enter, Transition::Ignored) if !game.is_over() => {
                self.error_message = format!("Guess must be exactly {} letters!", game.word_len());
            }
            (_, Transition::Advanced { .. }) => self.message.clear(),
            (_, Transition::Won { .. } | Transition::Lost) => {
                self.message = "Press N for a new word".to_string();
            }
            _ => {}
        }
        self.draw_or_log(game);
    }

    // The terminal is restored on drop, so there is nothing left to draw
    fn display_exit_message(&mut self) {
        info_log!("display_exit_message() - Leaving TUI");
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
