//! Terminal interface for Guess the Word, built on Ratatui.
//!
//! # Architecture
//! - `GameScreen`: screen state and key handling, no terminal attached, so
//!   input behavior is testable without a tty
//! - `Tui`: terminal wrapper owning the crossterm backend
//! - `run`: the event loop wiring keys, the engine, and the word fetcher
//!
//! # State Machine
//! `Loading` → `Guessing` → `RoundOver` → (play again) → `Loading`.
//! A failed word fetch stays in `Loading` with the error shown; the player
//! may retry manually or quit.

use crate::engine::{GameEngine, GuessOutcome};
use crate::provider::{ProviderError, WordFetcher, WordProvider};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
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
use std::sync::Arc;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const SUCCESS_MESSAGE: &str = "I can't believe you won. Great job Einstein!";
const FAIL_MESSAGE: &str = "Sorry! No soup for you!";
const ALREADY_GUESSED_WARNING: &str = "Letter already guessed";
const LOADING_MESSAGE: &str = "Fetching a new word...";

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const BANNER_STYLE: Style = Style::new().fg(Color::Cyan);
const DANGER_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const WARNING_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    /// Waiting on the word fetch; guessing is disabled.
    Loading,
    Guessing,
    RoundOver {
        won: bool,
    },
}

/// Actions the event loop must act on; everything else is absorbed by the
/// screen itself.
#[derive(Debug, PartialEq, Eq)]
pub enum ScreenAction {
    Exit,
    NewRound,
}

/// Screen state for one rendered game: the engine plus everything the UI
/// fragments need. All mutation happens synchronously inside one key event.
pub struct GameScreen {
    engine: GameEngine,
    phase: Phase,
    /// The guess input buffer. Holds at most one letter.
    input: String,
    message: String,
    fetch_error: String,
    already_guessed: bool,
    round: u64,
    player: String,
}

impl GameScreen {
    #[must_use]
    pub fn new(player: &str) -> Self {
        Self {
            engine: GameEngine::new(),
            phase: Phase::Loading,
            input: String::new(),
            message: format!("{player}, welcome to Guess the Word"),
            fetch_error: String::new(),
            already_guessed: false,
            round: 0,
            player: player.to_string(),
        }
    }

    /// Prepare for a new round and return the round token the word request
    /// must carry. Clears all per-round display state.
    pub fn begin_round_request(&mut self) -> u64 {
        if matches!(self.phase, Phase::RoundOver { .. }) {
            self.message = format!("{}, let's do it again!", self.player);
        }
        self.phase = Phase::Loading;
        self.input.clear();
        self.fetch_error.clear();
        self.already_guessed = false;
        self.round += 1;
        info_log!("begin_round_request() - round token {}", self.round);
        self.round
    }

    /// The word for the active round arrived.
    pub fn word_ready(&mut self, word: &str) {
        if word.is_empty() {
            self.fetch_failed(&ProviderError::MalformedPayload);
            return;
        }
        self.engine.start_round(word);
        self.phase = Phase::Guessing;
        debug_log!("Shhhh the word is {}", self.engine.secret());
    }

    /// The word fetch for the active round failed. The round stays in the
    /// loading phase; no automatic retry.
    pub fn fetch_failed(&mut self, err: &ProviderError) {
        self.fetch_error = err.to_string();
        info_log!("fetch_failed() - {}", self.fetch_error);
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        if key.kind != event::KeyEventKind::Press {
            return None;
        }
        if Self::has_modifier_keys(&key) {
            debug_log!("handle_key() - ignoring modifier chord: {:?}", key.modifiers);
            return None;
        }
        // Replacement and control characters can arrive via terminal escape
        // sequences; they never reach the input buffer.
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < 32)
        {
            return None;
        }
        if key.code == KeyCode::Esc {
            info_log!("handle_key() - ESC pressed, exiting");
            return Some(ScreenAction::Exit);
        }

        match self.phase {
            Phase::Loading => self.handle_loading_key(key),
            Phase::Guessing => self.handle_guessing_key(key),
            Phase::RoundOver { .. } => self.handle_round_over_key(key),
        }
    }

    fn handle_loading_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            // Manual retry is only offered once the fetch has failed.
            KeyCode::Char('r' | 'R') if !self.fetch_error.is_empty() => {
                info_log!("handle_loading_key() - retrying word fetch");
                Some(ScreenAction::NewRound)
            }
            _ => None,
        }
    }

    fn handle_guessing_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() && self.input.is_empty() => {
                self.input.push(c.to_ascii_lowercase());
            }
            KeyCode::Backspace => {
                self.input.clear();
            }
            KeyCode::Enter if !self.input.is_empty() => {
                self.submit_current();
            }
            KeyCode::Char(c) => {
                // Non-alphabetic keystrokes, or a second letter while the
                // single-letter buffer is full, never reach the buffer.
                debug_log!("handle_guessing_key() - rejecting '{}'", c);
            }
            _ => {}
        }
        None
    }

    fn handle_round_over_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Char('p' | 'P') => Some(ScreenAction::NewRound),
            _ => None,
        }
    }

    fn submit_current(&mut self) {
        let Some(letter) = self.input.chars().next() else {
            return;
        };
        self.input.clear();

        let outcome = self.engine.submit_guess(letter);
        info_log!("submit_current() - '{}' -> {:?}", letter, outcome);
        self.already_guessed = outcome == GuessOutcome::AlreadyGuessed;

        match outcome {
            GuessOutcome::Won => {
                self.phase = Phase::RoundOver { won: true };
                self.message = SUCCESS_MESSAGE.to_string();
            }
            GuessOutcome::Lost => {
                self.phase = Phase::RoundOver { won: false };
            }
            _ => {}
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    // Rendering

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Message banner
                Constraint::Length(3), // Word in progress / loading indicator
                Constraint::Length(3), // Remaining guesses
                Constraint::Min(4),    // Wrong letters, warnings, errors
                Constraint::Length(3), // Guess input
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        self.render_banner(f, chunks[1]);
        self.render_word(f, chunks[2]);
        self.render_remaining(f, chunks[3]);
        self.render_info(f, chunks[4]);
        self.render_input(f, chunks[5]);
        self.render_instructions(f, chunks[6]);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("GUESS THE WORD")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_banner(&self, f: &mut Frame, area: Rect) {
        let style = match self.phase {
            Phase::RoundOver { won: true } => SUCCESS_STYLE,
            _ => BANNER_STYLE,
        };
        let banner = Paragraph::new(self.message.as_str())
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(banner, area);
    }

    fn render_word(&self, f: &mut Frame, area: Rect) {
        let line = if self.phase == Phase::Loading {
            Line::from(Span::styled(LOADING_MESSAGE, WARNING_STYLE))
        } else {
            let mut spans = vec![Span::raw(" ")];
            for cell in self.engine.current_mask() {
                let style = if cell.revealed {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else {
                    Style::default().fg(Color::White).bg(Color::DarkGray)
                };
                spans.push(Span::styled(format!(" {} ", cell.display()), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        };

        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_remaining(&self, f: &mut Frame, area: Rect) {
        // The fail message replaces the remaining-guesses text; on a win the
        // fragment is hidden entirely.
        let line = match self.phase {
            Phase::Loading | Phase::RoundOver { won: true } => Line::from(""),
            Phase::RoundOver { won: false } => Line::from(Span::styled(FAIL_MESSAGE, DANGER_STYLE)),
            Phase::Guessing => Line::from(vec![
                Span::raw("You have "),
                Span::styled(
                    format!("{} incorrect guesses", self.engine.remaining_guesses()),
                    DANGER_STYLE,
                ),
                Span::raw(" remaining."),
            ]),
        };

        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(&self, f: &mut Frame, area: Rect) {
        let mut lines = Vec::new();

        // The wrong-letter list is hidden after a win, like the rest of the
        // guessing fragments.
        let show_wrong_letters = !matches!(self.phase, Phase::RoundOver { won: true })
            && !self.engine.wrong_guesses().is_empty();
        if show_wrong_letters {
            let mut spans = vec![Span::raw("Wrong letters: ")];
            for letter in self.engine.wrong_guesses() {
                spans.push(Span::styled(format!(" {letter} "), DANGER_STYLE));
            }
            lines.push(Line::from(spans));
        }

        if self.already_guessed {
            lines.push(Line::from(Span::styled(
                ALREADY_GUESSED_WARNING,
                WARNING_STYLE,
            )));
        }

        if !self.fetch_error.is_empty() {
            lines.push(Line::from(Span::styled(
                self.fetch_error.as_str(),
                DANGER_STYLE,
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let (text, style) = if self.phase == Phase::Guessing {
            (
                format!(" {} ", self.input.chars().next().unwrap_or('_')),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )
        } else {
            // Disabled while loading or after the round ends.
            (String::new(), Style::default().fg(Color::DarkGray))
        };

        let paragraph = Paragraph::new(Span::styled(text, style)).block(
            Block::default()
                .title("Type one letter")
                .borders(Borders::ALL),
        );
        f.render_widget(paragraph, area);
    }

    fn render_instructions(&self, f: &mut Frame, area: Rect) {
        let text = match self.phase {
            Phase::Loading if self.fetch_error.is_empty() => "Waiting for a word... | ESC: Quit",
            Phase::Loading => "R: Retry | ESC: Quit",
            Phase::Guessing => "Type a letter | ENTER: Guess! | ESC: Quit",
            Phase::RoundOver { .. } => "P: Play Again! | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

/// Terminal wrapper: raw mode and the alternate screen are restored on Drop
/// even if the event loop errors out.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("Tui::new() - Initializing terminal");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
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

    fn draw(&mut self, screen: &GameScreen) -> Result<(), io::Error> {
        self.terminal.draw(|f| screen.render(f))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Run the game until the player quits. One fetch is outstanding at a time;
/// stale results from superseded rounds are dropped by the round token.
pub fn run(provider: Arc<dyn WordProvider>, player: &str) -> Result<(), io::Error> {
    let mut tui = Tui::new()?;
    let fetcher = WordFetcher::new();
    let mut screen = GameScreen::new(player);

    let round = screen.begin_round_request();
    fetcher.request(Arc::clone(&provider), round);

    loop {
        tui.draw(&screen)?;

        if screen.is_loading()
            && let Some(result) = fetcher.poll(screen.round())
        {
            match result {
                Ok(word) => screen.word_ready(&word),
                Err(err) => screen.fetch_failed(&err),
            }
            continue;
        }

        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match screen.handle_key(key) {
            Some(ScreenAction::Exit) => break,
            Some(ScreenAction::NewRound) => {
                let round = screen.begin_round_request();
                fetcher.request(Arc::clone(&provider), round);
            }
            None => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RoundResult;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn letter(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    fn screen_with_word(word: &str) -> GameScreen {
        let mut screen = GameScreen::new("Bryan");
        screen.begin_round_request();
        screen.word_ready(word);
        screen
    }

    fn guess(screen: &mut GameScreen, c: char) {
        screen.handle_key(letter(c));
        screen.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_new_screen_starts_loading_with_welcome_banner() {
        let screen = GameScreen::new("Bryan");
        assert!(screen.is_loading());
        assert_eq!(screen.message, "Bryan, welcome to Guess the Word");
    }

    #[test]
    fn test_word_ready_starts_the_round() {
        let screen = screen_with_word("banish");
        assert!(!screen.is_loading());
        assert_eq!(screen.phase, Phase::Guessing);
        assert_eq!(screen.engine.remaining_guesses(), 8);
    }

    #[test]
    fn test_empty_word_is_treated_as_fetch_failure() {
        let mut screen = GameScreen::new("Bryan");
        screen.begin_round_request();
        screen.word_ready("");
        assert!(screen.is_loading());
        assert!(!screen.fetch_error.is_empty());
    }

    #[test]
    fn test_non_alphabetic_keystrokes_never_reach_the_buffer() {
        let mut screen = screen_with_word("banish");
        for c in ['1', '.', ' ', '!'] {
            screen.handle_key(letter(c));
        }
        assert!(screen.input.is_empty());
    }

    #[test]
    fn test_input_buffer_holds_a_single_lowercased_letter() {
        let mut screen = screen_with_word("banish");
        screen.handle_key(letter('A'));
        screen.handle_key(letter('b'));
        assert_eq!(screen.input, "a");

        screen.handle_key(key(KeyCode::Backspace));
        assert!(screen.input.is_empty());
    }

    #[test]
    fn test_enter_with_empty_buffer_does_nothing() {
        let mut screen = screen_with_word("banish");
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.engine.remaining_guesses(), 8);
        assert!(!screen.already_guessed);
    }

    #[test]
    fn test_modifier_chords_are_ignored() {
        let mut screen = screen_with_word("banish");
        let chord = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(screen.handle_key(chord), None);
        assert!(screen.input.is_empty());
    }

    #[test]
    fn test_submitting_clears_the_buffer() {
        let mut screen = screen_with_word("banish");
        guess(&mut screen, 'a');
        assert!(screen.input.is_empty());
    }

    #[test]
    fn test_already_guessed_warning_shows_exactly_on_redundant_guess() {
        let mut screen = screen_with_word("banish");
        guess(&mut screen, 'a');
        assert!(!screen.already_guessed);

        guess(&mut screen, 'a');
        assert!(screen.already_guessed);

        guess(&mut screen, 'n');
        assert!(!screen.already_guessed);
    }

    #[test]
    fn test_winning_shows_success_banner() {
        let mut screen = screen_with_word("hi");
        guess(&mut screen, 'h');
        guess(&mut screen, 'i');

        assert_eq!(screen.phase, Phase::RoundOver { won: true });
        assert_eq!(screen.message, SUCCESS_MESSAGE);
    }

    #[test]
    fn test_losing_disables_further_guessing() {
        let mut screen = screen_with_word("hi");
        for c in ['x', 'y', 'z', 'q'] {
            guess(&mut screen, c);
        }
        assert_eq!(screen.phase, Phase::RoundOver { won: false });

        // Letters no longer enter the buffer once the round is over.
        screen.handle_key(letter('h'));
        assert!(screen.input.is_empty());
        assert_eq!(screen.engine.result(), RoundResult::Lost);
    }

    #[test]
    fn test_play_again_requests_a_new_round() {
        let mut screen = screen_with_word("hi");
        guess(&mut screen, 'h');
        guess(&mut screen, 'i');

        let action = screen.handle_key(letter('p'));
        assert_eq!(action, Some(ScreenAction::NewRound));

        let token = screen.begin_round_request();
        assert!(screen.is_loading());
        assert_eq!(token, 2);
        assert_eq!(screen.message, "Bryan, let's do it again!");

        screen.word_ready("cool");
        assert!(screen.engine.wrong_guesses().is_empty());
        assert_eq!(screen.engine.remaining_guesses(), 6);
    }

    #[test]
    fn test_play_again_is_ignored_mid_round() {
        let mut screen = screen_with_word("banish");
        assert_eq!(screen.handle_key(letter('p')), None);
        // 'p' is just a guess candidate during play.
        assert_eq!(screen.input, "p");
    }

    #[test]
    fn test_esc_exits_from_any_phase() {
        let mut screen = GameScreen::new("Bryan");
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), Some(ScreenAction::Exit));

        let mut screen = screen_with_word("banish");
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), Some(ScreenAction::Exit));
    }

    #[test]
    fn test_guesses_are_ignored_while_loading() {
        let mut screen = GameScreen::new("Bryan");
        screen.begin_round_request();
        screen.handle_key(letter('a'));
        screen.handle_key(key(KeyCode::Enter));
        assert!(screen.input.is_empty());
    }

    #[test]
    fn test_retry_only_offered_after_fetch_failure() {
        let mut screen = GameScreen::new("Bryan");
        screen.begin_round_request();
        assert_eq!(screen.handle_key(letter('r')), None);

        screen.fetch_failed(&ProviderError::MalformedPayload);
        assert_eq!(screen.handle_key(letter('r')), Some(ScreenAction::NewRound));
    }

    #[test]
    fn test_begin_round_request_clears_stale_display_state() {
        let mut screen = screen_with_word("banish");
        guess(&mut screen, 'z');
        guess(&mut screen, 'z');
        assert!(screen.already_guessed);

        for c in ['x', 'y', 'q', 'w', 'e', 'u', 'o'] {
            guess(&mut screen, c);
        }
        assert_eq!(screen.phase, Phase::RoundOver { won: false });

        screen.begin_round_request();
        assert!(!screen.already_guessed);
        assert!(screen.fetch_error.is_empty());
        assert!(screen.input.is_empty());
    }
}
