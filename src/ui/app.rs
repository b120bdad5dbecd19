use crate::config::AppConfig;
use crate::error::ScoreError;
use crate::game::{MoveError, MoveOutcome, Session, StartingPlayer};
use crate::score::{ScoreRecord, ScoreStore};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::io;
use tracing::{info, warn};

pub struct App {
    session: Session,
    starting: StartingPlayer,
    scores: ScoreRecord,
    store: Option<ScoreStore>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    last_move: Option<(usize, usize)>,
}

impl App {
    /// Build the app from configuration, loading any saved scores.
    pub fn new(config: &AppConfig) -> Result<Self, ScoreError> {
        let store = config
            .scores
            .persist
            .then(|| ScoreStore::new(config.scores.path.clone()));
        let scores = match &store {
            Some(store) => store.load()?,
            None => ScoreRecord::default(),
        };
        let starting = config.game.starting_player;
        Ok(Self::with_parts(Session::new(starting), starting, scores, store))
    }

    pub fn with_parts(
        session: Session,
        starting: StartingPlayer,
        scores: ScoreRecord,
        store: Option<ScoreStore>,
    ) -> Self {
        let selected_column = session.board().width() / 2; // Start in middle
        App {
            session,
            starting,
            scores,
            store,
            selected_column,
            should_quit: false,
            message: None,
            last_move: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn scores(&self) -> &ScoreRecord {
        &self.scores
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Cell filled by the most recent accepted move of this session.
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::other(e.to_string()))?;

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
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;
        let width = self.session.board().width();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = (c as usize) - ('1' as usize);
                if column < width {
                    self.selected_column = column;
                }
                self.drop_piece(column);
            }
            KeyCode::Char('n') => self.new_game(),
            KeyCode::Char('x') => self.reset_scores(),
            _ => {}
        }
    }

    /// Replace the session with a fresh one.
    pub fn new_game(&mut self) {
        self.session = Session::new(self.starting);
        self.selected_column = self.session.board().width() / 2;
        self.last_move = None;
        self.message = Some(format!(
            "New game! {} goes first.",
            self.session.starting_player().name()
        ));
    }

    /// Zero both counters and forget the saved record.
    pub fn reset_scores(&mut self) {
        self.scores.reset();
        if let Some(store) = &self.store {
            if let Err(err) = store.clear() {
                warn!(%err, "failed to clear saved scores");
                self.message = Some(format!("Could not clear saved scores: {err}"));
                return;
            }
        }
        self.message = Some("Scores reset.".to_string());
    }

    /// Drop the active player's piece into `column`
    fn drop_piece(&mut self, column: usize) {
        let result = self.session.attempt_move(column);
        if let Some(position) = result.as_ref().ok().and_then(MoveOutcome::position) {
            self.last_move = Some(position);
        }
        match result {
            Ok(MoveOutcome::Ignored) => {
                self.message = Some(format!("Column {} is full!", column + 1));
            }
            Ok(MoveOutcome::Placed { .. }) => {}
            Ok(outcome @ MoveOutcome::Won { player, .. }) => {
                self.message = Some(format!("{} won!", player.name()));
                self.record(outcome);
            }
            Ok(outcome @ MoveOutcome::Tied { .. }) => {
                self.message = Some("The game was a tie! No one wins!".to_string());
                self.record(outcome);
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'n' for a new game.".to_string());
            }
            Err(MoveError::InvalidColumn { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(err @ MoveError::Board(_)) => {
                warn!(%err, "board rejected move");
                self.message = Some(err.to_string());
            }
        }
    }

    fn record(&mut self, outcome: MoveOutcome) {
        let Some(event) = outcome.event() else {
            return;
        };
        if !self.scores.apply(event) {
            return;
        }
        info!(
            player_one = self.scores.player_one,
            player_two = self.scores.player_two,
            "score updated"
        );
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.scores) {
                warn!(%err, "failed to save scores");
                self.message = Some(format!("Could not save scores: {err}"));
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.session,
            &self.scores,
            self.selected_column,
            self.last_move,
            &self.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};

    fn app(first: Player, store: Option<ScoreStore>) -> App {
        let starting = StartingPlayer::fixed(first);
        App::with_parts(Session::new(starting), starting, ScoreRecord::default(), store)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    #[test]
    fn test_column_selection_is_bounded() {
        let mut app = app(Player::One, None);
        assert_eq!(app.selected_column(), 3);
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column(), 6);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column(), 0);
    }

    #[test]
    fn test_digit_drops_into_column() {
        let mut app = app(Player::Two, None);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.selected_column(), 4);
        assert_eq!(app.session().cell_at(5, 4), Some(Cell::Two));
        assert_eq!(app.session().active_player(), Player::One);
        assert_eq!(app.last_move(), Some((5, 4)));
    }

    #[test]
    fn test_last_move_survives_ignored_move_and_resets_on_new_game() {
        let mut app = app(Player::One, None);
        for _ in 0..6 {
            press(&mut app, KeyCode::Char('1'));
        }
        assert_eq!(app.last_move(), Some((0, 0)));

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.message(), Some("Column 1 is full!"));
        assert_eq!(app.last_move(), Some((5, 1)));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.last_move(), None);
    }

    #[test]
    fn test_out_of_range_digit_is_invalid() {
        let mut app = app(Player::One, None);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.message(), Some("Invalid column!"));
        assert_eq!(app.session().moves_played(), 0);
    }

    #[test]
    fn test_full_column_message() {
        let mut app = app(Player::One, None);
        for _ in 0..6 {
            press(&mut app, KeyCode::Enter);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Column 4 is full!"));
        assert_eq!(app.session().moves_played(), 6);
    }

    #[test]
    fn test_win_updates_and_persists_score() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("scores.json"));
        let mut app = app(Player::One, Some(store.clone()));

        // One plays column 1, Two plays column 2
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('1'));
            press(&mut app, KeyCode::Char('2'));
        }
        press(&mut app, KeyCode::Char('1'));

        assert_eq!(app.message(), Some("Player 1 won!"));
        assert_eq!(app.scores().wins(Player::One), 1);
        assert_eq!(store.load().unwrap().wins(Player::One), 1);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.message(), Some("Game over! Press 'n' for a new game."));
    }

    #[test]
    fn test_new_game_keeps_scores() {
        let mut app = app(Player::Two, None);
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('7'));
            press(&mut app, KeyCode::Char('6'));
        }
        press(&mut app, KeyCode::Char('7'));
        assert!(app.session().is_terminal());

        press(&mut app, KeyCode::Char('n'));
        assert!(!app.session().is_terminal());
        assert_eq!(app.session().moves_played(), 0);
        assert_eq!(app.session().active_player(), Player::Two);
        assert_eq!(app.scores().wins(Player::Two), 1);
    }

    #[test]
    fn test_reset_scores_clears_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("scores.json"));
        store
            .save(&ScoreRecord {
                player_one: 2,
                player_two: 1,
            })
            .unwrap();
        let starting = StartingPlayer::One;
        let mut app = App::with_parts(
            Session::new(starting),
            starting,
            store.load().unwrap(),
            Some(store.clone()),
        );

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.scores(), &ScoreRecord::default());
        assert!(!store.path().exists());
        assert_eq!(app.message(), Some("Scores reset."));
    }

    #[test]
    fn test_quit() {
        let mut app = app(Player::One, None);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
