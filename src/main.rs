mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use typepace::{
    account::{Accounts, User},
    app_dirs::AppDirs,
    catalog::{find_lesson, find_mode, random_quote, Lesson, PracticeMode, LESSONS, PRACTICE_MODES},
    celebration::Confetti,
    clock::{Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    export,
    history::TestResult,
    logging,
    progress::Progress,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TypingEvent},
    session::{Keystroke, Session, SessionError, SessionKind, Step},
    store::{BackgroundStore, KeyValueStore, SqliteStore},
};

/// terminal typing trainer with timed tests, key drills, history and streaks
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing trainer: timed tests over famous quotes, key-group lessons, live WPM and accuracy, and a local history with a daily streak."
)]
pub struct Cli {
    /// start a timed test right away
    #[clap(short = 'm', long, value_enum)]
    mode: Option<ModeArg>,

    /// start a lesson right away (1-6)
    #[clap(
        short = 'l',
        long,
        value_parser = clap::value_parser!(u32).range(1..=6),
        conflicts_with = "mode"
    )]
    lesson: Option<u32>,

    /// custom text to type
    #[clap(short = 'p', long, conflicts_with_all = ["mode", "lesson"])]
    prompt: Option<String>,

    /// database holding history, streak and accounts
    #[clap(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// write the test history as CSV and exit
    #[clap(long, value_name = "PATH")]
    export_history: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ModeArg {
    Time15,
    Time30,
    Time60,
    Time120,
}

impl ModeArg {
    fn practice_mode(&self) -> Option<PracticeMode> {
        find_mode(&self.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Auth,
    Menu,
    Typing,
    Results,
}

/// Entry on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Mode(PracticeMode),
    Lesson(Lesson),
}

impl MenuItem {
    pub fn all() -> Vec<MenuItem> {
        PRACTICE_MODES
            .iter()
            .copied()
            .map(MenuItem::Mode)
            .chain(LESSONS.iter().copied().map(MenuItem::Lesson))
            .collect()
    }

    pub fn label(&self) -> String {
        match self {
            MenuItem::Mode(mode) => format!("{} test", mode.full_name),
            MenuItem::Lesson(lesson) => format!("Lesson {}: {} ({})", lesson.id, lesson.name, lesson.keys),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub field: AuthField,
    pub signing_up: bool,
    pub error: Option<String>,
}

impl AuthForm {
    fn current_mut(&mut self) -> &mut String {
        match self.field {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }
}

pub type DynStore = Box<dyn KeyValueStore>;

pub struct App {
    pub state: AppState,
    pub user: Option<User>,
    pub auth: AuthForm,
    pub menu_index: usize,
    pub session: Option<Session>,
    pub last_result: Option<TestResult>,
    pub last_streak: u32,
    pub caps_lock: bool,
    pub confetti: Confetti,
    pub should_quit: bool,
    progress: Progress<DynStore>,
    accounts: Accounts<DynStore>,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl App {
    pub fn new<S, C>(store: S, clock: C, config: &Config, rng: StdRng) -> Self
    where
        S: KeyValueStore + Clone + 'static,
        C: Clock + 'static,
    {
        let accounts = Accounts::new(Box::new(store.clone()) as DynStore);
        let user = accounts.load_session();

        Self {
            state: if user.is_some() {
                AppState::Menu
            } else {
                AppState::Auth
            },
            user,
            auth: AuthForm::default(),
            menu_index: config.menu_index.min(MenuItem::all().len() - 1),
            session: None,
            last_result: None,
            last_streak: 0,
            caps_lock: false,
            confetti: Confetti::new(),
            should_quit: false,
            progress: Progress::open(Box::new(store) as DynStore),
            accounts,
            clock: Box::new(clock),
            rng,
        }
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Local> {
        self.clock.now()
    }

    pub fn progress(&self) -> &Progress<DynStore> {
        &self.progress
    }

    /// Streak as shown on the dashboard
    pub fn streak(&self) -> u32 {
        self.progress.streak_count(self.now())
    }

    /// Honour `--mode`, `--lesson` or `--prompt`, skipping the menu.
    pub fn launch(&mut self, cli: &Cli) -> Result<(), SessionError> {
        if let Some(prompt) = &cli.prompt {
            self.start(SessionKind::Custom, prompt.clone())
        } else if let Some(mode) = cli.mode.and_then(|m| m.practice_mode()) {
            self.start_item(MenuItem::Mode(mode))
        } else if let Some(lesson) = cli.lesson.and_then(find_lesson) {
            self.start_item(MenuItem::Lesson(lesson))
        } else {
            Ok(())
        }
    }

    pub fn start_item(&mut self, item: MenuItem) -> Result<(), SessionError> {
        match item {
            MenuItem::Mode(mode) => {
                let quote = random_quote(&mut self.rng).to_string();
                self.start(SessionKind::Timed(mode), quote)
            }
            MenuItem::Lesson(lesson) => {
                self.start(SessionKind::Lesson(lesson), lesson.text.to_string())
            }
        }
    }

    fn start(&mut self, kind: SessionKind, text: String) -> Result<(), SessionError> {
        self.session = Some(Session::new(text, kind, self.now())?);
        self.confetti.stop();
        self.state = AppState::Typing;
        Ok(())
    }

    /// Timed tests get a fresh quote; lessons and custom text repeat.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        let Some(mut previous) = self.session.take() else {
            return Ok(());
        };
        previous.cancel();

        match previous.kind() {
            SessionKind::Timed(mode) => self.start_item(MenuItem::Mode(mode)),
            kind => self.start(kind, previous.text().to_string()),
        }
    }

    pub fn back_to_menu(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.cancel();
        }
        self.session = None;
        self.confetti.stop();
        self.state = AppState::Menu;
    }

    pub fn on_tick(&mut self) {
        let now = self.now();
        self.confetti.update(now);

        if self.state != AppState::Typing {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            let step = session.tick(now);
            self.handle_step(step);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if let Some(on) = caps_lock_hint(&key) {
            self.caps_lock = on;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            if let Some(session) = self.session.as_mut() {
                session.cancel();
            }
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Auth => self.on_auth_key(key),
            AppState::Menu => self.on_menu_key(key),
            AppState::Typing => self.on_typing_key(key),
            AppState::Results => self.on_results_key(key),
        }
    }

    fn on_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => self.auth.toggle_field(),
            KeyCode::Left | KeyCode::Right => {
                self.auth.signing_up = !self.auth.signing_up;
                self.auth.error = None;
            }
            KeyCode::Backspace => {
                self.auth.current_mut().pop();
            }
            KeyCode::Enter => match self.auth.field {
                AuthField::Email => self.auth.field = AuthField::Password,
                AuthField::Password => self.submit_auth(),
            },
            KeyCode::Char(c) if !c.is_control() => self.auth.current_mut().push(c),
            _ => {}
        }
    }

    pub fn submit_auth(&mut self) {
        let outcome = if self.auth.signing_up {
            self.accounts.sign_up(&self.auth.email, &self.auth.password)
        } else {
            self.accounts.log_in(&self.auth.email, &self.auth.password)
        };

        match outcome {
            Ok(user) => {
                log::info!("logged in as {}", user.email);
                self.user = Some(user);
                self.auth = AuthForm::default();
                self.state = AppState::Menu;
            }
            Err(e) => {
                self.auth.password.clear();
                self.auth.error = Some(e.to_string());
            }
        }
    }

    pub fn log_out(&mut self) {
        if let Err(e) = self.accounts.log_out() {
            log::warn!("failed to clear login: {e}");
        }
        self.user = None;
        self.auth = AuthForm::default();
        self.state = AppState::Auth;
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        let count = MenuItem::all().len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_index = (self.menu_index + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_index = (self.menu_index + 1) % count;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(item) = MenuItem::all().get(self.menu_index).copied() {
                    if let Err(e) = self.start_item(item) {
                        log::warn!("could not start {}: {e}", item.label());
                    }
                }
            }
            KeyCode::Char('o') if self.user.is_some() => self.log_out(),
            _ => {}
        }
    }

    fn on_typing_key(&mut self, key: KeyEvent) {
        let now = self.now();

        // a countdown may have run out since the last tick
        if let Some(session) = self.session.as_mut() {
            let step = session.tick(now);
            self.handle_step(step);
        }
        if self.state != AppState::Typing {
            return;
        }

        match key.code {
            KeyCode::Esc => self.back_to_menu(),
            KeyCode::Tab => {
                if let Err(e) = self.restart() {
                    log::warn!("restart failed: {e}");
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(session) = self.session.as_mut() {
                    let step = session.submit(Keystroke::Char(c), now);
                    self.handle_step(step);
                }
            }
            _ => {}
        }
    }

    fn on_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Enter => {
                if let Err(e) = self.restart() {
                    log::warn!("restart failed: {e}");
                }
            }
            KeyCode::Char('m') => self.back_to_menu(),
            _ => {}
        }
    }

    fn handle_step(&mut self, step: Step) {
        if let Step::Completed(result) = step {
            self.finish_session(result);
        }
    }

    fn finish_session(&mut self, result: TestResult) {
        let now = self.now();
        self.last_streak = self.progress.record_result(result.clone(), now);
        self.last_result = Some(result);
        self.confetti.start(&mut self.rng, now);
        self.state = AppState::Results;
    }
}

/// Best guess at the Caps Lock state from a key event.
///
/// Terminals with keyboard enhancement report it directly; otherwise a
/// letter whose case disagrees with Shift gives it away.
fn caps_lock_hint(key: &KeyEvent) -> Option<bool> {
    if key.state.contains(KeyEventState::CAPS_LOCK) {
        return Some(true);
    }
    match key.code {
        KeyCode::Char(c) if c.is_alphabetic() && c.is_lowercase() != c.is_uppercase() => {
            Some(c.is_uppercase() != key.modifiers.contains(KeyModifiers::SHIFT))
        }
        _ => None,
    }
}

fn open_store(cli: &Cli) -> Result<BackgroundStore, Box<dyn Error>> {
    let sqlite = match &cli.db {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::open_default()?,
    };
    Ok(BackgroundStore::spawn(sqlite)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match AppDirs::log_path() {
        Some(path) => {
            if let Err(e) = logging::init(&path) {
                eprintln!("typepace: logging disabled ({}): {e}", path.display());
            }
        }
        None => eprintln!("typepace: logging disabled: no home directory"),
    }

    let store = open_store(&cli)?;

    if let Some(path) = &cli.export_history {
        let progress = Progress::open(store.clone());
        let written = export::export_history(progress.history(), path)?;
        println!("exported {written} results to {}", path.display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();

    let mut app = App::new(store.clone(), SystemClock, &config, StdRng::from_entropy());
    if let Err(e) = app.launch(&cli) {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, e).exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(
        &mut terminal,
        &mut app,
        Duration::from_millis(config.tick_rate_ms),
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    config.menu_index = app.menu_index;
    if let Err(e) = config_store.save(&config) {
        log::warn!("failed to save config: {e}");
    }
    if let Err(e) = store.flush() {
        log::warn!("failed to flush pending writes: {e}");
    }

    outcome
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick));

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        match runner.step() {
            TypingEvent::Tick => app.on_tick(),
            TypingEvent::Resize => {}
            TypingEvent::Key(key) => app.on_key(key),
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Duration as ChronoDuration;
    use typepace::clock::ManualClock;
    use typepace::session::Phase;
    use typepace::store::{MemoryStore, HISTORY_KEY};

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["typepace"]);
        assert_eq!(cli.mode, None);
        assert_eq!(cli.lesson, None);
        assert_eq!(cli.prompt, None);
        assert_eq!(cli.db, None);
        assert_eq!(cli.export_history, None);
    }

    #[test]
    fn test_cli_mode() {
        let cli = Cli::parse_from(["typepace", "-m", "time15"]);
        assert_eq!(cli.mode, Some(ModeArg::Time15));
        let cli = Cli::parse_from(["typepace", "--mode", "time120"]);
        assert_eq!(cli.mode, Some(ModeArg::Time120));
        assert!(Cli::try_parse_from(["typepace", "-m", "time45"]).is_err());
    }

    #[test]
    fn test_mode_arg_maps_to_catalog() {
        assert_eq!(ModeArg::Time60.to_string(), "time60");
        assert_eq!(ModeArg::Time60.practice_mode().unwrap().duration_secs, 60);
        assert_eq!(
            ModeArg::Time120.practice_mode().unwrap().full_name,
            "2 minutes"
        );
    }

    #[test]
    fn test_cli_lesson_range() {
        let cli = Cli::parse_from(["typepace", "-l", "3"]);
        assert_eq!(cli.lesson, Some(3));
        assert!(Cli::try_parse_from(["typepace", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["typepace", "--lesson", "7"]).is_err());
    }

    #[test]
    fn test_cli_prompt_conflicts_with_mode() {
        let cli = Cli::parse_from(["typepace", "-p", "hello world"]);
        assert_eq!(cli.prompt.as_deref(), Some("hello world"));
        assert!(Cli::try_parse_from(["typepace", "-p", "x", "-m", "time30"]).is_err());
    }

    #[test]
    fn test_cli_paths() {
        let cli = Cli::parse_from(["typepace", "--db", "/tmp/a.db", "--export-history", "out.csv"]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/a.db")));
        assert_eq!(cli.export_history, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_menu_lists_modes_then_lessons() {
        let items = MenuItem::all();
        assert_eq!(items.len(), 10);
        assert_matches!(items[0], MenuItem::Mode(m) if m.id == "time15");
        assert_matches!(items[4], MenuItem::Lesson(l) if l.id == 1);
        assert_eq!(items[3].label(), "2 minutes test");
    }

    #[test]
    fn test_starts_at_login_without_session() {
        let app = app_with(MemoryStore::new(), ManualClock::new(t0()));
        assert_eq!(app.state, AppState::Auth);
        assert!(app.user.is_none());
    }

    #[test]
    fn test_remembered_login_goes_to_menu() {
        let (app, _, _) = logged_in_app();
        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.user.as_ref().unwrap().email, "ada@example.com");
    }

    #[test]
    fn test_sign_up_through_form() {
        let mut app = app_with(MemoryStore::new(), ManualClock::new(t0()));
        app.on_key(key(KeyCode::Right));
        assert!(app.auth.signing_up);

        type_text(&mut app, "new@example.com");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.auth.field, AuthField::Password);
        type_text(&mut app, "secret");
        app.on_key(key(KeyCode::Enter));

        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.user.as_ref().unwrap().email, "new@example.com");
    }

    #[test]
    fn test_login_error_shown() {
        let mut app = app_with(MemoryStore::new(), ManualClock::new(t0()));
        type_text(&mut app, "ghost@example.com");
        app.on_key(key(KeyCode::Tab));
        type_text(&mut app, "pw");
        app.on_key(key(KeyCode::Enter));

        assert_eq!(app.state, AppState::Auth);
        assert_eq!(
            app.auth.error.as_deref(),
            Some("No account found with this email. Please sign up.")
        );
        assert!(app.auth.password.is_empty());
    }

    #[test]
    fn test_log_out_returns_to_login() {
        let (mut app, store, clock) = logged_in_app();
        app.on_key(key(KeyCode::Char('o')));
        assert_eq!(app.state, AppState::Auth);

        let reopened = app_with(store, clock);
        assert_eq!(reopened.state, AppState::Auth);
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let (mut app, _, _) = logged_in_app();
        app.on_key(key(KeyCode::Up));
        assert_eq!(app.menu_index, 9);
        app.on_key(key(KeyCode::Down));
        assert_eq!(app.menu_index, 0);
    }

    #[test]
    fn test_lesson_flow_records_result() {
        let (mut app, store, clock) = logged_in_app();
        let cli = Cli::parse_from(["typepace", "-p", "cat"]);
        app.launch(&cli).unwrap();
        assert_eq!(app.state, AppState::Typing);

        app.on_key(key(KeyCode::Char('c')));
        clock.advance(ChronoDuration::seconds(30));
        app.on_key(key(KeyCode::Char('x')));
        app.on_key(key(KeyCode::Char('a')));
        clock.advance(ChronoDuration::seconds(30));
        app.on_key(key(KeyCode::Char('t')));

        assert_eq!(app.state, AppState::Results);
        let result = app.last_result.clone().unwrap();
        assert_eq!(result.mode, "Lesson: Custom");
        assert_eq!(result.accuracy, 75);
        assert_eq!(result.errors, 1);
        assert_eq!(app.last_streak, 1);
        assert!(app.confetti.is_active());
        assert_eq!(app.progress().history().len(), 1);
        assert!(store.get(HISTORY_KEY).unwrap().is_some());
    }

    #[test]
    fn test_timed_flow_expires_on_tick() {
        let (mut app, _, clock) = logged_in_app();
        app.launch(&Cli::parse_from(["typepace", "-m", "time15"]))
            .unwrap();
        let text: String = app.session.as_ref().unwrap().text().chars().take(10).collect();
        type_text(&mut app, &text);

        clock.advance(ChronoDuration::seconds(15));
        app.on_tick();

        assert_eq!(app.state, AppState::Results);
        let result = app.last_result.as_ref().unwrap();
        assert_eq!(result.mode, "15 seconds");
        assert_eq!(app.session.as_ref().unwrap().cursor(), 10);
    }

    #[test]
    fn test_key_after_expiry_finishes_instead_of_typing() {
        let (mut app, _, clock) = logged_in_app();
        app.launch(&Cli::parse_from(["typepace", "-m", "time15"]))
            .unwrap();
        clock.advance(ChronoDuration::seconds(20));
        app.on_key(key(KeyCode::Char('T')));

        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.session.as_ref().unwrap().errors(), 0);
        assert_eq!(app.progress().history().len(), 1);
    }

    #[test]
    fn test_escape_cancels_and_returns_to_menu() {
        let (mut app, _, clock) = logged_in_app();
        app.launch(&Cli::parse_from(["typepace", "-m", "time30"]))
            .unwrap();
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Menu);
        assert!(app.session.is_none());

        // a later tick past the old deadline records nothing
        clock.advance(ChronoDuration::seconds(60));
        app.on_tick();
        assert_eq!(app.state, AppState::Menu);
        assert!(app.progress().history().is_empty());
    }

    #[test]
    fn test_restart_lesson_keeps_text() {
        let (mut app, _, _) = logged_in_app();
        app.launch(&Cli::parse_from(["typepace", "-l", "2"])).unwrap();
        let text = app.session.as_ref().unwrap().text().to_string();
        type_text(&mut app, "as");
        app.on_key(key(KeyCode::Tab));

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.text(), text);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_results_keys() {
        let (mut app, _, _) = logged_in_app();
        app.launch(&Cli::parse_from(["typepace", "-p", "a"])).unwrap();
        type_text(&mut app, "a");
        assert_eq!(app.state, AppState::Results);

        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Typing);
        type_text(&mut app, "a");
        app.on_key(key(KeyCode::Char('m')));
        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.progress().history().len(), 2);

        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_menu_enter_starts_selected_item() {
        let (mut app, _, _) = logged_in_app();
        app.menu_index = 4;
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Typing);
        assert_eq!(
            app.session.as_ref().unwrap().kind().mode_label(),
            "Lesson: Home Row"
        );
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let (mut app, _, _) = logged_in_app();
        app.launch(&Cli::parse_from(["typepace", "-p", "abc"])).unwrap();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(app.session.as_ref().unwrap().phase(), Phase::Cancelled);
    }

    #[test]
    fn test_caps_lock_hint() {
        assert_eq!(caps_lock_hint(&key(KeyCode::Char('A'))), Some(true));
        assert_eq!(caps_lock_hint(&key(KeyCode::Char('a'))), Some(false));
        assert_eq!(
            caps_lock_hint(&KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(false)
        );
        assert_eq!(caps_lock_hint(&key(KeyCode::Char('1'))), None);
        assert_eq!(caps_lock_hint(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_caps_lock_does_not_reach_session() {
        let (mut app, _, _) = logged_in_app();
        app.launch(&Cli::parse_from(["typepace", "-p", "ab"])).unwrap();
        app.on_key(key(KeyCode::Char('A')));
        assert!(app.caps_lock);
        // the uppercase letter is still just a mismatch
        assert_eq!(app.session.as_ref().unwrap().errors(), 1);
        app.on_key(key(KeyCode::Char('a')));
        assert!(!app.caps_lock);
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let (mut app, _, _) = logged_in_app();
        assert_eq!(
            app.launch(&Cli::parse_from(["typepace", "-p", ""])),
            Err(SessionError::EmptyText)
        );
        assert_eq!(app.state, AppState::Menu);
    }

    #[test]
    fn test_streak_shown_after_second_day() {
        let (mut app, _, clock) = logged_in_app();
        app.launch(&Cli::parse_from(["typepace", "-p", "a"])).unwrap();
        type_text(&mut app, "a");
        assert_eq!(app.streak(), 1);

        clock.advance(ChronoDuration::hours(20));
        app.on_key(key(KeyCode::Char('r')));
        type_text(&mut app, "a");
        assert_eq!(app.last_streak, 2);

        clock.advance(ChronoDuration::hours(30));
        assert_eq!(app.streak(), 0);
    }
}
