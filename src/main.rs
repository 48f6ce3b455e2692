mod confetti;
mod ui;

use burst::{
    action::Action,
    app_dirs::AppDirs,
    clock::{Clock, SystemClock},
    config::{ConfigStore, FileConfigStore},
    feedback::Feedback,
    input,
    migrate::{self, ImportOutcome, MigrationPayload},
    persist::{reconcile, FileStateStore, PartialState, Persistence, StateStore},
    runtime::{BurstEvent, Runner},
    session::{Session, Startup},
    state::Event,
    wordlist::{parse_custom, Preset},
};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::seq::SliceRandom;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin, Write},
    path::PathBuf,
    time::Duration,
};
use webbrowser::Browser;

use crate::confetti::Confetti;

pub const HOMEPAGE: &str = "https://www.burst-type.pro";

/// Ticks a banner stays up
const BANNER_TICKS: u16 = 15;

/// typing practice one word at a time: hit the speed, keep the streak, level up
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Typing practice one word at a time. Type each word fast enough, enough times in a row, to unlock the next one. Progress is saved automatically."
)]
pub struct Cli {
    /// save file to use instead of the default location
    #[clap(long)]
    state_file: Option<PathBuf>,

    /// switch to a bundled word list (restarts progress when it differs)
    #[clap(short = 'p', long, value_enum)]
    preset: Option<Preset>,

    /// switch to the words in FILE, separated by whitespace or commas
    #[clap(short = 'w', long, conflicts_with = "preset")]
    wordlist: Option<PathBuf>,

    /// start over with default settings
    #[clap(long)]
    reset: bool,

    /// hand progress over to the migration origin instead of playing here
    #[clap(long)]
    retired: bool,

    /// where migrated progress is sent
    #[clap(long)]
    origin: Option<String>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// move progress between installs
    Migrate {
        #[clap(subcommand)]
        action: MigrateCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MigrateCommand {
    /// print a link carrying this install's progress
    Export,
    /// receive progress from a migration link; an existing save wins
    Import { link: String },
}

/// Transient message shown under the word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub failure: bool,
    pub ticks_left: u16,
}

#[derive(Debug)]
pub struct App<C: Clock = SystemClock, S: StateStore = FileStateStore> {
    pub session: Session<C, S>,
    pub banner: Option<Banner>,
    pub confetti: Confetti,
}

impl<C: Clock, S: StateStore> App<C, S> {
    pub fn new(session: Session<C, S>) -> Self {
        Self {
            session,
            banner: None,
            confetti: Confetti::new(),
        }
    }

    /// Dispatch `action` and stage its feedback. Returns true when the
    /// terminal bell should ring.
    pub fn apply(&mut self, action: Action, width: u16, height: u16) -> Result<bool, Box<dyn Error>> {
        match self.session.dispatch(action)? {
            Some(feedback) => Ok(self.on_feedback(feedback, width, height)),
            None => Ok(false),
        }
    }

    fn on_feedback(&mut self, feedback: Feedback, width: u16, height: u16) -> bool {
        if feedback.confetti {
            self.confetti.burst(width, height);
        }
        if let Some(text) = self.banner_text(feedback.event) {
            self.banner = Some(Banner {
                text,
                failure: feedback.sound.is_some_and(|cue| cue.is_failure()),
                ticks_left: BANNER_TICKS,
            });
        }
        feedback.sound.is_some_and(|cue| cue.is_failure())
    }

    fn banner_text(&self, event: Event) -> Option<String> {
        let state = self.session.state();
        match event {
            Event::WordComplete => Some(format!(
                "{} wpm, {} of {}",
                state.last_wpm.unwrap_or(0),
                state.word.streak,
                state.target_streak
            )),
            Event::StreakComplete => pick(&["streak complete!", "level up!", "next word unlocked!"]),
            Event::GameComplete => Some("every word mastered!".to_string()),
            Event::FailureSlow => Some(format!(
                "too slow: {} wpm, need {}",
                state.last_wpm.unwrap_or(0),
                state.target_wpm
            )),
            Event::FailureTypo => pick(&["typo! streak reset", "oops, start over", "careful!"]),
            Event::EnableSfxConfetti => Some("confetti on".to_string()),
            _ => None,
        }
    }

    /// Advance animations by one tick of `dt` seconds
    pub fn on_tick(&mut self, dt: f64) {
        self.confetti.update(dt);
        if let Some(banner) = &mut self.banner {
            banner.ticks_left = banner.ticks_left.saturating_sub(1);
            if banner.ticks_left == 0 {
                self.banner = None;
            }
        }
    }
}

fn pick(phrases: &[&str]) -> Option<String> {
    phrases.choose(&mut rand::thread_rng()).map(|p| p.to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = FileConfigStore::new().load();

    let store = match cli.state_file.clone().or(config.state_file.clone()) {
        Some(path) => FileStateStore::with_path(path),
        None => FileStateStore::new(),
    };
    let origin = cli
        .origin
        .clone()
        .unwrap_or_else(|| config.migration_origin.clone());

    if let Some(Command::Migrate { action }) = cli.command.clone() {
        init_logging(false);
        return run_migrate(action, &store, &origin);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }
    init_logging(true);

    let mut persistence = Persistence::new(store);
    if cli.retired || config.retired {
        persistence = persistence.with_successor(origin);
    }

    let mut session = match Session::start(SystemClock, persistence)? {
        Startup::Ready(session) => session,
        Startup::Redirect(link) => {
            println!("burst has moved. Continue here: {link}");
            if Browser::is_available() {
                webbrowser::open(&link).unwrap_or_default();
            }
            return Ok(());
        }
    };

    if cli.reset {
        session.dispatch(Action::ResetState)?;
    }
    if let Some(words) = requested_words(&cli)? {
        if words.as_slice() != session.state().wordlist() {
            session.dispatch(Action::SetWordlist(words))?;
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::terminal(Duration::from_millis(config.tick_rate_ms.max(10)));
    let mut app = App::new(session);
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, C: Clock, S: StateStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<C, S>,
    runner: &mut Runner,
) -> Result<(), Box<dyn Error>> {
    let dt = runner.tick_interval().as_secs_f64();
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let size = terminal.size().unwrap_or_default();

        let action = match runner.step() {
            BurstEvent::Tick => {
                app.on_tick(dt);
                None
            }
            BurstEvent::Resize => None,
            BurstEvent::Focus(gained) => Some(input::action_for_focus(gained)),
            BurstEvent::Key(key) => {
                if input::is_quit(&key) {
                    break;
                }
                if key.code == crossterm::event::KeyCode::F(8)
                    && app.session.state().show_credits
                    && Browser::is_available()
                {
                    webbrowser::open(HOMEPAGE).unwrap_or_default();
                }
                input::action_for(&key, app.session.state())
            }
        };

        if let Some(action) = action {
            match app.apply(action, size.width, size.height) {
                Ok(true) => {
                    let mut out = io::stdout();
                    out.write_all(b"\x07")?;
                    out.flush()?;
                }
                Ok(false) => {}
                // the transition already happened; keep playing and try again next change
                Err(e) => log::error!("could not save progress: {e}"),
            }
        }

        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}

fn run_migrate<S: StateStore>(
    action: MigrateCommand,
    store: &S,
    origin: &str,
) -> Result<(), Box<dyn Error>> {
    let now = SystemClock.now_ms();

    match action {
        MigrateCommand::Export => {
            let document = store.read()?.ok_or("no saved progress to export")?;
            let state = reconcile(PartialState::parse(&document)?, now);
            println!("{}", MigrationPayload::from(&state).link(origin)?);
        }
        MigrateCommand::Import { link } => match migrate::import(store, &link, now)? {
            ImportOutcome::Imported(state) => println!(
                "imported progress: level {}, highest level {}",
                state.level + 1,
                state.highest_level + 1
            ),
            ImportOutcome::Skipped => println!("existing progress kept; nothing imported"),
        },
    }
    Ok(())
}

fn requested_words(cli: &Cli) -> Result<Option<Vec<String>>, Box<dyn Error>> {
    if let Some(path) = &cli.wordlist {
        let text = fs::read_to_string(path)?;
        return Ok(Some(parse_custom(&text)?));
    }
    match cli.preset {
        Some(preset) => Ok(Some(preset.wordlist()?.words)),
        None => Ok(None),
    }
}

/// Logging is off unless RUST_LOG is set. The TUI owns the terminal, so
/// interactive runs log to a file in the state directory.
fn init_logging(interactive: bool) {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    if !interactive {
        env_logger::init();
        return;
    }

    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}
