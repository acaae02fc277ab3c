//! BLOCKFALL - falling blocks in the terminal
//!
//! One player, or two sharing a keyboard with `--versus`.

mod audio;
mod ui;

use anyhow::{Context, Result};
use audio::{AudioManager, Sfx};
use blockfall::input::{Action, Dispatcher, Player, Routed};
use blockfall::settings::Settings;
use blockfall::versus::{Outcome, Versus};
use blockfall::{Command, Game, GameEvent, GameState, ScoringRule, Snapshot};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{debug, info};
use tracing_subscriber::filter::Directive;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Input delay after game over to prevent an accidental exit
const GAME_OVER_INPUT_DELAY: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "blockfall")]
#[command(about = "Falling-block puzzle for the terminal", long_about = None)]
struct Cli {
    /// Two players on one keyboard
    #[arg(long)]
    versus: bool,

    /// Piece sequence seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scoring formula
    #[arg(long, value_enum)]
    scoring: Option<ScoringArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScoringArg {
    Linear,
    Tiered,
}

impl From<ScoringArg> for ScoringRule {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Linear => ScoringRule::Linear,
            ScoringArg::Tiered => ScoringRule::Tiered,
        }
    }
}

/// What is being played
enum Session {
    Solo(Game),
    Versus(Versus),
}

impl Session {
    fn players(&self) -> &'static [Player] {
        match self {
            Session::Solo(_) => &[Player::One],
            Session::Versus(_) => &[Player::One, Player::Two],
        }
    }

    fn game(&self, player: Player) -> &Game {
        match self {
            Session::Solo(game) => game,
            Session::Versus(versus) => versus.game(player),
        }
    }

    fn apply(&mut self, routed: Routed) {
        match self {
            Session::Solo(game) => {
                if let Some(command) = routed.action.resolve(game.state()) {
                    game.issue_command(command);
                }
            }
            Session::Versus(versus) => versus.apply(routed),
        }
    }

    fn tick(&mut self, player: Player) {
        match self {
            Session::Solo(game) => game.tick(),
            Session::Versus(versus) => versus.tick(player),
        }
    }

    fn take_events(&mut self) -> Vec<(Player, GameEvent)> {
        match self {
            Session::Solo(game) => game
                .take_events()
                .into_iter()
                .map(|event| (Player::One, event))
                .collect(),
            Session::Versus(versus) => versus.take_events(),
        }
    }

    fn finished(&self) -> bool {
        match self {
            Session::Solo(game) => game.state() == GameState::GameOver,
            Session::Versus(versus) => versus.outcome().is_some(),
        }
    }

    fn snapshots(&self) -> Vec<(&'static str, Snapshot)> {
        match self {
            Session::Solo(game) => vec![("PLAYER", game.snapshot())],
            Session::Versus(versus) => vec![
                ("PLAYER 1", versus.game(Player::One).snapshot()),
                ("PLAYER 2", versus.game(Player::Two).snapshot()),
            ],
        }
    }
}

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let session_id: u32 = rand::random();
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Log to a file; the terminal belongs to the game
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    "blockfall=debug"
                        .parse::<Directive>()
                        .context("bad log directive")?,
                ),
        )
        .with_ansi(false)
        .init();

    info!("BLOCKFALL starting up, log={}", log_dir.join(&log_file).display());

    let mut settings = match &cli.config {
        Some(path) => Settings::load_or_default(path),
        None => {
            let settings = Settings::load();
            // Leave an editable file behind on first run
            if let Some(path) = Settings::settings_path() {
                if !path.exists() {
                    if let Err(e) = settings.save_to(&path) {
                        debug!("could not write default settings: {}", e);
                    }
                }
            }
            settings
        }
    };
    if let Some(scoring) = cli.scoring {
        settings.gameplay.scoring = scoring.into();
    }
    if cli.seed.is_some() {
        settings.gameplay.seed = cli.seed;
    }

    let seed = settings.gameplay.seed.unwrap_or_else(rand::random);
    let rule = settings.gameplay.scoring;
    info!("seed={} scoring={:?} versus={}", seed, rule, cli.versus);

    let mut session = if cli.versus {
        Session::Versus(Versus::with_seed(seed, rule))
    } else {
        Session::Solo(Game::with_seed(seed, rule))
    };

    // Audio is optional; the game works without it
    let mut audio = if settings.audio.enabled { AudioManager::new() } else { None };
    if let Some(a) = audio.as_mut() {
        a.set_sfx_volume(settings.audio.sfx_volume as f32 / 100.0);
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout())).context("failed to open terminal")?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut session, &settings, &mut audio);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    result.context("game loop failed")?;

    println!("\nThanks for playing BLOCKFALL!");
    for &player in session.players() {
        let score = session.game(player).score();
        let name = match (&session, player) {
            (Session::Solo(_), _) => "Final",
            (_, Player::One) => "Player 1",
            (_, Player::Two) => "Player 2",
        };
        println!(
            "{}: score {} | level {} | lines {}",
            name, score.points, score.level, score.lines
        );
    }
    if let Session::Versus(versus) = &session {
        match versus.outcome() {
            Some(Outcome::Winner(Player::One)) => println!("Player 1 wins"),
            Some(Outcome::Winner(Player::Two)) => println!("Player 2 wins"),
            Some(Outcome::Draw) => println!("Draw"),
            None => {}
        }
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    settings: &Settings,
    audio: &mut Option<AudioManager>,
) -> io::Result<()> {
    let dispatcher = Dispatcher::new(&settings.keys, matches!(session, Session::Versus(_)));
    let base_tick = settings.gameplay.base_tick();
    let mut last_tick = [Instant::now(); 2];
    let mut game_over_time: Option<Instant> = None;

    loop {
        let snapshots = session.snapshots();
        terminal.draw(|frame| ui::render(frame, &snapshots, &settings.visual))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(ended) = game_over_time {
                        // Any key leaves once the final board has been seen
                        if ended.elapsed() >= GAME_OVER_INPUT_DELAY {
                            return Ok(());
                        }
                    } else {
                        let routed = dispatcher.dispatch(key);
                        let quit = routed
                            .iter()
                            .any(|r| r.action == Action::Command(Command::Quit));
                        for r in routed {
                            session.apply(r);
                        }
                        if quit {
                            drain_events(session, audio);
                            return Ok(());
                        }
                    }
                }
            }
        }

        if game_over_time.is_none() {
            // Gravity, one timer per player
            for &player in session.players() {
                let interval = session.game(player).score().tick_interval(base_tick);
                let slot = player.index();
                if last_tick[slot].elapsed() >= interval {
                    session.tick(player);
                    last_tick[slot] = Instant::now();
                }
            }
        }

        drain_events(session, audio);

        if game_over_time.is_none() && session.finished() {
            info!("session finished");
            game_over_time = Some(Instant::now());
        }
    }
}

/// Hand session events to the log and the speakers
fn drain_events(session: &mut Session, audio: &mut Option<AudioManager>) {
    for (player, event) in session.take_events() {
        match event {
            GameEvent::LinesCleared(n) => debug!("{:?} cleared {} line(s)", player, n),
            GameEvent::GameOver => info!("{:?} is out", player),
        }
        if let Some(a) = audio.as_mut() {
            a.play_sfx(Sfx::for_event(event));
        }
    }
}
