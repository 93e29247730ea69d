use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use boardlink::core::{load_or_init_settings, save_settings, settings_path};
use boardlink::networking::lobby::{create_game, parse_server_url, socket_url};
use boardlink::networking::{run_game, ClientIdentity, Intent, Session, Transport};
use boardlink::rendering::{render_board, render_status};
use shared::protocol::Color;

#[derive(Parser, Debug)]
#[command(name = "boardlink", about = "Two-player networked chess client")]
struct Cli {
    /// Game server base URL; overrides the stored setting for this run
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new game and play it
    New {
        #[arg(long, value_enum, default_value_t = ColorArg::White)]
        color: ColorArg,
    },
    /// Join an existing game by id
    Join { game_id: String },
    /// Forget the stored client identity and generate a new one
    ResetId,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ColorArg {
    White,
    Black,
}

impl From<ColorArg> for Color {
    fn from(value: ColorArg) -> Self {
        match value {
            ColorArg::White => Color::White,
            ColorArg::Black => Color::Black,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = settings_path();
    let mut settings = load_or_init_settings(&path)
        .with_context(|| format!("failed to initialise settings at {}", path.display()))?;

    let server_raw = cli.server.unwrap_or_else(|| settings.server_url.clone());
    let server = parse_server_url(&server_raw)?;

    let game_id = match cli.command {
        Command::ResetId => {
            settings.reset_client_id();
            save_settings(&path, &settings).context("failed to save settings")?;
            println!("New client id: {}", settings.client_id);
            return Ok(());
        }
        Command::Join { game_id } => game_id,
        Command::New { color } => {
            let http = reqwest::Client::new();
            let game_id = create_game(&http, &server, color.into())
                .await
                .context("unable to create game")?;
            println!("Created game {game_id}");
            game_id
        }
    };

    let url = socket_url(&server, &game_id)?;
    let identity = ClientIdentity {
        client_id: settings.client_id.to_string(),
        game_id,
    };

    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    tokio::spawn(read_intents(intent_tx));

    let mut last_version = None;
    let mut last_status = String::new();
    run_game(url, identity, intent_rx, |session| {
        draw(session, &mut last_version, &mut last_status)
    })
    .await
    .context("game session failed")?;

    Ok(())
}

/// Redraw only when the board or the status line changed
fn draw<T: Transport>(
    session: &Session<T>,
    last_version: &mut Option<u64>,
    last_status: &mut String,
) {
    let version = session.board().version();
    let status = render_status(session);
    if *last_version == Some(version) && *last_status == status {
        return;
    }
    print!("{}", render_board(session.board(), session.perspective()));
    println!("{status}");
    *last_version = Some(version);
    *last_status = status;
}

/// Forward stdin commands as intents until EOF or `quit`
async fn read_intents(tx: mpsc::UnboundedSender<Intent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("failed to read stdin: {}", e);
                break;
            }
        };
        let Some(intent) = parse_intent(&line) else {
            if !line.trim().is_empty() {
                eprintln!("commands: <row> <col> | click <row> <col> | resign | reconnect | quit");
            }
            continue;
        };
        let quit = intent == Intent::Quit;
        if tx.send(intent).is_err() || quit {
            return;
        }
    }
    let _ = tx.send(Intent::Quit);
}

fn parse_intent(line: &str) -> Option<Intent> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["quit"] | ["exit"] => Some(Intent::Quit),
        ["resign"] => Some(Intent::Resign),
        ["reconnect"] => Some(Intent::Reconnect),
        ["click", row, col] | [row, col] => {
            let row = row.parse::<u8>().ok().filter(|r| *r < 8)?;
            let col = parse_column(col)?;
            Some(Intent::Click { row, col })
        }
        _ => None,
    }
}

/// Column as a digit 0-7 or a letter a-h
fn parse_column(raw: &str) -> Option<u8> {
    if let Ok(col) = raw.parse::<u8>() {
        return (col < 8).then_some(col);
    }
    match raw.as_bytes() {
        [letter @ b'a'..=b'h'] => Some(letter - b'a'),
        _ => None,
    }
}
