use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::UserId;
use services::{QuizService, SheetsConfig, SheetsDatasetProvider};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use ui::{App, UiApp, build_app_context};

const DEFAULT_USERS: &str = "Alex,Eveline";
const DEFAULT_TITLE: &str = "Vocabulary Quiz";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUser { raw: String, source: quiz_core::Error },
    InvalidBind { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUser { raw, source } => {
                write!(f, "invalid --user value {raw:?}: {source}")
            }
            ArgsError::InvalidBind { raw } => write!(f, "invalid --bind value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArgsError::InvalidUser { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    title: String,
    users: Vec<UserId>,
    quiz: Arc<QuizService>,
}

impl UiApp for DesktopApp {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn users(&self) -> Vec<UserId> {
        self.users.clone()
    }

    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

struct Args {
    sheet_id: Option<String>,
    users: Vec<UserId>,
    title: String,
    bind: SocketAddr,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--sheet-id <id>] [--user <name>]... [--title <text>]");
    eprintln!("  cargo run -p app -- serve [--sheet-id <id>] [--bind <addr>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --user Alex --user Eveline");
    eprintln!("  --title \"{DEFAULT_TITLE}\"");
    eprintln!("  --bind {DEFAULT_BIND}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SHEET_ID, QUIZ_SHEETS_BASE_URL, QUIZ_USERS, QUIZ_TITLE, QUIZ_BIND,");
    eprintln!("  QUIZ_LOG (falls back to RUST_LOG)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Serve,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "serve" => Some(Self::Serve),
            _ => None,
        }
    }
}

fn parse_user(raw: String) -> Result<UserId, ArgsError> {
    UserId::new(raw.as_str()).map_err(|err| ArgsError::InvalidUser {
        raw,
        source: err.into(),
    })
}

fn parse_bind(raw: String) -> Result<SocketAddr, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidBind { raw })
}

fn parse_user_list(raw: &str) -> Result<Vec<UserId>, ArgsError> {
    raw.split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| parse_user(name.to_string()))
        .collect()
}

impl Args {
    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut sheet_id = None;
        let mut cli_users = Vec::new();
        let mut title = env::var("QUIZ_TITLE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let mut bind = parse_bind(env::var("QUIZ_BIND").unwrap_or_else(|_| DEFAULT_BIND.into()))?;

        while let Some(arg) = args.next() {
            match (cmd, arg.as_str()) {
                (_, "--sheet-id") => sheet_id = Some(require_value(args, "--sheet-id")?),
                (Command::Ui, "--user") => {
                    cli_users.push(parse_user(require_value(args, "--user")?)?);
                }
                (Command::Ui, "--title") => title = require_value(args, "--title")?,
                (Command::Serve, "--bind") => bind = parse_bind(require_value(args, "--bind")?)?,
                (_, "--help" | "-h") => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let users = if cli_users.is_empty() {
            let from_env = env::var("QUIZ_USERS").unwrap_or_else(|_| DEFAULT_USERS.into());
            parse_user_list(&from_env)?
        } else {
            cli_users
        };

        Ok(Self {
            sheet_id,
            users,
            title,
            bind,
        })
    }
}

fn init_tracing() {
    let level = env::var("QUIZ_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_fmt::layer().with_target(true))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = env::args().skip(1).collect();

    // A bare invocation or leading flags mean `ui`.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    // Remote I/O is wired here so core/services stay free of process config.
    let config = SheetsConfig::from_env_with(parsed.sheet_id)?;
    info!(sheet_id = %config.sheet_id, base_url = %config.base_url, "using sheets source");
    let provider = Arc::new(SheetsDatasetProvider::new(config));
    let quiz = QuizService::cached(provider);

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                title: parsed.title.clone(),
                users: parsed.users,
                quiz: Arc::new(quiz),
            });
            let context = build_app_context(&app);

            // tao may open the window pinned on top unless told otherwise.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(parsed.title)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Serve => {
            let listener = tokio::net::TcpListener::bind(parsed.bind).await?;
            info!(addr = %parsed.bind, "quiz api listening");
            axum::serve(listener, api::router(quiz)).await?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
