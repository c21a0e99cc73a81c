//! TalkTemplate CLI - command-line view layer for the TalkTemplate client
//!
//! Drives the session manager the way the web views do: auth commands gate
//! their destination through the route table, the template list renders the
//! catalog, and chat talks to the simulated assistant.

mod routes;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use talktemplate_client::{
    assistant::{Assistant, GREETING},
    catalog, manager::messages, preferences, ApiClientConfig, AuthApiClient, FileStore,
    SessionManager,
};
use talktemplate_core::{
    init_logging, ApprovalStatus, AuthOutcome, ClientConfig, ErrorContext, LoggingConfig,
    SessionState, TalkError, TalkResult,
};

use routes::Route;

#[derive(Parser)]
#[command(name = "talktemplate")]
#[command(about = "AI-assisted KakaoTalk AlimTalk template client")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Request an email verification code
    RequestOtp { email: String },

    /// Register a new account with a received verification code
    Register {
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Verification code received by email
        #[arg(long)]
        code: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// List templates and their approval status
    Templates {
        /// Filter by approval status (approved, in-review, rejected)
        #[arg(long)]
        status: Option<String>,

        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },

    /// Chat with the template assistant
    Chat,

    /// Toggle the UI theme between light and dark
    Theme,

    /// Show where a route resolves for the current session
    Routes {
        /// Route name or path; omit to list the whole table
        route: Option<String>,
    },
}

#[tokio::main]
async fn main() -> TalkResult<()> {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }

    init_logging(&logging_config).map_err(|e| TalkError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    let config = load_config(cli.config.as_deref())?;
    config.validate()?;

    let manager = build_manager(&config)?;
    manager.restore();

    match cli.command {
        Commands::Login { email, password } => {
            let outcome = manager.login(&email, &password).await;
            report_outcome(outcome, &manager);
        }
        Commands::RequestOtp { email } => {
            let outcome = manager.request_otp(&email).await;
            if outcome.success {
                println!("인증번호가 이메일로 전송되었습니다.");
            } else {
                fail_with(outcome);
            }
        }
        Commands::Register {
            email,
            password,
            name,
            code,
        } => {
            let outcome = manager.register(&email, &password, &name, &code).await;
            report_outcome(outcome, &manager);
        }
        Commands::Logout => {
            manager.logout();
            println!("{}", Route::Home.path());
        }
        Commands::Whoami => handle_whoami(&manager),
        Commands::Templates { status, category } => handle_templates(status, category)?,
        Commands::Chat => handle_chat(&manager).await?,
        Commands::Theme => handle_theme(&config)?,
        Commands::Routes { route } => handle_routes(route, &manager),
    }

    Ok(())
}

/// Load the config file if one was given or the default location exists;
/// otherwise fall back to defaults
fn load_config(path: Option<&Path>) -> TalkResult<ClientConfig> {
    if let Some(path) = path {
        info!("Loading configuration from {}", path.display());
        return ClientConfig::from_file(path);
    }

    let default_path = data_dir(&ClientConfig::default()).join("config.toml");
    if default_path.exists() {
        info!("Loading configuration from {}", default_path.display());
        return ClientConfig::from_file(default_path);
    }

    Ok(ClientConfig::default())
}

/// Expand a leading `~/` in the configured data directory
fn data_dir(config: &ClientConfig) -> PathBuf {
    let raw = &config.storage.data_dir;
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

fn open_store(config: &ClientConfig) -> TalkResult<Arc<FileStore>> {
    let path = data_dir(config).join("session.json");
    Ok(Arc::new(FileStore::open(path)?))
}

fn build_manager(config: &ClientConfig) -> TalkResult<SessionManager> {
    let client = AuthApiClient::new(ApiClientConfig::from_client_config(config))?;
    let store = open_store(config)?;
    Ok(SessionManager::new(client, store))
}

/// Print the destination route on success, the inline message on failure
fn report_outcome(outcome: AuthOutcome, manager: &SessionManager) {
    if outcome.success {
        let destination = routes::resolve(Route::Chat, &manager.state()).unwrap_or(Route::Login);
        println!("{}", destination.path());
    } else {
        fail_with(outcome);
    }
}

fn fail_with(outcome: AuthOutcome) -> ! {
    eprintln!(
        "{}",
        outcome.error.unwrap_or_else(|| messages::LOGIN_FAILED.to_string())
    );
    std::process::exit(1);
}

fn handle_whoami(manager: &SessionManager) {
    match manager.state() {
        SessionState::Authenticated(session) => {
            println!("{} <{}> (id {})", session.display_name, session.email, session.user_id);
        }
        _ => {
            eprintln!("로그인이 필요합니다.");
            std::process::exit(1);
        }
    }
}

fn handle_templates(status: Option<String>, category: Option<String>) -> TalkResult<()> {
    let status = match status.as_deref() {
        Some(raw) => Some(ApprovalStatus::parse(raw).ok_or_else(|| TalkError::Validation {
            message: format!("Unknown approval status: {}", raw),
            field: Some("status".to_string()),
            context: ErrorContext::new("cli")
                .with_operation("templates")
                .with_suggestion("Use approved, in-review, or rejected"),
        })?),
        None => None,
    };

    let templates = catalog::sample_templates();
    let visible = catalog::filter(&templates, status, category.as_deref());

    println!("전체 템플릿 ({}개)", visible.len());
    for template in visible {
        println!(
            "[{}] {} · {} · {} · {}",
            template.id, template.title, template.status, template.category, template.created_at
        );
    }

    Ok(())
}

async fn handle_chat(manager: &SessionManager) -> TalkResult<()> {
    // the chat view sits behind the route gate
    if routes::resolve(Route::Chat, &manager.state()) != Some(Route::Chat) {
        eprintln!("로그인이 필요합니다.");
        std::process::exit(1);
    }

    let assistant = Assistant::new();

    println!("{}", GREETING);
    println!("(빈 줄을 입력하면 종료됩니다)");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }

        let Some(reply) = assistant.reply(&line).await else {
            break;
        };

        println!();
        println!("{}", reply.content);
        println!();
        println!("── 템플릿 미리보기 ──");
        println!("제목: {}", reply.template.title);
        println!("{}", reply.template.content);
        println!("변수: {}", reply.template.variables.join(", "));
        if let Some(compliance) = &reply.template.compliance {
            println!("심사 예상 점수: {}점", compliance.score);
            for suggestion in &compliance.suggestions {
                println!("  - {}", suggestion);
            }
        }
        println!();

        io::stdout().flush()?;
    }

    Ok(())
}

fn handle_theme(config: &ClientConfig) -> TalkResult<()> {
    let store = open_store(config)?;
    let theme = preferences::toggle(store.as_ref());
    println!("{}", theme.as_str());
    Ok(())
}

fn handle_routes(route: Option<String>, manager: &SessionManager) {
    let state = manager.state();

    match route {
        Some(raw) => match Route::parse(&raw) {
            Some(route) => match routes::resolve(route, &state) {
                Some(destination) => println!("{} -> {}", route.path(), destination.path()),
                None => println!("{} -> (restoring)", route.path()),
            },
            None => {
                eprintln!("Unknown route: {}", raw);
                std::process::exit(1);
            }
        },
        None => {
            for route in Route::ALL {
                let destination = routes::resolve(route, &state)
                    .map(|r| r.path())
                    .unwrap_or("(restoring)");
                println!("{:<15} -> {}", route.path(), destination);
            }
        }
    }
}
