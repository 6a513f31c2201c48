use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sessiongate::SessionContext;
use sessiongate::config::{
    ConfigError, DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STATE_DIR,
    SessionConfig, Timeouts,
};
use sessiongate::net::api::ApiError;
use sessiongate::router::NavigationError;
use sessiongate::storage::FileStorage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("api request failed: {0}")]
    Api(#[from] ApiError),
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("login failed")]
    LoginFailed,
    #[error("signup failed")]
    SignupFailed,
}


#[derive(Parser, Debug)]
#[command(name = "sessiongate", about = "Authenticated session client")]
struct Cli {
    #[arg(long, env = "SESSIONGATE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Directory holding the persisted session.
    #[arg(long, env = "SESSIONGATE_STATE_DIR", default_value = DEFAULT_STATE_DIR)]
    state_dir: PathBuf,

    #[arg(long, env = "SESSIONGATE_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "SESSIONGATE_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and sign in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SESSIONGATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SESSIONGATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the persisted session.
    Logout,
    /// Show the current session.
    Status,
    /// Resolve a route through the navigation guard.
    Navigate { path: String },
    /// Authorized `GET` against the backend; prints the JSON response.
    Get { path: String },
}

fn load_config(cli: &Cli) -> Result<SessionConfig, CliError> {
    Ok(SessionConfig {
        state_dir: cli.state_dir.clone(),
        timeouts: Timeouts { request_secs: cli.request_timeout_secs, connect_secs: cli.connect_timeout_secs },
        ..SessionConfig::new(&cli.api_url)?
    })
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let storage = Arc::new(FileStorage::in_dir(&config.state_dir));
    let ctx = SessionContext::bootstrap(&config, storage)?;
    let store = ctx.store();

    match cli.command {
        Command::Signup { name, email, password } => {
            if !store.signup(&name, &email, &password).await {
                return Err(CliError::SignupFailed);
            }
            println!("signed up as {email}");
        }
        Command::Login { email, password } => {
            if !store.login(&email, &password).await {
                return Err(CliError::LoginFailed);
            }
            println!("logged in as {email}");
        }
        Command::Logout => {
            store.logout();
            println!("logged out");
        }
        Command::Status => match store.user() {
            Some(user) if store.is_authenticated() => {
                println!("authenticated: {} <{}> id={} role={}", user.name, user.email, user.id, user.role);
                println!("admin: {}", store.is_admin());
            }
            None if store.is_authenticated() => println!("authenticated (no profile stored)"),
            _ => println!("not authenticated"),
        },
        Command::Navigate { path } => {
            let nav = ctx.router().navigate(&path)?;
            for hop in &nav.redirects {
                println!("redirect -> {hop}");
            }
            match nav.title() {
                Some(title) => println!("{} ({}) \"{title}\"", nav.route.path, nav.route.name),
                None => println!("{} ({})", nav.route.path, nav.route.name),
            }
        }
        Command::Get { path } => {
            let body: serde_json::Value = ctx.api().get_json(&path).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}
