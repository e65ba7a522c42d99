use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use authgate_lib::{
    auth::{ScryptHasher, SecretHasher},
    config::{Settings, DEFAULT_CONFIG_FILE},
    logging,
    redact::log_user_rows,
    router,
    storage::{FlatFileUserStore, MemoryUserStore, UserStore},
    AppState,
};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "authgate", version, about = "Authentication gateway server")]
struct Cli {
    /// TOML settings file, overridden by AUTHGATE_* variables
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Log every stored user with personal fields redacted
    DumpUsers,
    /// Print the scrypt hash of a password
    HashPassword { plaintext: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_from(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    logging::init(&settings)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => match settings.users_file.clone() {
            Some(path) => serve(FlatFileUserStore::open(path)?, settings).await,
            None => serve(MemoryUserStore::new(), settings).await,
        },
        Command::DumpUsers => {
            let count = match settings.users_file.as_ref() {
                Some(path) => log_user_rows(&FlatFileUserStore::open(path)?),
                None => 0,
            };
            tracing::info!(count, "users dumped");
            Ok(())
        },
        Command::HashPassword { plaintext } => {
            let hasher = ScryptHasher::with_log_n(settings.scrypt_log_n)?;
            println!("{}", hasher.hash(&plaintext)?);
            Ok(())
        },
    }
}

async fn serve<S: UserStore + Clone + 'static>(users: S, settings: Settings) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(users, &settings)?);

    // Purge expired sessions in the background
    let sessions = state.sessions.clone();
    let period = Duration::from_secs(settings.session_purge_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "expired sessions purged");
            }
        }
    });

    let app = router::create_app(state);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "listening");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
