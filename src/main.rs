//! Predictrix - command-line client for the Predictrix signal service.
//!
//! Every command prints the uniform `{success, data | error}` result as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use predictrix::api::{ApiResult, HttpClient};
use predictrix::models::{NotificationPreferences, Theme};
use predictrix::{Config, FileStore, KeyValueStore, PredictrixApi};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// `predictrix` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "predictrix",
    about = "Forex signals, rates and news from the Predictrix service",
    version
)]
struct Cli {
    /// Path to a `config.toml`. Defaults to the platform config directory.
    #[arg(long, value_name = "path")]
    config: Option<PathBuf>,
    /// Override the backend base URL.
    #[arg(long = "base-url", value_name = "url")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session.
    Login { email: String, password: String },
    /// Create an account and store the session.
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Confirm an email address.
    VerifyEmail { email: String, code: String },
    /// Send a new verification code.
    ResendVerification { email: String },
    /// Request a password reset code.
    ForgotPassword { email: String },
    /// Set a new password with a reset code.
    ResetPassword {
        email: String,
        code: String,
        new_password: String,
    },
    /// Sign out and remove the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Latest signal for a pair, e.g. EURUSD.
    Signal { pair: String },
    /// Latest signals for all pairs.
    Signals {
        /// Only bookmarked signals.
        #[arg(long)]
        saved: bool,
    },
    /// Bookmark a signal.
    SaveSignal { id: String },
    /// Live rates. No pairs means all.
    Rates { pairs: Vec<String> },
    /// Recent news.
    News {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// AI analysis for a news story.
    Analysis { id: String },
    /// Show notification preferences.
    Prefs,
    /// Set the minimum signal confidence for notifications.
    SetMinConfidence { percent: f64 },
    /// Register a push token for this installation.
    RegisterDevice { push_token: String },
    /// Show or set the theme preference.
    Theme { theme: Option<Theme> },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.clone()).context("load configuration")?;
    if let Some(base_url) = cli.base_url.clone() {
        config.api.base_url = base_url;
    }

    let _log_guard = predictrix::logging::init(&config.logging).context("initialize logging")?;

    let store_path = config.storage.resolve_path()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(&store_path)
            .await
            .with_context(|| format!("open store at {}", store_path.display()))?,
    );

    let http = HttpClient::builder()
        .config(config.api.clone())
        .store(store)
        .build()
        .context("build HTTP client")?;
    let api = PredictrixApi::new(http);

    tracing::debug!(base_url = %config.api.base_url, "Client ready");

    run(&api, cli.command).await
}

async fn run(api: &PredictrixApi, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Login { email, password } => print(api.login(&email, &password).await),
        Command::Register {
            name,
            email,
            password,
        } => print(api.register(&name, &email, &password).await),
        Command::VerifyEmail { email, code } => print(api.verify_email(&email, &code).await),
        Command::ResendVerification { email } => print(api.resend_verification(&email).await),
        Command::ForgotPassword { email } => print(api.forgot_password(&email).await),
        Command::ResetPassword {
            email,
            code,
            new_password,
        } => print(api.reset_password(&email, &code, &new_password).await),
        Command::Logout => print(api.logout().await),
        Command::Whoami => print(api.current_user().await),
        Command::Signal { pair } => print(api.fetch_signal(&pair).await),
        Command::Signals { saved: false } => print(api.fetch_signals().await),
        Command::Signals { saved: true } => print(api.saved_signals().await),
        Command::SaveSignal { id } => print(api.save_signal(&id).await),
        Command::Rates { pairs } => {
            let pairs: Vec<&str> = pairs.iter().map(String::as_str).collect();
            print(api.fetch_rates(&pairs).await)
        }
        Command::News { limit } => print(api.fetch_news(limit).await),
        Command::Analysis { id } => print(api.news_analysis(&id).await),
        Command::Prefs => print(api.notification_preferences().await),
        Command::SetMinConfidence { percent } => {
            let current = match api.notification_preferences().await {
                ApiResult::Success(prefs) => prefs,
                ApiResult::Failure(message) => {
                    return print::<NotificationPreferences>(ApiResult::Failure(message));
                }
            };
            let updated = NotificationPreferences {
                min_confidence: percent,
                ..current
            };
            print(api.update_notification_preferences(&updated).await)
        }
        Command::RegisterDevice { push_token } => print(api.register_device(&push_token).await),
        Command::Theme { theme: Some(theme) } => {
            api.preferences().set_theme(theme).await?;
            print(ApiResult::success(theme))
        }
        Command::Theme { theme: None } => print(ApiResult::success(api.preferences().theme().await?)),
    }
}

fn print<T: Serialize>(result: ApiResult<T>) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
