//! MindCompass CLI - Main Entry Point
//!
//! Loads settings, signs in when credentials are given, runs one
//! subcommand and prints its result as JSON.

mod cli;
mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mindcompass_application::{AnonymousSession, ApiClient, AuthSession};
use mindcompass_infrastructure::{FirebaseSession, ReqwestTransport, Settings};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Credentials};
use crate::commands::Outcome;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    let settings = Settings::load()?;

    tracing::debug!(
        api_url = %settings.api_url,
        "starting MindCompass CLI v{}",
        env!("CARGO_PKG_VERSION")
    );

    let session = session(&settings, args.credentials).await?;
    let client = ApiClient::new(
        settings.client_config()?,
        Arc::new(ReqwestTransport::new()?),
        session,
    );

    match commands::run(&client, args.command).await {
        Ok(Outcome::Output(value)) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Invalid(message)) => {
            eprintln!("error: {message}");
            Ok(ExitCode::from(2))
        }
        Ok(Outcome::Unencodable(message)) => {
            tracing::error!(error = %message, "could not encode response");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&e)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn session(
    settings: &Settings,
    credentials: Credentials,
) -> Result<Arc<dyn AuthSession>, Box<dyn std::error::Error>> {
    let (Some(email), Some(password)) = (credentials.email, credentials.password) else {
        return Ok(Arc::new(AnonymousSession));
    };

    let session = FirebaseSession::new(settings.firebase_config()?)?;
    session.sign_in(&email, &password).await?;
    Ok(Arc::new(session))
}
