//! Command line definition.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use mindcompass_domain::MoodType;

/// MindCompass - talk to the MindCompass backend from the terminal
#[derive(Debug, Parser)]
#[command(name = "mindcompass", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub credentials: Credentials,

    #[command(subcommand)]
    pub command: Commands,
}

/// Email/password sign-in. Without both, calls go out unauthenticated.
#[derive(Debug, Args)]
pub struct Credentials {
    /// Account email
    #[arg(long, global = true, env = "MINDCOMPASS_EMAIL")]
    pub email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "MINDCOMPASS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the backend is up
    Health,

    /// Show the signed-in user's profile
    Profile,

    /// Manage journal entries
    Journal {
        #[command(subcommand)]
        command: JournalCommands,
    },

    /// Manage goals
    Goals {
        #[command(subcommand)]
        command: GoalCommands,
    },

    /// Log and list moods
    Moods {
        #[command(subcommand)]
        command: MoodCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum JournalCommands {
    /// List entries
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one entry
    Show { id: String },
    /// Write a new entry
    Create {
        content: String,
        #[arg(long)]
        mood: Option<MoodType>,
    },
    /// Delete an entry
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum GoalCommands {
    /// List goals
    List,
    /// Show one goal
    Show { id: String },
    /// Delete a goal
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum MoodCommands {
    /// List moods, optionally within a date range (YYYY-MM-DD)
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Log a mood with a 1-10 score
    Log {
        mood: MoodType,
        score: u8,
        #[arg(long)]
        note: Option<String>,
    },
}
