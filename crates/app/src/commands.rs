//! Subcommand execution.

use mindcompass_application::{
    ApiClient, ApiResult, HttpTransport, JournalPage, MoodRange, NewJournalEntry, NewMoodLog,
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{Commands, GoalCommands, JournalCommands, MoodCommands};

/// Output of a command, or what stops it before the request is sent.
#[derive(Debug)]
pub enum Outcome {
    /// JSON to print
    Output(Value),
    /// The arguments were rejected locally
    Invalid(String),
    /// The response could not be turned into JSON
    Unencodable(String),
}

/// Runs one subcommand against the API.
///
/// # Errors
///
/// Returns the normalized `ApiError` of the failed call.
pub async fn run<T: HttpTransport>(client: &ApiClient<T>, command: Commands) -> ApiResult<Outcome> {
    match command {
        Commands::Health => output(client.health().check().await?),
        Commands::Profile => output(client.users().get_profile().await?),
        Commands::Journal { command } => journal(client, command).await,
        Commands::Goals { command } => goals(client, command).await,
        Commands::Moods { command } => moods(client, command).await,
    }
}

async fn journal<T: HttpTransport>(
    client: &ApiClient<T>,
    command: JournalCommands,
) -> ApiResult<Outcome> {
    let journal = client.journal();
    match command {
        JournalCommands::List { page, limit } => {
            output(journal.get_entries(JournalPage { page, limit }).await?)
        }
        JournalCommands::Show { id } => output(journal.get_entry(&id).await?),
        JournalCommands::Create { content, mood } => {
            output(journal.create_entry(&NewJournalEntry { content, mood }).await?)
        }
        JournalCommands::Delete { id } => {
            journal.delete_entry(&id).await?;
            output(serde_json::json!({ "deleted": id }))
        }
    }
}

async fn goals<T: HttpTransport>(
    client: &ApiClient<T>,
    command: GoalCommands,
) -> ApiResult<Outcome> {
    let goals = client.goals();
    match command {
        GoalCommands::List => output(goals.get_goals().await?),
        GoalCommands::Show { id } => output(goals.get_goal(&id).await?),
        GoalCommands::Delete { id } => {
            goals.delete_goal(&id).await?;
            output(serde_json::json!({ "deleted": id }))
        }
    }
}

async fn moods<T: HttpTransport>(
    client: &ApiClient<T>,
    command: MoodCommands,
) -> ApiResult<Outcome> {
    let moods = client.moods();
    match command {
        MoodCommands::List { from, to } => output(
            moods
                .get_moods(MoodRange {
                    start_date: from,
                    end_date: to,
                })
                .await?,
        ),
        MoodCommands::Log { mood, score, note } => {
            let log = match NewMoodLog::new(mood, score) {
                Ok(log) => log,
                Err(e) => return Ok(Outcome::Invalid(e.to_string())),
            };
            let log = match note {
                Some(note) => log.with_note(note),
                None => log,
            };
            output(moods.log_mood(&log).await?)
        }
    }
}

fn output<S: Serialize>(value: S) -> ApiResult<Outcome> {
    Ok(serde_json::to_value(value)
        .map_or_else(|e| Outcome::Unencodable(e.to_string()), Outcome::Output))
}
