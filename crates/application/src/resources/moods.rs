//! Mood endpoints

use chrono::NaiveDate;
use mindcompass_domain::records::validate_mood_score;
use mindcompass_domain::{DomainResult, MoodEntry, MoodType, QueryParams};
use serde::Serialize;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::ports::HttpTransport;

const MOODS_PATH: &str = "/api/v1/moods";

/// Date filter for the mood list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodRange {
    /// First day included
    pub start_date: Option<NaiveDate>,
    /// Last day included
    pub end_date: Option<NaiveDate>,
}

impl MoodRange {
    fn query(self) -> QueryParams {
        let mut query = QueryParams::new();
        query.add_opt("startDate", self.start_date);
        query.add_opt("endDate", self.end_date);
        query
    }
}

/// Body of a mood log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMoodLog {
    /// Mood
    pub mood: MoodType,
    /// Score, 1-10
    pub score: u8,
    /// Optional note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewMoodLog {
    /// Creates a mood log, checking the score range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MoodScoreOutOfRange` for scores outside 1-10.
    pub fn new(mood: MoodType, score: u8) -> DomainResult<Self> {
        Ok(Self {
            mood,
            score: validate_mood_score(score)?,
            note: None,
        })
    }

    /// Adds a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Mood endpoints.
pub struct MoodsApi<'a, T: HttpTransport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> MoodsApi<'a, T> {
    pub(super) const fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /api/v1/moods?startDate=&endDate=`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn get_moods(&self, range: MoodRange) -> ApiResult<Vec<MoodEntry>> {
        self.client
            .get(MOODS_PATH, RequestOptions::with_query(range.query()))
            .await
    }

    /// `POST /api/v1/moods`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn log_mood(&self, log: &NewMoodLog) -> ApiResult<MoodEntry> {
        self.client
            .post(MOODS_PATH, log, RequestOptions::new())
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::tests::{MockSession, MockTransport};
    use crate::config::ClientConfig;
    use crate::ports::AuthSession;
    use mindcompass_domain::DomainError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn client(transport: &Arc<MockTransport>) -> ApiClient<MockTransport> {
        ApiClient::new(
            ClientConfig::new("http://api.test"),
            Arc::clone(transport),
            Arc::new(MockSession::signed_in("t1", "t2")) as Arc<dyn AuthSession>,
        )
    }

    #[test]
    fn test_new_mood_log_validates_score() {
        assert_eq!(
            NewMoodLog::new(MoodType::Sad, 0),
            Err(DomainError::MoodScoreOutOfRange(0))
        );
        assert!(NewMoodLog::new(MoodType::Sad, 3).is_ok());
    }

    #[tokio::test]
    async fn test_get_moods_date_range_query() {
        let transport = Arc::new(MockTransport::new().respond(
            200,
            r#"[{"id":"m1","mood":"calm","score":6}]"#,
        ));

        let moods = client(&transport)
            .moods()
            .get_moods(MoodRange {
                start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
            })
            .await
            .unwrap();

        assert_eq!(moods[0].mood, Some(MoodType::Calm));
        assert_eq!(
            transport.sent()[0].url.query(),
            Some("startDate=2024-03-01&endDate=2024-03-31")
        );
    }

    #[tokio::test]
    async fn test_get_moods_keeps_unfamiliar_entries() {
        let transport = Arc::new(MockTransport::new().respond(
            200,
            r#"[{"id":"m1","mood":"calm","score":6},{"id":"m2","mood":"tired","score":7.5}]"#,
        ));

        let moods = client(&transport)
            .moods()
            .get_moods(MoodRange::default())
            .await
            .unwrap();

        assert_eq!(moods.len(), 2);
        assert_eq!(moods[1].mood, Some(MoodType::Unknown));
        assert_eq!(moods[1].score, Some(7.5));
    }

    #[tokio::test]
    async fn test_log_mood_body() {
        let transport = Arc::new(MockTransport::new().respond(
            201,
            r#"{"id":"m2","mood":"happy","score":8,"note":"sunny"}"#,
        ));

        let log = NewMoodLog::new(MoodType::Happy, 8).unwrap().with_note("sunny");
        let entry = client(&transport).moods().log_mood(&log).await.unwrap();

        assert_eq!(entry.id, "m2");
        assert_eq!(
            transport.sent()[0].body,
            Some(json!({ "mood": "happy", "score": 8, "note": "sunny" }))
        );
    }
}
