//! Journal endpoints

use mindcompass_domain::{JournalEntry, MoodType, PaginatedResponse, QueryParams};
use serde::Serialize;

use super::segment;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::ports::HttpTransport;

const JOURNAL_PATH: &str = "/api/v1/journal";

/// Paging parameters for the entry list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JournalPage {
    /// Page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl JournalPage {
    fn query(self) -> QueryParams {
        let mut query = QueryParams::new();
        query.add_opt("page", self.page);
        query.add_opt("limit", self.limit);
        query
    }
}

/// Body of a new journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewJournalEntry {
    /// Entry text
    pub content: String,
    /// Mood to record with the entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodType>,
}

/// Partial update of a journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JournalEntryUpdate {
    /// New text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New mood
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodType>,
}

/// Journal endpoints.
pub struct JournalApi<'a, T: HttpTransport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> JournalApi<'a, T> {
    pub(super) const fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /api/v1/journal?page=&limit=`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn get_entries(
        &self,
        page: JournalPage,
    ) -> ApiResult<PaginatedResponse<JournalEntry>> {
        self.client
            .get(JOURNAL_PATH, RequestOptions::with_query(page.query()))
            .await
    }

    /// `GET /api/v1/journal/{id}`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn get_entry(&self, id: &str) -> ApiResult<JournalEntry> {
        self.client
            .get(&entry_path(id), RequestOptions::new())
            .await
    }

    /// `POST /api/v1/journal`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn create_entry(&self, entry: &NewJournalEntry) -> ApiResult<JournalEntry> {
        self.client
            .post(JOURNAL_PATH, entry, RequestOptions::new())
            .await
    }

    /// `PATCH /api/v1/journal/{id}`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn update_entry(
        &self,
        id: &str,
        update: &JournalEntryUpdate,
    ) -> ApiResult<JournalEntry> {
        self.client
            .patch(&entry_path(id), update, RequestOptions::new())
            .await
    }

    /// `DELETE /api/v1/journal/{id}`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn delete_entry(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&entry_path(id), RequestOptions::new())
            .await
    }
}

fn entry_path(id: &str) -> String {
    format!("{JOURNAL_PATH}/{}", segment(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::tests::{MockSession, MockTransport};
    use crate::config::ClientConfig;
    use crate::ports::AuthSession;
    use mindcompass_domain::HttpMethod;
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

    #[tokio::test]
    async fn test_get_entries_sends_paging_query() {
        let transport = Arc::new(MockTransport::new().respond(
            200,
            r#"{"items":[{"id":"j1","content":"hi"}],"total":1,"page":2,"pageSize":10,"hasMore":false}"#,
        ));

        let page = client(&transport)
            .journal()
            .get_entries(JournalPage {
                page: Some(2),
                limit: Some(10),
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "j1");
        assert_eq!(transport.sent()[0].url.query(), Some("page=2&limit=10"));
    }

    #[tokio::test]
    async fn test_get_entries_without_paging_has_no_query() {
        let transport = Arc::new(MockTransport::new().respond(200, r#"{"items":[]}"#));

        client(&transport)
            .journal()
            .get_entries(JournalPage::default())
            .await
            .unwrap();

        assert_eq!(transport.sent()[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_create_entry_body() {
        let transport =
            Arc::new(MockTransport::new().respond(201, r#"{"id":"j1","content":"hi"}"#));

        let entry = client(&transport)
            .journal()
            .create_entry(&NewJournalEntry {
                content: "hi".to_string(),
                mood: None,
            })
            .await
            .unwrap();

        assert_eq!(entry.content, "hi");
        let sent = transport.sent();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].url.path(), "/api/v1/journal");
        assert_eq!(sent[0].body, Some(json!({ "content": "hi" })));
    }

    #[tokio::test]
    async fn test_entry_paths() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(200, r#"{"id":"j 1","content":"x"}"#)
                .respond(200, r#"{"id":"j1","content":"y","mood":"happy"}"#)
                .respond(204, ""),
        );
        let client = client(&transport);
        let journal = client.journal();

        journal.get_entry("j 1").await.unwrap();
        journal
            .update_entry(
                "j1",
                &JournalEntryUpdate {
                    mood: Some(MoodType::Happy),
                    ..JournalEntryUpdate::default()
                },
            )
            .await
            .unwrap();
        journal.delete_entry("j1").await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].url.path(), "/api/v1/journal/j%201");
        assert_eq!(sent[1].method, HttpMethod::Patch);
        assert_eq!(sent[1].body, Some(json!({ "mood": "happy" })));
        assert_eq!(sent[2].method, HttpMethod::Delete);
        assert_eq!(sent[2].url.path(), "/api/v1/journal/j1");
    }
}
