//! Goal endpoints

use chrono::{DateTime, Utc};
use mindcompass_domain::{Goal, GoalCategory, GoalStatus};
use serde::Serialize;

use super::segment;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::ports::HttpTransport;

const GOALS_PATH: &str = "/api/v1/goals";

/// Body of a new goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    /// Title
    pub title: String,
    /// Longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<GoalCategory>,
    /// Target date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
}

impl NewGoal {
    /// Creates a goal body with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: None,
            target_date: None,
        }
    }
}

/// Partial update of a goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<GoalCategory>,
    /// New target date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    /// New progress, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
}

/// Goal endpoints.
pub struct GoalsApi<'a, T: HttpTransport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> GoalsApi<'a, T> {
    pub(super) const fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /api/v1/goals`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn get_goals(&self) -> ApiResult<Vec<Goal>> {
        self.client.get(GOALS_PATH, RequestOptions::new()).await
    }

    /// `GET /api/v1/goals/{id}`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn get_goal(&self, id: &str) -> ApiResult<Goal> {
        self.client.get(&goal_path(id), RequestOptions::new()).await
    }

    /// `POST /api/v1/goals`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn create_goal(&self, goal: &NewGoal) -> ApiResult<Goal> {
        self.client
            .post(GOALS_PATH, goal, RequestOptions::new())
            .await
    }

    /// `PATCH /api/v1/goals/{id}`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn update_goal(&self, id: &str, update: &GoalUpdate) -> ApiResult<Goal> {
        self.client
            .patch(&goal_path(id), update, RequestOptions::new())
            .await
    }

    /// `DELETE /api/v1/goals/{id}`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn delete_goal(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&goal_path(id), RequestOptions::new())
            .await
    }
}

fn goal_path(id: &str) -> String {
    format!("{GOALS_PATH}/{}", segment(id))
}
