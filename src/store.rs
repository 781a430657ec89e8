use crate::errors::StoreError;
use crate::models::{Goal, GoalEdit, GoalId, NewGoal, SavedAmountPatch};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// The remote goal resource. Every call maps to exactly one HTTP request.
#[async_trait]
pub trait GoalStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Goal>, StoreError>;
    async fn create(&self, goal: &NewGoal) -> Result<Goal, StoreError>;
    async fn deposit(&self, id: &GoalId, saved_amount: f64) -> Result<Goal, StoreError>;
    async fn edit(&self, id: &GoalId, fields: &GoalEdit) -> Result<Goal, StoreError>;
    async fn delete(&self, id: &GoalId) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct HttpGoalStore {
    client: Client,
    goals_url: String,
}

impl HttpGoalStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            goals_url: format!("{}/goals", base_url.trim_end_matches('/')),
        }
    }

    fn goal_url(&self, id: &GoalId) -> String {
        format!("{}/{}", self.goals_url, id.path_segment())
    }
}

#[async_trait]
impl GoalStore for HttpGoalStore {
    async fn list(&self) -> Result<Vec<Goal>, StoreError> {
        let response = self
            .client
            .get(&self.goals_url)
            .send()
            .await
            .map_err(StoreError::Request)?;
        decode(response).await
    }

    async fn create(&self, goal: &NewGoal) -> Result<Goal, StoreError> {
        let response = self
            .client
            .post(&self.goals_url)
            .json(goal)
            .send()
            .await
            .map_err(StoreError::Request)?;
        decode(response).await
    }

    async fn deposit(&self, id: &GoalId, saved_amount: f64) -> Result<Goal, StoreError> {
        let response = self
            .client
            .patch(self.goal_url(id))
            .json(&SavedAmountPatch { saved_amount })
            .send()
            .await
            .map_err(StoreError::Request)?;
        decode(response).await
    }

    async fn edit(&self, id: &GoalId, fields: &GoalEdit) -> Result<Goal, StoreError> {
        let response = self
            .client
            .patch(self.goal_url(id))
            .json(fields)
            .send()
            .await
            .map_err(StoreError::Request)?;
        decode(response).await
    }

    async fn delete(&self, id: &GoalId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.goal_url(id))
            .send()
            .await
            .map_err(StoreError::Request)?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(StoreError::Decode)
}
