//! Remote backend implementation

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use taskdeck_core::{CompletionPatch, Task, TaskDraft, TaskId};
use tracing::debug;

use super::types::RemoteConfig;
use crate::backend::TaskBackend;
use crate::error::{Error, Result};

/// REST client for the task API
pub struct RemoteBackend {
    config: RemoteConfig,
    client: Client,
}

impl RemoteBackend {
    /// Create a new remote backend
    pub fn new(config: RemoteConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Error::Config("remote base URL is empty".to_string()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url())
    }

    fn item_url(&self, id: TaskId) -> String {
        format!("{}/todos/{}", self.base_url(), id)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, id: Option<TaskId>) -> Result<Response> {
        let response = self.authorize(builder).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(Error::NotFound(id));
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(Error::api(status, error_text))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        id: Option<TaskId>,
    ) -> Result<T> {
        let response = self.send(builder, id).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TaskBackend for RemoteBackend {
    fn backend_id(&self) -> &str {
        "remote"
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let url = self.collection_url();
        debug!(%url, "GET tasks");
        self.send_json(self.client.get(&url), None).await
    }

    async fn create(&self, draft: TaskDraft) -> Result<Task> {
        let url = self.collection_url();
        debug!(%url, "POST task");
        self.send_json(self.client.post(&url).json(&draft), None)
            .await
    }

    async fn update(&self, id: TaskId, draft: TaskDraft) -> Result<Task> {
        let url = self.item_url(id);
        debug!(%url, "PUT task");
        self.send_json(self.client.put(&url).json(&draft), Some(id))
            .await
    }

    async fn toggle_complete(&self, id: TaskId, completed: bool) -> Result<Task> {
        let url = format!("{}/complete", self.item_url(id));
        debug!(%url, completed, "PATCH task completion");
        self.send_json(
            self.client.patch(&url).json(&CompletionPatch { completed }),
            Some(id),
        )
        .await
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        let url = self.item_url(id);
        debug!(%url, "DELETE task");
        self.send(self.client.delete(&url), Some(id)).await?;
        Ok(())
    }
}
