use reqwest::StatusCode;

use std::time::Duration;

use crate::{
    config::Server,
    dto::{CreateNoteRequest, ErrorResponse, UpdateNoteRequest},
    models::Note,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{detail} (status {status})")]
    Server { status: StatusCode, detail: String },
}

/// HTTP access to the notes backend. One instance per process, holding the
/// connection pool and the configured request timeout.
pub struct NotesApi {
    client: reqwest::Client,
    base_url: String,
}

impl NotesApi {
    pub fn new(server: &Server, request_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: server.rest_url(),
        }
    }

    pub async fn get_all_notes(&self) -> Result<Vec<Note>, ApiError> {
        let response = self
            .client
            .get(format!("{}/notes", self.base_url))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_note(&self, request: &CreateNoteRequest) -> Result<Note, ApiError> {
        let response = self
            .client
            .post(format!("{}/notes", self.base_url))
            .json(request)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn update_note(
        &self,
        id: &str,
        request: &UpdateNoteRequest,
    ) -> Result<Note, ApiError> {
        let response = self
            .client
            .put(format!("{}/notes/{}", self.base_url, id))
            .json(request)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/notes/{}", self.base_url, id))
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    /// Passes 2xx responses through; turns anything else into `ApiError::Server`,
    /// preferring the server-supplied `detail` over the bare status line.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = match response.bytes().await {
            Ok(body) => serde_json::from_slice::<ErrorResponse>(&body)
                .map_or_else(|_| status.to_string(), |e| e.detail),
            Err(_) => status.to_string(),
        };

        Err(ApiError::Server { status, detail })
    }
}
