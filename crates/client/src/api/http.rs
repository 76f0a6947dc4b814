//! reqwest implementation of the REST collaborator
//!
//! Attaches the stored bearer credential to every request, surfaces server
//! messages verbatim on business-rule rejections, and discards the
//! credential on any 401 so the session reverts to anonymous. Transport
//! failures are reported as retryable; nothing retries automatically.

use crate::api::{
    AuthResponse, DownloadReceipt, LoginRequest, NotesApi, RegisterRequest, UploadReceipt,
};
use crate::config::ClientConfig;
use crate::metrics::RequestTimer;
use crate::token::TokenStore;
use async_trait::async_trait;
use noteshare_core::errors::{AppError, Result, ServerError};
use noteshare_core::models::note::percent_encode;
use noteshare_core::models::{
    Account, FeaturedFilter, Note, NoteFilters, PlatformStats, University, UniversityStats,
    UserStats,
};
use noteshare_core::upload::ValidatedUpload;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP client for the notes exchange collaborator
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl HttpApi {
    /// Build a client from configuration
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.api.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the stored credential, when present
    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        match self.store.load()? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Send a request, recording request metrics
    async fn execute(&self, method: &str, path: &str, builder: RequestBuilder) -> Result<Response> {
        let builder = self.authorize(builder)?;
        let timer = RequestTimer::start(method, path);

        match builder.send().await {
            Ok(response) => {
                timer.finish(response.status().as_u16());
                Ok(response)
            }
            Err(err) => {
                timer.finish(0);
                Err(err.into())
            }
        }
    }

    /// Turn a response into a value or a mapped error
    async fn handle<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ServerError>()
            .await
            .map(ServerError::into_message)
            .unwrap_or_else(|_| "Something went wrong. Please try again.".to_string());

        if status == StatusCode::UNAUTHORIZED {
            // Credential is invalid or expired; release it
            if let Err(err) = self.store.clear() {
                warn!(error = %err, "Failed to clear credential after 401");
            }
            debug!("Credential discarded, session reverts to anonymous");
            return Err(AppError::SessionExpired);
        }

        if status.is_client_error() {
            // Business-rule rejection, surfaced verbatim
            return Err(AppError::Rejected { message });
        }

        Err(AppError::Upstream {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .execute("GET", path, self.client.get(self.url(path)))
            .await?;
        self.handle(response).await
    }
}

#[async_trait]
impl NotesApi for HttpApi {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let path = "/auth/register";
        let builder = self.client.post(self.url(path)).json(request);
        let response = self.execute("POST", path, builder).await?;
        self.handle(response).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let path = "/auth/login";
        let builder = self.client.post(self.url(path)).json(request);
        let response = self.execute("POST", path, builder).await?;
        self.handle(response).await
    }

    async fn current_account(&self) -> Result<Account> {
        self.get("/auth/me").await
    }

    async fn list_universities(&self) -> Result<Vec<University>> {
        self.get("/universities").await
    }

    async fn create_university(&self, name: &str) -> Result<University> {
        let path = "/universities";
        let builder = self
            .client
            .post(self.url(path))
            .json(&json!({ "name": name, "streams": [] }));
        let response = self.execute("POST", path, builder).await?;
        self.handle(response).await
    }

    async fn add_stream(&self, university_id: &str, stream_name: &str) -> Result<University> {
        let path = format!("/universities/{}/streams", percent_encode(university_id));
        let builder = self
            .client
            .post(self.url(&path))
            .json(&json!({ "name": stream_name, "classes": [] }));
        let response = self.execute("POST", &path, builder).await?;
        self.handle(response).await
    }

    async fn list_notes(&self, filters: &NoteFilters) -> Result<Vec<Note>> {
        let path = "/notes";
        let builder = self.client.get(self.url(path)).query(&filters.to_query());
        let response = self.execute("GET", path, builder).await?;
        self.handle(response).await
    }

    async fn get_note(&self, note_id: &str) -> Result<Note> {
        let path = format!("/notes/{}", percent_encode(note_id));
        let response = self
            .execute("GET", &path, self.client.get(self.url(&path)))
            .await?;
        self.handle(response).await
    }

    async fn upload_note(&self, upload: &ValidatedUpload) -> Result<UploadReceipt> {
        let path = "/notes/upload";

        let file_part = Part::bytes(upload.file.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;

        let form = Form::new()
            .part("file", file_part)
            .text("title", upload.title.clone())
            .text("university", upload.university.clone())
            .text("stream", upload.stream.clone())
            .text("class", upload.class.clone())
            .text("subject", upload.subject.clone())
            .text("description", upload.description.clone())
            .text("thumbnail", upload.thumbnail.clone());

        let builder = self
            .client
            .post(self.url(path))
            .header("Idempotency-Key", upload.idempotency_key.clone())
            .multipart(form);

        let response = self.execute("POST", path, builder).await?;
        self.handle(response).await
    }

    async fn download_note(&self, note_id: &str) -> Result<DownloadReceipt> {
        let path = format!("/notes/{}/download", percent_encode(note_id));
        let response = self
            .execute("POST", &path, self.client.post(self.url(&path)))
            .await?;
        self.handle(response).await
    }

    async fn delete_note(&self, note_id: &str) -> Result<()> {
        let path = format!("/notes/{}", percent_encode(note_id));
        let response = self
            .execute("DELETE", &path, self.client.delete(self.url(&path)))
            .await?;
        let _: ServerError = self.handle(response).await?;
        Ok(())
    }

    async fn user_uploads(&self) -> Result<Vec<Note>> {
        self.get("/user/uploads").await
    }

    async fn user_downloads(&self) -> Result<Vec<Note>> {
        self.get("/user/downloads").await
    }

    async fn user_stats(&self) -> Result<UserStats> {
        self.get("/user/stats").await
    }

    async fn featured_notes(&self, filter: FeaturedFilter, limit: u32) -> Result<Vec<Note>> {
        let path = "/explore/notes/featured";
        let limit = limit.to_string();
        let builder = self
            .client
            .get(self.url(path))
            .query(&[("filter", filter.as_str()), ("limit", limit.as_str())]);
        let response = self.execute("GET", path, builder).await?;
        self.handle(response).await
    }

    async fn university_stats(&self, university: &str) -> Result<UniversityStats> {
        let path = format!(
            "/explore/universities/{}/stats",
            percent_encode(university)
        );
        self.get(&path).await
    }

    async fn platform_stats(&self) -> Result<PlatformStats> {
        self.get("/stats").await
    }
}
