use async_trait::async_trait;
use reqwest::RequestBuilder;

use crate::{
    config::Config,
    error::{MeetlensError, Result},
    session::SessionContext,
    types::{AnalysisResponse, ChatRequest, ChatResponse},
};

/// Canned answer used when chat is not wired to a real endpoint.
pub const SCRIPTED_REPLY: &str = "I understand your question about the meeting. Based on the content, I can provide insights about the topics discussed, decisions made, and action items assigned.";

/// The two backend calls the insights view depends on.
#[async_trait]
pub trait InsightsBackend: Send + Sync {
    async fn fetch_analysis(&self, media_id: &str) -> Result<AnalysisResponse>;

    async fn send_chat(
        &self,
        session: &SessionContext,
        media_id: &str,
        message: &str,
    ) -> Result<String>;
}

pub struct HttpBackend {
    config: Config,
    client: reqwest::Client,
    access_token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            access_token: None,
        }
    }

    pub fn with_session(mut self, session: &SessionContext) -> Self {
        self.access_token = session.access_token.clone();
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl InsightsBackend for HttpBackend {
    async fn fetch_analysis(&self, media_id: &str) -> Result<AnalysisResponse> {
        let url = self.config.analysis_url(media_id);
        tracing::debug!(%url, "fetching analysis");

        let response = self.authorize(self.client.get(&url)).send().await?;
        if !response.status().is_success() {
            return Err(MeetlensError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<AnalysisResponse>().await?)
    }

    async fn send_chat(
        &self,
        session: &SessionContext,
        media_id: &str,
        message: &str,
    ) -> Result<String> {
        let body = ChatRequest {
            user_id: &session.user_id,
            media_id,
            message,
        };

        let response = self
            .authorize(self.client.post(self.config.chat_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| MeetlensError::ChatFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(MeetlensError::ChatFailed {
                reason: format!("HTTP {}", response.status()),
            });
        }

        let reply = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| MeetlensError::ChatFailed {
                reason: e.to_string(),
            })?;

        if reply.status != "success" {
            return Err(MeetlensError::ChatFailed {
                reason: format!("backend status {}", reply.status),
            });
        }

        Ok(reply.response)
    }
}

/// Answers chat locally with [`SCRIPTED_REPLY`]; analysis still comes from `inner`.
pub struct ScriptedChat<B> {
    inner: B,
}

impl<B: InsightsBackend> ScriptedChat<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: InsightsBackend> InsightsBackend for ScriptedChat<B> {
    async fn fetch_analysis(&self, media_id: &str) -> Result<AnalysisResponse> {
        self.inner.fetch_analysis(media_id).await
    }

    async fn send_chat(
        &self,
        _session: &SessionContext,
        _media_id: &str,
        _message: &str,
    ) -> Result<String> {
        Ok(SCRIPTED_REPLY.to_string())
    }
}
