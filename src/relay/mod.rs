pub mod error;
pub mod extract;

use std::sync::Arc;
use axum::http::StatusCode;
use log::{info, warn, error};
use crate::config::RelayConfig;
use crate::models::chat::{ AskResponse, QuestionPayload };
use crate::upstream::{ FlowiseClient, PredictionClient };
use self::error::{ RelayError, NO_ANSWER };

/// Outcome of one ask: the status to send and the answer to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub answer: String,
}

impl Reply {
    pub fn into_response_parts(self) -> (StatusCode, AskResponse) {
        (self.status, AskResponse { answer: self.answer })
    }
}

impl From<RelayError> for Reply {
    fn from(err: RelayError) -> Self {
        Self { status: err.status_code(), answer: err.answer() }
    }
}

enum Upstream {
    Ready(Arc<dyn PredictionClient>),
    Unconfigured,
    /// The client could not be built; holds the reason.
    Broken(String),
}

impl Upstream {
    fn from_client(client: Result<Option<Arc<dyn PredictionClient>>, RelayError>) -> Self {
        match client {
            Ok(Some(c)) => Upstream::Ready(c),
            Ok(None) => Upstream::Unconfigured,
            Err(e) => {
                error!("Failed to initialise Flowise client: {}", e);
                Upstream::Broken(e.to_string())
            }
        }
    }
}

/// Stateless adapter from a chat message to a Flowise prediction and back.
#[derive(Clone)]
pub struct ChatRelay {
    upstream: Arc<Upstream>,
    answer_fields: Vec<String>,
}

impl ChatRelay {
    pub fn new(client: Option<Arc<dyn PredictionClient>>, answer_fields: Vec<String>) -> Self {
        Self::with_upstream(Upstream::from_client(Ok(client)), answer_fields)
    }

    fn with_upstream(upstream: Upstream, answer_fields: Vec<String>) -> Self {
        Self { upstream: Arc::new(upstream), answer_fields }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        let client = FlowiseClient::from_config(config)
            .map(|c| c.map(|c| Arc::new(c) as Arc<dyn PredictionClient>));
        Self::with_upstream(Upstream::from_client(client), config.answer_fields.clone())
    }

    pub fn is_configured(&self) -> bool {
        matches!(*self.upstream, Upstream::Ready(_))
    }

    /// Validate, call upstream, normalize. Never fails: errors become a `Reply`.
    pub async fn ask(&self, message: Option<&str>) -> Reply {
        match self.try_ask(message).await {
            Ok(answer) => Reply { status: StatusCode::OK, answer },
            Err(RelayError::EmptyInput) => {
                warn!("Rejected /ask without a message");
                RelayError::EmptyInput.into()
            }
            Err(e) => {
                error!("Failed to answer question: {}", e);
                e.into()
            }
        }
    }

    async fn try_ask(&self, message: Option<&str>) -> Result<String, RelayError> {
        let message = message.filter(|m| !m.is_empty()).ok_or(RelayError::EmptyInput)?;
        let client = match &*self.upstream {
            Upstream::Ready(client) => client,
            Upstream::Unconfigured => return Err(RelayError::Configuration),
            Upstream::Broken(reason) => return Err(RelayError::Unexpected(reason.clone())),
        };

        info!("Forwarding question ({} chars) to Flowise", message.chars().count());
        let response = client.predict(&QuestionPayload::new(message)).await?;

        if let Some(reported) = response.reported_error() {
            return Err(RelayError::UpstreamReported(reported));
        }

        Ok(response.answer(&self.answer_fields).unwrap_or_else(|| NO_ANSWER.to_string()))
    }
}
