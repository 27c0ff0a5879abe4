pub mod flowise;

use async_trait::async_trait;
use crate::models::chat::QuestionPayload;
use crate::relay::error::RelayError;
use crate::relay::extract::UpstreamResponse;

pub use self::flowise::FlowiseClient;

/// One prediction call against the AI service.
#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(&self, payload: &QuestionPayload) -> Result<UpstreamResponse, RelayError>;
}
