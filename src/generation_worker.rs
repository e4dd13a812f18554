use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::ai::QuestionSource;
use crate::models::{GenerationRequest, GenerationResponse};

/// Serve generation requests one at a time. Each request gets exactly one
/// response. The worker stops when either channel closes.
pub fn spawn_generation_worker(
    source: Arc<dyn QuestionSource>,
    mut requests: UnboundedReceiver<GenerationRequest>,
    responses: UnboundedSender<GenerationResponse>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            let GenerationRequest::Generate { config } = request;
            debug!(
                count = config.question_count,
                difficulty = config.difficulty.label(),
                "worker received generation request"
            );

            let response = match source.generate(&config).await {
                Ok(questions) => {
                    info!(count = questions.len(), "questions generated");
                    GenerationResponse::Ready { questions }
                }
                Err(error) => {
                    error!(%error, "question generation failed");
                    GenerationResponse::Failed { error }
                }
            };

            if responses.send(response).is_err() {
                debug!("response channel closed, exiting");
                break;
            }
        }
        debug!("generation worker stopped");
    })
}
