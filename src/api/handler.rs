//! Lambda handler: validates the envelope, runs the pipeline and stores the
//! summary.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};

use super::helpers;
use crate::clients::{ArtifactStore, CompletionBackend, ObjectStore};
use crate::errors::SummarizerError;
use crate::worker::{SummaryPipeline, build_key_now};

pub const PARAM_TRANSCRIPT: &str = "body";

/// Long-lived collaborators, built once per process and shared by every
/// invocation.
pub struct Services<B, S> {
    pub pipeline: SummaryPipeline<B>,
    pub store: ArtifactStore<S>,
}

/// Lambda entrypoint. Always answers with a `{statusCode, body}` envelope.
///
/// # Errors
///
/// Never fails; every failure is reported through the status code.
pub async fn function_handler<B, S>(
    services: &Services<B, S>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error>
where
    B: CompletionBackend,
    S: ObjectStore,
{
    let span = info_span!("summarize_request", request_id = %event.context.request_id);
    Ok(handle_request(services, &event.payload).instrument(span).await)
}

pub async fn handle_request<B, S>(services: &Services<B, S>, payload: &Value) -> Value
where
    B: CompletionBackend,
    S: ObjectStore,
{
    let Some(encoded) = payload.get(PARAM_TRANSCRIPT) else {
        error!("Request missing {}", PARAM_TRANSCRIPT);
        return helpers::err_response(
            400,
            &format!("Missing required parameter: {PARAM_TRANSCRIPT}"),
        );
    };

    let message = match decode_transcript(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = ?e, "Failed to decode transcript: {}", e);
            return helpers::err_response(500, &e.to_string());
        }
    };

    if message.is_empty() {
        error!("Transcript decoded to an empty payload");
        return helpers::err_response(400, "Transcript content is empty");
    }

    match process(services, &message).await {
        Ok(summary) => helpers::ok_text(&summary),
        Err(e) => {
            error!(error = ?e, "Error in request handler: {}", e);
            helpers::err_response(500, &e.to_string())
        }
    }
}

/// Lenient base64: characters outside the standard alphabet (line breaks from
/// 76-column wrapping included) are discarded before decoding.
fn decode_transcript(encoded: &Value) -> Result<Vec<u8>, SummarizerError> {
    let text = encoded.as_str().ok_or_else(|| {
        SummarizerError::InvalidRequest(format!("{PARAM_TRANSCRIPT} must be a base64 string"))
    })?;
    let alphabet_only: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '+' | '/' | '='))
        .collect();
    Ok(STANDARD.decode(alphabet_only)?)
}

async fn process<B, S>(services: &Services<B, S>, message: &[u8]) -> Result<String, SummarizerError>
where
    B: CompletionBackend,
    S: ObjectStore,
{
    let result = services.pipeline.run(message).await;
    let key = build_key_now(&result.file_name);

    info!(key = %key, "Uploading meeting notes summary");
    services.store.write(&key, &result.summary_text).await?;

    Ok(result.summary_text)
}
