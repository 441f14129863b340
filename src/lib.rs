//! Notes Summarizer - turns emailed meeting notes into stored summaries.
//!
//! A single Lambda receives a base64-encoded MIME email, pulls the
//! `text/plain` notes out of it, asks a Bedrock model for a summary and then,
//! in a separate conversation, for a file name. The summary is written to S3
//! under `{year}/{month}/{day}/{file_name}`.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - the Bedrock Converse API for both model calls
//! - S3 for the finished summaries
//! - Tokio for async runtime
//!
//! Model failures never fail a request: each stage falls back to a fixed
//! string. Storage failures surface as a 500 response.
//!
//! # Example
//!
//! ```no_run
//! use notes_summarizer::clients::{
//!     ArtifactStore, BedrockBackend, ConversationClient, InferenceSettings, S3ObjectStore,
//! };
//! use notes_summarizer::core::config::AppConfig;
//! use notes_summarizer::worker::{SummaryPipeline, build_key_now};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     notes_summarizer::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let sdk_config = config.load_sdk_config().await;
//!
//!     let pipeline = SummaryPipeline::new(ConversationClient::new(
//!         BedrockBackend::new(&sdk_config),
//!         InferenceSettings::for_model(config.model_id.clone()),
//!     ));
//!     let store = ArtifactStore::connect(
//!         S3ObjectStore::new(&sdk_config),
//!         config.bucket_name.clone(),
//!         &config.region,
//!     )
//!     .await?;
//!
//!     let raw = b"Content-Type: text/plain\r\n\r\nAgreed to ship on Friday.";
//!     let result = pipeline.run(raw).await;
//!     store
//!         .write(&build_key_now(&result.file_name), &result.summary_text)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod utils;
pub mod worker;

pub use errors::SummarizerError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. The level defaults to `info` and can be
/// overridden through `RUST_LOG`. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// notes_summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
