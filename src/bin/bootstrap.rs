// This is the Lambda bootstrap entry point for the summarizer function

use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use notes_summarizer::api::{Services, function_handler};
use notes_summarizer::clients::{
    ArtifactStore, BedrockBackend, ConversationClient, InferenceSettings, S3ObjectStore,
};
use notes_summarizer::core::config::AppConfig;
use notes_summarizer::worker::SummaryPipeline;
use serde_json::Value;
use tracing::info;

async fn build_services() -> anyhow::Result<Services<BedrockBackend, S3ObjectStore>> {
    let config = AppConfig::from_env()
        .map_err(anyhow::Error::msg)
        .context("Config error")?;
    let sdk_config = config.load_sdk_config().await;

    info!(
        region = %config.region,
        model_id = %config.model_id,
        bucket = %config.bucket_name,
        "Initializing summarizer"
    );

    let pipeline = SummaryPipeline::new(ConversationClient::new(
        BedrockBackend::new(&sdk_config),
        InferenceSettings::for_model(config.model_id.clone()),
    ));

    let store = ArtifactStore::connect(
        S3ObjectStore::new(&sdk_config),
        config.bucket_name.clone(),
        &config.region,
    )
    .await
    .context("Failed to provision summary bucket")?;

    Ok(Services { pipeline, store })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    notes_summarizer::setup_logging();

    let services = Arc::new(build_services().await?);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let services = Arc::clone(&services);
        async move { function_handler(&*services, event).await }
    }))
    .await
}
