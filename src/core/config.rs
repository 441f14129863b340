use std::env;

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};

pub const DEFAULT_REGION: &str = "eu-north-1";
pub const DEFAULT_MODEL_ID: &str = "deepseek.v3-v1:0";
pub const DEFAULT_BUCKET: &str = "meeting-notes-summaries-bucket";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub region: String,
    pub model_id: String,
    pub bucket_name: String,
    pub max_attempts: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let max_attempts = match env::var("BEDROCK_MAX_ATTEMPTS") {
            Ok(raw) => parse_max_attempts(&raw)?,
            Err(_) => DEFAULT_MAX_ATTEMPTS,
        };

        Ok(Self {
            region: env::var("AWS_REGION_OVERRIDE").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            model_id: env::var("SUMMARIZER_MODEL_ID")
                .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
            bucket_name: env::var("SUMMARIES_BUCKET")
                .unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            max_attempts,
        })
    }

    /// Shared AWS configuration for the Bedrock and S3 clients.
    ///
    /// Transient transport failures are retried by the SDK itself, bounded at
    /// `max_attempts`.
    pub async fn load_sdk_config(&self) -> SdkConfig {
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(self.max_attempts))
            .load()
            .await
    }
}

fn parse_max_attempts(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!(
            "BEDROCK_MAX_ATTEMPTS: expected a positive integer, got {:?}",
            raw
        )),
    }
}
