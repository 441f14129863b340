//! Object storage for finished summaries.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use tracing::{info, warn};

use crate::errors::SummarizerError;

/// The bucket-level operations the summarizer needs from an object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Existence check. Any failure to answer is reported as an error and
    /// treated by callers as "absent".
    async fn head_bucket(&self, bucket: &str) -> Result<(), SummarizerError>;

    async fn create_bucket(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<BucketCreation, SummarizerError>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), SummarizerError>;
}

/// Outcome of a successful create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketCreation {
    Created,
    /// The bucket was already there and belongs to us. Seen when the existence
    /// check is refused (no `s3:ListBucket`) even though the bucket exists.
    AlreadyOwned,
}

#[derive(Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: S3Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn head_bucket(&self, bucket: &str) -> Result<(), SummarizerError> {
        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| SummarizerError::StorageProvision(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn create_bucket(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<BucketCreation, SummarizerError> {
        let location = CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build();

        match self
            .client
            .create_bucket()
            .bucket(bucket)
            .create_bucket_configuration(location)
            .send()
            .await
        {
            Ok(_) => Ok(BucketCreation::Created),
            Err(e) if is_already_owned(e.as_service_error()) => Ok(BucketCreation::AlreadyOwned),
            Err(e) => Err(SummarizerError::StorageProvision(format!(
                "Failed to create bucket {bucket}: {}",
                DisplayErrorContext(&e)
            ))),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), SummarizerError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                SummarizerError::StorageWrite(format!(
                    "Failed to upload {key} to {bucket}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}

fn is_already_owned(error: Option<&CreateBucketError>) -> bool {
    error.is_some_and(CreateBucketError::is_bucket_already_owned_by_you)
}

/// A single bucket holding the summaries, provisioned once on construction.
pub struct ArtifactStore<S> {
    store: S,
    bucket: String,
}

impl<S: ObjectStore> ArtifactStore<S> {
    /// Ensures `bucket` exists, creating it in `region` when the existence
    /// check fails, and returns a store bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::StorageProvision`] when creation fails.
    pub async fn connect(
        store: S,
        bucket: impl Into<String>,
        region: &str,
    ) -> Result<Self, SummarizerError> {
        let artifact_store = Self {
            store,
            bucket: bucket.into(),
        };
        artifact_store.ensure_container(region).await?;
        Ok(artifact_store)
    }

    async fn ensure_container(&self, region: &str) -> Result<(), SummarizerError> {
        match self.store.head_bucket(&self.bucket).await {
            Ok(()) => {
                info!(bucket = %self.bucket, "Summary bucket exists");
                Ok(())
            }
            Err(e) => {
                warn!(
                    bucket = %self.bucket,
                    region,
                    "Bucket existence check failed, creating bucket: {}",
                    e
                );
                match self.store.create_bucket(&self.bucket, region).await? {
                    BucketCreation::Created => {
                        info!(bucket = %self.bucket, region, "Created summary bucket");
                    }
                    BucketCreation::AlreadyOwned => {
                        info!(bucket = %self.bucket, "Summary bucket already owned, reusing it");
                    }
                }
                Ok(())
            }
        }
    }

    /// Writes `content` under `key`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizerError::StorageWrite`] when the store rejects the
    /// upload. Nothing is retried here.
    pub async fn write(&self, key: &str, content: &str) -> Result<(), SummarizerError> {
        let content_type = content_type_for(key);
        self.store
            .put_object(&self.bucket, key, content.as_bytes().to_vec(), &content_type)
            .await?;
        info!(bucket = %self.bucket, key, bytes = content.len(), "Stored summary");
        Ok(())
    }
}

fn content_type_for(key: &str) -> String {
    let mime = mime_guess::from_path(key).first_or_text_plain();
    if mime.type_() == mime_guess::mime::TEXT {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    }
}
