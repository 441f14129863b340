//! Client modules for external API interactions

pub mod llm_client;
pub mod storage_client;

pub use llm_client::{BedrockBackend, CompletionBackend, ConversationClient, InferenceSettings};
pub use storage_client::{ArtifactStore, BucketCreation, ObjectStore, S3ObjectStore};
