#![allow(dead_code)]

use async_trait::async_trait;
use notes_summarizer::SummarizerError;
use notes_summarizer::api::Services;
use notes_summarizer::clients::{
    ArtifactStore, BucketCreation, CompletionBackend, ConversationClient, InferenceSettings,
    ObjectStore,
};
use notes_summarizer::core::models::ConversationTurn;
use notes_summarizer::worker::SummaryPipeline;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Answers with canned texts in order, failing once the script runs out.
#[derive(Clone, Default)]
pub struct StubModel {
    replies: Arc<Mutex<VecDeque<String>>>,
    pub calls: Arc<Mutex<usize>>,
}

impl StubModel {
    pub fn replying(replies: &[&str]) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.iter().map(ToString::to_string).collect())),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CompletionBackend for StubModel {
    async fn converse(
        &self,
        _turns: &[ConversationTurn],
        _settings: &InferenceSettings,
    ) -> Result<Option<ConversationTurn>, SummarizerError> {
        *self.calls.lock().unwrap() += 1;
        match self.replies.lock().unwrap().pop_front() {
            Some(text) => Ok(Some(ConversationTurn::assistant_text(text))),
            None => Err(SummarizerError::Bedrock("service unavailable".to_string())),
        }
    }
}

/// In-memory bucket recording every upload.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub reject_writes: bool,
    pub writes: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryStore {
    pub fn rejecting() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn head_bucket(&self, _bucket: &str) -> Result<(), SummarizerError> {
        Ok(())
    }

    async fn create_bucket(
        &self,
        _bucket: &str,
        _region: &str,
    ) -> Result<BucketCreation, SummarizerError> {
        Ok(BucketCreation::Created)
    }

    async fn put_object(
        &self,
        _bucket: &str,
        key: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), SummarizerError> {
        if self.reject_writes {
            return Err(SummarizerError::StorageWrite("Access Denied".to_string()));
        }
        let body = String::from_utf8(body).unwrap();
        self.writes.lock().unwrap().push((key.to_string(), body));
        Ok(())
    }
}

pub fn pipeline(model: StubModel) -> SummaryPipeline<StubModel> {
    SummaryPipeline::new(ConversationClient::new(
        model,
        InferenceSettings::for_model("test-model"),
    ))
}

pub async fn services(model: StubModel, store: MemoryStore) -> Services<StubModel, MemoryStore> {
    Services {
        pipeline: pipeline(model),
        store: ArtifactStore::connect(store, "test-bucket", "eu-north-1")
            .await
            .unwrap(),
    }
}

pub const MEETING_EMAIL: &str = "From: pm@example.com\r\n\
    Subject: Launch sync\r\n\
    MIME-Version: 1.0\r\n\
    Content-Type: multipart/alternative; boundary=\"b1\"\r\n\
    \r\n\
    --b1\r\n\
    Content-Type: text/plain; charset=utf-8\r\n\
    \r\n\
    Launch moved to May. Dana owns the checklist.\r\n\
    --b1\r\n\
    Content-Type: text/html; charset=utf-8\r\n\
    \r\n\
    <p>Launch moved to May.</p>\r\n\
    --b1--\r\n";
