use tracing::{error, info, warn};

use crate::clients::{CompletionBackend, ConversationClient};
use crate::core::models::{Conversation, SummaryResult};
use crate::errors::SummarizerError;
use crate::prompt::{
    FILE_NAME_FALLBACK, SUMMARY_FALLBACK, build_file_name_prompt, build_summary_prompt,
};
use crate::utils::file_name::normalize_file_name;
use crate::utils::mime::extract_text;

/// Two independent model round trips per request: one to summarize the notes,
/// one to name the summary. Each stage gets its own conversation and falls
/// back to a fixed string on failure.
pub struct SummaryPipeline<B> {
    client: ConversationClient<B>,
}

impl<B: CompletionBackend> SummaryPipeline<B> {
    pub fn new(client: ConversationClient<B>) -> Self {
        Self { client }
    }

    /// Summary of the notes in `raw`, or [`SUMMARY_FALLBACK`] on any failure.
    pub async fn summarize(&self, raw: &[u8]) -> String {
        match self.try_summarize(raw).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(error = ?e, "Error during Bedrock call for summarization: {}", e);
                SUMMARY_FALLBACK.to_string()
            }
        }
    }

    /// # Errors
    ///
    /// Extraction, transport and missing-reply failures.
    pub async fn try_summarize(&self, raw: &[u8]) -> Result<String, SummarizerError> {
        let text = extract_text(raw)?;
        if text.is_empty() {
            warn!("No text/plain content found in meeting notes payload");
        }

        let mut conversation = Conversation::with_user_text(build_summary_prompt(&text));
        let summary = self.client.call_and_append(&mut conversation).await?;
        info!(summary_len = summary.len(), "Generated meeting notes summary");
        Ok(summary)
    }

    /// File name for the summary, or [`FILE_NAME_FALLBACK`] on any failure.
    pub async fn infer_file_name(&self, notes: &str) -> String {
        match self.try_infer_file_name(notes).await {
            Ok(file_name) => file_name,
            Err(e) => {
                error!(error = ?e, "Error during Bedrock call for file name inference: {}", e);
                FILE_NAME_FALLBACK.to_string()
            }
        }
    }

    /// # Errors
    ///
    /// Transport and missing-reply failures.
    pub async fn try_infer_file_name(&self, notes: &str) -> Result<String, SummarizerError> {
        let mut conversation = Conversation::with_user_text(build_file_name_prompt(notes));
        let candidate = self.client.call_and_append(&mut conversation).await?;

        Ok(normalize_file_name(&candidate).unwrap_or_else(|| {
            warn!(candidate = %candidate, "Model suggested an unusable file name");
            FILE_NAME_FALLBACK.to_string()
        }))
    }

    /// Both stages in order. The file name is inferred from the summary, not
    /// from the raw notes.
    pub async fn run(&self, raw: &[u8]) -> SummaryResult {
        let summary_text = self.summarize(raw).await;
        let file_name = self.infer_file_name(&summary_text).await;
        SummaryResult {
            summary_text,
            file_name,
        }
    }
}
