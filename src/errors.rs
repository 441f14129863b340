use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Failed to extract meeting notes text: {0}")]
    Extraction(String),

    #[error("Bedrock response did not contain a message in output")]
    NoReply,

    #[error("Failed to access Bedrock: {0}")]
    Bedrock(String),

    #[error("Failed to provision storage bucket: {0}")]
    StorageProvision(String),

    #[error("Failed to write summary to storage: {0}")]
    StorageWrite(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<mailparse::MailParseError> for SummarizerError {
    fn from(error: mailparse::MailParseError) -> Self {
        SummarizerError::Extraction(error.to_string())
    }
}

impl From<base64::DecodeError> for SummarizerError {
    fn from(error: base64::DecodeError) -> Self {
        SummarizerError::InvalidRequest(format!("Invalid body encoding: {error}"))
    }
}
