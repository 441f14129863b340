//! Meeting-notes processing: summarization, naming and storage keys

pub mod storage_key;
pub mod summarize;

pub use storage_key::{build_key, build_key_now};
pub use summarize::SummaryPipeline;
