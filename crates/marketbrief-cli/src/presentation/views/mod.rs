pub mod summary;
pub mod transcript;

pub use summary::SummaryView;
pub use transcript::{RESPONSE_PREVIEW_MAX_CHARS, TranscriptView};
