//! Fixed texts shown to the user. Failures are never told apart here.

use crate::pipeline::PipelineError;

pub const TITLE: &str = "Article Dada 👑";
pub const SUBTITLE: &str = "Generate comprehensive articles in less than 15 seconds";
pub const WORD_LIMIT_NOTE: &str =
    "Please note the word limit might vary by 50 words to ensure a perfect response in few cases.";

pub const EMPTY_TOPIC_WARNING: &str = "Please enter a topic to generate!";
pub const IN_PROGRESS: &str = "Article generating...  have some water meanwhile🥤";
pub const SUCCESS: &str = "Article generated successfully!";
pub const GENERIC_ERROR: &str = "Error: Please enter a valid title and avoid controversial topics as we won't respond to that. Thanks!";
pub const CANCELLED: &str = "Article generation cancelled.";

/// Message for a run that produced no article
pub fn notice_for(error: &PipelineError) -> &'static str {
    match error {
        PipelineError::EmptyTopic => EMPTY_TOPIC_WARNING,
        PipelineError::Cancelled => CANCELLED,
        PipelineError::NoStages | PipelineError::Stage { .. } => GENERIC_ERROR,
    }
}
