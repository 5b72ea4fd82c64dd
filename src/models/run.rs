use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::StageKind;

/// Separator placed between prior stage outputs when forwarding context
pub const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

/// User-supplied parameters substituted into every prompt template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleInputs {
    /// Article topic, trimmed
    pub topic: String,
    /// Word limit exactly as entered. Only ever used as prompt text.
    pub limit: String,
}

impl ArticleInputs {
    pub fn new(topic: impl Into<String>, limit: impl Into<String>) -> Self {
        Self {
            topic: topic.into().trim().to_string(),
            limit: limit.into().trim().to_string(),
        }
    }

    pub fn has_topic(&self) -> bool {
        !self.topic.is_empty()
    }
}

/// Text produced by one stage
#[derive(Debug, Clone, Serialize)]
pub struct StageOutput {
    pub stage: StageKind,
    pub role: String,
    pub text: String,
    pub elapsed_ms: u64,
}

/// One execution of the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub inputs: ArticleInputs,
    /// Outputs in execution order
    pub outputs: Vec<StageOutput>,
}

impl PipelineRun {
    pub fn new(inputs: ArticleInputs) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            inputs,
            outputs: Vec::new(),
        }
    }

    /// Final stage output
    pub fn article(&self) -> Option<&str> {
        self.outputs.last().map(|o| o.text.as_str())
    }

    /// All outputs so far, joined for the next stage. `None` before the first stage.
    pub fn context(&self) -> Option<String> {
        if self.outputs.is_empty() {
            return None;
        }
        let texts: Vec<&str> = self.outputs.iter().map(|o| o.text.as_str()).collect();
        Some(texts.join(CONTEXT_SEPARATOR))
    }

    pub fn total_elapsed_ms(&self) -> u64 {
        self.outputs.iter().map(|o| o.elapsed_ms).sum()
    }
}
