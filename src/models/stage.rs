use std::fmt;

use serde::{Deserialize, Serialize};

/// The three fixed roles of the article pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Content plan: outline, audience, SEO keywords, sources
    Plan,
    /// Full markdown draft based on the plan
    Write,
    /// Proofread and trim the draft to the word limit
    Edit,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Plan => "plan",
            StageKind::Write => "write",
            StageKind::Edit => "edit",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Identity of the agent running a stage.
///
/// `goal` and `backstory` are templates and may contain `{topic}` and
/// `{limit}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl Persona {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }
}

/// A task bound to a persona. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub kind: StageKind,
    pub persona: Persona,
    /// Instruction template
    pub description: String,
    /// Hint to the model about the shape of the answer
    pub expected_output: String,
}

impl Stage {
    pub fn new(
        kind: StageKind,
        persona: Persona,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            persona,
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_kind_serialization() {
        assert_eq!(serde_json::to_string(&StageKind::Plan).unwrap(), "\"plan\"");
        assert_eq!(StageKind::Edit.to_string(), "edit");
    }
}
