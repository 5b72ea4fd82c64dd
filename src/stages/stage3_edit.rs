use crate::models::{Persona, Stage, StageKind};
use crate::stages::ARTICLE_EXPECTED_OUTPUT;

pub const EDITOR_ROLE: &str = "Editor";

pub const EDITOR_GOAL: &str = "Edit a given blog post to align with the writing style of the organization and ensure the final output shall be of maximum {limit} words.";

pub const EDITOR_BACKSTORY: &str = "You are an editor who receives a blog post from the Content Writer. \
Your goal is to review the blog post to ensure that it follows journalistic best practices, provides balanced viewpoints, \
and avoids major controversial topics or opinions when possible.";

// The limit is only stated to the model. Nothing counts words afterwards.
pub const EDIT_DESCRIPTION: &str = "Proofread the given blog post for grammatical errors and alignment with the brand's voice. Must trim down the response to {limit} words.";

/// Stage 3: final article trimmed to the word limit
pub fn edit_stage() -> Stage {
    Stage::new(
        StageKind::Edit,
        Persona::new(EDITOR_ROLE, EDITOR_GOAL, EDITOR_BACKSTORY),
        EDIT_DESCRIPTION,
        ARTICLE_EXPECTED_OUTPUT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{build_system_prompt, build_task_prompt};
    use crate::models::ArticleInputs;

    #[test]
    fn test_edit_prompts_carry_limit() {
        let stage = edit_stage();
        let inputs = ArticleInputs::new("Artificial Intelligence", "500");

        let system = build_system_prompt(&stage.persona, &inputs);
        assert!(system.starts_with("You are Editor."));
        assert!(system.contains("maximum 500 words"));

        let prompt = build_task_prompt(&stage, &inputs, Some("draft"));
        assert!(prompt.contains("Must trim down the response to 500 words."));
        assert!(prompt.contains("draft"));
    }
}
