use crate::models::{ArticleInputs, Persona, Stage};

/// Substitute `{topic}` and `{limit}` in a template.
///
/// Single pass, so placeholder-looking text inside the inputs is never
/// substituted again. Unknown `{...}` sequences are left as they are.
pub fn interpolate(template: &str, inputs: &ArticleInputs) -> String {
    let placeholders = [
        ("{topic}", inputs.topic.as_str()),
        ("{limit}", inputs.limit.as_str()),
    ];
    let mut out = String::with_capacity(template.len() + inputs.topic.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match placeholders.iter().find(|(p, _)| tail.starts_with(p)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Build the system prompt describing who the agent is
pub fn build_system_prompt(persona: &Persona, inputs: &ArticleInputs) -> String {
    format!(
        "You are {}. {}\nYour personal goal is: {}",
        persona.role,
        interpolate(&persona.backstory, inputs),
        interpolate(&persona.goal, inputs)
    )
}

/// Build the user prompt for a stage, with prior stage outputs as context
pub fn build_task_prompt(stage: &Stage, inputs: &ArticleInputs, context: Option<&str>) -> String {
    let mut prompt = String::new();

    prompt.push_str("Current Task: ");
    prompt.push_str(&interpolate(&stage.description, inputs));
    prompt.push_str("\n\n");

    prompt.push_str("This is the expected criteria for your final answer: ");
    prompt.push_str(&interpolate(&stage.expected_output, inputs));
    prompt.push('\n');
    prompt.push_str(
        "you MUST return the actual complete content as the final answer, not a summary.\n",
    );

    if let Some(context) = context.filter(|c| !c.is_empty()) {
        prompt.push_str("\nThis is the context you're working with:\n");
        prompt.push_str(context);
        prompt.push('\n');
    }

    prompt.push_str("\nBegin!");
    prompt
}
