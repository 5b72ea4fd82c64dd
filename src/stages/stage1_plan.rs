use crate::models::{Persona, Stage, StageKind};

pub const PLANNER_ROLE: &str = "Content Planner";

pub const PLANNER_GOAL: &str = "Plan engaging and factually accurate content on {topic}";

pub const PLANNER_BACKSTORY: &str = "You're working on planning a blog article about the topic: {topic}. \
You collect information that helps the audience learn something \
and make informed decisions. Your work is the basis for the Content Writer to write an article on this topic.";

pub const PLAN_DESCRIPTION: &str = "1. Prioritize the latest trends, key players, and noteworthy news on {topic}.\n\
2. Identify the target audience, considering their interests and pain points.\n\
3. Develop a detailed content outline including an introduction, key points, and a call to action.\n\
4. Include SEO keywords and relevant data or sources.";

pub const PLAN_EXPECTED_OUTPUT: &str = "A comprehensive content plan document with an outline, audience analysis, SEO keywords, and resources.";

/// Stage 1: content plan for the topic
pub fn plan_stage() -> Stage {
    Stage::new(
        StageKind::Plan,
        Persona::new(PLANNER_ROLE, PLANNER_GOAL, PLANNER_BACKSTORY),
        PLAN_DESCRIPTION,
        PLAN_EXPECTED_OUTPUT,
    )
}
