pub mod stage1_plan;
pub mod stage2_write;
pub mod stage3_edit;

pub use stage1_plan::*;
pub use stage2_write::*;
pub use stage3_edit::*;

use crate::models::Stage;

/// Ordered, immutable set of stages run by the pipeline.
///
/// Built once and shared read-only between runs.
#[derive(Debug, Clone)]
pub struct Crew {
    stages: Vec<Stage>,
}

impl Crew {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Planner, writer, editor
    pub fn article() -> Self {
        Self::new(vec![plan_stage(), write_stage(), edit_stage()])
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StageKind;

    #[test]
    fn test_article_crew_order() {
        let crew = Crew::article();
        let kinds: Vec<StageKind> = crew.stages().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StageKind::Plan, StageKind::Write, StageKind::Edit]);

        let roles: Vec<&str> = crew
            .stages()
            .iter()
            .map(|s| s.persona.role.as_str())
            .collect();
        assert_eq!(roles, vec!["Content Planner", "Content Writer", "Editor"]);
    }

    #[test]
    fn test_writer_and_editor_share_expected_output() {
        let crew = Crew::article();
        assert_eq!(
            crew.stages()[1].expected_output,
            crew.stages()[2].expected_output
        );
    }
}
