use std::time::Instant;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::llm::{GenerationBackend, GenerationError, build_system_prompt, build_task_prompt};
use crate::models::{ArticleInputs, PipelineRun, Stage, StageKind, StageOutput};
use crate::stages::Crew;

/// Why a pipeline run produced no article
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("topic is empty")]
    EmptyTopic,
    #[error("crew has no stages")]
    NoStages,
    #[error("stage {stage} failed: {source}")]
    Stage {
        stage: StageKind,
        #[source]
        source: GenerationError,
    },
    #[error("run cancelled")]
    Cancelled,
}

/// Run every stage of the crew in order.
///
/// Stage `i` receives the outputs of stages `0..i` as context. The first
/// failure aborts the run and nothing produced so far is returned. When
/// `cancel` fires, the in-flight generation call is dropped.
pub async fn execute_pipeline(
    backend: &dyn GenerationBackend,
    crew: &Crew,
    inputs: ArticleInputs,
    cancel: &CancellationToken,
) -> Result<PipelineRun, PipelineError> {
    if !inputs.has_topic() {
        return Err(PipelineError::EmptyTopic);
    }
    if crew.is_empty() {
        return Err(PipelineError::NoStages);
    }

    let mut run = PipelineRun::new(inputs);
    info!(
        "Run {}: {} stages on {} for topic {:?} (limit {:?})",
        run.run_id,
        crew.len(),
        backend.name(),
        run.inputs.topic,
        run.inputs.limit
    );

    for stage in crew.stages() {
        let context = run.context();
        let started = Instant::now();
        info!("Run {}: stage {} ({})", run.run_id, stage.name(), stage.persona.role);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Run {}: cancelled during stage {}", run.run_id, stage.name());
                return Err(PipelineError::Cancelled);
            }
            result = execute_stage(backend, stage, &run.inputs, context.as_deref()) => result,
        };

        let text = result.map_err(|source| {
            warn!("Run {}: stage {} failed: {}", run.run_id, stage.name(), source);
            PipelineError::Stage {
                stage: stage.kind,
                source,
            }
        })?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            "Run {}: stage {} produced {} words in {}ms",
            run.run_id,
            stage.name(),
            text.split_whitespace().count(),
            elapsed_ms
        );

        run.outputs.push(StageOutput {
            stage: stage.kind,
            role: stage.persona.role.clone(),
            text,
            elapsed_ms,
        });
    }

    Ok(run)
}

/// Render one stage's prompts and call the backend
pub async fn execute_stage(
    backend: &dyn GenerationBackend,
    stage: &Stage,
    inputs: &ArticleInputs,
    context: Option<&str>,
) -> Result<String, GenerationError> {
    let system = build_system_prompt(&stage.persona, inputs);
    let prompt = build_task_prompt(stage, inputs, context);
    debug!(
        "Stage {}: system prompt {} chars, task prompt {} chars",
        stage.name(),
        system.len(),
        prompt.len()
    );

    backend.generate(&system, &prompt).await
}
