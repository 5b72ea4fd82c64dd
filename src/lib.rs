pub mod io;
pub mod llm;
pub mod models;
pub mod notices;
pub mod pipeline;
pub mod stages;
pub mod web;

pub use io::{format_run_summary, write_article, write_run_record};
pub use llm::{
    AnthropicClient, AnthropicConfig, BackendKind, GeminiClient, GeminiConfig, GenerationBackend,
    GenerationError,
};
pub use models::{ArticleInputs, PipelineRun, Stage, StageKind, StageOutput};
pub use pipeline::{PipelineError, execute_pipeline, execute_stage};
pub use stages::Crew;
pub use web::{AppState, ServerConfig, create_app, serve};
