use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::PipelineRun;

/// Write the final article as markdown
pub fn write_article(article: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    write!(file, "{}", article)?;
    if !article.ends_with('\n') {
        writeln!(file)?;
    }
    Ok(())
}

/// Write the whole run (every stage output, timings, inputs) as JSON
pub fn write_run_record(run: &PipelineRun, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, run).context("Failed to write JSON")?;
    Ok(())
}

/// One line per stage, for the log
pub fn format_run_summary(run: &PipelineRun) -> String {
    let mut summary = format!("Run {} on {:?}\n", run.run_id, run.inputs.topic);

    for output in &run.outputs {
        summary.push_str(&format!(
            "  {:<6} {:<16} {:>6} words {:>7}ms\n",
            output.stage,
            output.role,
            output.text.split_whitespace().count(),
            output.elapsed_ms
        ));
    }

    summary.push_str(&format!("  total {}ms", run.total_elapsed_ms()));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleInputs, StageKind, StageOutput};

    fn sample_run() -> PipelineRun {
        let mut run = PipelineRun::new(ArticleInputs::new("Rust", "500"));
        for (stage, role, text) in [
            (StageKind::Plan, "Content Planner", "outline here"),
            (StageKind::Write, "Content Writer", "# Draft\n\nlong draft"),
            (StageKind::Edit, "Editor", "# Final\n\nshort"),
        ] {
            run.outputs.push(StageOutput {
                stage,
                role: role.to_string(),
                text: text.to_string(),
                elapsed_ms: 100,
            });
        }
        run
    }

    #[test]
    fn test_write_article_adds_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("article.md");

        write_article("# Final\n\nshort", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Final\n\nshort\n");
    }

    #[test]
    fn test_write_run_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let run = sample_run();

        write_run_record(&run, &path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["run_id"], run.run_id.to_string());
        assert_eq!(value["inputs"]["topic"], "Rust");
        assert_eq!(value["inputs"]["limit"], "500");
        assert_eq!(value["outputs"].as_array().unwrap().len(), 3);
        assert_eq!(value["outputs"][0]["stage"], "plan");
        assert_eq!(value["outputs"][2]["text"], "# Final\n\nshort");
    }

    #[test]
    fn test_format_run_summary() {
        let summary = format_run_summary(&sample_run());
        assert_eq!(summary.lines().count(), 5);
        assert!(summary.contains("Content Planner"));
        assert!(summary.ends_with("total 300ms"));
    }
}
