use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::PipelineRun;
use crate::pipeline::PipelineError;

/// Lifecycle of a background article run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

#[derive(Debug)]
struct Job {
    status: JobStatus,
    article: Option<String>,
    cancel: CancellationToken,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    /// Position in finishing order, used for eviction
    finish_seq: Option<u64>,
}

/// Point-in-time copy of a job
#[derive(Debug, Clone, Serialize)]
pub struct JobSnapshot {
    pub id: Uuid,
    pub status: JobStatus,
    pub article: Option<String>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// In-memory job table shared by all handlers.
///
/// Keeps at most `max_finished` finished jobs; the oldest are evicted first.
/// Running jobs are never evicted.
#[derive(Debug, Clone)]
pub struct JobRegistry {
    jobs: Arc<RwLock<HashMap<Uuid, Job>>>,
    finish_seq: Arc<AtomicU64>,
    max_finished: usize,
}

impl JobRegistry {
    pub fn new(max_finished: usize) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            finish_seq: Arc::new(AtomicU64::new(0)),
            max_finished,
        }
    }

    /// Register a new running job
    pub async fn start(&self) -> (Uuid, CancellationToken) {
        let id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        let job = Job {
            status: JobStatus::Running,
            article: None,
            cancel: cancel.clone(),
            created_at: Utc::now(),
            finished_at: None,
            finish_seq: None,
        };
        self.jobs.write().await.insert(id, job);
        info!("Job {} started", id);
        (id, cancel)
    }

    /// Record the outcome of a run. Jobs that are no longer running are left alone.
    pub async fn finish(&self, id: Uuid, outcome: Result<PipelineRun, PipelineError>) {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.get_mut(&id) else {
            return;
        };
        if job.status.is_finished() {
            return;
        }

        match outcome {
            Ok(run) => match run.article() {
                Some(article) => {
                    info!("Job {} succeeded ({}ms)", id, run.total_elapsed_ms());
                    job.status = JobStatus::Succeeded;
                    job.article = Some(article.to_string());
                }
                None => {
                    warn!("Job {} finished without an article", id);
                    job.status = JobStatus::Failed;
                }
            },
            Err(PipelineError::Cancelled) => {
                info!("Job {} cancelled", id);
                job.status = JobStatus::Cancelled;
            }
            Err(e) => {
                warn!("Job {} failed: {}", id, e);
                job.status = JobStatus::Failed;
            }
        }
        job.finished_at = Some(Utc::now());
        job.finish_seq = Some(self.next_seq());

        evict_finished(&mut jobs, self.max_finished);
    }

    pub async fn get(&self, id: Uuid) -> Option<JobSnapshot> {
        let jobs = self.jobs.read().await;
        jobs.get(&id).map(|job| JobSnapshot {
            id,
            status: job.status,
            article: job.article.clone(),
            created_at: job.created_at,
            finished_at: job.finished_at,
        })
    }

    /// Cancel a job. Returns `false` when the id is unknown.
    pub async fn cancel(&self, id: Uuid) -> bool {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.get_mut(&id) else {
            return false;
        };
        if !job.status.is_finished() {
            job.cancel.cancel();
            job.status = JobStatus::Cancelled;
            job.finished_at = Some(Utc::now());
            job.finish_seq = Some(self.next_seq());
            info!("Job {} cancelled by user", id);
            evict_finished(&mut jobs, self.max_finished);
        }
        true
    }

    /// Cancel every running job
    pub async fn cancel_all(&self) {
        let jobs = self.jobs.read().await;
        for job in jobs.values().filter(|j| !j.status.is_finished()) {
            job.cancel.cancel();
        }
    }

    fn next_seq(&self) -> u64 {
        self.finish_seq.fetch_add(1, Ordering::Relaxed)
    }

    pub async fn running_count(&self) -> usize {
        let jobs = self.jobs.read().await;
        jobs.values().filter(|j| !j.status.is_finished()).count()
    }
}

fn evict_finished(jobs: &mut HashMap<Uuid, Job>, max_finished: usize) {
    let mut finished: Vec<(Uuid, u64)> = jobs
        .iter()
        .filter_map(|(id, job)| job.finish_seq.map(|seq| (*id, seq)))
        .collect();

    if finished.len() <= max_finished {
        return;
    }

    finished.sort_by_key(|(_, seq)| *seq);
    let excess = finished.len() - max_finished;
    for (id, _) in finished.into_iter().take(excess) {
        jobs.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleInputs, StageKind, StageOutput};

    fn finished_run(article: &str) -> PipelineRun {
        let mut run = PipelineRun::new(ArticleInputs::new("Rust", "500"));
        run.outputs.push(StageOutput {
            stage: StageKind::Edit,
            role: "Editor".to_string(),
            text: article.to_string(),
            elapsed_ms: 5,
        });
        run
    }

    #[tokio::test]
    async fn test_job_lifecycle() {
        let registry = JobRegistry::new(8);
        let (id, _cancel) = registry.start().await;

        let job = registry.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Running);
        assert!(job.article.is_none());
        assert_eq!(registry.running_count().await, 1);

        registry.finish(id, Ok(finished_run("# Done"))).await;
        let job = registry.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Succeeded);
        assert_eq!(job.article.as_deref(), Some("# Done"));
        assert!(job.finished_at.is_some());
        assert_eq!(registry.running_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_job_has_no_article() {
        let registry = JobRegistry::new(8);
        let (id, _cancel) = registry.start().await;
        registry.finish(id, Err(PipelineError::NoStages)).await;

        let job = registry.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.article.is_none());
    }

    #[tokio::test]
    async fn test_cancel_fires_token_and_sticks() {
        let registry = JobRegistry::new(8);
        let (id, cancel) = registry.start().await;

        assert!(registry.cancel(id).await);
        assert!(cancel.is_cancelled());

        // A late result does not resurrect the job
        registry.finish(id, Ok(finished_run("late"))).await;
        let job = registry.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Cancelled);
        assert!(job.article.is_none());

        assert!(!registry.cancel(Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn test_oldest_finished_jobs_evicted() {
        let registry = JobRegistry::new(2);
        let mut ids = Vec::new();
        for _ in 0..3 {
            let (id, _cancel) = registry.start().await;
            registry.finish(id, Ok(finished_run("text"))).await;
            ids.push(id);
        }
        let (running, _cancel) = registry.start().await;

        assert!(registry.get(ids[0]).await.is_none());
        assert!(registry.get(ids[1]).await.is_some());
        assert!(registry.get(ids[2]).await.is_some());
        assert!(registry.get(running).await.is_some());
    }

    #[tokio::test]
    async fn test_cancelled_jobs_count_towards_capacity() {
        let registry = JobRegistry::new(2);
        let mut ids = Vec::new();
        for _ in 0..10 {
            let (id, _cancel) = registry.start().await;
            assert!(registry.cancel(id).await);
            registry.finish(id, Err(PipelineError::Cancelled)).await;
            ids.push(id);
        }

        assert_eq!(registry.jobs.read().await.len(), 2);
        assert!(registry.get(ids[7]).await.is_none());
        assert_eq!(
            registry.get(ids[9]).await.unwrap().status,
            JobStatus::Cancelled
        );
    }
}
