// ABOUTME: In-process work queue decoupling vision task submission from pipeline execution
// ABOUTME: Mirrors the teacher's SseManager: Arc<RwLock<HashMap>> state, broadcast channels per subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A vision task is enqueued, drained by a [`VisionWorker`], and its result
//! published back onto a per-task broadcast channel. Callers either poll
//! [`VisionQueue::subscribe`] themselves or use the convenience
//! [`VisionQueue::await_result`], which bounds the wait with
//! [`visionfit_core::constants::vision::DEFAULT_PROCESSING_TIMEOUT_SECS`]
//! (§5 "work queue").
//!
//! Two delivery modes run simultaneously, per §4.4: the task-id-keyed
//! stream above for synchronous waiters, and a user-id-keyed
//! [`VisionQueue::subscribe_user`] stream for asynchronous push
//! notification. Neither is authoritative over the other — whichever
//! fires first wins, and a consumer of the other must treat its own
//! delivery as idempotent-safe to ignore (§5 "Ordering guarantees").

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;
use visionfit_core::errors::{AppError, ErrorKind};
use visionfit_core::models::{Sex, VisionRecord};

const STATUS_BROADCAST_CAPACITY: usize = 16;
const USER_BROADCAST_CAPACITY: usize = 32;

/// A terminal vision outcome delivered on a per-user push channel (§4.4
/// "subscribe(userId) → channel", §5 "per-user push delivery").
#[derive(Debug, Clone)]
pub enum VisionOutcome {
    /// The pipeline produced a record for `task_id`.
    Completed {
        /// The task this outcome resolves.
        task_id: Uuid,
        /// The resulting record.
        record: VisionRecord,
    },
    /// The pipeline failed terminally for `task_id`.
    Failed {
        /// The task this outcome resolves.
        task_id: Uuid,
        /// The terminal error.
        error: AppError,
    },
}

/// A unit of vision work submitted to the queue (§5).
#[derive(Debug, Clone)]
pub struct VisionTask {
    /// Unique identifier used to subscribe to and look up the result.
    pub task_id: Uuid,
    /// The submitting user, for ownership checks upstream of this crate.
    pub user_id: Uuid,
    /// Raw bytes of the uploaded image.
    pub image_bytes: Vec<u8>,
    /// Self-reported height, used for anthropometric scaling.
    pub user_height_cm: f64,
    /// Self-reported weight, carried through for downstream synthesis.
    pub user_weight_kg: f64,
    /// Self-reported sex, used by the Navy formula and posture baselines.
    pub user_sex: Sex,
}

/// The lifecycle state of a [`VisionTask`] as observed through the queue.
#[derive(Debug, Clone)]
pub enum TaskStatus {
    /// Submitted, not yet picked up by a worker.
    Queued,
    /// A worker has drained the task and is running the pipeline.
    Processing,
    /// The pipeline produced a record.
    Completed(VisionRecord),
    /// The pipeline failed terminally; fallback record included for display.
    Failed(AppError, VisionRecord),
}

/// A point-in-time health snapshot of the queue (§5 "Shared resources").
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QueueHealth {
    /// `true` if the queue is accepting and draining work normally.
    pub healthy: bool,
    /// Number of tasks currently queued (not yet drained).
    pub queue_length: usize,
    /// Tasks completed successfully since startup.
    pub completed_count: u64,
    /// Tasks that terminated with an error since startup.
    pub error_count: u64,
}

/// The work-queue interface between request submission and the vision
/// worker. An implementation need not be in-process — this trait is the
/// seam a distributed queue backend would implement instead.
#[async_trait]
pub trait VisionQueue: Send + Sync {
    /// Submit a task for processing; returns immediately.
    async fn enqueue(&self, task: VisionTask);

    /// Pop the next queued task, if any, and mark it `Processing`.
    async fn drain_one(&self) -> Option<VisionTask>;

    /// Record a successful pipeline result and notify subscribers.
    async fn publish_result(&self, task_id: Uuid, record: VisionRecord);

    /// Record a terminal pipeline failure and notify subscribers.
    async fn publish_error(&self, task_id: Uuid, error: AppError, fallback: VisionRecord);

    /// Subscribe to status changes for `task_id`. Returns `None` if the
    /// task is unknown to this queue.
    async fn subscribe(&self, task_id: Uuid) -> Option<broadcast::Receiver<TaskStatus>>;

    /// Subscribe to every terminal outcome published for `user_id`'s
    /// tasks, independent of any in-flight `await_result` call (§4.4 "per
    /// user push delivery"). Always succeeds — a user with no tasks yet
    /// still gets a live channel that will receive future outcomes.
    async fn subscribe_user(&self, user_id: Uuid) -> broadcast::Receiver<VisionOutcome>;

    /// Block until `task_id` completes, fails, or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::TimedOut`] if the bound elapses before a
    /// terminal status is published, or the task's own terminal error if
    /// the pipeline failed.
    async fn await_result(&self, task_id: Uuid, timeout: Duration) -> Result<VisionRecord, AppError>;

    /// Current queue health snapshot.
    async fn health(&self) -> QueueHealth;
}

/// In-process implementation backed by `Arc<RwLock<...>>` state, the same
/// shape the teacher's `SseManager` uses for connection bookkeeping.
#[derive(Clone)]
pub struct InProcessVisionQueue {
    pending: Arc<RwLock<VecDeque<VisionTask>>>,
    statuses: Arc<RwLock<HashMap<Uuid, TaskStatus>>>,
    broadcasters: Arc<RwLock<HashMap<Uuid, broadcast::Sender<TaskStatus>>>>,
    owners: Arc<RwLock<HashMap<Uuid, Uuid>>>,
    user_broadcasters: Arc<RwLock<HashMap<Uuid, broadcast::Sender<VisionOutcome>>>>,
    completed_count: Arc<AtomicU64>,
    error_count: Arc<AtomicU64>,
}

impl InProcessVisionQueue {
    /// Construct an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Arc::new(RwLock::new(VecDeque::new())),
            statuses: Arc::new(RwLock::new(HashMap::new())),
            broadcasters: Arc::new(RwLock::new(HashMap::new())),
            owners: Arc::new(RwLock::new(HashMap::new())),
            user_broadcasters: Arc::new(RwLock::new(HashMap::new())),
            completed_count: Arc::new(AtomicU64::new(0)),
            error_count: Arc::new(AtomicU64::new(0)),
        }
    }

    async fn broadcaster_for(&self, task_id: Uuid) -> broadcast::Sender<TaskStatus> {
        let mut broadcasters = self.broadcasters.write().await;
        broadcasters
            .entry(task_id)
            .or_insert_with(|| broadcast::channel(STATUS_BROADCAST_CAPACITY).0)
            .clone()
    }

    async fn user_broadcaster_for(&self, user_id: Uuid) -> broadcast::Sender<VisionOutcome> {
        let mut broadcasters = self.user_broadcasters.write().await;
        broadcasters
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(USER_BROADCAST_CAPACITY).0)
            .clone()
    }

    async fn set_status(&self, task_id: Uuid, status: TaskStatus) {
        {
            let mut statuses = self.statuses.write().await;
            statuses.insert(task_id, status.clone());
        }
        let sender = self.broadcaster_for(task_id).await;
        // No subscribers yet is routine (the caller may subscribe after
        // enqueueing but before the worker drains), not an error.
        let _ = sender.send(status);
    }

    async fn notify_user(&self, task_id: Uuid, outcome: VisionOutcome) {
        let owner = self.owners.read().await.get(&task_id).copied();
        if let Some(user_id) = owner {
            let sender = self.user_broadcaster_for(user_id).await;
            let _ = sender.send(outcome);
        }
    }
}

impl Default for InProcessVisionQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionQueue for InProcessVisionQueue {
    async fn enqueue(&self, task: VisionTask) {
        let task_id = task.task_id;
        let user_id = task.user_id;
        {
            let mut pending = self.pending.write().await;
            pending.push_back(task);
        }
        self.owners.write().await.insert(task_id, user_id);
        self.set_status(task_id, TaskStatus::Queued).await;
        debug!(%task_id, %user_id, "enqueued vision task");
    }

    async fn drain_one(&self) -> Option<VisionTask> {
        let task = {
            let mut pending = self.pending.write().await;
            pending.pop_front()
        }?;
        self.set_status(task.task_id, TaskStatus::Processing).await;
        Some(task)
    }

    async fn publish_result(&self, task_id: Uuid, record: VisionRecord) {
        self.completed_count.fetch_add(1, Ordering::Relaxed);
        self.set_status(task_id, TaskStatus::Completed(record.clone())).await;
        self.notify_user(task_id, VisionOutcome::Completed { task_id, record }).await;
        info!(%task_id, "vision task completed");
    }

    async fn publish_error(&self, task_id: Uuid, error: AppError, fallback: VisionRecord) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
        warn!(%task_id, code = error.code(), "vision task failed");
        self.notify_user(
            task_id,
            VisionOutcome::Failed {
                task_id,
                error: error.clone(),
            },
        )
        .await;
        self.set_status(task_id, TaskStatus::Failed(error, fallback)).await;
    }

    async fn subscribe(&self, task_id: Uuid) -> Option<broadcast::Receiver<TaskStatus>> {
        if !self.statuses.read().await.contains_key(&task_id) {
            return None;
        }
        Some(self.broadcaster_for(task_id).await.subscribe())
    }

    async fn subscribe_user(&self, user_id: Uuid) -> broadcast::Receiver<VisionOutcome> {
        self.user_broadcaster_for(user_id).await.subscribe()
    }

    async fn await_result(&self, task_id: Uuid, timeout: Duration) -> Result<VisionRecord, AppError> {
        if let Some(status) = self.statuses.read().await.get(&task_id) {
            match status {
                TaskStatus::Completed(record) => return Ok(record.clone()),
                TaskStatus::Failed(error, _) => return Err(error.clone()),
                TaskStatus::Queued | TaskStatus::Processing => {}
            }
        }

        let Some(mut receiver) = self.subscribe(task_id).await else {
            return Err(AppError::with_message(ErrorKind::InvalidInput, "unknown task id"));
        };

        let wait = async move {
            loop {
                match receiver.recv().await {
                    Ok(TaskStatus::Completed(record)) => return Ok(record),
                    Ok(TaskStatus::Failed(error, _)) => return Err(error),
                    Ok(TaskStatus::Queued | TaskStatus::Processing) => continue,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(AppError::new(ErrorKind::ProcessingFailed));
                    }
                }
            }
        };

        match tokio::time::timeout(timeout, wait).await {
            Ok(result) => result,
            Err(_) => Err(AppError::new(ErrorKind::TimedOut)),
        }
    }

    async fn health(&self) -> QueueHealth {
        QueueHealth {
            healthy: true,
            queue_length: self.pending.read().await.len(),
            completed_count: self.completed_count.load(Ordering::Relaxed),
            error_count: self.error_count.load(Ordering::Relaxed),
        }
    }
}

/// Drains [`VisionTask`]s from a [`VisionQueue`] and runs the vision
/// pipeline against each, publishing the result back onto the same queue.
/// CPU-bound pipeline work runs via `spawn_blocking` so it never stalls
/// the async runtime's worker threads.
pub struct VisionWorker {
    queue: Arc<dyn VisionQueue>,
    pipeline: Arc<crate::vision::VisionPipeline>,
    config: crate::config::PipelineConfig,
    anthro_ratios: crate::config::AnthroRatios,
}

impl VisionWorker {
    /// Construct a worker over `queue`, running `pipeline` for every
    /// drained task.
    #[must_use]
    pub fn new(
        queue: Arc<dyn VisionQueue>,
        pipeline: Arc<crate::vision::VisionPipeline>,
        config: crate::config::PipelineConfig,
        anthro_ratios: crate::config::AnthroRatios,
    ) -> Self {
        Self {
            queue,
            pipeline,
            config,
            anthro_ratios,
        }
    }

    /// Run the drain loop forever. On a repeated absence of work, sleeps
    /// [`visionfit_core::constants::vision::WORKER_ERROR_BACKOFF_MS`]
    /// between polls rather than busy-spinning.
    pub async fn run(&self) {
        let backoff = Duration::from_millis(visionfit_core::constants::vision::WORKER_ERROR_BACKOFF_MS);
        loop {
            match self.queue.drain_one().await {
                Some(task) => self.process(task).await,
                None => tokio::time::sleep(backoff).await,
            }
        }
    }

    async fn process(&self, task: VisionTask) {
        let task_id = task.task_id;
        let pipeline = Arc::clone(&self.pipeline);
        let config = self.config;
        let ratios = self.anthro_ratios;

        let outcome = tokio::task::spawn_blocking(move || {
            pipeline.run(&task.image_bytes, task.user_height_cm, task.user_sex, &config, ratios)
        })
        .await;

        match outcome {
            Ok(Ok(record)) => self.queue.publish_result(task_id, record).await,
            Ok(Err(failure)) => self.queue.publish_error(task_id, failure.error, failure.fallback).await,
            Err(join_error) => {
                warn!(%task_id, error = %join_error, "vision pipeline task panicked");
                self.queue
                    .publish_error(
                        task_id,
                        AppError::new(ErrorKind::ProcessingFailed),
                        VisionRecord::fallback(0.0, chrono::Utc::now()),
                    )
                    .await;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use visionfit_core::models::Sex;

    fn sample_task() -> VisionTask {
        VisionTask {
            task_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            image_bytes: vec![0; 16],
            user_height_cm: 180.0,
            user_weight_kg: 80.0,
            user_sex: Sex::Male,
        }
    }

    #[tokio::test]
    async fn unknown_task_id_has_no_subscription() {
        let queue = InProcessVisionQueue::new();
        assert!(queue.subscribe(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn enqueue_then_drain_returns_the_same_task() {
        let queue = InProcessVisionQueue::new();
        let task = sample_task();
        let task_id = task.task_id;
        queue.enqueue(task).await;
        assert_eq!(queue.health().await.queue_length, 1);

        let drained = queue.drain_one().await.unwrap();
        assert_eq!(drained.task_id, task_id);
        assert_eq!(queue.health().await.queue_length, 0);
    }

    #[tokio::test]
    async fn await_result_times_out_while_still_queued() {
        let queue = InProcessVisionQueue::new();
        let task = sample_task();
        let task_id = task.task_id;
        queue.enqueue(task).await;

        let result = queue.await_result(task_id, Duration::from_millis(30)).await;
        assert!(matches!(result.unwrap_err().kind, ErrorKind::TimedOut));
    }

    #[tokio::test]
    async fn await_result_resolves_once_published() {
        let queue = Arc::new(InProcessVisionQueue::new());
        let task = sample_task();
        let task_id = task.task_id;
        queue.enqueue(task).await;

        let waiter_queue = Arc::clone(&queue);
        let waiter = tokio::spawn(async move { waiter_queue.await_result(task_id, Duration::from_secs(2)).await });

        queue.drain_one().await;
        let record = VisionRecord::fallback(0.9, chrono::Utc::now());
        queue.publish_result(task_id, record.clone()).await;

        let resolved = waiter.await.unwrap().unwrap();
        assert_eq!(resolved, record);
        assert_eq!(queue.health().await.completed_count, 1);
    }

    #[tokio::test]
    async fn per_user_push_channel_receives_completion_independent_of_await_result() {
        let queue = Arc::new(InProcessVisionQueue::new());
        let task = sample_task();
        let task_id = task.task_id;
        let user_id = task.user_id;

        let mut user_channel = queue.subscribe_user(user_id).await;

        queue.enqueue(task).await;
        queue.drain_one().await;
        let record = VisionRecord::fallback(0.9, chrono::Utc::now());
        queue.publish_result(task_id, record.clone()).await;

        match user_channel.recv().await.unwrap() {
            VisionOutcome::Completed { task_id: got, record: got_record } => {
                assert_eq!(got, task_id);
                assert_eq!(got_record, record);
            }
            VisionOutcome::Failed { .. } => panic!("expected a completion outcome"),
        }
    }

    #[tokio::test]
    async fn publish_error_surfaces_the_original_error_kind() {
        let queue = InProcessVisionQueue::new();
        let task = sample_task();
        let task_id = task.task_id;
        queue.enqueue(task).await;
        queue.drain_one().await;

        queue
            .publish_error(
                task_id,
                AppError::new(ErrorKind::PoseDetectionFailed),
                VisionRecord::fallback(0.8, chrono::Utc::now()),
            )
            .await;

        let result = queue.await_result(task_id, Duration::from_millis(50)).await;
        assert!(matches!(result.unwrap_err().kind, ErrorKind::PoseDetectionFailed));
        assert_eq!(queue.health().await.error_count, 1);
    }
}
