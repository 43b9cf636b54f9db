// ABOUTME: External collaborator interfaces this crate depends on but never implements
// ABOUTME: Persistence, image storage, and auth passthrough are out of scope; only their contracts live here
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stated interfaces for the collaborators surrounding this crate (§1 "Out
//! of scope"). HTTP routing, authentication, PDF rendering, and long-term
//! persistence are thin layers a surrounding service provides; this crate
//! only declares the shape it expects from them, the way the teacher
//! declares `trait DatabaseProvider` / `trait LlmProvider` at the seam
//! between itself and a concrete backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use visionfit_core::errors::AppResult;
use visionfit_core::models::{Plan, VisionRecord};

/// Long-term persistence of generated plans. No concrete implementation
/// ships in this crate.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Persist a newly generated plan.
    async fn save(&self, plan: &Plan) -> AppResult<()>;
    /// Fetch a previously saved plan by id.
    async fn get(&self, plan_id: Uuid) -> AppResult<Option<Plan>>;
    /// List plan ids belonging to a user, most recent first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Uuid>>;
}

/// Long-term persistence of vision records, independent of the plans that
/// may later reference them.
#[async_trait]
pub trait VisionRecordStore: Send + Sync {
    /// Persist a vision record keyed by the task that produced it.
    async fn save(&self, task_id: Uuid, record: &VisionRecord) -> AppResult<()>;
    /// Fetch a previously saved vision record.
    async fn get(&self, task_id: Uuid) -> AppResult<Option<VisionRecord>>;
}

/// Uploaded-photo storage. The worker treats the resolved path as
/// read-only; cleanup is this collaborator's responsibility, best-effort,
/// on a timer (§5 "1 hour after enqueue").
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Resolve an opaque photo reference to bytes the pipeline can decode.
    async fn load(&self, photo_reference: &str) -> AppResult<Vec<u8>>;
    /// Best-effort deletion; failure is logged, never fatal (§5).
    async fn delete(&self, photo_reference: &str);
    /// Schedule a deletion at `not_before`. A real implementation enqueues
    /// this on a timer service; nothing in this crate calls it directly.
    async fn schedule_delete(&self, photo_reference: &str, not_before: DateTime<Utc>);
}

/// Authenticated-user context passed through from the HTTP layer. Opaque
/// here: this crate only needs the user id to key queue subscriptions and
/// ownership checks, never the authentication mechanism itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// The authenticated user's id.
    pub user_id: Uuid,
}
