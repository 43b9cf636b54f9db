// ABOUTME: DataContract — the validated triple consumed by synthesis
// ABOUTME: Constructible only through the validator; invariants are enforced before construction, not after
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::models::{StaticProfile, VisionRecord, WizardInputs};

/// The validated triple (profile, wizard, vision) passed into synthesis
/// (§3 `DataContract`). Every numeric range named in §3 holds, and
/// `vision.quality >= 0.70`. The only way to obtain one is
/// `contract::validate`, in the server crate, which returns either this
/// type or the full list of violations — never a partially-checked value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataContract {
    /// Frozen snapshot of the user's static profile at plan-generation time.
    pub profile: StaticProfile,
    /// Frozen snapshot of this generation's wizard inputs.
    pub wizard: WizardInputs,
    /// Frozen snapshot of this generation's vision record.
    pub vision: VisionRecord,
    /// Equipment/injury tokens present but outside the recognized
    /// vocabulary — kept, not rejected, but surfaced so a caller can warn.
    pub unrecognized_tokens: Vec<String>,
}

impl DataContract {
    /// Construct a contract from already-validated parts. Not `pub` outside
    /// the crate boundary that owns validation — the server crate's
    /// `contract::validate` is the only sanctioned constructor.
    #[must_use]
    pub fn from_validated_parts(
        profile: StaticProfile,
        wizard: WizardInputs,
        vision: VisionRecord,
        unrecognized_tokens: Vec<String>,
    ) -> Self {
        Self {
            profile,
            wizard,
            vision,
            unrecognized_tokens,
        }
    }
}
