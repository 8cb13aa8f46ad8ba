//! Plain models shared by more than one resource crate.
//!
//! The engine itself never references these; they live here so resource
//! crates do not depend on each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ActionId;

/// A datacenter region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    /// Short machine-readable slug ("nyc3").
    pub slug: String,
    /// Display name ("New York 3").
    pub name: String,
    /// Droplet size slugs available in this region.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Feature flags ("backups", "ipv6", ...).
    #[serde(default)]
    pub features: Vec<String>,
    /// Whether new resources can be created here.
    #[serde(default)]
    pub available: bool,
}

/// An asynchronous server-side action, as reported by action endpoints.
///
/// Actions are the natural target of polling: issue one, then re-fetch it
/// until `status` leaves `in-progress`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    /// Action id.
    pub id: ActionId,
    /// Current status: "in-progress", "completed" or "errored".
    pub status: String,
    /// Action kind ("reboot", "image_destroy", ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// When the action was initiated.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// When the action finished, if it has.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Id of the resource the action applies to.
    #[serde(default)]
    pub resource_id: Option<u64>,
    /// Kind of the resource the action applies to.
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Region slug where the action runs.
    #[serde(default)]
    pub region_slug: Option<String>,
}

impl Action {
    /// Whether the action has reached a terminal status.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status != "in-progress"
    }
}
