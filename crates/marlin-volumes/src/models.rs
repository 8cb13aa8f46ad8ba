//! Volume models shared by the convenience layer and its tests.

use chrono::{DateTime, Utc};
use marlin_core::ids::{DropletId, VolumeId};
use marlin_core::query::QueryParams;
use marlin_core::types::Region;
use serde::{Deserialize, Serialize};

/// A block-storage volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Volume {
    /// Volume id.
    pub id: VolumeId,
    /// Human-readable name, unique per region.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Capacity in GiB.
    pub size_gigabytes: u64,
    /// Droplets the volume is attached to.
    #[serde(default)]
    pub droplet_ids: Vec<DropletId>,
    /// Region the volume lives in.
    #[serde(default)]
    pub region: Option<Region>,
    /// Filesystem type, if formatted ("ext4", "xfs").
    #[serde(default)]
    pub filesystem_type: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a volume.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateVolumeRequest {
    /// Capacity in GiB.
    pub size_gigabytes: u64,
    /// Volume name, unique per region.
    pub name: String,
    /// Region slug.
    pub region: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pre-format with a filesystem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem_type: Option<String>,
}

impl CreateVolumeRequest {
    /// Minimal creation payload.
    #[must_use]
    pub fn new(size_gigabytes: u64, name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            size_gigabytes,
            name: name.into(),
            region: region.into(),
            description: None,
            filesystem_type: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Addresses a volume by name and region instead of id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeFilter {
    /// Volume name.
    pub name: String,
    /// Region slug.
    pub region: String,
}

impl VolumeFilter {
    /// Create a filter.
    #[must_use]
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
        }
    }

    /// Convert the filter into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push("name", &self.name);
        params.push("region", &self.region);
        params.into_pairs()
    }
}
