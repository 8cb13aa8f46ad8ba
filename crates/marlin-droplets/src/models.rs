//! Droplet models shared by the convenience layer and its tests.

use chrono::{DateTime, Utc};
use marlin_core::ids::{DropletId, ImageId};
use marlin_core::types::Region;
use serde::{Deserialize, Serialize};

/// A droplet as returned by the droplet endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Droplet {
    /// Droplet id.
    pub id: DropletId,
    /// Human-readable name.
    pub name: String,
    /// Memory in MB.
    pub memory: u32,
    /// Number of virtual CPUs.
    pub vcpus: u32,
    /// Disk size in GB.
    pub disk: u32,
    /// Whether the droplet is locked against actions.
    #[serde(default)]
    pub locked: bool,
    /// Current status ("new", "active", "off", "archive").
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Region the droplet runs in.
    #[serde(default)]
    pub region: Option<Region>,
    /// Size slug ("s-1vcpu-1gb").
    #[serde(default)]
    pub size_slug: Option<String>,
    /// Base image (arbitrary JSON; shape varies between slug and snapshot
    /// images).
    #[serde(default)]
    pub image: Option<serde_json::Value>,
    /// Network interfaces (arbitrary JSON).
    #[serde(default)]
    pub networks: Option<serde_json::Value>,
    /// Ids of backups taken of this droplet.
    #[serde(default)]
    pub backup_ids: Vec<u64>,
    /// Ids of snapshots taken of this droplet.
    #[serde(default)]
    pub snapshot_ids: Vec<u64>,
    /// Enabled features ("backups", "ipv6", ...).
    #[serde(default)]
    pub features: Vec<String>,
    /// Tags applied to the droplet.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Payload for creating a droplet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateDropletRequest {
    /// Droplet name.
    pub name: String,
    /// Region slug.
    pub region: String,
    /// Size slug.
    pub size: String,
    /// Image slug or id.
    pub image: String,
    /// Ids of SSH keys to embed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_keys: Vec<u64>,
    /// Enable automated backups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backups: Option<bool>,
    /// Enable IPv6.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<bool>,
    /// Tags to apply on creation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CreateDropletRequest {
    /// Minimal creation payload.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        size: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            size: size.into(),
            image: image.into(),
            ssh_keys: Vec::new(),
            backups: None,
            ipv6: None,
            tags: Vec::new(),
        }
    }
}

/// An action request addressed to a droplet.
///
/// Serializes to the wire shape `{"type": "...", ...}` expected by the
/// droplet action endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DropletAction {
    /// Graceful reboot.
    Reboot,
    /// Hard power cycle.
    PowerCycle,
    /// Graceful shutdown.
    Shutdown,
    /// Hard power off.
    PowerOff,
    /// Power on.
    PowerOn,
    /// Reset the root password.
    PasswordReset,
    /// Enable automated backups.
    EnableBackups,
    /// Disable automated backups.
    DisableBackups,
    /// Enable IPv6 networking.
    EnableIpv6,
    /// Enable private networking.
    EnablePrivateNetworking,
    /// Restore from a backup image.
    Restore {
        /// Backup image to restore from.
        image: ImageId,
    },
    /// Resize to a new size slug.
    Resize {
        /// Target size slug.
        size: String,
        /// Also grow the disk (irreversible).
        #[serde(skip_serializing_if = "Option::is_none")]
        disk: Option<bool>,
    },
    /// Rename the droplet.
    Rename {
        /// New name.
        name: String,
    },
    /// Take a snapshot.
    Snapshot {
        /// Snapshot name.
        name: String,
    },
}
