//! Catalog of v2 REST endpoint paths.
//!
//! An [`Endpoint`] is a logical operation target plus the path parameters it
//! embeds. It renders to a relative path; the URL builder joins it onto the
//! configured version prefix.

use crate::ids::{ActionId, DropletId, ImageId, SnapshotId, SshKeyId, VolumeId};

/// Logical identifier for a REST resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Account information.
    Account,
    /// All actions across resources.
    Actions,
    /// A single action.
    Action(ActionId),
    /// Block-storage volumes.
    Volumes,
    /// A single volume.
    Volume(VolumeId),
    /// Actions addressed to volumes by name.
    VolumeActions,
    /// Actions for a single volume.
    VolumeActionsFor(VolumeId),
    /// Snapshots of a volume.
    VolumeSnapshots(VolumeId),
    /// DNS domains.
    Domains,
    /// A single domain.
    Domain(String),
    /// Records of a domain.
    DomainRecords(String),
    /// A single domain record.
    DomainRecord(String, u64),
    /// Droplets.
    Droplets,
    /// A single droplet.
    Droplet(DropletId),
    /// Actions for a droplet.
    DropletActions(DropletId),
    /// Kernels available to a droplet.
    DropletKernels(DropletId),
    /// Snapshots of a droplet.
    DropletSnapshots(DropletId),
    /// Backups of a droplet.
    DropletBackups(DropletId),
    /// Droplets sharing physical hardware with a droplet.
    DropletNeighbors(DropletId),
    /// All co-located droplet groups.
    Neighbors,
    /// Images.
    Images,
    /// A single image by id.
    Image(ImageId),
    /// A single image by slug.
    ImageWithSlug(String),
    /// Actions for an image.
    ImageActions(ImageId),
    /// Snapshots across resources.
    Snapshots,
    /// A single snapshot.
    Snapshot(SnapshotId),
    /// SSH keys on the account.
    SshKeys,
    /// A single SSH key by id.
    SshKey(SshKeyId),
    /// A single SSH key by fingerprint.
    SshKeyWithFingerprint(String),
    /// Datacenter regions.
    Regions,
    /// Droplet sizes.
    Sizes,
    /// Floating IPs.
    FloatingIps,
    /// A single floating IP.
    FloatingIp(String),
    /// Actions for a floating IP.
    FloatingIpActions(String),
    /// Tags.
    Tags,
    /// A single tag.
    Tag(String),
}

impl Endpoint {
    /// Renders the relative path for this endpoint.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Account => "account".to_string(),
            Self::Actions => "actions".to_string(),
            Self::Action(id) => format!("actions/{id}"),
            Self::Volumes => "volumes".to_string(),
            Self::Volume(id) => format!("volumes/{id}"),
            Self::VolumeActions => "volumes/actions".to_string(),
            Self::VolumeActionsFor(id) => format!("volumes/{id}/actions"),
            Self::VolumeSnapshots(id) => format!("volumes/{id}/snapshots"),
            Self::Domains => "domains".to_string(),
            Self::Domain(name) => format!("domains/{name}"),
            Self::DomainRecords(name) => format!("domains/{name}/records"),
            Self::DomainRecord(name, id) => format!("domains/{name}/records/{id}"),
            Self::Droplets => "droplets".to_string(),
            Self::Droplet(id) => format!("droplets/{id}"),
            Self::DropletActions(id) => format!("droplets/{id}/actions"),
            Self::DropletKernels(id) => format!("droplets/{id}/kernels"),
            Self::DropletSnapshots(id) => format!("droplets/{id}/snapshots"),
            Self::DropletBackups(id) => format!("droplets/{id}/backups"),
            Self::DropletNeighbors(id) => format!("droplets/{id}/neighbors"),
            Self::Neighbors => "reports/droplet_neighbors".to_string(),
            Self::Images => "images".to_string(),
            Self::Image(id) => format!("images/{id}"),
            Self::ImageWithSlug(slug) => format!("images/{slug}"),
            Self::ImageActions(id) => format!("images/{id}/actions"),
            Self::Snapshots => "snapshots".to_string(),
            Self::Snapshot(id) => format!("snapshots/{id}"),
            Self::SshKeys => "account/keys".to_string(),
            Self::SshKey(id) => format!("account/keys/{id}"),
            Self::SshKeyWithFingerprint(f) => format!("account/keys/{f}"),
            Self::Regions => "regions".to_string(),
            Self::Sizes => "sizes".to_string(),
            Self::FloatingIps => "floating_ips".to_string(),
            Self::FloatingIp(ip) => format!("floating_ips/{ip}"),
            Self::FloatingIpActions(ip) => format!("floating_ips/{ip}/actions"),
            Self::Tags => "tags".to_string(),
            Self::Tag(name) => format!("tags/{name}"),
        }
    }
}
