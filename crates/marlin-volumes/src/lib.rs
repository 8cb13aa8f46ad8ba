//! # marlin-volumes
//!
//! Block-storage volume resources for the marlin DigitalOcean client: plain
//! models and the convenience requests that map them onto the `marlin-core`
//! engine.

#![deny(missing_docs)]
#![deny(clippy::all)]

pub mod client;
pub mod models;

pub use client::VolumeRequests;
pub use models::{CreateVolumeRequest, Volume, VolumeFilter};
