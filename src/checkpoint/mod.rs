//! Snapshots of a machine's live state.
//!
//! A [`Snapshot`] captures the current state, the current data and the
//! completed flag of a [`Machine`](crate::engine::Machine) at one instant.
//! Handlers, the default handler and the observer are code and are never
//! captured; restoring a snapshot requires a machine built with the same
//! state table.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of a machine's live state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<S, D> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// Id of the machine the snapshot was taken from
    pub machine: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    pub state: S,

    pub data: D,

    /// Whether the machine had committed an end marker
    pub completed: bool,
}

impl<S, D> Snapshot<S, D> {
    pub(crate) fn new(machine: Uuid, state: S, data: D, completed: bool) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            machine,
            taken_at: Utc::now(),
            state,
            data,
            completed,
        }
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

impl<S: Serialize, D: Serialize> Snapshot<S, D> {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Encode with bincode.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }
}

impl<S: DeserializeOwned, D: DeserializeOwned> Snapshot<S, D> {
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_version()
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.check_version()
    }
}
