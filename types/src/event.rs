//! Crossing notifications as handed to a notification sink.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Axis, BoundaryKey, Dimensions, EventName};

/// Detail attached to every crossing event.
///
/// Field order and names are part of the wire shape:
/// `{key, width, height, pastBoundary, modified, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossingPayload {
    pub key: BoundaryKey,
    pub width: u32,
    pub height: u32,
    /// Side of the boundary after this crossing.
    pub past_boundary: bool,
    /// Axis of the boundary that was crossed.
    pub modified: Axis,
    pub data: Vec<Value>,
}

impl CrossingPayload {
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// One crossing, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingEvent {
    pub name: EventName,
    pub payload: CrossingPayload,
    pub bubbles: bool,
}

impl CrossingEvent {
    #[must_use]
    pub fn key(&self) -> &BoundaryKey {
        &self.payload.key
    }

    /// `true` when the dimension moved beyond the boundary, `false` when it came back.
    #[must_use]
    pub fn is_outward(&self) -> bool {
        self.payload.past_boundary
    }
}
