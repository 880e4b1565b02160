use serde::{Deserialize, Serialize};

/// One landmark keypoint produced by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized horizontal coordinate.
    pub x: f32,
    /// Normalized vertical coordinate.
    pub y: f32,
    /// Depth relative to the reference plane.
    pub z: f32,
}

/// Per-frame feature payload: the landmark groups the detector produced.
///
/// Serialized with the camelCase keys the capture backend expects
/// (`leftHand`, `rightHand`). A group the detector did not produce this
/// frame is `None` and is omitted from the wire form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameFeatures {
    /// Body pose keypoints (33 points when complete).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<Vec<Landmark>>,
    /// Left hand keypoints (21 points when complete).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_hand: Option<Vec<Landmark>>,
    /// Right hand keypoints (21 points when complete).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_hand: Option<Vec<Landmark>>,
    /// Face mesh keypoints (468 points when complete).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<Vec<Landmark>>,
}

impl FrameFeatures {
    /// True when no landmark group carries any point.
    ///
    /// Empty payloads count as "frame received" but are never buffered,
    /// even mid-recording.
    pub fn is_empty(&self) -> bool {
        fn group_empty(group: &Option<Vec<Landmark>>) -> bool {
            group.as_ref().is_none_or(Vec::is_empty)
        }

        group_empty(&self.pose)
            && group_empty(&self.left_hand)
            && group_empty(&self.right_hand)
            && group_empty(&self.face)
    }
}

/// One tick of the detector stream.
///
/// Produced once per camera frame and consumed immediately; the source
/// does not retain it after delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameObservation {
    /// Whether at least one hand was detected this frame.
    #[serde(default)]
    pub hand_detected: bool,
    /// Landmark payload for this frame; may be empty.
    #[serde(default)]
    pub features: FrameFeatures,
}

impl FrameObservation {
    /// Build an observation from a detection flag and its payload.
    pub fn new(hand_detected: bool, features: FrameFeatures) -> Self {
        Self {
            hand_detected,
            features,
        }
    }
}

/// A completed gesture: the ordered feature frames plus their label.
///
/// This is the boundary contract with whatever persists captures; the
/// key names (`label`, `framesData`) must be preserved exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    /// Word or sign associated with the gesture; may be empty.
    pub label: String,
    /// Feature frames in temporal capture order.
    #[serde(rename = "framesData")]
    pub frames_data: Vec<FrameFeatures>,
}
