//! Structured comparison result.
//!
//! Mirrors the service response field-for-field so the whole answer can
//! be shown back to the operator as JSON.

use serde::{Deserialize, Serialize};

/// Everything the service returned for one comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComparisonResult {
    /// Faces in the target that match the source face, in service order
    pub face_matches: Vec<FaceMatch>,
    /// Faces in the target that did not match
    pub unmatched_faces: Vec<ComparedFace>,
    /// The face the service used from the source image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_image_face: Option<SourceFace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_image_orientation_correction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_image_orientation_correction: Option<String>,
}

impl ComparisonResult {
    pub fn match_count(&self) -> usize {
        self.face_matches.len()
    }

    pub fn has_match(&self) -> bool {
        !self.face_matches.is_empty()
    }

    /// The highest-similarity match.
    ///
    /// On ties the earlier (higher ranked) match wins.
    pub fn best_match(&self) -> Option<&FaceMatch> {
        self.face_matches.iter().fold(None, |best, candidate| match best {
            Some(current) if current.similarity >= candidate.similarity => Some(current),
            _ => Some(candidate),
        })
    }

    /// The full response as pretty-printed JSON
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// One matching face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FaceMatch {
    /// 0-100 confidence that the faces belong to the same person
    pub similarity: f32,
    pub face: ComparedFace,
}

/// Metadata about a detected face
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComparedFace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<Landmark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<Pose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<ImageQuality>,
}

/// The face selected from the source image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceFace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Box coordinates as ratios of the image size
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Landmark {
    #[serde(rename = "Type")]
    pub kind: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pose {
    pub roll: f32,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageQuality {
    pub brightness: f32,
    pub sharpness: f32,
}
