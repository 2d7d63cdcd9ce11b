mod homography;

pub use homography::raw_translation_from_homography;

use serde::{Deserialize, Serialize};

use crate::util::Vec3;

/// Marker translation relative to the camera, in millimeters.
///
/// This is the detector's raw (unit-tag) translation scaled by the tag's
/// physical size, not a full re-estimation of the pose, so it is only
/// locally accurate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricPose(Vec3);

impl MetricPose {
    pub const fn of(x: f64, y: f64, z: f64) -> Self {
        Self(Vec3::of(x, y, z))
    }

    /// Scale a unit-tag translation by the physical tag size (mm), per axis
    pub fn from_raw(raw_translation: Vec3, physical_size_mm: f64) -> Self {
        Self(raw_translation.scale(physical_size_mm))
    }

    pub const fn translation(&self) -> Vec3 {
        self.0
    }

    /// Euclidean distance from the camera, in millimeters
    pub fn distance(&self) -> f64 {
        self.0.mag()
    }

    /// Component-wise offset of this pose from `origin`
    pub fn relative_to(&self, origin: &MetricPose) -> Vec3 {
        &self.0 - &origin.0
    }
}
