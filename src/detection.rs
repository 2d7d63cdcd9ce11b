use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{util::{Point2D, Vec3}, CameraIntrinsics};

/// Represents the detection of a tag in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDetection {
	/// The decoded ID of the tag
	pub id: u32,

	/// Tag translation relative to the camera, in units of the tag's edge
	/// length (i.e. as if the tag were 1 unit wide). Scaling by the physical
	/// tag size gives millimeters.
	#[serde(rename = "translation")]
	pub raw_translation: Vec3,

	/// The center of the detection in image pixel coordinates.
	pub center: Point2D,
}

impl MarkerDetection {
	pub fn new(id: u32, raw_translation: Vec3, center: Point2D) -> Self {
		Self {
			id,
			raw_translation,
			center,
		}
	}
}

/// Source of marker detections for a frame
pub trait MarkerDetector {
	type Frame: ?Sized;
	type Error: Display;

	/// Detect all markers in `frame`
	fn detect(&mut self, frame: &Self::Frame, intrinsics: &CameraIntrinsics) -> Result<Vec<MarkerDetection>, Self::Error>;
}

/// Run a detector, reporting a failure as a frame with no markers.
pub fn detect_or_empty<D: MarkerDetector>(detector: &mut D, frame: &D::Frame, intrinsics: &CameraIntrinsics) -> Vec<MarkerDetection> {
	match detector.detect(frame, intrinsics) {
		Ok(detections) => detections,
		Err(e) => {
			tracing::warn!("marker detection failed: {e}");
			Vec::new()
		}
	}
}
