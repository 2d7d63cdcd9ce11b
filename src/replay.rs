//! Recorded scenes: marker detections and blob data captured per frame, replayed
//! through the pipeline without a camera.
use std::{fs::File, io::BufReader, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
	blob::{Blob, BlobQuery, BlobSource, StaticBlobSource},
	pose::raw_translation_from_homography,
	util::Point2D,
	CameraIntrinsics, ColorThreshold, LoadError, MarkerDetection, MarkerDetector,
};
#[cfg(feature = "segment")]
use crate::segment::ColorSegmenter;

/// Replay failure for one recorded marker or frame image
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReplayError {
	#[cfg(feature = "segment")]
	#[error("Unable to load frame image {}", path.display())]
	Image {
		path: PathBuf,
		#[source]
		source: image::ImageError,
	},
	#[error("Frame image {} given, but segmentation support is disabled", path.display())]
	SegmentUnavailable {
		path: PathBuf,
	},
	#[error("Degenerate homography for marker {id}")]
	DegenerateHomography {
		id: u32,
	},
}

/// One marker as recorded by the capturing detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordedMarker {
	/// Detector reported a unit-tag translation directly
	Pose(MarkerDetection),
	/// Detector reported only the tag homography (ideal corners at ±1)
	Homography {
		id: u32,
		homography: [[f64; 3]; 3],
		center: Point2D,
	},
}

impl RecordedMarker {
	fn to_detection(&self, intrinsics: &CameraIntrinsics) -> Result<MarkerDetection, ReplayError> {
		match self {
			Self::Pose(detection) => Ok(detection.clone()),
			Self::Homography { id, homography, center } => {
				let raw = raw_translation_from_homography(homography, intrinsics)
					.ok_or(ReplayError::DegenerateHomography { id: *id })?;
				Ok(MarkerDetection::new(*id, raw, *center))
			}
		}
	}
}

/// Pre-computed blobs for one threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBlobs {
	pub threshold: ColorThreshold,
	pub blobs: Vec<Blob>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
	#[serde(default)]
	pub markers: Vec<RecordedMarker>,
	/// Blob lists per threshold. Ignored when `image` is set.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub blobs: Vec<ThresholdBlobs>,
	/// RGB frame to segment, relative to the scene file
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<PathBuf>,
}

impl SceneFrame {
	/// Build this frame's blob source.
	///
	/// Relative image paths are resolved against `base_dir`.
	pub fn blob_source(&self, base_dir: &Path) -> Result<FrameBlobs, ReplayError> {
		let path = match &self.image {
			Some(path) => base_dir.join(path),
			None => {
				let source = self.blobs.iter()
					.fold(StaticBlobSource::new(), |source, entry| source.with(entry.threshold.clone(), entry.blobs.iter().copied()));
				return Ok(FrameBlobs::Static(source));
			}
		};

		segment_image(path)
	}

	/// [blob_source](Self::blob_source), falling back to a source with no blobs.
	///
	/// The frame's markers are still processed; objects just get no blob match.
	pub fn blob_source_or_empty(&self, base_dir: &Path) -> FrameBlobs {
		self.blob_source(base_dir)
			.unwrap_or_else(|e| {
				tracing::warn!("no blobs for frame: {e}");
				FrameBlobs::default()
			})
	}
}

#[cfg(feature = "segment")]
fn segment_image(path: PathBuf) -> Result<FrameBlobs, ReplayError> {
	let image = image::open(&path)
		.map_err(|source| ReplayError::Image { path: path.clone(), source })?
		.to_rgb8();
	tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded frame image");
	Ok(FrameBlobs::Segmented(ColorSegmenter::new(&image)))
}

#[cfg(not(feature = "segment"))]
fn segment_image(path: PathBuf) -> Result<FrameBlobs, ReplayError> {
	Err(ReplayError::SegmentUnavailable { path })
}

/// Blob source for one replayed frame
#[derive(Debug, Clone)]
pub enum FrameBlobs {
	Static(StaticBlobSource),
	#[cfg(feature = "segment")]
	Segmented(ColorSegmenter),
}

impl Default for FrameBlobs {
	fn default() -> Self {
		Self::Static(StaticBlobSource::new())
	}
}

impl BlobSource for FrameBlobs {
	fn find_blobs(&self, query: &BlobQuery<'_>) -> Vec<Blob> {
		match self {
			Self::Static(source) => source.find_blobs(query),
			#[cfg(feature = "segment")]
			Self::Segmented(source) => source.find_blobs(query),
		}
	}
}

/// A recorded sequence of frames
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
	pub frames: Vec<SceneFrame>,
}

impl Scene {
	pub fn load(path: &Path) -> Result<Self, LoadError> {
		let file = File::open(path)?;
		Ok(serde_json::from_reader(BufReader::new(file))?)
	}

	pub fn from_json(text: &str) -> Result<Self, LoadError> {
		Ok(serde_json::from_str(text)?)
	}
}

/// Marker detector that plays back a [SceneFrame]'s recorded markers
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayDetector;

impl MarkerDetector for ReplayDetector {
	type Frame = SceneFrame;
	type Error = ReplayError;

	/// Markers that cannot be converted are dropped; the rest of the frame is kept.
	fn detect(&mut self, frame: &SceneFrame, intrinsics: &CameraIntrinsics) -> Result<Vec<MarkerDetection>, ReplayError> {
		let detections = frame.markers.iter()
			.filter_map(|marker| match marker.to_detection(intrinsics) {
				Ok(detection) => Some(detection),
				Err(e) => {
					tracing::warn!("dropping recorded marker: {e}");
					None
				}
			})
			.collect();
		Ok(detections)
	}
}
