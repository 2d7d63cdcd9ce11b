//! One frame in, one report out
use serde::Serialize;

use crate::{
	blob::{BlobParams, BlobSource},
	classify::classify,
	detection::{detect_or_empty, MarkerDetector},
	fusion::{FusionEngine, FusionResult},
	CameraIntrinsics, MarkerDetection, MetricPose, TagRegistry, TimeProfile,
};

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
	/// Origin marker pose, `None` if it wasn't seen this frame
	pub origin: Option<MetricPose>,
	/// One entry per tracked object, in detection order
	pub results: Vec<FusionResult>,
	/// Detections with unregistered ids
	pub unknown_markers: usize,
	/// Stage timing
	#[serde(skip)]
	pub tp: TimeProfile,
}

impl FrameReport {
	pub fn origin_found(&self) -> bool {
		self.origin.is_some()
	}
}

/// Frame processing: classify detections, then fuse each tracked object.
///
/// Holds only the immutable registry and intrinsics, so processing a frame
/// has no effect on the next one.
#[derive(Debug, Clone)]
pub struct FramePipeline {
	registry: TagRegistry,
	intrinsics: CameraIntrinsics,
	blob_params: BlobParams,
	/// Fuse tracked objects on the rayon pool
	parallel: bool,
}

impl FramePipeline {
	pub fn new(registry: TagRegistry, intrinsics: CameraIntrinsics, blob_params: BlobParams) -> Self {
		Self {
			registry,
			intrinsics,
			blob_params,
			parallel: false,
		}
	}

	pub fn with_parallel(mut self, parallel: bool) -> Self {
		self.parallel = parallel;
		self
	}

	pub fn registry(&self) -> &TagRegistry {
		&self.registry
	}

	pub fn intrinsics(&self) -> &CameraIntrinsics {
		&self.intrinsics
	}

	pub fn blob_params(&self) -> &BlobParams {
		&self.blob_params
	}

	/// Process one frame's detections against its blob source
	pub fn process<B: BlobSource + Sync + ?Sized>(&self, detections: &[MarkerDetection], blobs: &B) -> FrameReport {
		self.process_inner(TimeProfile::default(), detections, blobs)
	}

	/// Run `detector` on `frame`, then [process](Self::process) the result.
	///
	/// A failing detector yields a report with no objects.
	pub fn process_frame<D, B>(&self, detector: &mut D, frame: &D::Frame, blobs: &B) -> FrameReport
		where
			D: MarkerDetector,
			B: BlobSource + Sync + ?Sized,
	{
		let mut tp = TimeProfile::default();
		let detections = detect_or_empty(detector, frame, &self.intrinsics);
		tp.stamp("detect");
		self.process_inner(tp, &detections, blobs)
	}

	fn process_inner<B: BlobSource + Sync + ?Sized>(&self, mut tp: TimeProfile, detections: &[MarkerDetection], blobs: &B) -> FrameReport {
		let frame = classify(detections, &self.registry);
		tp.stamp("classify");

		let engine = FusionEngine::new(&self.intrinsics, self.blob_params);
		let results = if self.parallel {
			engine.fuse_par(&frame.tracked, frame.origin.as_ref(), blobs)
		} else {
			engine.fuse(&frame.tracked, frame.origin.as_ref(), blobs)
		};
		tp.stamp("fuse");

		FrameReport {
			origin: frame.origin,
			results,
			unknown_markers: frame.unknown,
			tp,
		}
	}
}
