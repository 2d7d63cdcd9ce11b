//! Per-object fusion of marker pose and colour blob
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
	blob::{select_blob, BlobParams, BlobQuery, BlobSource},
	util::Vec3,
	CameraIntrinsics,
	MetricPose,
	TrackedItem,
};

/// Empirical scale in the size back-projection (`size = px * dist / f / 2`).
///
/// The on-device overlay was tuned against this value; changing it needs new
/// calibration data.
pub const PROJECTION_SCALE: f64 = 2.;

/// Pixel extent of the blob matched to a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMatch {
	pub pixel_width: u32,
	pub pixel_height: u32,
}

/// Object position relative to the origin marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "offset_mm")]
pub enum RelativePosition {
	/// Offset from the origin marker, in millimeters
	Found(Vec3),
	/// No origin marker this frame. Distinct from a zero offset.
	OriginNotFound,
}

impl RelativePosition {
	pub fn offset(&self) -> Option<Vec3> {
		match self {
			Self::Found(offset) => Some(*offset),
			Self::OriginNotFound => None,
		}
	}
}

/// Fusion output for one tracked object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
	pub id: u32,
	pub name: String,
	/// Euclidean distance from the camera
	pub distance_mm: f64,
	/// Physical width of the matched blob, 0 without a match
	pub width_mm: f64,
	/// Physical height of the matched blob, 0 without a match
	pub height_mm: f64,
	/// The matched blob, if any
	pub blob: Option<BlobMatch>,
	pub relative_position: RelativePosition,
}

/// Convert a blob's pixel extent to millimeters at `distance_mm` (pinhole back-projection)
pub fn metric_size(blob: &BlobMatch, distance_mm: f64, intrinsics: &CameraIntrinsics) -> (f64, f64) {
	let width = blob.pixel_width as f64 * distance_mm / intrinsics.fx / PROJECTION_SCALE;
	let height = blob.pixel_height as f64 * distance_mm / intrinsics.fy / PROJECTION_SCALE;
	(width, height)
}

/// Fuses tracked markers with colour blobs.
///
/// Holds only shared, read-only state, so items can be fused independently
/// (see [fuse_par](Self::fuse_par)).
#[derive(Debug, Clone, Copy)]
pub struct FusionEngine<'a> {
	intrinsics: &'a CameraIntrinsics,
	params: BlobParams,
}

impl<'a> FusionEngine<'a> {
	pub fn new(intrinsics: &'a CameraIntrinsics, params: BlobParams) -> Self {
		Self {
			intrinsics,
			params,
		}
	}

	/// Fuse every tracked item, preserving input order
	pub fn fuse<B: BlobSource + ?Sized>(&self, tracked: &[TrackedItem], origin: Option<&MetricPose>, blobs: &B) -> Vec<FusionResult> {
		tracked.iter()
			.map(|item| self.fuse_item(item, origin, blobs))
			.collect()
	}

	/// Same as [fuse](Self::fuse), with items fused on the rayon pool
	pub fn fuse_par<B: BlobSource + Sync + ?Sized>(&self, tracked: &[TrackedItem], origin: Option<&MetricPose>, blobs: &B) -> Vec<FusionResult> {
		tracked.par_iter()
			.map(|item| self.fuse_item(item, origin, blobs))
			.collect()
	}

	/// Fuse a single tracked item
	pub fn fuse_item<B: BlobSource + ?Sized>(&self, item: &TrackedItem, origin: Option<&MetricPose>, blobs: &B) -> FusionResult {
		let entry = item.entry;
		let distance_mm = item.pose.distance();

		let blob = match &entry.color_threshold {
			Some(threshold) => {
				let query = BlobQuery {
					threshold,
					params: self.params,
				};
				let candidates = blobs.find_blobs(&query);
				let found = select_blob(&candidates, item.center)
					.map(|blob| BlobMatch {
						pixel_width: blob.rect.w,
						pixel_height: blob.rect.h,
					});
				if found.is_none() {
					tracing::debug!(id = entry.id, candidates = candidates.len(), "no blob contains marker center");
				}
				found
			},
			None => None,
		};

		let (width_mm, height_mm) = match &blob {
			Some(blob) => metric_size(blob, distance_mm, self.intrinsics),
			None => (0., 0.),
		};

		let relative_position = match origin {
			Some(origin) => RelativePosition::Found(item.pose.relative_to(origin)),
			None => RelativePosition::OriginNotFound,
		};

		let result = FusionResult {
			id: entry.id,
			name: entry.name.clone(),
			distance_mm,
			width_mm,
			height_mm,
			blob,
			relative_position,
		};
		tracing::trace!(?result, "fused");
		result
	}
}
