//! Colour-blob queries and blob/marker association
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{util::{PixelRect, Point2D}, ColorThreshold};

/// A connected region of pixels that passed a colour threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
	/// Bounding rectangle
	pub rect: PixelRect,
	/// Number of member pixels (0 if the source doesn't report it)
	#[serde(default)]
	pub pixels: u32,
}

impl Blob {
	pub const fn new(rect: PixelRect) -> Self {
		Self {
			rect,
			pixels: 0,
		}
	}
}

impl From<PixelRect> for Blob {
	fn from(rect: PixelRect) -> Self {
		Self::new(rect)
	}
}

/// Filtering parameters sent with every blob query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobParams {
	/// Minimum number of member pixels
	pub pixels_threshold: u32,
	/// Minimum bounding-box area, in pixels
	pub area_threshold: u32,
	/// Merge blobs whose bounding boxes overlap
	pub merge: bool,
}

impl Default for BlobParams {
	fn default() -> Self {
		Self {
			pixels_threshold: 100,
			area_threshold: 100,
			merge: true,
		}
	}
}

/// One request to a [BlobSource]
#[derive(Debug, Clone, Copy)]
pub struct BlobQuery<'a> {
	pub threshold: &'a ColorThreshold,
	pub params: BlobParams,
}

/// Colour-blob segmentation over the current frame.
///
/// The threshold is opaque here: implementations interpret it however their
/// detector does. Blobs must come back in the detector's native order, since
/// association takes the first containing blob. A source that cannot produce
/// blobs returns an empty list.
pub trait BlobSource {
	fn find_blobs(&self, query: &BlobQuery<'_>) -> Vec<Blob>;
}

impl<T: BlobSource + ?Sized> BlobSource for &T {
	fn find_blobs(&self, query: &BlobQuery<'_>) -> Vec<Blob> {
		(**self).find_blobs(query)
	}
}

impl<T: BlobSource + ?Sized> BlobSource for Box<T> {
	fn find_blobs(&self, query: &BlobQuery<'_>) -> Vec<Blob> {
		(**self).find_blobs(query)
	}
}

/// Pick the first blob whose rectangle contains `center`.
///
/// Overlapping candidates are not disambiguated by area or distance: list
/// order decides.
pub fn select_blob(blobs: &[Blob], center: Point2D) -> Option<&Blob> {
	blobs.iter()
		.find(|blob| blob.rect.contains(center))
}

/// Blob source backed by pre-computed blobs for each threshold.
///
/// Ignores [BlobParams]; the stored lists are returned as-is. Thresholds
/// with no stored list yield no blobs.
#[derive(Debug, Clone, Default)]
pub struct StaticBlobSource {
	blobs: HashMap<ColorThreshold, Vec<Blob>>,
}

impl StaticBlobSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the blobs returned for `threshold`
	pub fn insert(&mut self, threshold: ColorThreshold, blobs: impl IntoIterator<Item = Blob>) {
		self.blobs.insert(threshold, blobs.into_iter().collect());
	}

	pub fn with(mut self, threshold: ColorThreshold, blobs: impl IntoIterator<Item = Blob>) -> Self {
		self.insert(threshold, blobs);
		self
	}
}

impl BlobSource for StaticBlobSource {
	fn find_blobs(&self, query: &BlobQuery<'_>) -> Vec<Blob> {
		self.blobs.get(query.threshold)
			.cloned()
			.unwrap_or_default()
	}
}
