//! Reference colour-blob segmenter for RGB frames
mod lab;
mod unionfind;

pub use lab::rgb_to_lab;

use hashbrown::HashMap;
use image::RgbImage;

use crate::{
	blob::{Blob, BlobParams, BlobQuery, BlobSource},
	util::PixelRect,
	ColorThreshold,
};
use self::unionfind::UnionFind;

/// Bounds of one connected component, in pixels (inclusive)
struct Component {
	min_x: u32,
	min_y: u32,
	max_x: u32,
	max_y: u32,
	pixels: u32,
}

impl Component {
	fn new(x: u32, y: u32) -> Self {
		Self {
			min_x: x,
			min_y: y,
			max_x: x,
			max_y: y,
			pixels: 0,
		}
	}

	fn add(&mut self, x: u32, y: u32) {
		self.min_x = self.min_x.min(x);
		self.min_y = self.min_y.min(y);
		self.max_x = self.max_x.max(x);
		self.max_y = self.max_y.max(y);
		self.pixels += 1;
	}

	fn blob(&self) -> Blob {
		Blob {
			rect: PixelRect::from_corners(self.min_x as i32, self.min_y as i32, self.max_x as i32, self.max_y as i32),
			pixels: self.pixels,
		}
	}
}

/// Finds thresholded colour blobs in one frame.
///
/// The frame is converted to LAB once; each query thresholds it, groups
/// matching pixels into 8-connected components, filters them by pixel count
/// and bounding-box area, and optionally merges overlapping boxes. Blobs are
/// returned in raster order of their first pixel.
#[derive(Debug, Clone)]
pub struct ColorSegmenter {
	width: u32,
	height: u32,
	lab: Vec<[i8; 3]>,
}

impl ColorSegmenter {
	pub fn new(image: &RgbImage) -> Self {
		let lab = image.pixels()
			.map(|px| rgb_to_lab(px.0))
			.collect();
		Self {
			width: image.width(),
			height: image.height(),
			lab,
		}
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	/// Segment the frame with `threshold`
	pub fn segment(&self, threshold: &ColorThreshold, params: &BlobParams) -> Vec<Blob> {
		let w = self.width as usize;
		let h = self.height as usize;
		if w == 0 || h == 0 {
			return Vec::new();
		}

		let mask = self.lab.iter()
			.map(|px| threshold.matches(*px))
			.collect::<Vec<_>>();

		let mut uf = UnionFind::new(w * h);
		for y in 0..h {
			for x in 0..w {
				let idx = y * w + x;
				if !mask[idx] {
					continue;
				}
				// (dx,dy) pairs for 8 connectivity:
				// (-1, -1)    (0, -1)    (1, -1)
				// (-1, 0)    (REFERENCE)
				if x > 0 && mask[idx - 1] {
					uf.connect(idx as u32, (idx - 1) as u32);
				}
				if y > 0 {
					let up = idx - w;
					if mask[up] {
						uf.connect(idx as u32, up as u32);
					}
					if x > 0 && mask[up - 1] {
						uf.connect(idx as u32, (up - 1) as u32);
					}
					if x + 1 < w && mask[up + 1] {
						uf.connect(idx as u32, (up + 1) as u32);
					}
				}
			}
		}

		let mut index = HashMap::<u32, usize>::new();
		let mut components = Vec::<Component>::new();
		for y in 0..h {
			for x in 0..w {
				let idx = y * w + x;
				if !mask[idx] {
					continue;
				}
				let root = uf.get_representative(idx as u32);
				let slot = *index.entry(root)
					.or_insert_with(|| {
						components.push(Component::new(x as u32, y as u32));
						components.len() - 1
					});
				components[slot].add(x as u32, y as u32);
			}
		}

		let blobs = components.iter()
			.map(Component::blob)
			.filter(|blob| blob.pixels >= params.pixels_threshold && blob.rect.area() >= params.area_threshold as u64)
			.collect::<Vec<_>>();

		if params.merge {
			merge_overlapping(blobs)
		} else {
			blobs
		}
	}
}

/// Merge blobs with overlapping bounding boxes until none overlap.
/// A merged blob takes the position of its earliest member.
fn merge_overlapping(mut blobs: Vec<Blob>) -> Vec<Blob> {
	'restart: loop {
		for i in 0..blobs.len() {
			for j in (i + 1)..blobs.len() {
				if blobs[i].rect.intersects(&blobs[j].rect) {
					let other = blobs.remove(j);
					blobs[i].rect = blobs[i].rect.union(&other.rect);
					blobs[i].pixels += other.pixels;
					continue 'restart;
				}
			}
		}
		return blobs;
	}
}

impl BlobSource for ColorSegmenter {
	fn find_blobs(&self, query: &BlobQuery<'_>) -> Vec<Blob> {
		self.segment(query.threshold, &query.params)
	}
}
