//! Split one frame's detections into the origin marker and tracked objects
use crate::{util::Point2D, MarkerDetection, MetricPose, TagEntry, TagRegistry};

/// A registered, non-origin marker seen in the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedItem<'r> {
	/// Marker translation in millimeters
	pub pose: MetricPose,
	/// Registry row for the marker
	pub entry: &'r TagEntry,
	/// Marker centroid in pixels
	pub center: Point2D,
}

/// Classifier output for one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifiedFrame<'r> {
	/// Metric pose of the origin marker, if it was seen
	pub origin: Option<MetricPose>,
	/// Tracked objects, in detection order
	pub tracked: Vec<TrackedItem<'r>>,
	/// Number of detections whose id is not registered
	pub unknown: usize,
}

/// Classify a frame's detections against the registry.
///
/// Each registered detection gets a metric pose (raw translation scaled by
/// the tag's physical size). Unknown ids are dropped without error. If the
/// origin marker shows up more than once, the first detection wins.
pub fn classify<'r>(detections: &[MarkerDetection], registry: &'r TagRegistry) -> ClassifiedFrame<'r> {
	let mut frame = ClassifiedFrame {
		origin: None,
		tracked: Vec::with_capacity(detections.len()),
		unknown: 0,
	};

	for detection in detections {
		let entry = match registry.lookup(detection.id) {
			Some(entry) => entry,
			None => {
				tracing::debug!(id = detection.id, "ignoring unregistered marker");
				frame.unknown += 1;
				continue;
			}
		};

		let pose = MetricPose::from_raw(detection.raw_translation, entry.physical_size_mm);

		if entry.is_origin {
			match frame.origin {
				None => frame.origin = Some(pose),
				Some(kept) => {
					tracing::warn!(id = detection.id, ?kept, ignored = ?pose, "origin marker seen more than once; keeping the first");
				}
			}
		} else {
			frame.tracked.push(TrackedItem {
				pose,
				entry,
				center: detection.center,
			});
		}
	}

	frame
}
