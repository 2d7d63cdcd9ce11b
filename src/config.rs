//! Static startup configuration
use std::{fs::File, io::{self, BufReader}, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
	blob::BlobParams,
	CameraConstants, CameraError, ColorThreshold, ConfigError, FramePipeline, LabRange, TagEntry, TagRegistry,
};

/// Error loading configuration or replay data from disk
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
	#[error("Unable to read file")]
	Io(#[from] io::Error),
	#[error("Malformed JSON")]
	Parse(#[from] serde_json::Error),
	#[error("Invalid tag registry")]
	Registry(#[from] ConfigError),
	#[error("Invalid camera constants")]
	Camera(#[from] CameraError),
}

/// Everything needed to build a [FramePipeline]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
	#[serde(default)]
	pub camera: CameraConstants,
	#[serde(default)]
	pub blobs: BlobParams,
	pub tags: Vec<TagEntry>,
}

impl Default for LocatorConfig {
	/// Built-in setup: origin tag 3, and pink/green objects on tags 0 and 1
	fn default() -> Self {
		Self {
			camera: CameraConstants::default(),
			blobs: BlobParams::default(),
			tags: vec![
				TagEntry::origin(3, "Origin", 20.),
				TagEntry::object(0, "Pink", 10., ColorThreshold::single(LabRange::new(30, 77, -1, 57, 11, 59))),
				TagEntry::object(1, "Green", 20., ColorThreshold::single(LabRange::new(10, 32, -22, -5, -5, 19))),
			],
		}
	}
}

impl LocatorConfig {
	/// Read configuration from a JSON file
	pub fn load(path: &Path) -> Result<Self, LoadError> {
		let file = File::open(path)?;
		let reader = BufReader::new(file);
		let config = serde_json::from_reader(reader)?;
		Ok(config)
	}

	/// Parse configuration from a JSON string
	pub fn from_json(text: &str) -> Result<Self, LoadError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Validate and build the registry
	pub fn registry(&self) -> Result<TagRegistry, ConfigError> {
		TagRegistry::new(self.tags.iter().cloned())
	}

	/// Validate everything and build a pipeline
	pub fn build(&self) -> Result<FramePipeline, LoadError> {
		let intrinsics = self.camera.intrinsics()?;
		let registry = self.registry()?;
		Ok(FramePipeline::new(registry, intrinsics, self.blobs))
	}
}

#[cfg(test)]
mod test {
	use crate::{blob::BlobParams, CameraConstants, ConfigError, Resolution};
	use super::{LoadError, LocatorConfig};

	#[test]
	fn default_builds() {
		let pipeline = LocatorConfig::default().build().unwrap();
		assert_eq!(pipeline.registry().len(), 3);
		assert_eq!(pipeline.registry().origin().map(|e| e.id), Some(3));
		assert_eq!(pipeline.intrinsics().cx, 160.);
		assert_eq!(*pipeline.blob_params(), BlobParams::default());
	}

	#[test]
	fn json_defaults() {
		let config = LocatorConfig::from_json(r#"{"tags": [{"id": 7, "name": "Cup", "size_mm": 30}]}"#).unwrap();
		assert_eq!(config.camera, CameraConstants::default());
		assert_eq!(config.blobs, BlobParams::default());
		assert_eq!(config.tags.len(), 1);
		assert!(config.registry().unwrap().origin().is_none());
	}

	#[test]
	fn json_overrides() {
		let config = LocatorConfig::from_json(r#"{
			"camera": {"resolution": "vga"},
			"blobs": {"pixels_threshold": 10, "merge": false},
			"tags": []
		}"#).unwrap();
		assert_eq!(config.camera.resolution, Resolution::Vga);
		assert_eq!(config.camera.lens_focal_length_mm, 3.6);
		assert_eq!(config.blobs, BlobParams { pixels_threshold: 10, area_threshold: 100, merge: false });
	}

	#[test]
	fn invalid_registry_is_fatal() {
		let config = LocatorConfig::from_json(r#"{"tags": [
			{"id": 1, "name": "A", "size_mm": 10, "origin": true},
			{"id": 2, "name": "B", "size_mm": 10, "origin": true}
		]}"#).unwrap();
		match config.build() {
			Err(LoadError::Registry(ConfigError::DuplicateOrigin { first: 1, second: 2 })) => {},
			other => panic!("unexpected: {other:?}"),
		}
	}

	#[test]
	fn malformed_json() {
		assert!(matches!(LocatorConfig::from_json("{"), Err(LoadError::Parse(_))));
	}

	#[test]
	fn round_trip_default() {
		let text = serde_json::to_string(&LocatorConfig::default()).unwrap();
		assert_eq!(LocatorConfig::from_json(&text).unwrap(), LocatorConfig::default());
	}
}
