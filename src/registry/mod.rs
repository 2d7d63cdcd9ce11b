//! Static marker registry: which tags exist, how big they are, and which one is the origin
mod builder;
mod error;

pub use builder::RegistryBuilder;
pub use error::ConfigError;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ColorThreshold;

/// Registry row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
	/// Marker id reported by the detector
	pub id: u32,
	/// Display name
	pub name: String,
	/// Physical edge length of the printed tag, in millimeters
	#[serde(rename = "size_mm")]
	pub physical_size_mm: f64,
	/// Does this tag define the world origin?
	#[serde(rename = "origin", default)]
	pub is_origin: bool,
	/// Colour of the object carrying this tag. Entries without one never
	/// get a blob match.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color_threshold: Option<ColorThreshold>,
}

impl TagEntry {
	/// Tracked object without a colour threshold
	pub fn new(id: u32, name: impl Into<String>, physical_size_mm: f64) -> Self {
		Self {
			id,
			name: name.into(),
			physical_size_mm,
			is_origin: false,
			color_threshold: None,
		}
	}

	/// Origin marker
	pub fn origin(id: u32, name: impl Into<String>, physical_size_mm: f64) -> Self {
		Self {
			is_origin: true,
			..Self::new(id, name, physical_size_mm)
		}
	}

	/// Tracked object matched against blobs of `threshold`
	pub fn object(id: u32, name: impl Into<String>, physical_size_mm: f64, threshold: ColorThreshold) -> Self {
		Self::new(id, name, physical_size_mm)
			.with_threshold(threshold)
	}

	pub fn with_threshold(mut self, threshold: ColorThreshold) -> Self {
		self.color_threshold = Some(threshold);
		self
	}
}

pub(crate) fn validate_entry(entry: &TagEntry) -> Result<(), ConfigError> {
	if !entry.physical_size_mm.is_finite() {
		return Err(ConfigError::NonFiniteSize { id: entry.id });
	}
	if entry.physical_size_mm <= 0. {
		return Err(ConfigError::NonPositiveSize { id: entry.id, size_mm: entry.physical_size_mm });
	}
	Ok(())
}

/// Immutable, validated mapping from marker id to [TagEntry].
///
/// Read-only after construction, so it can be shared across threads
/// without locking.
#[derive(Debug, Clone)]
pub struct TagRegistry {
	/// Entries, in registration order
	entries: Vec<TagEntry>,
	/// Marker id -> index into `entries`
	index: HashMap<u32, usize>,
	/// Index of the origin entry
	origin: Option<usize>,
}

impl TagRegistry {
	/// Create a new builder
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::default()
	}

	/// Validate entries and build the registry.
	///
	/// Fails if any size is non-positive, an id repeats, or more than one
	/// entry claims to be the origin.
	pub fn new(entries: impl IntoIterator<Item = TagEntry>) -> Result<Self, ConfigError> {
		let entries = entries.into_iter().collect::<Vec<_>>();
		let mut index = HashMap::with_capacity(entries.len());
		let mut origin: Option<usize> = None;

		for (i, entry) in entries.iter().enumerate() {
			validate_entry(entry)?;
			if index.insert(entry.id, i).is_some() {
				return Err(ConfigError::DuplicateId { id: entry.id });
			}
			if entry.is_origin {
				if let Some(prev) = origin {
					return Err(ConfigError::DuplicateOrigin { first: entries[prev].id, second: entry.id });
				}
				origin = Some(i);
			}
		}

		tracing::info!(
			entries = entries.len(),
			origin = ?origin.map(|i| entries[i].id),
			"tag registry loaded"
		);

		Ok(Self {
			entries,
			index,
			origin,
		})
	}

	/// Find the entry for a marker id
	pub fn lookup(&self, id: u32) -> Option<&TagEntry> {
		let idx = *self.index.get(&id)?;
		Some(&self.entries[idx])
	}

	/// The origin entry, if one is registered
	pub fn origin(&self) -> Option<&TagEntry> {
		self.origin.map(|idx| &self.entries[idx])
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries, in registration order
	pub fn iter(&self) -> impl Iterator<Item = &TagEntry> + '_ {
		self.entries.iter()
	}
}

impl<'a> IntoIterator for &'a TagRegistry {
	type Item = &'a TagEntry;
	type IntoIter = std::slice::Iter<'a, TagEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
