use super::{validate_entry, ConfigError, TagEntry, TagRegistry};

/// Incrementally assembles a [TagRegistry]
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
	entries: Vec<TagEntry>,
}

impl RegistryBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an entry.
	///
	/// Per-entry checks (physical size) run here; cross-entry checks
	/// (duplicate ids, duplicate origins) run in [build](Self::build).
	pub fn add(&mut self, entry: TagEntry) -> Result<(), ConfigError> {
		validate_entry(&entry)?;
		self.entries.push(entry);
		Ok(())
	}

	/// Add the entry to this builder
	pub fn with_entry(mut self, entry: TagEntry) -> Result<Self, ConfigError> {
		self.add(entry)?;
		Ok(self)
	}

	/// Remove any entry registered for `id`
	pub fn remove(&mut self, id: u32) {
		self.entries.retain(|entry| entry.id != id);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Validate and freeze the registry
	pub fn build(self) -> Result<TagRegistry, ConfigError> {
		TagRegistry::new(self.entries)
	}
}
