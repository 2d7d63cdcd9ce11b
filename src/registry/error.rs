use thiserror::Error;

/// Error generated when [building](crate::TagRegistry::new) a [TagRegistry](crate::TagRegistry)
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
	#[error("More than one tag is marked as the origin (ids {first} and {second})")]
	DuplicateOrigin {
		first: u32,
		second: u32,
	},
	#[error("Tag {id} is registered more than once")]
	DuplicateId {
		id: u32,
	},
	#[error("Tag {id} has a non-positive physical size ({size_mm} mm)")]
	NonPositiveSize {
		id: u32,
		size_mm: f64,
	},
	#[error("Tag {id} has a non-finite physical size")]
	NonFiniteSize {
		id: u32,
	},
}
