//! Pinhole camera model derived from physical lens/sensor constants
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pixel-space focal lengths and principal point.
///
/// Derived once at startup; the resolution is fixed for the lifetime of the
/// process, so nothing downstream should recompute these per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
	/// Focal length along x, in pixels
	pub fx: f64,
	/// Focal length along y, in pixels
	pub fy: f64,
	/// Principal point x, in pixels
	pub cx: f64,
	/// Principal point y, in pixels
	pub cy: f64,
}

impl CameraIntrinsics {
	/// Derive intrinsics from lens focal length and sensor size (millimeters)
	/// and the active image resolution (pixels).
	///
	/// `fx = lens / sensor_width * image_width`, `cx = image_width / 2` (likewise for y).
	pub fn derive(lens_focal_length_mm: f64, sensor_width_mm: f64, sensor_height_mm: f64, image_width_px: u32, image_height_px: u32) -> Self {
		let width = image_width_px as f64;
		let height = image_height_px as f64;
		Self {
			fx: lens_focal_length_mm / sensor_width_mm * width,
			fy: lens_focal_length_mm / sensor_height_mm * height,
			cx: width / 2.,
			cy: height / 2.,
		}
	}
}

/// Sensor frame size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
	/// 640x480
	Vga,
	/// 320x240
	#[default]
	Qvga,
	/// 160x120
	Qqvga,
	Custom {
		width: u32,
		height: u32,
	},
}

impl Resolution {
	pub const fn width(&self) -> u32 {
		match self {
			Self::Vga => 640,
			Self::Qvga => 320,
			Self::Qqvga => 160,
			Self::Custom { width, .. } => *width,
		}
	}

	pub const fn height(&self) -> u32 {
		match self {
			Self::Vga => 480,
			Self::Qvga => 240,
			Self::Qqvga => 120,
			Self::Custom { height, .. } => *height,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum CameraError {
	#[error("Lens focal length must be positive (actual: {0} mm)")]
	InvalidFocalLength(f64),
	#[error("Sensor dimensions must be positive (actual: {width} x {height} mm)")]
	InvalidSensorSize {
		width: f64,
		height: f64,
	},
	#[error("Image resolution must be non-zero (actual: {width} x {height} px)")]
	InvalidResolution {
		width: u32,
		height: u32,
	},
}

/// Fixed physical camera constants, as shipped in configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConstants {
	pub lens_focal_length_mm: f64,
	pub sensor_width_mm: f64,
	pub sensor_height_mm: f64,
	pub resolution: Resolution,
}

impl Default for CameraConstants {
	fn default() -> Self {
		Self {
			lens_focal_length_mm: 3.6,
			sensor_width_mm: 5.37,
			sensor_height_mm: 4.04,
			resolution: Resolution::Qvga,
		}
	}
}

impl CameraConstants {
	/// Validate the constants and derive intrinsics
	pub fn intrinsics(&self) -> Result<CameraIntrinsics, CameraError> {
		if !(self.lens_focal_length_mm > 0.) {
			return Err(CameraError::InvalidFocalLength(self.lens_focal_length_mm));
		}
		if !(self.sensor_width_mm > 0. && self.sensor_height_mm > 0.) {
			return Err(CameraError::InvalidSensorSize { width: self.sensor_width_mm, height: self.sensor_height_mm });
		}
		let (width, height) = (self.resolution.width(), self.resolution.height());
		if width == 0 || height == 0 {
			return Err(CameraError::InvalidResolution { width, height });
		}

		Ok(CameraIntrinsics::derive(self.lens_focal_length_mm, self.sensor_width_mm, self.sensor_height_mm, width, height))
	}
}
