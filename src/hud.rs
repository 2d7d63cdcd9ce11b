//! On-screen overlay text and the renderers that consume frame reports
use std::io::{self, Write};

use crate::{fusion::{FusionResult, RelativePosition}, FrameReport};

/// Vertical space taken by one object's block of lines
pub const ITEM_SPACING_PX: u32 = 90;
/// First block's top edge
pub const FIRST_ITEM_Y_PX: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudStyle {
	/// Object name
	Title,
	/// Measurements
	Detail,
}

impl HudStyle {
	/// Overlay colour (RGB)
	pub const fn color(&self) -> [u8; 3] {
		match self {
			Self::Title => [255, 255, 0],
			Self::Detail => [255, 0, 255],
		}
	}

	const fn indent(&self) -> u32 {
		match self {
			Self::Title => 5,
			Self::Detail => 10,
		}
	}
}

/// One line of overlay text, positioned in pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudLine {
	pub x: u32,
	pub y: u32,
	pub style: HudStyle,
	pub text: String,
}

fn position_text(relative: &RelativePosition) -> String {
	match relative {
		RelativePosition::Found(offset) => format!("P:X{:.1} Y{:.1} Z{:.1}", offset.x(), offset.y(), offset.z()),
		RelativePosition::OriginNotFound => String::from("Origin not found"),
	}
}

fn item_lines(result: &FusionResult, top: u32) -> [HudLine; 4] {
	let line = |style: HudStyle, row: u32, text: String| HudLine {
		x: style.indent(),
		y: top + row * 20,
		style,
		text,
	};
	[
		line(HudStyle::Title, 0, format!("[{}]", result.name)),
		line(HudStyle::Detail, 1, format!("Dist: {:.0}mm", result.distance_mm)),
		line(HudStyle::Detail, 2, format!("Size: {:.0}x{:.0}mm", result.width_mm, result.height_mm)),
		line(HudStyle::Detail, 3, format!("Pos: {}", position_text(&result.relative_position))),
	]
}

/// Lay out the overlay for one frame: four lines per object, stacked down the screen
pub fn hud_lines(report: &FrameReport) -> Vec<HudLine> {
	let mut lines = Vec::with_capacity(report.results.len() * 4);
	let mut top = FIRST_ITEM_Y_PX;
	for result in report.results.iter() {
		lines.extend(item_lines(result, top));
		top += ITEM_SPACING_PX;
	}
	lines
}

/// Consumer of per-frame reports
pub trait Renderer {
	fn render(&mut self, report: &FrameReport) -> io::Result<()>;
}

/// Writes the overlay text, one line per [HudLine]
pub struct TextHud<W: Write> {
	out: W,
	/// Print frame rate after each frame
	pub show_fps: bool,
}

impl<W: Write> TextHud<W> {
	pub fn new(out: W) -> Self {
		Self {
			out,
			show_fps: false,
		}
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> Renderer for TextHud<W> {
	fn render(&mut self, report: &FrameReport) -> io::Result<()> {
		for line in hud_lines(report) {
			let indent = if line.style == HudStyle::Title { "" } else { "  " };
			writeln!(self.out, "{indent}{}", line.text)?;
		}
		if self.show_fps {
			let elapsed = report.tp.total_duration().as_secs_f64();
			if elapsed > 0. {
				writeln!(self.out, "FPS: {:.2}", elapsed.recip())?;
			} else {
				// nothing was timed
				writeln!(self.out, "FPS: --")?;
			}
		}
		self.out.flush()
	}
}

/// Writes each report as one JSON object per line
pub struct JsonLines<W: Write> {
	out: W,
}

impl<W: Write> JsonLines<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> Renderer for JsonLines<W> {
	fn render(&mut self, report: &FrameReport) -> io::Result<()> {
		serde_json::to_writer(&mut self.out, report)?;
		writeln!(self.out)?;
		self.out.flush()
	}
}
