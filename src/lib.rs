#![allow(non_snake_case)]

pub mod blob;
mod camera;
mod classify;
pub mod config;
mod dbg;
pub mod detection;
pub mod fusion;
pub mod hud;
mod pipeline;
mod pose;
mod registry;
pub mod replay;
#[cfg(feature = "segment")]
pub mod segment;
mod threshold;
pub mod util;

pub use camera::{CameraConstants, CameraError, CameraIntrinsics, Resolution};
pub use threshold::{ColorThreshold, LabRange};
pub use registry::{ConfigError, RegistryBuilder, TagEntry, TagRegistry};
pub use detection::{detect_or_empty, MarkerDetection, MarkerDetector};
pub use pose::{raw_translation_from_homography, MetricPose};
pub use classify::{classify, ClassifiedFrame, TrackedItem};
pub use blob::{select_blob, Blob, BlobParams, BlobQuery, BlobSource, StaticBlobSource};
pub use fusion::{BlobMatch, FusionEngine, FusionResult, RelativePosition};
pub use pipeline::{FramePipeline, FrameReport};
pub use config::{LoadError, LocatorConfig};
pub use dbg::{TimeProfile, TimeProfileStatistics};
