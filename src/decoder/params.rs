//! Per-call configuration of the decoders.

use crate::decoder::debug_toggle;
use crate::error::{DecodeError, Result};

pub const DEFAULT_NUM_CLASSES: u32 = 80;
pub const DEFAULT_THRESHOLD: f32 = 0.25;

/// Input resolution of the network; the source of the clip bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkInfo {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl Default for NetworkInfo {
    fn default() -> Self {
        Self {
            width: 640,
            height: 640,
            channels: 3,
        }
    }
}

impl NetworkInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = channels;
        self
    }

    /// Largest value a clipped x-axis (first) or y-axis (second) field may take.
    #[inline]
    pub fn clip_bounds(&self) -> (f32, f32) {
        (self.width as f32 - 1.0, self.height as f32 - 1.0)
    }
}

/// Detection parameters supplied by the host configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionParams {
    pub num_classes_configured: u32,
    pub per_class_threshold: Vec<f32>,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self::uniform(DEFAULT_NUM_CLASSES, DEFAULT_THRESHOLD)
    }
}

impl DetectionParams {
    /// Same threshold for every configured class.
    pub fn uniform(num_classes: u32, threshold: f32) -> Self {
        Self {
            num_classes_configured: num_classes,
            per_class_threshold: vec![threshold; num_classes as usize],
        }
    }

    pub fn with_thresholds(mut self, thresholds: Vec<f32>) -> Self {
        self.per_class_threshold = thresholds;
        self
    }

    /// Confidence cutoff applied to every candidate.
    ///
    /// Only the first table entry is consulted, whatever the candidate's class.
    pub fn threshold(&self) -> Result<f32> {
        self.per_class_threshold
            .first()
            .copied()
            .ok_or(DecodeError::EmptyThresholds)
    }
}

/// Switches resolved once per decode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Emit every kept candidate on the diagnostic target.
    pub debug: bool,
}

impl DecodeOptions {
    pub fn from_env() -> Self {
        Self {
            debug: debug_toggle::debug_from_env(),
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
