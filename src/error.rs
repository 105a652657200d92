//! Error types for output tensor decoding.

use ndarray::ShapeError;
use thiserror::Error;

use crate::tensor::{ElementType, TensorRole};

/// Result alias for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// A tensor whose rank disagrees with its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankMismatch {
    pub role: TensorRole,
    pub found: usize,
    pub expected: usize,
}

impl std::fmt::Display for RankMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has rank {}, expected {}",
            self.role, self.found, self.expected
        )
    }
}

/// Errors that fail a whole decode call.
///
/// Every variant means nothing was appended for the frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The output set holds a number of layers the pipeline does not accept.
    #[error("expected {expected} output layers, found {found}")]
    TensorCount { expected: &'static str, found: usize },

    /// One or more required roles have no layer with a matching name.
    #[error("missing output layers: {}", join(roles))]
    MissingTensors { roles: Vec<TensorRole> },

    /// One or more layers have the wrong number of dimensions.
    #[error("rank mismatch: {}", join(mismatches))]
    RankMismatch { mismatches: Vec<RankMismatch> },

    #[error("layer `{role}` holds {found} data, expected {expected}")]
    ElementType {
        role: TensorRole,
        expected: ElementType,
        found: ElementType,
    },

    #[error("layer `{role}` needs {needed} elements but its buffer holds {available}")]
    BufferTooSmall {
        role: TensorRole,
        needed: usize,
        available: usize,
    },

    #[error("layer `{role}` does not fit its declared shape: {source}")]
    Layout {
        role: TensorRole,
        #[source]
        source: ShapeError,
    },

    #[error("det_boxes rows hold {found} values, expected 4")]
    BoxRowWidth { found: usize },

    #[error("mask row length {row_len} is not a non-zero perfect square")]
    MaskResolution { row_len: usize },

    /// `num_dets` claims more candidates than a per-candidate layer has rows.
    #[error("keep count {keep_count} exceeds the {available} rows of `{role}`")]
    KeepCountOverflow {
        keep_count: usize,
        role: TensorRole,
        available: usize,
    },

    /// Box coordinates look normalized while pixel coordinates were expected.
    #[error("det_boxes peaks at {max}, below the pixel-scale bound {bound}")]
    CoordinateScale { max: f32, bound: f32 },

    #[error("per-class threshold table is empty")]
    EmptyThresholds,
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
