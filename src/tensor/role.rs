use std::fmt;

use crate::tensor::ElementType;

/// Fixed semantic name of an output layer.
///
/// Layers are located by exact, case-sensitive match of [`TensorRole::name`]
/// against the layer name reported by the inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensorRole {
    /// Keep-count: number of valid candidate rows.
    NumDets,
    /// One `(x1, y1, x2, y2)` row per candidate, in network pixels.
    Boxes,
    /// One confidence per candidate.
    Scores,
    /// One class index per candidate.
    Classes,
    /// Opaque anchor index per candidate, used for diagnostics only.
    Indices,
    /// One flattened `R x R` mask probability grid per candidate.
    Masks,
}

impl TensorRole {
    pub const ALL: [TensorRole; 6] = [
        TensorRole::NumDets,
        TensorRole::Boxes,
        TensorRole::Scores,
        TensorRole::Classes,
        TensorRole::Indices,
        TensorRole::Masks,
    ];

    /// Layer name the role is bound to.
    pub const fn name(self) -> &'static str {
        match self {
            TensorRole::NumDets => "num_dets",
            TensorRole::Boxes => "det_boxes",
            TensorRole::Scores => "det_scores",
            TensorRole::Classes => "det_classes",
            TensorRole::Indices => "det_indices",
            TensorRole::Masks => "det_masks",
        }
    }

    /// Number of dimensions the layer must declare (batch excluded).
    pub const fn rank(self) -> usize {
        match self {
            TensorRole::Boxes | TensorRole::Masks => 2,
            TensorRole::NumDets
            | TensorRole::Scores
            | TensorRole::Classes
            | TensorRole::Indices => 1,
        }
    }

    pub const fn element_type(self) -> ElementType {
        match self {
            TensorRole::NumDets | TensorRole::Classes | TensorRole::Indices => ElementType::Int32,
            TensorRole::Boxes | TensorRole::Scores | TensorRole::Masks => ElementType::Float32,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }
}

impl fmt::Display for TensorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
