//! Decoded objects handed to downstream consumers.

use ndarray::Array2;

use crate::decoder::Rect;

/// One decoded object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionRecord {
    /// Class index as reported by the network
    pub class_id: u32,
    /// Detection confidence score
    pub confidence: f32,
    /// Box in network pixels, clipped to the input resolution
    pub bbox: Rect,
}

/// Owned square grid of raw mask probabilities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceMask {
    grid: Array2<f32>,
}

impl InstanceMask {
    pub fn new(grid: Array2<f32>) -> Self {
        Self { grid }
    }

    pub fn width(&self) -> usize {
        self.grid.ncols()
    }

    pub fn height(&self) -> usize {
        self.grid.nrows()
    }

    /// Size of the mask payload in bytes.
    pub fn size_bytes(&self) -> usize {
        self.grid.len() * std::mem::size_of::<f32>()
    }

    pub fn grid(&self) -> &Array2<f32> {
        &self.grid
    }

    /// Row-major mask values.
    pub fn as_slice(&self) -> &[f32] {
        self.grid.as_slice().unwrap_or_default()
    }

    pub fn into_grid(self) -> Array2<f32> {
        self.grid
    }
}

/// A decoded object with its instance mask.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceMaskRecord {
    pub detection: DetectionRecord,
    pub mask: InstanceMask,
}

/// A candidate whose class index is outside the configured class count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassIndexViolation {
    /// Candidate row in the output layers
    pub candidate: usize,
    pub class_id: u32,
    pub num_classes: u32,
}

impl std::fmt::Display for ClassIndexViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "candidate {} has class index {}, but only {} classes are configured",
            self.candidate, self.class_id, self.num_classes
        )
    }
}

/// Output of one successful decode call, in candidate order.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub objects: Vec<T>,
    /// Class-index violations seen while decoding, whether or not the
    /// candidate was kept.
    pub class_violations: Vec<ClassIndexViolation>,
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            class_violations: Vec::new(),
        }
    }
}

impl<T> Decoded<T> {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
