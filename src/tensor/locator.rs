//! Tensor locator: binds named output layers to roles and validates them.

use ndarray::{ArrayView1, ArrayView2};
use tracing::{error, warn};

use crate::error::{DecodeError, RankMismatch, Result};
use crate::tensor::{LayerBuffer, OutputLayer, TensorRole};

const DETECTION_ROLES: [TensorRole; 4] = [
    TensorRole::NumDets,
    TensorRole::Boxes,
    TensorRole::Scores,
    TensorRole::Classes,
];

/// Set of layers a decode pipeline expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSchema {
    /// `num_dets`, `det_boxes`, `det_scores`, `det_classes`, plus
    /// `det_indices` when five layers are supplied.
    Detections,
    /// The four detection roles plus `det_masks`.
    InstanceMasks,
}

impl LayerSchema {
    /// Layer counts the schema accepts.
    pub fn accepted_counts(self) -> &'static [usize] {
        match self {
            LayerSchema::Detections => &[4, 5],
            LayerSchema::InstanceMasks => &[5],
        }
    }

    fn expected_counts(self) -> &'static str {
        match self {
            LayerSchema::Detections => "4 or 5",
            LayerSchema::InstanceMasks => "5",
        }
    }

    /// Roles that must resolve for an output set of `layer_count` layers.
    pub fn required_roles(self, layer_count: usize) -> Vec<TensorRole> {
        let mut roles = DETECTION_ROLES.to_vec();
        match self {
            LayerSchema::Detections if layer_count == 5 => roles.push(TensorRole::Indices),
            LayerSchema::Detections => {}
            LayerSchema::InstanceMasks => roles.push(TensorRole::Masks),
        }
        roles
    }

    /// Resolve every required role and build bounds-checked views over them.
    pub fn bind<'a>(self, layers: &[OutputLayer<'a>]) -> Result<BoundTensors<'a>> {
        if !self.accepted_counts().contains(&layers.len()) {
            error!(
                "Mismatch in the number of output layers: expected {}, found {}",
                self.expected_counts(),
                layers.len()
            );
            return Err(DecodeError::TensorCount {
                expected: self.expected_counts(),
                found: layers.len(),
            });
        }

        let wanted = self.required_roles(layers.len());
        let mut resolved = Vec::with_capacity(wanted.len());
        let mut missing = Vec::new();
        for role in wanted {
            match find_layer(layers, role) {
                Some(layer) => resolved.push((role, layer)),
                None => {
                    error!("  - {}: missing or unsupported data type", role);
                    missing.push(role);
                }
            }
        }
        if !missing.is_empty() {
            return Err(DecodeError::MissingTensors { roles: missing });
        }

        let mismatches: Vec<RankMismatch> = resolved
            .iter()
            .filter(|(role, layer)| layer.dims.rank() != role.rank())
            .map(|(role, layer)| RankMismatch {
                role: *role,
                found: layer.dims.rank(),
                expected: role.rank(),
            })
            .collect();
        if !mismatches.is_empty() {
            for m in &mismatches {
                error!("Network {} dims is: {} expect is {}", m.role, m.found, m.expected);
            }
            return Err(DecodeError::RankMismatch { mismatches });
        }

        let optional = |role: TensorRole| {
            resolved
                .iter()
                .find(|(r, _)| *r == role)
                .map(|(_, layer)| *layer)
        };
        let required = |role: TensorRole| {
            optional(role).ok_or_else(|| DecodeError::MissingTensors { roles: vec![role] })
        };

        let bound = BoundTensors {
            num_dets: int_view(required(TensorRole::NumDets)?, TensorRole::NumDets)?,
            boxes: float_grid(required(TensorRole::Boxes)?, TensorRole::Boxes)?,
            scores: float_view(required(TensorRole::Scores)?, TensorRole::Scores)?,
            classes: int_view(required(TensorRole::Classes)?, TensorRole::Classes)?,
            indices: optional(TensorRole::Indices)
                .map(|layer| int_view(layer, TensorRole::Indices))
                .transpose()?,
            masks: optional(TensorRole::Masks)
                .map(|layer| float_grid(layer, TensorRole::Masks))
                .transpose()?,
        };

        if bound.num_dets.is_empty() {
            return Err(DecodeError::BufferTooSmall {
                role: TensorRole::NumDets,
                needed: 1,
                available: 0,
            });
        }
        if bound.boxes.ncols() != 4 {
            error!("det_boxes rows hold {} values, expected 4", bound.boxes.ncols());
            return Err(DecodeError::BoxRowWidth {
                found: bound.boxes.ncols(),
            });
        }

        Ok(bound)
    }
}

/// First layer whose name matches the role exactly.
pub fn find_layer<'l, 'a>(
    layers: &'l [OutputLayer<'a>],
    role: TensorRole,
) -> Option<&'l OutputLayer<'a>> {
    layers.iter().find(|layer| layer.name == role.name())
}

/// Typed views over the layers of one decode call.
///
/// Views cover exactly the declared element count of each layer.
#[derive(Debug, Clone)]
pub struct BoundTensors<'a> {
    pub num_dets: ArrayView1<'a, i32>,
    pub boxes: ArrayView2<'a, f32>,
    pub scores: ArrayView1<'a, f32>,
    pub classes: ArrayView1<'a, i32>,
    pub indices: Option<ArrayView1<'a, i32>>,
    pub masks: Option<ArrayView2<'a, f32>>,
}

impl BoundTensors<'_> {
    /// Number of candidate rows to inspect.
    ///
    /// A negative count yields zero; a count beyond the rows of any
    /// per-candidate layer is an error.
    pub fn keep_count(&self) -> Result<usize> {
        let raw = self.num_dets[0];
        if raw < 0 {
            warn!("num_dets holds a negative keep count {}, treating as 0", raw);
            return Ok(0);
        }
        let keep_count = raw as usize;
        let (role, available) = self.candidate_capacity();
        if keep_count > available {
            error!(
                "keep count {} exceeds the {} rows of {}",
                keep_count, available, role
            );
            return Err(DecodeError::KeepCountOverflow {
                keep_count,
                role,
                available,
            });
        }
        Ok(keep_count)
    }

    /// The per-candidate layer with the fewest rows, and that row count.
    pub fn candidate_capacity(&self) -> (TensorRole, usize) {
        let mut rows = vec![
            (TensorRole::Boxes, self.boxes.nrows()),
            (TensorRole::Scores, self.scores.len()),
            (TensorRole::Classes, self.classes.len()),
        ];
        if let Some(indices) = &self.indices {
            rows.push((TensorRole::Indices, indices.len()));
        }
        if let Some(masks) = &self.masks {
            rows.push((TensorRole::Masks, masks.nrows()));
        }
        rows.into_iter()
            .min_by_key(|(_, count)| *count)
            .unwrap_or((TensorRole::Boxes, 0))
    }
}

fn declared<'a, T>(data: &'a [T], layer: &OutputLayer<'_>, role: TensorRole) -> Result<&'a [T]> {
    let needed = layer.dims.num_elements();
    data.get(..needed).ok_or(DecodeError::BufferTooSmall {
        role,
        needed,
        available: data.len(),
    })
}

fn float_data<'a>(layer: &OutputLayer<'a>, role: TensorRole) -> Result<&'a [f32]> {
    match layer.buffer {
        LayerBuffer::Float32(data) => declared(data, layer, role),
        other => Err(type_error(role, other)),
    }
}

fn int_view<'a>(layer: &OutputLayer<'a>, role: TensorRole) -> Result<ArrayView1<'a, i32>> {
    match layer.buffer {
        LayerBuffer::Int32(data) => Ok(ArrayView1::from(declared(data, layer, role)?)),
        other => Err(type_error(role, other)),
    }
}

fn float_view<'a>(layer: &OutputLayer<'a>, role: TensorRole) -> Result<ArrayView1<'a, f32>> {
    Ok(ArrayView1::from(float_data(layer, role)?))
}

fn float_grid<'a>(layer: &OutputLayer<'a>, role: TensorRole) -> Result<ArrayView2<'a, f32>> {
    let shape = (layer.dims.extent(0), layer.dims.extent(1));
    ArrayView2::from_shape(shape, float_data(layer, role)?)
        .map_err(|source| DecodeError::Layout { role, source })
}

fn type_error(role: TensorRole, buffer: LayerBuffer<'_>) -> DecodeError {
    error!(
        "{} holds {} data, expected {}",
        role,
        buffer.element_type(),
        role.element_type()
    );
    DecodeError::ElementType {
        role,
        expected: role.element_type(),
        found: buffer.element_type(),
    }
}
