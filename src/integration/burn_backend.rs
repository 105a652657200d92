//! Burn inference backend adapter.
//!
//! This module lets a host that runs its model with the Burn framework hand
//! the resulting tensors to the decoders.
//!
//! # Example
//!
//! ```ignore
//! use yolo_nms_rs::{OutputSetBuilder, YoloNmsParser, OutputParser};
//!
//! let outputs = OutputSetBuilder::new()
//!     .burn_int("num_dets", num_dets)?
//!     .burn_float("det_boxes", boxes)?
//!     .burn_float("det_scores", scores)?
//!     .burn_int("det_classes", classes)?
//!     .build();
//! let decoded = YoloNmsParser::new().parse(&outputs.layers(), &network, &params)?;
//! ```

use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};
use thiserror::Error;

use super::OutputSetBuilder;
use crate::tensor::ElementType;

/// Error type for Burn tensor conversion failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BurnConversionError {
    #[error("tensor `{name}` could not be read as {expected}: {reason}")]
    Data {
        name: String,
        expected: ElementType,
        reason: String,
    },
}

impl OutputSetBuilder {
    /// Add a float tensor as a float32 layer.
    ///
    /// The tensor must hold one image; its dims become the layer extents.
    pub fn burn_float<B: Backend, const D: usize>(
        self,
        name: impl Into<String>,
        tensor: Tensor<B, D>,
    ) -> Result<Self, BurnConversionError> {
        let name = name.into();
        let extents = tensor.dims();
        let data = tensor
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| BurnConversionError::Data {
                name: name.clone(),
                expected: ElementType::Float32,
                reason: format!("{e:?}"),
            })?;
        Ok(self.float32(name, &extents, data))
    }

    /// Add an integer tensor as an int32 layer.
    pub fn burn_int<B: Backend, const D: usize>(
        self,
        name: impl Into<String>,
        tensor: Tensor<B, D, Int>,
    ) -> Result<Self, BurnConversionError> {
        let name = name.into();
        let extents = tensor.dims();
        let data = tensor
            .into_data()
            .convert::<i32>()
            .to_vec::<i32>()
            .map_err(|e| BurnConversionError::Data {
                name: name.clone(),
                expected: ElementType::Int32,
                reason: format!("{e:?}"),
            })?;
        Ok(self.int32(name, &extents, data))
    }
}
