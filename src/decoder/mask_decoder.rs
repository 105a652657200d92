//! Mask decoder for flattened `det_masks` rows.

use ndarray::{Array2, ArrayView2};
use tracing::error;

use crate::decoder::InstanceMask;
use crate::error::{DecodeError, Result};

/// Side length `R` of the square mask grid stored in each `det_masks` row.
pub fn mask_resolution(masks: &ArrayView2<'_, f32>) -> Result<usize> {
    let row_len = masks.ncols();
    let resolution = row_len.isqrt();
    if resolution == 0 || resolution * resolution != row_len {
        error!("det_masks row length {} is not a perfect square", row_len);
        return Err(DecodeError::MaskResolution { row_len });
    }
    Ok(resolution)
}

/// Copy the mask of candidate `index` into an owned `R x R` grid.
///
/// Values are raw probabilities; no thresholding or resizing is applied.
pub fn decode_mask(masks: &ArrayView2<'_, f32>, index: usize, resolution: usize) -> InstanceMask {
    let row = masks.row(index);
    InstanceMask::new(Array2::from_shape_fn((resolution, resolution), |(y, x)| {
        row[y * resolution + x]
    }))
}
