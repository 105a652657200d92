//! Box decoder for corner-encoded `det_boxes` rows.

use ndarray::ArrayView2;
use tracing::error;

use crate::decoder::{NetworkInfo, Rect};
use crate::error::{DecodeError, Result};

/// Lowest acceptable maximum over `det_boxes` for pixel-coordinate output.
pub const MIN_PIXEL_SCALE: f32 = 2.0;

/// Unclipped box of candidate `index`.
///
/// `index` must be a row of `boxes`, which must be 4 wide.
#[inline]
pub fn raw_box(boxes: &ArrayView2<'_, f32>, index: usize) -> Rect {
    let row = boxes.row(index);
    Rect::from_tlbr(row[0], row[1], row[2], row[3])
}

/// Box of candidate `index`, clipped to the network input resolution.
pub fn decode_box(boxes: &ArrayView2<'_, f32>, index: usize, network: &NetworkInfo) -> Rect {
    let (max_x, max_y) = network.clip_bounds();
    raw_box(boxes, index).clipped(max_x, max_y)
}

/// Reject box output that peaks below [`MIN_PIXEL_SCALE`].
///
/// A low peak means normalized coordinates reached a pixel decoder. The scan
/// covers every declared element, not only the kept rows.
pub fn check_coordinate_scale(boxes: &ArrayView2<'_, f32>) -> Result<()> {
    let max = boxes
        .iter()
        .fold(0.0f32, |max, &value| if max < value { value } else { max });
    if max < MIN_PIXEL_SCALE {
        error!(
            "det_boxes peaks at {}, below {}: box output is not in pixel coordinates",
            max, MIN_PIXEL_SCALE
        );
        return Err(DecodeError::CoordinateScale {
            max,
            bound: MIN_PIXEL_SCALE,
        });
    }
    Ok(())
}
