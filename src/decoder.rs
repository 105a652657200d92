//! Decoding of bound output tensors into detection records.

mod assembler;
mod box_decoder;
mod debug_toggle;
mod mask_decoder;
mod params;
mod record;
mod rect;

pub use assembler::{CANDIDATE_TARGET, decode_detections, decode_instance_masks};
pub use box_decoder::{MIN_PIXEL_SCALE, check_coordinate_scale, decode_box, raw_box};
pub use debug_toggle::{DEBUG_ENV_VAR, debug_from_env, is_truthy};
pub use mask_decoder::{decode_mask, mask_resolution};
pub use params::{DecodeOptions, DetectionParams, NetworkInfo};
pub use record::{ClassIndexViolation, Decoded, DetectionRecord, InstanceMask, InstanceMaskRecord};
pub use rect::Rect;
