//! Decoder for the output tensors of end-to-end YOLO detection and
//! instance-segmentation networks.
//!
//! The network (or its inference engine) has already run NMS and emits a
//! keep-count plus fixed-size candidate tensors. This crate binds those
//! tensors by name, checks their shapes, drops low-confidence candidates
//! and turns the rest into clipped boxes and, optionally, instance masks.

pub mod decoder;
pub mod error;
pub mod integration;
pub mod tensor;

pub use decoder::{
    ClassIndexViolation, DecodeOptions, Decoded, DetectionParams, DetectionRecord, InstanceMask,
    InstanceMaskRecord, NetworkInfo, Rect, decode_detections, decode_instance_masks,
};
pub use error::{DecodeError, Result};
pub use integration::{
    FrameParser, ObjectList, OutputParser, OutputSetBuilder, OwnedOutputs, ParserKind,
    YoloMaskParser, YoloNmsParser, parse_yolo_mask, parse_yolo_nms,
};
pub use tensor::{ElementType, LayerBuffer, LayerDims, OutputLayer, TensorRole};
