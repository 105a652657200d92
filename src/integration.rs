//! Integration module for connecting host pipelines and inference backends
//! with the output decoders.
//!
//! This module provides the parser trait exposed to hosts under stable
//! symbol names, an append-only object collection, owned output storage
//! and a per-frame parsing pipeline.

mod builder;
mod object_list;
mod parser;
mod pipeline;

pub use builder::{OutputSetBuilder, OwnedOutputs};
pub use object_list::ObjectList;
pub use parser::{
    OutputParser, ParserKind, YoloMaskParser, YoloNmsParser, parse_into, parse_yolo_mask,
    parse_yolo_nms,
};
pub use pipeline::FrameParser;

#[cfg(feature = "burn-backend")]
mod burn_backend;

#[cfg(feature = "burn-backend")]
pub use burn_backend::BurnConversionError;
