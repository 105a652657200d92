//! Parsers exposed to host pipelines.

use tracing::error;

use crate::decoder::{
    DecodeOptions, Decoded, DetectionParams, DetectionRecord, InstanceMaskRecord, NetworkInfo,
    decode_detections, decode_instance_masks,
};
use crate::error::Result;
use crate::integration::ObjectList;
use crate::tensor::OutputLayer;

/// Trait for output-layer parsers a host pipeline can load by name.
///
/// # Example
///
/// ```ignore
/// use yolo_nms_rs::{DetectionParams, NetworkInfo, OutputParser, YoloNmsParser};
///
/// let parser = YoloNmsParser::default();
/// let decoded = parser.parse(&layers, &NetworkInfo::new(640, 640), &DetectionParams::default())?;
/// for object in &decoded.objects {
///     println!("{} {:.2} {:?}", object.class_id, object.confidence, object.bbox);
/// }
/// ```
pub trait OutputParser {
    /// Record type produced per kept candidate.
    type Object;

    /// Stable name the host pipeline resolves the parser by.
    const SYMBOL: &'static str;

    /// Decode the output layers of one inference call.
    ///
    /// # Arguments
    /// * `layers` - Named output layers of one image
    /// * `network` - Network input resolution
    /// * `params` - Class count and threshold table from the host configuration
    fn parse(
        &self,
        layers: &[OutputLayer<'_>],
        network: &NetworkInfo,
        params: &DetectionParams,
    ) -> Result<Decoded<Self::Object>>;
}

/// Parser for end-to-end NMS detection outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct YoloNmsParser {
    options: Option<DecodeOptions>,
}

impl YoloNmsParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use fixed options instead of reading the environment on every call.
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = Some(options);
        self
    }
}

impl OutputParser for YoloNmsParser {
    type Object = DetectionRecord;
    const SYMBOL: &'static str = "NvDsInferYoloNMS";

    fn parse(
        &self,
        layers: &[OutputLayer<'_>],
        network: &NetworkInfo,
        params: &DetectionParams,
    ) -> Result<Decoded<DetectionRecord>> {
        let options = self.options.unwrap_or_else(DecodeOptions::from_env);
        decode_detections(layers, network, params, &options)
    }
}

/// Parser for end-to-end instance-segmentation outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct YoloMaskParser {
    options: Option<DecodeOptions>,
}

impl YoloMaskParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use fixed options instead of reading the environment on every call.
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = Some(options);
        self
    }
}

impl OutputParser for YoloMaskParser {
    type Object = InstanceMaskRecord;
    const SYMBOL: &'static str = "NvDsInferYoloMask";

    fn parse(
        &self,
        layers: &[OutputLayer<'_>],
        network: &NetworkInfo,
        params: &DetectionParams,
    ) -> Result<Decoded<InstanceMaskRecord>> {
        let options = self.options.unwrap_or_else(DecodeOptions::from_env);
        decode_instance_masks(layers, network, params, &options)
    }
}

/// Parsers known to the host, by symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserKind {
    YoloNms,
    YoloMask,
}

impl ParserKind {
    pub const ALL: [ParserKind; 2] = [ParserKind::YoloNms, ParserKind::YoloMask];

    pub const fn symbol(self) -> &'static str {
        match self {
            ParserKind::YoloNms => YoloNmsParser::SYMBOL,
            ParserKind::YoloMask => YoloMaskParser::SYMBOL,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }
}

/// Run `parser` and append its objects to `objects`.
///
/// Returns `false` and appends nothing when the call fails.
pub fn parse_into<P: OutputParser>(
    parser: &P,
    layers: &[OutputLayer<'_>],
    network: &NetworkInfo,
    params: &DetectionParams,
    objects: &mut ObjectList<P::Object>,
) -> bool {
    match parser.parse(layers, network, params) {
        Ok(decoded) => {
            objects.append(decoded.objects);
            true
        }
        Err(err) => {
            error!("{} failed: {}", P::SYMBOL, err);
            false
        }
    }
}

/// Boolean entry point of the detection parser.
pub fn parse_yolo_nms(
    layers: &[OutputLayer<'_>],
    network: &NetworkInfo,
    params: &DetectionParams,
    objects: &mut ObjectList<DetectionRecord>,
) -> bool {
    parse_into(&YoloNmsParser::new(), layers, network, params, objects)
}

/// Boolean entry point of the instance-mask parser.
pub fn parse_yolo_mask(
    layers: &[OutputLayer<'_>],
    network: &NetworkInfo,
    params: &DetectionParams,
    objects: &mut ObjectList<InstanceMaskRecord>,
) -> bool {
    parse_into(&YoloMaskParser::new(), layers, network, params, objects)
}
