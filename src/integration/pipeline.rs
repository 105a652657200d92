//! FrameParser for running a parser over a stream of frames.

use tracing::warn;

use crate::decoder::{Decoded, DetectionParams, NetworkInfo};
use crate::error::Result;
use crate::integration::{ObjectList, OutputParser, parse_into};
use crate::tensor::OutputLayer;

/// A parser bundled with the network and class configuration of one model.
///
/// Each frame is decoded independently; a frame that fails to decode
/// contributes no objects and does not affect later frames.
pub struct FrameParser<P: OutputParser> {
    parser: P,
    network: NetworkInfo,
    params: DetectionParams,
    frames: u64,
    failed_frames: u64,
}

impl<P: OutputParser> FrameParser<P> {
    /// Create a new frame parser with the given parser and configuration.
    pub fn new(parser: P, network: NetworkInfo, params: DetectionParams) -> Self {
        Self {
            parser,
            network,
            params,
            frames: 0,
            failed_frames: 0,
        }
    }

    /// Create a new frame parser with default detection parameters.
    pub fn with_default_params(parser: P, network: NetworkInfo) -> Self {
        Self::new(parser, network, DetectionParams::default())
    }

    /// Decode one frame and append its objects to `objects`.
    ///
    /// # Returns
    /// `false` when the frame failed to decode; nothing was appended then.
    pub fn process_frame(
        &mut self,
        layers: &[OutputLayer<'_>],
        objects: &mut ObjectList<P::Object>,
    ) -> bool {
        self.frames += 1;
        let ok = parse_into(&self.parser, layers, &self.network, &self.params, objects);
        if !ok {
            self.failed_frames += 1;
            warn!("skipping frame {}", self.frames);
        }
        ok
    }

    /// Decode one frame and return its objects.
    pub fn decode_frame(&mut self, layers: &[OutputLayer<'_>]) -> Result<Decoded<P::Object>> {
        self.frames += 1;
        let decoded = self.parser.parse(layers, &self.network, &self.params);
        if decoded.is_err() {
            self.failed_frames += 1;
        }
        decoded
    }

    /// Number of frames processed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of frames that failed to decode.
    pub fn failed_frames(&self) -> u64 {
        self.failed_frames
    }

    /// Get a reference to the underlying parser.
    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn network(&self) -> &NetworkInfo {
        &self.network
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Get a mutable reference to the detection parameters.
    pub fn params_mut(&mut self) -> &mut DetectionParams {
        &mut self.params
    }
}
