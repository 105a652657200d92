//! Builder for owned output sets.

use crate::tensor::{LayerBuffer, LayerDims, OutputLayer};

#[derive(Debug, Clone, PartialEq)]
enum OwnedBuffer {
    Float32(Vec<f32>),
    Int32(Vec<i32>),
}

#[derive(Debug, Clone, PartialEq)]
struct OwnedLayer {
    name: String,
    dims: LayerDims,
    buffer: OwnedBuffer,
}

/// Builder for output sets whose buffers are owned rather than borrowed
/// from the inference engine.
#[derive(Debug, Clone, Default)]
pub struct OutputSetBuilder {
    layers: Vec<OwnedLayer>,
}

impl OutputSetBuilder {
    /// Create a new, empty output set builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a float32 layer with the given extents (batch excluded).
    pub fn float32(mut self, name: impl Into<String>, extents: &[usize], data: Vec<f32>) -> Self {
        self.layers.push(OwnedLayer {
            name: name.into(),
            dims: LayerDims::new(extents),
            buffer: OwnedBuffer::Float32(data),
        });
        self
    }

    /// Add an int32 layer with the given extents (batch excluded).
    pub fn int32(mut self, name: impl Into<String>, extents: &[usize], data: Vec<i32>) -> Self {
        self.layers.push(OwnedLayer {
            name: name.into(),
            dims: LayerDims::new(extents),
            buffer: OwnedBuffer::Int32(data),
        });
        self
    }

    /// Build the final `OwnedOutputs`.
    pub fn build(self) -> OwnedOutputs {
        OwnedOutputs {
            layers: self.layers,
        }
    }
}

/// Owned storage for the output layers of one inference call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnedOutputs {
    layers: Vec<OwnedLayer>,
}

impl OwnedOutputs {
    /// Borrowed layer views, in insertion order.
    pub fn layers(&self) -> Vec<OutputLayer<'_>> {
        self.layers
            .iter()
            .map(|layer| {
                let buffer = match &layer.buffer {
                    OwnedBuffer::Float32(data) => LayerBuffer::Float32(data.as_slice()),
                    OwnedBuffer::Int32(data) => LayerBuffer::Int32(data.as_slice()),
                };
                OutputLayer::new(&layer.name, layer.dims.clone(), buffer)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::ElementType;

    #[test]
    fn test_output_set_builder() {
        let outputs = OutputSetBuilder::new()
            .int32("num_dets", &[1], vec![1])
            .float32("det_boxes", &[1, 4], vec![0.0, 0.0, 4.0, 4.0])
            .build();

        let layers = outputs.layers();
        assert_eq!(outputs.len(), 2);
        assert_eq!(layers[0].name, "num_dets");
        assert_eq!(layers[1].dims.extents(), &[1, 4]);
        assert_eq!(layers[1].buffer.element_type(), ElementType::Float32);
    }
}
