//! Borrowed output layers as handed over by the inference engine.

use std::fmt;

/// Numeric type of a layer's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Float32,
    Int32,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Float32 => f.write_str("float32"),
            ElementType::Int32 => f.write_str("int32"),
        }
    }
}

/// Row-major element buffer of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerBuffer<'a> {
    Float32(&'a [f32]),
    Int32(&'a [i32]),
}

impl LayerBuffer<'_> {
    pub fn element_type(&self) -> ElementType {
        match self {
            LayerBuffer::Float32(_) => ElementType::Float32,
            LayerBuffer::Int32(_) => ElementType::Int32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LayerBuffer::Float32(data) => data.len(),
            LayerBuffer::Int32(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Declared shape of a layer, batch dimension excluded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerDims {
    extents: Vec<usize>,
    num_elements: usize,
}

impl LayerDims {
    pub fn new(extents: &[usize]) -> Self {
        Self {
            extents: extents.to_vec(),
            num_elements: extents.iter().product(),
        }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    #[inline]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Extent along `axis`, or 0 when the layer has fewer dimensions.
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.extents.get(axis).copied().unwrap_or(0)
    }

    /// Element count implied by the declared extents.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }
}

/// One named output layer of a single inference call.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayer<'a> {
    pub name: &'a str,
    pub dims: LayerDims,
    pub buffer: LayerBuffer<'a>,
}

impl<'a> OutputLayer<'a> {
    pub fn new(name: &'a str, dims: LayerDims, buffer: LayerBuffer<'a>) -> Self {
        Self { name, dims, buffer }
    }

    pub fn float32(name: &'a str, extents: &[usize], data: &'a [f32]) -> Self {
        Self::new(name, LayerDims::new(extents), LayerBuffer::Float32(data))
    }

    pub fn int32(name: &'a str, extents: &[usize], data: &'a [i32]) -> Self {
        Self::new(name, LayerDims::new(extents), LayerBuffer::Int32(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims_element_count() {
        let dims = LayerDims::new(&[100, 4]);
        assert_eq!(dims.rank(), 2);
        assert_eq!(dims.num_elements(), 400);
        assert_eq!(dims.extent(1), 4);
        assert_eq!(dims.extent(2), 0);
    }

    #[test]
    fn test_layer_buffer_type() {
        let data = [1, 2, 3];
        let layer = OutputLayer::int32("num_dets", &[3], &data);
        assert_eq!(layer.buffer.element_type(), ElementType::Int32);
        assert_eq!(layer.buffer.len(), 3);
    }
}
