//! Named output layers and the locator that binds them to roles.

mod layer;
mod locator;
mod role;

pub use layer::{ElementType, LayerBuffer, LayerDims, OutputLayer};
pub use locator::{BoundTensors, LayerSchema, find_layer};
pub use role::TensorRole;
