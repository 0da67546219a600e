pub(crate) mod node;
pub(crate) mod pipeline;
pub(crate) mod raster;
pub(crate) mod style;
