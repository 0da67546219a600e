pub(crate) mod model;
pub(crate) mod part;
pub(crate) mod render;
pub(crate) mod transform;
