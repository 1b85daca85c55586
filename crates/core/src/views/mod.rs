//! View transforms: state in, `RenderCommand`s out.

pub mod flame;
