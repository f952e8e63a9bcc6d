//! Clock alignment: anchor points and the affine video-to-log time mapping.

pub mod anchor;
pub mod mapper;
