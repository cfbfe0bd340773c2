pub mod clip;

pub use clip::{CameraAngle, ClipObject, RequestedCamera};
