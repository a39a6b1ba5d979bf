pub mod device;
pub mod synthetic;

pub use device::{
    CaptureConstraints, CaptureDevice, CaptureError, CaptureManager, MediaChunk, MediaHandle,
};
pub use synthetic::SyntheticCamera;
