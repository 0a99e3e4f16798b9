flat_mod!(error, queue);

pub mod device;
pub use device::{Device, DeviceConfig};
