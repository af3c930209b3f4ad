pub mod device_poll;
pub mod types;

pub use device_poll::use_device_poll;
pub use types::*;
