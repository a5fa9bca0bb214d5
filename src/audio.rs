//! rodio-backed audio device.
//!
//! Playback runs on a dedicated thread that owns the output stream and the
//! current `Sink`; the device handle sends it commands and the thread reports
//! progress back as [`DeviceEvent`](crate::player::DeviceEvent)s.

mod device;
mod sink;
mod thread;
mod types;

pub use device::RodioDevice;
