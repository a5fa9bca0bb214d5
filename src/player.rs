//! Player state, the audio device seam and the controller tying them to the
//! navigation engine.

mod controller;
mod device;
mod state;

pub use controller::{PlaybackController, PlayerEvent};
pub use device::{AudioDevice, DeviceEvent};
pub use state::{PlaybackState, PlayerState};

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
