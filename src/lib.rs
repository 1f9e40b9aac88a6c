//! Hand-gesture remote control: landmark frames in, remote key presses out

pub mod config;
pub mod cooldown;
pub mod dispatch;
pub mod extension;
pub mod gesture;
pub mod hud;
pub mod landmarks;
pub mod pipeline;
pub mod recognizer;
pub mod source;
pub mod stats;
pub mod swipe;
pub mod thumbs_up;
pub mod transport;
