//! Touch-style drum machine panel.
//!
//! A panel image with four loop buttons and twelve drum pads. Tapping a loop
//! toggles a looping backing track; tapping a pad fires a one-shot sample.
//! Active regions are drawn from a second, "pressed" copy of the artwork.

pub mod audio;
pub mod audio_api;
pub mod config;
pub mod controller;
pub mod errors;
pub mod geometry;
pub mod loader;
pub mod projection;
pub mod render;
pub mod screen;
pub mod shared;
pub mod tui;
