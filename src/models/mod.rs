// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod generation;
pub mod image;
pub mod platform;

pub use generation::*;
pub use image::*;
pub use platform::*;
