//! Synthesized drum DSP — pure Rust, deterministic output.
//!
//! The same code renders drum hits for the native drum machine timer and
//! the WASM export (`render_drum_wav`), so both frontends hear identical
//! audio for a given volume and sample rate.

pub mod drum;
pub mod envelope;
pub mod noise;
pub mod oscillator;
pub mod renderer;
