pub mod bank;
pub mod cipher;
pub mod dsp;
pub mod error;
pub mod pattern;
#[cfg(feature = "playback")]
pub mod player;
#[cfg(feature = "playback")]
pub mod sequencer;
pub mod sound;

use crate::dsp::drum::DrumKind;
use crate::dsp::renderer;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the corvid-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: encode input text into a JSON playback sequence.
/// Letters become calls, spaces become pauses, anything else is dropped.
#[wasm_bindgen]
pub fn encode_text(text: &str) -> Result<JsValue, JsValue> {
    let sequence = cipher::encode(text);
    serde_wasm_bindgen::to_value(&sequence).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: the full cipher legend, for rendering the key list.
#[wasm_bindgen]
pub fn cipher_legend() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&cipher::CIPHER_MAP).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: the composer sound bank, in track order.
#[wasm_bindgen]
pub fn sound_bank() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&bank::SOUND_BANK).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: download URL for a recording id.
#[wasm_bindgen]
pub fn recording_url(sound_id: &str) -> String {
    sound::download_url(sound_id)
}

/// WASM-exposed: render one synthesized drum hit to a WAV byte array.
/// `kind` is "kick", "snare" or "hihat"; `volume` is clamped to [0, 1].
#[wasm_bindgen]
pub fn render_drum_wav(kind: &str, volume: f64, sample_rate: u32) -> Result<Vec<u8>, JsValue> {
    let kind = DrumKind::from_name(kind)
        .ok_or_else(|| JsValue::from_str(&format!("{}", error::CorvidError::UnknownDrum(kind.to_string()))))?;
    Ok(renderer::render_drum_wav(kind, volume, sample_rate))
}
