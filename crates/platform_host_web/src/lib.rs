//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for audio cue playback and the
//! analytics backend client.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod audio;

pub use adapters::{
    audio_cue_service, build_host_services, host_strategy_name, market_data_service,
    selected_host_strategy, AudioCueServiceAdapter,
};
pub use audio::WebAudioCueService;
