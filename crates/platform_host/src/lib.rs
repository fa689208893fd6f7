//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services: audio cue playback, the analytics
//! backend handle, and time helpers. Concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod audio;
pub mod host;
pub mod time;

pub use audio::{AudioCueService, MemoryAudioCueService, NoopAudioCueService};
pub use host::{HostServices, HostStrategy};
pub use time::unix_time_ms_now;
