//! Sound cue dispatcher shared by the whole desktop.
//!
//! One [`SoundDispatcher`] is built by the desktop provider and lives as long as the desktop. It
//! maps cues to audio resources, prepares each resource on its first playback, and swallows every
//! playback failure.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    rc::Rc,
};

use desktop_app_contract::SoundCue;
use leptos::logging;
use platform_host::AudioCueService;

/// Resource played for `cue` in the default sound set.
pub fn default_cue_resource(cue: SoundCue) -> Option<&'static str> {
    match cue {
        SoundCue::Open => Some("/sounds/WindowOpen.mp3"),
        SoundCue::Close => Some("/sounds/WindowClose.mp3"),
        SoundCue::Minimize => Some("/sounds/WindowMinimize.mp3"),
        SoundCue::Maximize => Some("/sounds/WindowMaximize.mp3"),
        SoundCue::Restore => Some("/sounds/restore.mp3"),
        SoundCue::Error => Some("/sounds/error.mp3"),
        SoundCue::Click => Some("/sounds/click.mp3"),
        SoundCue::Notification => None,
    }
}

/// Fire-and-forget cue playback with a process-wide enable flag.
pub struct SoundDispatcher {
    audio: Rc<dyn AudioCueService>,
    resources: HashMap<SoundCue, String>,
    prepared: RefCell<HashSet<SoundCue>>,
    enabled: Cell<bool>,
    torn_down: Cell<bool>,
}

impl SoundDispatcher {
    /// Dispatcher using [`default_cue_resource`].
    pub fn new(audio: Rc<dyn AudioCueService>) -> Self {
        let resources = SoundCue::ALL
            .into_iter()
            .filter_map(|cue| default_cue_resource(cue).map(|path| (cue, path.to_string())))
            .collect();
        Self::with_resources(audio, resources)
    }

    pub fn with_resources(
        audio: Rc<dyn AudioCueService>,
        resources: HashMap<SoundCue, String>,
    ) -> Self {
        Self {
            audio,
            resources,
            prepared: RefCell::new(HashSet::new()),
            enabled: Cell::new(true),
            torn_down: Cell::new(false),
        }
    }

    /// Rewinds and plays the resource mapped to `cue`.
    ///
    /// No-op while disabled, after [`Self::teardown`], or when `cue` has no resource.
    pub fn play(&self, cue: SoundCue) {
        if !self.enabled.get() || self.torn_down.get() {
            return;
        }
        let Some(resource) = self.resources.get(&cue) else {
            return;
        };
        if self.prepared.borrow_mut().insert(cue) {
            if let Err(err) = self.audio.prepare(resource) {
                logging::warn!("sound cue `{}` prepare failed: {err}", cue.token());
            }
        }
        if let Err(err) = self.audio.play_from_start(resource) {
            logging::warn!("sound cue `{}` playback failed: {err}", cue.token());
        }
    }

    /// Flips the enable flag and returns the new value.
    pub fn toggle(&self) -> bool {
        let next = !self.enabled.get();
        self.enabled.set(next);
        next
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Releases host audio resources; later [`Self::play`] calls do nothing.
    pub fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        self.prepared.borrow_mut().clear();
        self.audio.release_all();
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryAudioCueService;
    use pretty_assertions::assert_eq;

    use super::*;

    fn dispatcher() -> (Rc<MemoryAudioCueService>, SoundDispatcher) {
        let audio = Rc::new(MemoryAudioCueService::default());
        let dispatcher = SoundDispatcher::new(audio.clone());
        (audio, dispatcher)
    }

    #[test]
    fn plays_mapped_resource_and_prepares_once() {
        let (audio, sound) = dispatcher();
        sound.play(SoundCue::Click);
        sound.play(SoundCue::Click);
        assert_eq!(audio.prepared(), vec!["/sounds/click.mp3".to_string()]);
        assert_eq!(
            audio.played(),
            vec!["/sounds/click.mp3".to_string(), "/sounds/click.mp3".to_string()]
        );
    }

    #[test]
    fn disabled_dispatcher_is_silent_until_toggled_back() {
        let (audio, sound) = dispatcher();
        assert!(sound.is_enabled());
        assert!(!sound.toggle());
        sound.play(SoundCue::Open);
        assert!(audio.played().is_empty());

        assert!(sound.toggle());
        sound.play(SoundCue::Open);
        assert_eq!(audio.played(), vec!["/sounds/WindowOpen.mp3".to_string()]);
    }

    #[test]
    fn unmapped_cue_is_ignored() {
        let (audio, sound) = dispatcher();
        sound.play(SoundCue::Notification);
        assert!(audio.played().is_empty());
        assert!(audio.prepared().is_empty());
    }

    #[test]
    fn host_failures_are_swallowed() {
        let audio = Rc::new(MemoryAudioCueService::failing());
        let sound = SoundDispatcher::new(audio.clone());
        sound.play(SoundCue::Error);
        sound.play(SoundCue::Error);
        assert_eq!(audio.played().len(), 2);
    }

    #[test]
    fn teardown_releases_once_and_silences_playback() {
        let (audio, sound) = dispatcher();
        sound.play(SoundCue::Close);
        sound.teardown();
        sound.teardown();
        sound.play(SoundCue::Close);
        assert_eq!(audio.release_count(), 1);
        assert_eq!(audio.played().len(), 1);
    }
}
