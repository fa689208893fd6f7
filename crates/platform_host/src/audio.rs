//! Audio cue playback contracts and in-memory adapters.

use std::cell::RefCell;

/// Host service that plays short audio resources addressed by URL.
///
/// Playback is fire-and-forget: adapters report synchronous failures through the returned
/// `Result` and must absorb asynchronous rejections (for example autoplay policy) themselves.
pub trait AudioCueService {
    /// Loads `resource` ahead of its first playback.
    fn prepare(&self, resource: &str) -> Result<(), String>;

    /// Rewinds `resource` to the start and begins playback.
    fn play_from_start(&self, resource: &str) -> Result<(), String>;

    /// Stops and drops every prepared resource.
    fn release_all(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// Audio service for hosts without sound output.
pub struct NoopAudioCueService;

impl AudioCueService for NoopAudioCueService {
    fn prepare(&self, _resource: &str) -> Result<(), String> {
        Ok(())
    }

    fn play_from_start(&self, _resource: &str) -> Result<(), String> {
        Ok(())
    }

    fn release_all(&self) {}
}

#[derive(Debug, Default)]
/// Recording audio service for tests and headless composition.
pub struct MemoryAudioCueService {
    prepared: RefCell<Vec<String>>,
    played: RefCell<Vec<String>>,
    released: RefCell<usize>,
    fail_playback: bool,
}

impl MemoryAudioCueService {
    /// Creates a service whose playback calls always fail, mimicking a blocked autoplay policy.
    pub fn failing() -> Self {
        Self {
            fail_playback: true,
            ..Self::default()
        }
    }

    /// Resources passed to [`AudioCueService::prepare`], in call order.
    pub fn prepared(&self) -> Vec<String> {
        self.prepared.borrow().clone()
    }

    /// Resources passed to [`AudioCueService::play_from_start`], in call order.
    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }

    /// Number of [`AudioCueService::release_all`] calls.
    pub fn release_count(&self) -> usize {
        *self.released.borrow()
    }
}

impl AudioCueService for MemoryAudioCueService {
    fn prepare(&self, resource: &str) -> Result<(), String> {
        self.prepared.borrow_mut().push(resource.to_string());
        Ok(())
    }

    fn play_from_start(&self, resource: &str) -> Result<(), String> {
        self.played.borrow_mut().push(resource.to_string());
        if self.fail_playback {
            Err(format!("playback of `{resource}` was blocked"))
        } else {
            Ok(())
        }
    }

    fn release_all(&self) {
        self.prepared.borrow_mut().clear();
        *self.released.borrow_mut() += 1;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_service_records_calls_and_release() {
        let service = MemoryAudioCueService::default();
        service.prepare("/sounds/click.mp3").unwrap();
        service.play_from_start("/sounds/click.mp3").unwrap();
        service.release_all();

        assert_eq!(service.played(), vec!["/sounds/click.mp3".to_string()]);
        assert!(service.prepared().is_empty());
        assert_eq!(service.release_count(), 1);
    }

    #[test]
    fn failing_service_still_records_the_attempt() {
        let service = MemoryAudioCueService::failing();
        assert!(service.play_from_start("/sounds/error.mp3").is_err());
        assert_eq!(service.played().len(), 1);
    }
}
