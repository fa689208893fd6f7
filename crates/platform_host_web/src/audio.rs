//! Audio cue adapter backed by `HTMLAudioElement`.

use std::{cell::RefCell, collections::HashMap};

use platform_host::AudioCueService;

#[derive(Debug, Default)]
/// Browser audio adapter that keeps one preloaded `<audio>` element per resource.
pub struct WebAudioCueService {
    elements: RefCell<HashMap<String, web_sys::HtmlAudioElement>>,
}

impl WebAudioCueService {
    /// Number of resources currently held.
    pub fn prepared_len(&self) -> usize {
        self.elements.borrow().len()
    }

    #[cfg(target_arch = "wasm32")]
    fn element_for(&self, resource: &str) -> Result<web_sys::HtmlAudioElement, String> {
        if let Some(element) = self.elements.borrow().get(resource) {
            return Ok(element.clone());
        }
        let element = web_sys::HtmlAudioElement::new_with_src(resource)
            .map_err(|err| format!("audio element for `{resource}` failed: {err:?}"))?;
        element.set_preload("auto");
        self.elements
            .borrow_mut()
            .insert(resource.to_string(), element.clone());
        Ok(element)
    }
}

impl AudioCueService for WebAudioCueService {
    fn prepare(&self, resource: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            self.element_for(resource).map(|_| ())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = resource;
            Ok(())
        }
    }

    fn play_from_start(&self, resource: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let element = self.element_for(resource)?;
            element.set_current_time(0.0);
            let promise = element
                .play()
                .map_err(|err| format!("audio playback of `{resource}` failed: {err:?}"))?;
            // Autoplay policy rejects asynchronously until the first user gesture.
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    web_sys::console::warn_2(&"audio cue rejected:".into(), &err);
                }
            });
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = resource;
            Ok(())
        }
    }

    fn release_all(&self) {
        let drained: Vec<_> = self.elements.borrow_mut().drain().collect();
        #[cfg(target_arch = "wasm32")]
        for (_, element) in drained {
            let _ = element.pause();
            element.set_src("");
        }
        #[cfg(not(target_arch = "wasm32"))]
        drop(drained);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn native_build_accepts_calls_without_holding_elements() {
        let service = WebAudioCueService::default();
        assert_eq!(service.prepare("/sounds/open.mp3"), Ok(()));
        assert_eq!(service.play_from_start("/sounds/open.mp3"), Ok(()));
        service.release_all();
        assert_eq!(service.prepared_len(), 0);
    }
}
