//! Spoken step-by-step guidance for a workout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lines are spoken one at a time through the browser's speech synthesis,
//! with a short pause between them. `Playback` tracks where we are; each
//! start bumps its run number so a callback from a stopped run cannot
//! restart speech.

#[cfg(test)]
#[path = "voice_guidance_test.rs"]
mod voice_guidance_test;

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
const STEP_PAUSE_MS: i32 = 2000;

/// Position in a spoken sequence of `total` lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Playback {
    total: usize,
    current: Option<usize>,
    run: u32,
}

impl Playback {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self { total, current: None, run: 0 }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn run(&self) -> u32 {
        self.run
    }

    /// Begin a new run from the first line. Returns the index to speak.
    pub fn start(&mut self) -> Option<usize> {
        self.run = self.run.wrapping_add(1);
        self.current = (self.total > 0).then_some(0);
        self.current
    }

    pub fn stop(&mut self) {
        self.run = self.run.wrapping_add(1);
        self.current = None;
    }

    /// Line `index` of `run` finished speaking. Returns the next index, or
    /// `None` when the run is over or stale.
    pub fn finished(&mut self, run: u32, index: usize) -> Option<usize> {
        if run != self.run || self.current != Some(index) {
            return None;
        }
        let next = index + 1;
        if next < self.total {
            self.current = Some(next);
        } else {
            self.current = None;
        }
        self.current
    }

    /// `Step N of M` while playing.
    #[must_use]
    pub fn status(&self) -> Option<String> {
        self.current.map(|i| format!("Step {} of {}", i + 1, self.total))
    }
}

#[component]
pub fn VoiceGuidance(lines: Vec<String>) -> impl IntoView {
    let playback = RwSignal::new(Playback::new(lines.len()));
    let lines = StoredValue::new(lines);

    on_cleanup(cancel_speech);

    let on_toggle = move |_| {
        if playback.with_untracked(Playback::is_playing) {
            playback.update(Playback::stop);
            cancel_speech();
            return;
        }
        let mut next = playback.get_untracked();
        let first = next.start();
        let run = next.run();
        playback.set(next);
        if let Some(first) = first {
            speak(lines, playback, run, first);
        }
    };

    view! {
        <div class="voice-guidance">
            <button
                class=move || if playback.with(Playback::is_playing) { "btn btn--danger" } else { "btn" }
                on:click=on_toggle
            >
                {move || {
                    if playback.with(Playback::is_playing) { "Stop voice guidance" } else { "Start voice guidance" }
                }}
            </button>
            <span class="voice-guidance__status muted" aria-live="polite">
                {move || playback.with(Playback::status).unwrap_or_default()}
            </span>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn speak(lines: StoredValue<Vec<String>>, playback: RwSignal<Playback>, run: u32, index: usize) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(text) = lines.with_value(|l| l.get(index).cloned()) else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(synth) = window.speech_synthesis() else {
        log::warn!("speech synthesis unavailable");
        playback.update(Playback::stop);
        return;
    };
    let Ok(utterance) = web_sys::SpeechSynthesisUtterance::new_with_text(&text) else {
        playback.update(Playback::stop);
        return;
    };

    let on_end = Closure::once_into_js(move || {
        let resume = Closure::once_into_js(move || {
            if let Some(next) = playback.try_update(|p| p.finished(run, index)).flatten() {
                speak(lines, playback, run, next);
            }
        });
        if let Some(window) = web_sys::window() {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(resume.unchecked_ref(), STEP_PAUSE_MS);
        }
    });
    utterance.set_onend(Some(on_end.unchecked_ref()));
    synth.speak(&utterance);
}

#[cfg(not(feature = "hydrate"))]
fn speak(_lines: StoredValue<Vec<String>>, _playback: RwSignal<Playback>, _run: u32, _index: usize) {}

fn cancel_speech() {
    #[cfg(feature = "hydrate")]
    if let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) {
        synth.cancel();
    }
}
