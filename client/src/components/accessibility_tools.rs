//! Accessibility drawer: text size, contrast, and assistive toggles.
//!
//! SYSTEM CONTEXT
//! ==============
//! Edits a local draft and commits it through the accessibility concern on
//! "Apply", so the stored record, the root font scale, and the body contrast
//! class all change together. The drawer rehydrates its concern after first
//! render.

#[cfg(test)]
#[path = "accessibility_tools_test.rs"]
mod accessibility_tools_test;

use leptos::prelude::*;
use prefs::AccessibilityPreferences;
use prefs::records::{FONT_SIZE_DEFAULT, FONT_SIZE_MAX, FONT_SIZE_MIN, FONT_SIZE_STEP, snap_font_size};

use crate::state::preferences::{concern_signal, save_notice, use_preferences};

#[component]
pub fn AccessibilityTools() -> impl IntoView {
    let prefs = use_preferences();
    let saved = concern_signal(&prefs.accessibility);
    let open = RwSignal::new(false);
    let draft = RwSignal::new(saved.get_untracked());
    let notice = RwSignal::new(None::<String>);

    let mount_ctx = prefs.clone();
    Effect::new(move || {
        mount_ctx.accessibility.mount();
    });

    let on_open = move |_| {
        draft.set(saved.get_untracked());
        notice.set(None);
        open.set(true);
    };
    let on_apply = Callback::new(move |()| {
        let next = draft.get_untracked();
        notice.set(save_notice(prefs.accessibility.update(|p| *p = next)));
        if notice.get_untracked().is_none() {
            open.set(false);
        }
    });

    view! {
        <button class="a11y-trigger" aria-label="Accessibility Options" on:click=on_open>
            "Aa"
        </button>
        <Show when=move || open.get()>
            <div class="a11y-drawer" role="dialog" aria-labelledby="a11y-title">
                <h2 id="a11y-title">"Accessibility Settings"</h2>
                <p class="a11y-drawer__description">"Adjust these settings to improve your experience."</p>
                <div class="a11y-drawer__row">
                    <label for="font-size">{move || font_size_label(draft.get().font_size_percent)}</label>
                    <button
                        class="btn btn--small"
                        on:click=move |_| draft.update(|d| d.font_size_percent = FONT_SIZE_DEFAULT)
                    >
                        "Reset"
                    </button>
                </div>
                <input
                    id="font-size"
                    type="range"
                    min=FONT_SIZE_MIN.to_string()
                    max=FONT_SIZE_MAX.to_string()
                    step=FONT_SIZE_STEP.to_string()
                    prop:value=move || draft.get().font_size_percent.to_string()
                    on:input=move |ev| {
                        if let Some(size) = parse_font_size(&event_target_value(&ev)) {
                            draft.update(|d| d.font_size_percent = size);
                        }
                    }
                />
                {toggle_row("high-contrast", "High Contrast Mode", draft, |d| d.high_contrast, |d, v| d.high_contrast = v)}
                {toggle_row("reduced-motion", "Reduced Motion", draft, |d| d.reduced_motion, |d, v| d.reduced_motion = v)}
                {toggle_row("voice-assistant", "Voice Assistant", draft, |d| d.voice_assistant, |d, v| d.voice_assistant = v)}
                {toggle_row("text-to-speech", "Text to Speech", draft, |d| d.text_to_speech, |d, v| d.text_to_speech = v)}
                <Show when=move || notice.get().is_some()>
                    <p class="notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <div class="a11y-drawer__footer">
                    <button class="btn btn--primary" on:click=move |_| on_apply.run(())>
                        "Apply Settings"
                    </button>
                    <button class="btn" on:click=move |_| open.set(false)>
                        "Close"
                    </button>
                </div>
            </div>
        </Show>
    }
}

fn toggle_row(
    id: &'static str,
    label: &'static str,
    draft: RwSignal<AccessibilityPreferences>,
    read: fn(&AccessibilityPreferences) -> bool,
    write: fn(&mut AccessibilityPreferences, bool),
) -> impl IntoView {
    view! {
        <div class="a11y-drawer__switch">
            <input
                id=id
                type="checkbox"
                role="switch"
                prop:checked=move || read(&draft.get())
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    draft.update(|d| write(d, checked));
                }
            />
            <label for=id>{label}</label>
        </div>
    }
}

/// Parse a slider value into an on-step, in-range percent.
fn parse_font_size(raw: &str) -> Option<u16> {
    let value = raw.trim().parse::<i64>().ok()?;
    Some(snap_font_size(value))
}

fn font_size_label(percent: u16) -> String {
    format!("Text Size ({percent}%)")
}
