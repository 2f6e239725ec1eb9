//! Settings: profile, notification toggles, and appearance.
//!
//! SYSTEM CONTEXT
//! ==============
//! Profile fields are saved to the server. Notification toggles and
//! appearance are device-local preferences; the dark-mode switch writes
//! through the theme concern so the nav toggle and this page never disagree.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use prefs::{Contrast, NotificationPreferences};

use crate::components::nav_bar::NavBar;
use crate::net::types::ProfileUpdate;
use crate::state::preferences::{concern_signal, save_notice, use_preferences};
use crate::state::session::SessionState;
use crate::util::auth::install_unauth_redirect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Profile,
    Notifications,
    Appearance,
}

impl Tab {
    const ALL: [Self; 3] = [Self::Profile, Self::Notifications, Self::Appearance];

    fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Notifications => "Notifications",
            Self::Appearance => "Appearance",
        }
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_unauth_redirect(session, use_navigate());

    let prefs = use_preferences();
    let theme = concern_signal(&prefs.theme);
    let saved_notifications = concern_signal(&prefs.notifications);
    let tab = RwSignal::new(Tab::Profile);
    let notice = RwSignal::new(None::<String>);

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let age = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let notifications = RwSignal::new(saved_notifications.get_untracked());

    let mount_ctx = prefs.clone();
    Effect::new(move || {
        mount_ctx.theme.mount();
        if mount_ctx.notifications.mount() {
            notifications.set(mount_ctx.notifications.current());
        }
    });

    Effect::new(move || {
        if let Some(user) = session.get().user {
            email.set(user.email.unwrap_or_default());
        }
    });

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Some(profile) = crate::net::api::fetch_profile().await {
            first_name.set(profile.first_name.unwrap_or_default());
            last_name.set(profile.last_name.unwrap_or_default());
            age.set(profile.age.map(|a| a.to_string()).unwrap_or_default());
        }
    });

    let on_profile_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let update = match validate_profile_form(
            &first_name.get_untracked(),
            &last_name.get_untracked(),
            &age.get_untracked(),
            &email.get_untracked(),
        ) {
            Ok(update) => update,
            Err(message) => {
                notice.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_profile(&update).await {
                Ok(_) => notice.set(Some("Profile updated successfully".to_owned())),
                Err(e) => notice.set(Some(format!("Error updating profile: {e}"))),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = update;
    };

    let notifications_ctx = prefs.clone();
    let on_save_notifications = Callback::new(move |()| {
        let next = notifications.get_untracked();
        let result = notifications_ctx.notifications.update(|n| *n = next);
        notice.set(Some(save_notice(result).unwrap_or_else(|| "Preferences updated successfully".to_owned())));
    });

    let dark_ctx = prefs.clone();
    let on_dark_mode = Callback::new(move |enabled: bool| {
        notice.set(save_notice(dark_ctx.set_dark_mode(enabled)));
    });
    let on_contrast = Callback::new(move |()| {
        notice.set(save_notice(prefs.toggle_contrast().map(|_| ())));
    });

    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::sign_out().await;
            session.set(SessionState::default());
        });
    };

    view! {
        <div class="page">
            <header class="page__header">
                <h1>"Settings"</h1>
                <p class="muted">"Manage your account and preferences"</p>
            </header>
            <div class="tabs" role="tablist">
                {Tab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                role="tab"
                                class=move || if tab.get() == t { "tab tab--active" } else { "tab" }
                                on:click=move |_| {
                                    notice.set(None);
                                    tab.set(t);
                                }
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <Show when=move || tab.get() == Tab::Profile>
                <form class="settings-form" on:submit=on_profile_submit>
                    {text_field("first_name", "First Name", "text", first_name)}
                    {text_field("last_name", "Last Name", "text", last_name)}
                    {text_field("age", "Age", "number", age)}
                    {text_field("email", "Email", "email", email)}
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Save Profile"
                    </button>
                </form>
            </Show>
            <Show when=move || tab.get() == Tab::Notifications>
                <div class="settings-form">
                    {switch_row("reminders", "Workout reminders", notifications, |n| n.reminders, |n, v| n.reminders = v)}
                    {switch_row("emails", "Email updates", notifications, |n| n.emails, |n, v| n.emails = v)}
                    {switch_row("achievements", "Achievement alerts", notifications, |n| n.achievements, |n, v| n.achievements = v)}
                    <button class="btn btn--primary" on:click=move |_| on_save_notifications.run(())>
                        "Save Preferences"
                    </button>
                </div>
            </Show>
            <Show when=move || tab.get() == Tab::Appearance>
                <div class="settings-form">
                    <div class="switch-row">
                        <input
                            id="dark-mode"
                            type="checkbox"
                            role="switch"
                            prop:checked=move || theme.get().is_dark()
                            on:change=move |ev| on_dark_mode.run(event_target_checked(&ev))
                        />
                        <label for="dark-mode">"Dark Mode"</label>
                    </div>
                    <div class="switch-row">
                        <input
                            id="theme-contrast"
                            type="checkbox"
                            role="switch"
                            prop:checked=move || theme.get().contrast == Contrast::High
                            on:change=move |_| on_contrast.run(())
                        />
                        <label for="theme-contrast">"High Contrast Theme"</label>
                    </div>
                </div>
            </Show>
            <Show when=move || notice.get().is_some()>
                <p class="notice" role="status">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn--danger" on:click=on_sign_out>
                "Sign Out"
            </button>
            <NavBar />
        </div>
    }
}

fn text_field(id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <label for=id>{label}</label>
        <input
            id=id
            class="input"
            type=kind
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

fn switch_row(
    id: &'static str,
    label: &'static str,
    draft: RwSignal<NotificationPreferences>,
    read: fn(&NotificationPreferences) -> bool,
    write: fn(&mut NotificationPreferences, bool),
) -> impl IntoView {
    view! {
        <div class="switch-row">
            <input
                id=id
                type="checkbox"
                role="switch"
                prop:checked=move || read(&draft.get())
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    draft.update(|n| write(n, checked));
                }
            />
            <label for=id>{label}</label>
        </div>
    }
}

/// Validate the profile form into a server update.
fn validate_profile_form(first_name: &str, last_name: &str, age: &str, email: &str) -> Result<ProfileUpdate, &'static str> {
    let (first_name, last_name) = (first_name.trim(), last_name.trim());
    if first_name.chars().count() < 2 {
        return Err("First name must be at least 2 characters");
    }
    if last_name.chars().count() < 2 {
        return Err("Last name must be at least 2 characters");
    }
    let Ok(age) = age.trim().parse::<i32>() else {
        return Err("Age must be a number");
    };
    if !is_plausible_email(email.trim()) {
        return Err("Please enter a valid email address");
    }
    Ok(ProfileUpdate { first_name: first_name.to_owned(), last_name: last_name.to_owned(), age: Some(age) })
}

/// `local@domain.tld` with no whitespace.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}
