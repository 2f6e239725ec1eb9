//! Sign-in / sign-up page.
//!
//! Sign-in lands on `/workouts`; sign-up asks the user to confirm their email.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::{SignInRequest, SignUpRequest};
use crate::state::session::SessionState;

#[component]
pub fn AuthPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    let is_sign_up = RwSignal::new(false);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let info = RwSignal::new(String::new());

    Effect::new(move || {
        let state = session.get();
        if !state.loading && state.is_signed_in() {
            navigate("/workouts", NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        if is_sign_up.get_untracked() {
            let request = match validate_sign_up(
                &email.get_untracked(),
                &password.get_untracked(),
                &first_name.get_untracked(),
                &last_name.get_untracked(),
            ) {
                Ok(request) => request,
                Err(message) => {
                    info.set(message.to_owned());
                    return;
                }
            };
            busy.set(true);
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match crate::net::api::sign_up(&request).await {
                    Ok(()) => {
                        info.set("Account created! Please check your email to verify your account.".to_owned());
                        is_sign_up.set(false);
                    }
                    Err(e) => info.set(e),
                }
                busy.set(false);
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = request;
        } else {
            let request = match validate_sign_in(&email.get_untracked(), &password.get_untracked()) {
                Ok(request) => request,
                Err(message) => {
                    info.set(message.to_owned());
                    return;
                }
            };
            busy.set(true);
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match crate::net::api::sign_in(&request).await {
                    Ok(user) => {
                        info.set("Successfully logged in!".to_owned());
                        session.set(SessionState { user: Some(user), loading: false });
                    }
                    Err(e) => info.set(e),
                }
                busy.set(false);
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = request;
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{move || if is_sign_up.get() { "Create an Account" } else { "Welcome Back" }}</h1>
                <p class="muted">
                    {move || {
                        if is_sign_up.get() {
                            "Sign up to start your wellness journey"
                        } else {
                            "Sign in to continue your wellness journey"
                        }
                    }}
                </p>
                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || is_sign_up.get()>
                        <input
                            class="input"
                            placeholder="First Name"
                            prop:value=move || first_name.get()
                            on:input=move |ev| first_name.set(event_target_value(&ev))
                        />
                        <input
                            class="input"
                            placeholder="Last Name"
                            prop:value=move || last_name.get()
                            on:input=move |ev| last_name.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="input"
                        type="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary btn--wide" type="submit" disabled=move || busy.get()>
                        {move || submit_label(is_sign_up.get(), busy.get())}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="notice">{move || info.get()}</p>
                </Show>
                <button
                    class="btn btn--link"
                    on:click=move |_| {
                        is_sign_up.update(|v| *v = !*v);
                        info.set(String::new());
                    }
                >
                    {move || {
                        if is_sign_up.get() {
                            "Already have an account? Sign in"
                        } else {
                            "Don't have an account? Sign up"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}

fn submit_label(is_sign_up: bool, busy: bool) -> &'static str {
    match (busy, is_sign_up) {
        (true, _) => "Loading...",
        (false, true) => "Sign Up",
        (false, false) => "Sign In",
    }
}

fn validate_sign_in(email: &str, password: &str) -> Result<SignInRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok(SignInRequest { email: email.to_owned(), password: password.to_owned() })
}

fn validate_sign_up(
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Result<SignUpRequest, &'static str> {
    let SignInRequest { email, password } = validate_sign_in(email, password)?;
    let (first_name, last_name) = (first_name.trim(), last_name.trim());
    if first_name.is_empty() || last_name.is_empty() {
        return Err("Enter your first and last name.");
    }
    Ok(SignUpRequest { email, password, first_name: first_name.to_owned(), last_name: last_name.to_owned() })
}
