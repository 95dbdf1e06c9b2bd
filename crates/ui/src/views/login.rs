use dioxus::prelude::*;
use dioxus_router::use_navigator;

use study_core::oauth::OAuthProvider;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{form_credentials, login_failure_message};

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Authorization URLs carry a one-off state value, so build them once per mount.
    let oauth_links = use_hook({
        let auth = auth.clone();
        move || {
            auth.oauth_providers()
                .into_iter()
                .filter_map(|provider| match auth.oauth_url(provider) {
                    Ok(url) => Some((provider, url.to_string())),
                    Err(err) => {
                        log::warn!("skipping {provider} login: {err}");
                        None
                    }
                })
                .collect::<Vec<(OAuthProvider, String)>>()
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let auth = auth.clone();
        let credentials = form_credentials(&username.read(), &password.read());
        error.set(None);
        submitting.set(true);
        spawn(async move {
            match auth.login(&credentials).await {
                Ok(()) => {
                    navigator.push(Route::Home {});
                }
                Err(err) => error.set(Some(login_failure_message(&err))),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "page login",
            h2 { "Login" }
            form { class: "login-form", onsubmit: on_submit,
                input {
                    name: "username",
                    placeholder: "Username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                input {
                    name: "password",
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button { r#type: "submit", disabled: submitting(), "Log in" }
            }

            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }

            if !oauth_links.is_empty() {
                div { class: "social",
                    p { class: "muted", "Or continue with" }
                    for (provider, href) in oauth_links {
                        a { key: "{provider}", class: "social-link", href: "{href}",
                            "Log in with {provider}"
                        }
                    }
                }
            }
        }
    }
}
