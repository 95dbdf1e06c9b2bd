use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::RECOMMENDATION_LIMIT;
use study_core::model::StudyMode;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HomeVm, RecommendationVm, map_recommendations, recommendation_link};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let home = ctx.home();
    let auth = ctx.auth();
    let session_auth = auth.clone();
    let default_rank = ctx.default_rank();
    let mut selected_mode = use_signal(StudyMode::default);

    // A failed fetch leaves the list empty rather than showing an error.
    let resource = use_resource(move || {
        let home = home.clone();
        let auth = session_auth.clone();
        async move {
            let signed_in = auth.is_signed_in().await.unwrap_or_else(|err| {
                log::warn!("failed to read the stored session: {err}");
                false
            });
            if !signed_in {
                return Ok::<_, ViewError>(HomeVm::signed_out());
            }
            let items = match home.recommendations(RECOMMENDATION_LIMIT).await {
                Ok(items) => items,
                Err(err) => {
                    log::warn!("failed to load deck recommendations: {err}");
                    Vec::new()
                }
            };
            Ok(HomeVm {
                signed_in,
                recommendations: map_recommendations(&items),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    let signed_in = matches!(&state, ViewState::Ready(vm) if vm.signed_in);

    let logout = move |_| {
        let auth = auth.clone();
        spawn(async move {
            if let Err(err) = auth.logout().await {
                log::warn!("logout failed: {err}");
            }
            navigator.push(Route::Login {});
        });
    };

    rsx! {
        div { class: "page",
            div { class: "home-header",
                h2 { "Home" }
                if signed_in {
                    button { class: "logout", onclick: logout, "Logout" }
                } else {
                    button {
                        class: "login",
                        onclick: move |_| {
                            navigator.push(Route::Login {});
                        },
                        "Log in"
                    }
                }
            }

            section { class: "modes",
                for mode in StudyMode::ALL {
                    div {
                        key: "{mode}",
                        class: tile_class(selected_mode() == mode),
                        onclick: move |_| selected_mode.set(mode),
                        h3 { "{mode.label()}" }
                    }
                }
            }

            section { class: "recommendations",
                h4 { "Recommended decks" }
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { class: "muted", "Loading..." }
                    },
                    ViewState::Ready(vm) => rsx! {
                        if vm.recommendations.is_empty() {
                            p { class: "muted", "No recommendations yet." }
                        } else {
                            for item in vm.recommendations {
                                RecommendationItem {
                                    key: "{item.deck_id}",
                                    item: item.clone(),
                                    on_open: {
                                        let rank = default_rank.clone();
                                        move |deck: RecommendationVm| {
                                            let query = recommendation_link(
                                                &deck.deck_id,
                                                &rank,
                                                selected_mode(),
                                            );
                                            navigator.push(Route::Learning { query });
                                        }
                                    },
                                }
                            }
                        }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                    },
                }
            }
        }
    }
}

fn tile_class(selected: bool) -> &'static str {
    if selected { "tile selected" } else { "tile" }
}

#[component]
fn RecommendationItem(item: RecommendationVm, on_open: EventHandler<RecommendationVm>) -> Element {
    let clicked = item.clone();
    rsx! {
        div { class: "recommendation", onclick: move |_| on_open.call(clicked.clone()),
            strong { "{item.name}" }
            p { "{item.reason}" }
        }
    }
}
