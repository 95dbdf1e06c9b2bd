use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, LearningView, LoginView};
use crate::vm::LearningQuery;

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/login", LoginView)] Login {},
        #[route("/learning/three-day?:..query", LearningView)] Learning { query: LearningQuery },
}

#[component]
fn Layout() -> Element {
    rsx! {
        header { class: "topbar",
            nav {
                Link { to: Route::Home {}, "Home" }
                Link { to: Route::Login {}, "Login" }
            }
            span { class: "muted", "The Third Tool" }
        }
        main { class: "content",
            Outlet::<Route> {}
        }
    }
}
