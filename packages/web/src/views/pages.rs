//! Route targets for signed-in pages. Each one wires a shared view to the router.

use dioxus::prelude::*;
use ui::views::{
    AllotmentView, GuideDetailView, GuideEditorView, GuideListView, PreferencesView,
    ProfileView, PublicGuidesView,
};

use crate::Route;

#[component]
pub fn Guides() -> Element {
    let nav = use_navigator();
    rsx! {
        GuideListView {
            on_open: move |id: String| {
                nav.push(Route::GuideDetail { id });
            },
            on_edit: move |id: String| {
                nav.push(Route::EditGuide { id });
            },
            on_create: move |_| {
                nav.push(Route::NewGuide {});
            },
        }
    }
}

#[component]
pub fn NewGuide() -> Element {
    let nav = use_navigator();
    rsx! {
        GuideEditorView {
            variety_id: None,
            on_saved: move |saved: store::Variety| {
                nav.replace(Route::GuideDetail { id: saved.variety_id });
            },
            on_cancel: move |_| nav.go_back(),
        }
    }
}

#[component]
pub fn EditGuide(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        GuideEditorView {
            key: "{id}",
            variety_id: Some(id.clone()),
            on_saved: move |saved: store::Variety| {
                nav.replace(Route::GuideDetail { id: saved.variety_id });
            },
            on_cancel: move |_| nav.go_back(),
        }
    }
}

#[component]
pub fn GuideDetail(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        GuideDetailView {
            key: "{id}",
            variety_id: id.clone(),
            on_edit: move |id: String| {
                nav.push(Route::EditGuide { id });
            },
            on_back: move |_| nav.go_back(),
        }
    }
}

/// Public guides. A copied guide opens straight in the editor.
#[component]
pub fn Browse() -> Element {
    let nav = use_navigator();
    rsx! {
        PublicGuidesView {
            on_open: move |id: String| {
                nav.push(Route::GuideDetail { id });
            },
            on_copied: move |copy: store::Variety| {
                nav.push(Route::EditGuide { id: copy.variety_id });
            },
        }
    }
}

#[component]
pub fn Allotment() -> Element {
    rsx! { AllotmentView {} }
}

#[component]
pub fn Profile() -> Element {
    rsx! { ProfileView {} }
}

#[component]
pub fn Preferences() -> Element {
    rsx! { PreferencesView {} }
}
