use api::ApiClient;
use dioxus::prelude::*;
use store::{CachePolicy, ClientConfig, ConfigError};

use ui::components::ToastProvider;
use ui::{AuthProvider, CacheProvider};
use views::{
    Allotment, AppLayout, Browse, ConfirmEmail, EditGuide, ForgotPassword, GuideDetail, Guides,
    Login, NewGuide, NotFound, Preferences, Profile, Register, ResetPassword, VerifyEmail,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/verify-email")]
    VerifyEmail {},
    #[route("/verify-email/:token")]
    ConfirmEmail { token: String },
    #[route("/reset-password")]
    ForgotPassword {},
    #[route("/reset-password/:token")]
    ResetPassword { token: String },
    #[layout(AppLayout)]
        #[route("/guides")]
        Guides {},
        #[route("/guides/new")]
        NewGuide {},
        #[route("/guides/:id")]
        GuideDetail { id: String },
        #[route("/guides/:id/edit")]
        EditGuide { id: String },
        #[route("/browse")]
        Browse {},
        #[route("/allotment")]
        Allotment {},
        #[route("/profile")]
        Profile {},
        #[route("/preferences")]
        Preferences {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const CONFIG_TOML: &str = include_str!("../grow-guides.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

/// Bundled config, with the API URL optionally overridden at build time.
fn load_config() -> Result<ClientConfig, ConfigError> {
    let config = ClientConfig::from_toml(CONFIG_TOML)?;
    Ok(match option_env!("GROW_GUIDES_API_URL") {
        Some(url) => config.with_base_url(url),
        None => config,
    })
}

fn build_client() -> Result<(ApiClient, CachePolicy), String> {
    let config = load_config().map_err(|e| e.to_string())?;
    let client = ApiClient::new(&config).map_err(|e| e.to_string())?;
    tracing::info!(base_url = client.base_url(), "api client ready");
    Ok((client, CachePolicy::from_config(&config.cache)))
}

#[component]
fn App() -> Element {
    let setup = use_hook(build_client);

    match setup {
        Ok((client, policy)) => rsx! {
            document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
            AuthProvider { client,
                CacheProvider { policy,
                    ToastProvider {
                        Router::<Route> {}
                    }
                }
            }
        },
        Err(message) => {
            tracing::error!("failed to start: {message}");
            rsx! {
                document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
                div { class: "auth-page",
                    div { class: "form-banner", role: "alert",
                        "Could not start Grow Guides: {message}"
                    }
                }
            }
        }
    }
}

/// Redirect `/` to the guide list, or to login when signed out.
#[component]
fn Root() -> Element {
    let auth = ui::use_auth();
    let nav = use_navigator();
    if auth.read().is_authenticated() {
        nav.replace(Route::Guides {});
    } else {
        nav.replace(Route::Login {});
    }
    rsx! {}
}
