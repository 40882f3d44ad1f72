use dioxus::prelude::*;

mod config;
mod flow;
mod routes;
use routes::Route;

const THEME_BASE: Asset = asset!("/assets/theme-base.css");

fn main() {
    let app_config = config::load();

    if let Err(e) = dioxus::logger::init(config::log_level(app_config)) {
        eprintln!("[logger] Failed to initialize logging: {e}");
    }
    tracing::info!(
        platform = client_platform(),
        simulated_latency_ms = app_config.reset.simulated_latency_ms,
        "Starting password reset flow"
    );

    dioxus::launch(App);
}

/// Detect the client platform from compile-time feature flags.
pub fn client_platform() -> &'static str {
    if cfg!(feature = "web") {
        "web"
    } else if cfg!(feature = "desktop") {
        "desktop"
    } else if cfg!(feature = "mobile") {
        "mobile"
    } else {
        "unknown"
    }
}

#[component]
fn App() -> Element {
    use_context_provider(|| config::load().reset.clone());

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_BASE }
        shared_ui::ToastProvider {
            Router::<Route> {}
        }
    }
}
