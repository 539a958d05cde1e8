use dioxus::prelude::*;

use ui::{AuthProvider, ToastProvider};
use views::{Home, SignIn, SignUp};

mod validations;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/sign-in")]
    SignIn {},
    #[route("/sign-up")]
    SignUp {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Validate the OAuth configuration before accepting connections.
    if let Err(error) = api::auth::AuthProviders::init() {
        tracing::error!("OAuth configuration error: {}", error);
        std::process::exit(1);
    }

    let pool = api::db::get_pool()
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("../api/migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to run session migrations");

    // Session layer configuration: 7-day inactivity expiry.
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7).try_into().unwrap(),
        ));

    let router = axum::Router::new()
        // OAuth callback routes first, then the Dioxus application.
        .route("/auth/github/callback", get(github_callback))
        .route("/auth/google/callback", get(google_callback))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .unwrap();
}

#[cfg(feature = "server")]
async fn github_callback(
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    oauth_callback("github", params, session).await
}

#[cfg(feature = "server")]
async fn google_callback(
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    oauth_callback("google", params, session).await
}

#[cfg(feature = "server")]
async fn oauth_callback(
    provider: &'static str,
    params: std::collections::HashMap<String, String>,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    use axum::response::Redirect;

    let Some(code) = params.get("code") else {
        tracing::error!("{} callback missing code", provider);
        return Redirect::to("/sign-in?error=missing_code");
    };
    let Some(state) = params.get("state") else {
        tracing::error!("{} callback missing state", provider);
        return Redirect::to("/sign-in?error=missing_state");
    };

    let Some(providers) = api::auth::AuthProviders::get() else {
        tracing::error!("OAuth providers are not initialized");
        return Redirect::to("/sign-in?error=config_error");
    };

    let exchanged = match provider {
        "github" => providers.github.exchange_code(code, state).await,
        _ => providers.google.exchange_code(code, state).await,
    };

    match exchanged {
        Ok(user) => {
            if let Err(error) = api::auth::establish_session(&session, user.id).await {
                tracing::error!("Failed to set session: {}", error);
                return Redirect::to("/sign-in?error=session_error");
            }
            Redirect::to("/")
        }
        Err(error) => {
            tracing::error!("{} OAuth exchange error: {}", provider, error);
            Redirect::to("/sign-in?error=oauth_error")
        }
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}
