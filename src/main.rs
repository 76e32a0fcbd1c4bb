use axum::{
    Router,
    routing::{get, patch, post},
    middleware::from_fn_with_state,
    extract::DefaultBodyLimit,
};

use http::{Method, header};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::{
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
    cors::{Any, CorsLayer},
};

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod state;
mod db;
mod crypto {
    pub mod token;
}

mod models {
    pub mod user;
    pub mod session;
    pub mod post;
}

mod repositories {
    pub mod user;
    pub mod friend;
    pub mod post;
}

mod services {
    pub mod auth;
    pub mod friends;
    pub mod posts;
}

mod handlers {
    pub mod auth;
    pub mod users;
    pub mod posts;
}

mod middleware_layer {
    pub mod auth;
}

mod validation {
    pub mod auth;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]);

    // One replenish every 2s with a small burst keeps credential stuffing
    // slow without bothering interactive clients.
    let auth_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(20)
            .use_headers()
            .finish()
            .unwrap(),
    );

    let protected_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(200)
            .use_headers()
            .finish()
            .unwrap(),
    );

    let auth_routes = Router::new()
        .route("/api/users/register", post(handlers::auth::register))
        .route("/api/users/login", post(handlers::auth::login))
        .layer(tower_governor::GovernorLayer::new(auth_governor_conf))
        .with_state(state.clone());

    let open_routes = Router::new()
        .route("/api/users/{id}", get(handlers::users::get_user))
        .route("/api/users/friends/{id}", get(handlers::users::list_friends))
        .route("/api/posts/feed", get(handlers::posts::get_feed))
        .route(
            "/api/posts/user-posts/{user_id}",
            get(handlers::posts::get_user_posts),
        )
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route(
            "/api/users/friends/add/{user_id}/{friend_id}",
            patch(handlers::users::add_friend),
        )
        .route(
            "/api/users/friends/remove/{user_id}/{friend_id}",
            patch(handlers::users::remove_friend),
        )
        .route("/api/posts", post(handlers::posts::create_post))
        .route("/api/posts/like/{post_id}", patch(handlers::posts::toggle_like))
        .layer(tower_governor::GovernorLayer::new(
            protected_governor_conf.clone(),
        ))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let app = Router::new()
        .merge(auth_routes)
        .merge(open_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], state.config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
