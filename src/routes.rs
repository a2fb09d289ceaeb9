use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::handlers;
use crate::middleware::{jwt_auth_middleware, auth::TOKEN_HEADER};
use crate::state::AppState;

/// Build the full application router over an explicitly constructed state
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let api = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .fallback(handlers::root::api_not_found);

    let mut router = Router::new()
        .route("/", get(handlers::root::welcome))
        .route("/health", get(handlers::root::health))
        .nest("/api", api);

    // Production serves the bundled client for every non-API path
    if config.is_production() {
        if let Some(dir) = &config.server.client_dir {
            let index = ServeFile::new(dir.join("index.html"));
            router = router.fallback_service(ServeDir::new(dir).not_found_service(index));
        }
    }

    router = router.layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/users", post(public::register_post))
        .route("/auth", post(public::login_post))
        .route("/validator/test", get(public::validator_test))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{account, domains, keywords, reports, tags, templates, validator};

    Router::new()
        .route("/auth/me", get(account::me))
        // Resources
        .route("/keywords", get(keywords::list).post(keywords::create))
        .route(
            "/keywords/:id",
            get(keywords::get).put(keywords::update).delete(keywords::delete),
        )
        .route("/domains", get(domains::list).post(domains::create))
        .route(
            "/domains/:id",
            get(domains::get).put(domains::update).delete(domains::delete),
        )
        .route("/templates", get(templates::list).post(templates::create))
        .route(
            "/templates/:id",
            get(templates::get).put(templates::update).delete(templates::delete),
        )
        .route("/tags", get(tags::list).post(tags::create))
        .route("/tags/:id", get(tags::get).put(tags::update).delete(tags::delete))
        // Reports
        .route("/reports/keywords", get(reports::keywords))
        .route("/reports/domains", get(reports::domains))
        .route("/reports/summary", get(reports::summary))
        // Validator
        .route("/validator/validate", post(validator::validate))
        .route("/validator/check", post(validator::check))
        .route("/validator/normalize", post(validator::normalize_content))
        .route("/validator/download-file", post(validator::download_file))
        .route("/validator/download-test-plan", post(validator::download_test_plan))
        .route_layer(axum::middleware::from_fn_with_state(state, jwt_auth_middleware))
}

/// Any origin during development, the configured list elsewhere
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(TOKEN_HEADER),
        ])
}
