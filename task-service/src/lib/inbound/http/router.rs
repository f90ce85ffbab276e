use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_task::create_task;
use super::handlers::current_user::current_user;
use super::handlers::delete_task::delete_task;
use super::handlers::get_task::get_task;
use super::handlers::health::health;
use super::handlers::list_tasks::list_tasks;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_task::update_task;
use super::middleware::authenticate as auth_middleware;
use crate::domain::task::service::TaskService;
use crate::domain::user::service::AuthService;
use crate::outbound::repositories::InMemoryTaskRepository;
use crate::outbound::repositories::InMemoryUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
    pub task_service: Arc<TaskService<InMemoryTaskRepository>>,
}

pub fn create_router(
    auth_service: Arc<AuthService<InMemoryUserRepository>>,
    task_service: Arc<TaskService<InMemoryTaskRepository>>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        auth_service,
        task_service,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/v1/users/me", get(current_user))
        .route("/api/v1/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/v1/tasks/:task_id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
