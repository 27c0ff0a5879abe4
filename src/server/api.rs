use crate::cli::Args;
use crate::models::chat::{ AskRequest, AskResponse };
use crate::relay::ChatRelay;
use crate::relay::error::{ RelayError, INTERNAL_ERROR_ANSWER };
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ State, rejection::JsonRejection },
    response::{ Html, IntoResponse, Response },
    http::StatusCode,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use log::{info, error};

const INDEX_HTML: &str = include_str!("../../templates/index.html");

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
}

pub fn build_app(relay: Arc<ChatRelay>, enable_cors: bool) -> Router {
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/ask", post(ask_handler))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(internal_error))
        .with_state(AppState { relay });

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    }
}

pub async fn start_http_server(
    addr: &str,
    relay: Arc<ChatRelay>,
    args: &Args,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    let app = build_app(relay, args.enable_cors);

    if args.enable_tls {
        let (Some(cert_path), Some(key_path)) = (args.tls_cert_path.as_ref(), args.tls_key_path.as_ref()) else {
            return Err("ENABLE_TLS requires both TLS_CERT_PATH and TLS_KEY_PATH".into());
        };

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
            cert_path,
            key_path
        ).await?;

        info!("Starting HTTPS server on: https://{}", addr);
        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await?;
    } else {
        let listener = tokio::net::TcpListener::bind(addr).await
            .map_err(|e| format!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e))?;
        info!("Starting HTTP server on: http://{}", addr);
        axum::serve(listener, app.into_make_service()).await?;
    }

    Ok(())
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn ask_handler(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let err = RelayError::Unexpected(rejection.body_text());
            error!("Error in /ask route: {}", err);
            return internal_error_response();
        }
    };

    let (status, body) = state.relay.ask(req.message.as_deref()).await.into_response_parts();
    (status, Json(body)).into_response()
}

fn internal_error(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Panic while handling request: {}", detail);
    internal_error_response()
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AskResponse { answer: INTERNAL_ERROR_ANSWER.to_string() }),
    )
        .into_response()
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(AskResponse { answer: "Not found".to_string() }),
    )
        .into_response()
}
