//! The per-request pipeline.
//!
//! 1. Read the body, bounded by `max_body_size` (413 beyond it).
//! 2. Split the path and dispatch it against the current registry snapshot
//!    (410 Gone on a miss).
//! 3. Bind the typed path arguments (400 on a parse failure).
//! 4. Invoke the handler and render its result; a halt writes its own
//!    status and body.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing::Instrument;

use quark_core::logging::request_span;
use quark_core::QuarkError;
use quark_http::{HttpResponse, Quark, QuarkRequest};

/// Serves one request against `quark`.
pub async fn handle(quark: Arc<Quark>, max_body_size: usize, request: Request<Body>) -> Response {
    let span = request_span(request.method().as_str(), request.uri().path());
    async move {
        let (parts, body) = request.into_parts();
        let body = match axum::body::to_bytes(body, max_body_size).await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) if is_length_limit(&e) => {
                tracing::warn!(limit = max_body_size, "Request body too large");
                return StatusCode::PAYLOAD_TOO_LARGE.into_response();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read request body");
                return HttpResponse::from_error(&QuarkError::InternalServerError(format!(
                    "read request body failed: {e}"
                )))
                .into_response();
            }
        };

        serve(&quark, QuarkRequest::from_parts(parts, body))
            .await
            .into_response()
    }
    .instrument(span)
    .await
}

/// Runs an already-read request through dispatch, binding, and the handler.
///
/// Exposed separately so the pipeline can be driven without axum.
pub async fn serve(quark: &Quark, request: QuarkRequest) -> HttpResponse {
    let segments = request.segments();
    let snapshot = quark.snapshot();

    let Some(dispatch) = snapshot.dispatch(&segments, request.method()) else {
        tracing::debug!("No procedure matched");
        return HttpResponse::from_error(&QuarkError::Gone(request.path().to_string()));
    };
    let Some(procedure) = dispatch.procedure() else {
        return HttpResponse::from_error(&QuarkError::InternalServerError(format!(
            "procedure index {} missing from service '{}'",
            dispatch.index,
            dispatch.service.name()
        )));
    };

    let args = match dispatch.bind() {
        Ok(args) => args,
        Err(e) => {
            tracing::debug!(procedure = procedure.name(), error = %e, "Path binding failed");
            return HttpResponse::from_error(&e);
        }
    };

    tracing::debug!(
        service = dispatch.service.name(),
        procedure = procedure.name(),
        "Dispatching"
    );

    match procedure.invoke(quark.console(request, args)).await {
        Ok(response) => response,
        Err(e) if e.is_halt() => {
            tracing::debug!(procedure = procedure.name(), status = e.status_code(), "Halted");
            HttpResponse::from_error(&e)
        }
        Err(e) => {
            if e.status_code() >= 500 {
                tracing::error!(procedure = procedure.name(), error = %e, "Procedure failed");
            } else {
                tracing::debug!(procedure = procedure.name(), error = %e, "Procedure rejected request");
            }
            HttpResponse::from_error(&e)
        }
    }
}

fn is_length_limit(error: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(e) = source {
        if e.is::<http_body_util::LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use quark_core::Settings;
    use quark_http::{Console, ParamKind, Procedure};

    fn quark() -> Quark {
        let quark = Quark::new(&Settings::default());
        quark
            .register_service(
                "root",
                vec![
                    Procedure::new("GET_Vehicle_id", |console: Console| async move {
                        let id = console.args().int(0)?;
                        console.json(&id)
                    })
                    .param(ParamKind::Integer),
                    Procedure::new("Teapot", |_console: Console| async {
                        Err(Console::halt_error(418, "short and stout"))
                    }),
                    Procedure::new("Broken", |_console: Console| async {
                        Err(QuarkError::InternalServerError("boom".to_string()))
                    }),
                ],
            )
            .unwrap();
        quark
    }

    fn get(path: &str) -> QuarkRequest {
        QuarkRequest::builder().path(path).build()
    }

    #[tokio::test]
    async fn test_serve_success() {
        let response = serve(&quark(), get("/vehicle/42")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), b"42");
    }

    #[tokio::test]
    async fn test_serve_miss_is_gone() {
        let response = serve(&quark(), get("/nowhere")).await;
        assert_eq!(response.status(), StatusCode::GONE);
    }

    #[tokio::test]
    async fn test_serve_bind_failure_is_bad_request() {
        let response = serve(&quark(), get("/vehicle/99999999999999999999")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_serve_halt() {
        let response = serve(&quark(), get("/teapot")).await;
        assert_eq!(response.status().as_u16(), 418);
        assert_eq!(response.body(), b"short and stout");
    }

    #[tokio::test]
    async fn test_serve_error() {
        let response = serve(&quark(), get("/broken")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_handle_body_limit() {
        let request = Request::builder()
            .method("POST")
            .uri("/vehicle/1")
            .body(Body::from(vec![b'x'; 64]))
            .unwrap();
        let response = handle(Arc::new(quark()), 16, request).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
