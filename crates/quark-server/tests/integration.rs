//! Integration tests for the request pipeline.
//!
//! Tests cover:
//! 1. Typed dispatch: integer, float, and string wildcards; literal dominance
//! 2. Verb-pinned procedures and any-verb procedures
//! 3. Namespace selection and root-service fallback
//! 4. Request bodies: empty, valid, malformed, oversized
//! 5. Halts, handler errors, and panics
//! 6. Settings: path prefix and pretty JSON
//! 7. Runtime registration after the router is built

use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use tower::ServiceExt;

use quark_core::{QuarkError, Settings};
use quark_http::{Console, HttpResponse, ParamKind, Procedure};
use quark_server::QuarkApp;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct Vehicle {
    vin: String,
    group_id: i64,
}

fn vehicle_procedures() -> Vec<Procedure> {
    vec![
        Procedure::new("Vehicle_Vin", |console: Console| async move { console.json("all vins") }),
        Procedure::new("Vehicle_vin", |console: Console| async move {
            let vin = console.args().str(0)?.to_string();
            console.json(&format!("vin {vin}"))
        })
        .param(ParamKind::String),
        Procedure::new("Vehicle_id", |console: Console| async move {
            let id = console.args().int(0)?;
            console.json(&format!("id {id}"))
        })
        .param(ParamKind::Integer),
        Procedure::new("Vehicle_weight", |console: Console| async move {
            let weight = console.args().float(0)?;
            console.json(&format!("weight {weight}"))
        })
        .param(ParamKind::Float),
        Procedure::new("GET_Vehicle_groupId_vin", |console: Console| async move {
            let vehicle = Vehicle {
                vin: console.args().str(1)?.to_string(),
                group_id: console.args().int(0)?,
            };
            console.json(&vehicle)
        })
        .params(&[ParamKind::Integer, ParamKind::String]),
        Procedure::new("PATCH_Vehicle_groupId_vin", |console: Console| async move {
            let mut vehicle: Vehicle = console.json_body()?;
            vehicle.group_id = console.args().int(0)?;
            console.json(&vehicle)
        })
        .params(&[ParamKind::Integer, ParamKind::String])
        .with_body(),
        Procedure::new("Halt_Teapot", |console: Console| async move {
            Err(console.halt(418, &serde_json::json!({"reason": "teapot"})))
        }),
        Procedure::new("Halt_Error", |_console: Console| async move {
            Err(Console::halt_error(503, "maintenance"))
        }),
        Procedure::new("Fail", |_console: Console| async move {
            Err(QuarkError::InternalServerError("database unreachable".to_string()))
        }),
        Procedure::new("Panic", |_console: Console| async move {
            if std::hint::black_box(true) {
                panic!("handler bug");
            }
            Ok(HttpResponse::empty())
        }),
    ]
}

fn app(settings: Settings) -> axum::Router {
    QuarkApp::new(settings)
        .service("root", vehicle_procedures())
        .unwrap()
        .service(
            "admin",
            vec![Procedure::new("Users", |console: Console| async move {
                console.json(&["alice", "bob"])
            })],
        )
        .unwrap()
        .into_axum_router()
}

async fn send(router: axum::Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(uri: &str) -> (StatusCode, String) {
    send(app(Settings::default()), Method::GET, uri, "").await
}

// ============================================================================
// 1. Typed dispatch
// ============================================================================

#[tokio::test]
async fn test_integer_segment_prefers_integer_procedure() {
    assert_eq!(get("/vehicle/42").await, (StatusCode::OK, r#""id 42""#.to_string()));
}

#[tokio::test]
async fn test_float_segment_goes_to_float_procedure() {
    assert_eq!(get("/vehicle/1.5").await, (StatusCode::OK, r#""weight 1.5""#.to_string()));
}

#[tokio::test]
async fn test_text_segment_goes_to_string_procedure() {
    assert_eq!(get("/vehicle/WVW123").await, (StatusCode::OK, r#""vin WVW123""#.to_string()));
}

#[tokio::test]
async fn test_literal_beats_wildcard() {
    assert_eq!(get("/vehicle/vin").await, (StatusCode::OK, r#""all vins""#.to_string()));
}

#[tokio::test]
async fn test_percent_encoded_segment_is_decoded() {
    assert_eq!(get("/vehicle/WVW%20123").await, (StatusCode::OK, r#""vin WVW 123""#.to_string()));
}

#[tokio::test]
async fn test_wildcard_key_text_binds_as_string() {
    assert_eq!(get("/vehicle/%7Bi%7D").await, (StatusCode::OK, r#""vin {i}""#.to_string()));
}

#[tokio::test]
async fn test_integer_overflow_is_bad_request() {
    let (status, _) = get("/vehicle/7/99999999999999999999").await;
    // segment 2 is a string slot, so this one binds fine
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get("/vehicle/99999999999999999999/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("invalid integer"));
}

// ============================================================================
// 2. Verbs
// ============================================================================

#[tokio::test]
async fn test_get_pinned_procedure() {
    let (status, body) = get("/vehicle/7/WVW1").await;
    assert_eq!(status, StatusCode::OK);
    let vehicle: Vehicle = serde_json::from_str(&body).unwrap();
    assert_eq!(
        vehicle,
        Vehicle {
            vin: "WVW1".to_string(),
            group_id: 7
        }
    );
}

#[tokio::test]
async fn test_patch_pinned_procedure_with_body() {
    let (status, body) = send(
        app(Settings::default()),
        Method::PATCH,
        "/vehicle/9/WVW1",
        r#"{"vin":"NEW","group_id":0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"group_id":9,"vin":"NEW"}"#);
}

#[tokio::test]
async fn test_patch_with_empty_body_uses_default() {
    let (status, body) = send(app(Settings::default()), Method::PATCH, "/vehicle/9/WVW1", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"group_id":9,"vin":""}"#);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (status, _) = send(app(Settings::default()), Method::PATCH, "/vehicle/9/WVW1", "{oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unpinned_verb_falls_through_to_any_verb_procedure() {
    // DELETE has no pinned procedure for /vehicle/{i}/{s}; nothing else matches.
    let (status, _) = send(app(Settings::default()), Method::DELETE, "/vehicle/9/WVW1", "").await;
    assert_eq!(status, StatusCode::GONE);
    // Any-verb procedures accept every verb.
    let (status, _) = send(app(Settings::default()), Method::DELETE, "/vehicle/9", "").await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// 3. Namespaces
// ============================================================================

#[tokio::test]
async fn test_named_service() {
    assert_eq!(get("/admin/users").await, (StatusCode::OK, r#"["alice","bob"]"#.to_string()));
}

#[tokio::test]
async fn test_unknown_path_is_gone() {
    let (status, _) = get("/no/such/thing").await;
    assert_eq!(status, StatusCode::GONE);
    let (status, _) = get("/").await;
    assert_eq!(status, StatusCode::GONE);
}

#[tokio::test]
async fn test_named_service_miss_falls_back_to_root() {
    let (status, _) = get("/admin/vehicle/1").await;
    assert_eq!(status, StatusCode::GONE);
    let (status, _) = get("/vehicle/1").await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// 4. Body limits
// ============================================================================

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let settings = Settings {
        max_body_size: 8,
        ..Settings::default()
    };
    let (status, _) = send(app(settings), Method::PATCH, "/vehicle/9/WVW1", r#"{"vin":"way too long"}"#).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

// ============================================================================
// 5. Halts, errors, panics
// ============================================================================

#[tokio::test]
async fn test_halt_with_payload() {
    assert_eq!(get("/halt/teapot").await, (StatusCode::IM_A_TEAPOT, r#"{"reason":"teapot"}"#.to_string()));
}

#[tokio::test]
async fn test_halt_with_error_text() {
    assert_eq!(get("/halt/error").await, (StatusCode::SERVICE_UNAVAILABLE, "maintenance".to_string()));
}

#[tokio::test]
async fn test_handler_error() {
    let (status, body) = get("/fail").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("database unreachable"));
}

#[tokio::test]
async fn test_panic_becomes_server_error() {
    let (status, _) = get("/panic").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// 6. Settings
// ============================================================================

#[tokio::test]
async fn test_path_prefix() {
    let settings = Settings {
        path_prefix: vec!["api/v1".to_string()],
        ..Settings::default()
    };
    let (status, body) = send(app(settings), Method::GET, "/api/v1/vehicle/5", "").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, r#""id 5""#));

    let settings = Settings {
        path_prefix: vec!["api".to_string()],
        ..Settings::default()
    };
    let (status, _) = send(app(settings), Method::GET, "/vehicle/5", "").await;
    assert_eq!(status, StatusCode::GONE);
}

#[tokio::test]
async fn test_pretty_json() {
    let settings = Settings {
        pretty_json: true,
        ..Settings::default()
    };
    let (_, body) = send(app(settings), Method::GET, "/admin/users", "").await;
    assert_eq!(body, "[\n  \"alice\",\n  \"bob\"\n]");
}

// ============================================================================
// 7. Runtime registration
// ============================================================================

#[tokio::test]
async fn test_service_registered_after_router_is_built() {
    let app = QuarkApp::new(Settings::default());
    let quark = std::sync::Arc::clone(app.quark());
    let router = app.into_axum_router();

    let (status, _) = send(router.clone(), Method::GET, "/hello/world", "").await;
    assert_eq!(status, StatusCode::GONE);

    quark
        .register_service(
            "root",
            vec![Procedure::new("Hello_World", |_console: Console| async {
                Ok(HttpResponse::ok("hello"))
            })],
        )
        .unwrap();

    assert_eq!(
        send(router, Method::GET, "/hello/world", "").await,
        (StatusCode::OK, "hello".to_string())
    );
}
