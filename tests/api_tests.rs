use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

// Función helper para crear la app de test
fn create_test_app() -> axum::Router {
    // Router básico con la misma forma que la app real
    axum::Router::new()
        .route("/health", axum::routing::get(|| async { "OK" }))
        .route("/api/auth/login", axum::routing::post(|| async { "OK" }))
        .route("/api/viaje", axum::routing::get(|| async { "[]" }))
        .route("/api/reporte/export", axum::routing::get(|| async { StatusCode::NO_CONTENT }))
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_endpoint_exists() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_viaje_list_endpoint_exists() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/api/viaje").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_export_vacio_responde_sin_contenido() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/reporte/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Sin viajes no hay archivo: no-op deliberado, nunca un 500
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
