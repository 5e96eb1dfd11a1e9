mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use image::{ImageFormat, Rgba};
use taqui::api::handlers::generate_image_handler;
use taqui::infrastructure::imaging::BAND_HEIGHT;
use taqui::state::AppState;

fn create_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/generate-image", get(generate_image_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_generate_image_success() {
    let ctx = common::create_test_context().await;
    let server = create_server(ctx.state.clone());

    let response = server
        .get("/api/generate-image")
        .add_query_param("text", "Oi")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.header("content-disposition"), "inline");

    let bytes = response.as_bytes();
    assert!(!bytes.is_empty());

    let output = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(output.dimensions(), (320, 240));
    assert_eq!(*output.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    assert_eq!(*output.get_pixel(0, 200), common::TEMPLATE_COLOR);

    let glyph_pixels = (0..BAND_HEIGHT)
        .flat_map(|y| (0..output.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| output.get_pixel(x, y)[0] < 100)
        .count();
    assert!(glyph_pixels > 100, "caption text was not drawn");
}

#[tokio::test]
async fn test_generate_image_accepts_unicode_and_markup() {
    let ctx = common::create_test_context().await;
    let server = create_server(ctx.state.clone());

    let response = server
        .get("/api/generate-image")
        .add_query_param("text", "tá <aqui> & ali")
        .await;

    response.assert_status_ok();
    assert!(!response.as_bytes().is_empty());
}

#[tokio::test]
async fn test_generate_image_empty_text() {
    let ctx = common::create_test_context().await;
    let server = create_server(ctx.state.clone());

    let response = server.get("/api/generate-image?text=").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_generate_image_missing_text() {
    let ctx = common::create_test_context().await;
    let server = create_server(ctx.state.clone());

    let response = server.get("/api/generate-image").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_generate_image_missing_template() {
    let ctx = common::create_context_without_template().await;
    let server = create_server(ctx.state.clone());

    let response = server
        .get("/api/generate-image")
        .add_query_param("text", "Oi")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "asset_error");
}
