//! End-to-end tests for the CoinBomb HTTP API.
//!
//! Each test builds a fresh router over a temp-dir content root and drives
//! it with `tower::ServiceExt::oneshot`, no network involved. Game config
//! documents are written into the temp dir to exercise the live-reload and
//! silent-fallback behavior.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use cb_server::config::ServerConfig;
use cb_server::server::build_router;

const DEFAULT_SYMBOLS: [&str; 9] = [
    "coin_1",
    "coin_stack",
    "coin_pile",
    "gem_1",
    "gem_many",
    "bomb_1",
    "bomb_atom",
    "card_item",
    "random_item",
];

fn test_app(root: &Path) -> Router {
    let cfg = ServerConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        content_root: root.to_path_buf(),
    };
    build_router(Arc::new(cfg))
}

async fn get(app: &Router, path: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    let (status, bytes) = get(app, path).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, body)
}

fn reels(body: &Value) -> Vec<Vec<String>> {
    serde_json::from_value(body["reels"].clone()).unwrap()
}

fn strip(body: &Value) -> Vec<String> {
    serde_json::from_value(body["strip"].clone()).unwrap()
}

fn assert_default_symbols(symbols: &[String]) {
    for sym in symbols {
        assert!(
            DEFAULT_SYMBOLS.contains(&sym.as_str()),
            "unexpected symbol {sym}"
        );
    }
}

#[tokio::test]
async fn init_game_defaults() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path());

    let (status, body) = get_json(&app, "/api/init-game").await;
    assert_eq!(status, StatusCode::OK);

    let reels = reels(&body);
    assert_eq!(reels.len(), 3);
    for reel in &reels {
        assert_eq!(reel.len(), 6);
        assert_default_symbols(reel);
    }
}

#[tokio::test]
async fn init_game_reel_count() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path());

    let (status, body) = get_json(&app, "/api/init-game?reel_count=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reels(&body).len(), 5);
}

#[tokio::test]
async fn init_game_malformed_params_coerce() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path());

    let (status, body) =
        get_json(&app, "/api/init-game?reel_count=abc&bomb_multiplier=wild").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reels(&body).len(), 3);
}

#[tokio::test]
async fn init_game_negative_reel_count_yields_no_reels() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path());

    let (status, body) = get_json(&app, "/api/init-game?reel_count=-2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(reels(&body).is_empty());
}

#[tokio::test]
async fn init_game_bomb_multiplier_zero() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path());

    for _ in 0..20 {
        let (status, body) = get_json(&app, "/api/init-game?bomb_multiplier=0").await;
        assert_eq!(status, StatusCode::OK);
        for reel in reels(&body) {
            assert!(!reel.iter().any(|s| s == "bomb_1" || s == "bomb_atom"));
        }
    }
}

#[tokio::test]
async fn generate_reel_shape() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path());

    let (status, body) = get_json(&app, "/api/generate-reel").await;
    assert_eq!(status, StatusCode::OK);

    let strip = strip(&body);
    assert_eq!(strip.len(), 6);
    assert_default_symbols(&strip);
}

#[tokio::test]
async fn generate_reel_bias_symbols() {
    let dir = TempDir::new().unwrap();
    // Zero out the bias symbols' weights so every appearance must come from
    // a rigging insertion, making the guarantee exact rather than likely.
    std::fs::write(
        dir.path().join("symbol-weights.json"),
        json!({
            "symbols": {
                "gem_1": { "probability": 0 },
                "bomb_1": { "probability": 0 }
            }
        })
        .to_string(),
    )
    .unwrap();
    let app = test_app(dir.path());

    for _ in 0..20 {
        let (status, body) =
            get_json(&app, "/api/generate-reel?bias_symbols=gem_1,bomb_1").await;
        assert_eq!(status, StatusCode::OK);

        let strip = strip(&body);
        assert_eq!(strip.len(), 6);
        assert!(strip.iter().any(|s| s == "gem_1"));
        assert!(strip.iter().any(|s| s == "bomb_1"));
    }
}

#[tokio::test]
async fn generate_reel_bias_symbols_trimmed() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path());

    // Whitespace and empty entries in the list are dropped, not errors.
    let (status, body) =
        get_json(&app, "/api/generate-reel?bias_symbols=%20gem_1%20,,%20").await;
    assert_eq!(status, StatusCode::OK);
    assert!(strip(&body).iter().any(|s| s == "gem_1"));
}

#[tokio::test]
async fn strip_length_from_game_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        json!({ "reel_strip_length": 10 }).to_string(),
    )
    .unwrap();
    let app = test_app(dir.path());

    let (_, body) = get_json(&app, "/api/generate-reel").await;
    assert_eq!(strip(&body).len(), 10);
}

#[tokio::test]
async fn strip_length_clamped_and_defaulted() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path());

    std::fs::write(
        dir.path().join("config.json"),
        json!({ "reel_strip_length": 1 }).to_string(),
    )
    .unwrap();
    let (_, body) = get_json(&app, "/api/generate-reel").await;
    assert_eq!(strip(&body).len(), 3);

    // Config is re-read per request, so a live edit takes effect...
    std::fs::write(
        dir.path().join("config.json"),
        json!({ "reel_strip_length": "abc" }).to_string(),
    )
    .unwrap();
    let (_, body) = get_json(&app, "/api/generate-reel").await;
    assert_eq!(strip(&body).len(), 6);
}

#[tokio::test]
async fn weight_overrides_are_honored() {
    let dir = TempDir::new().unwrap();
    let mut symbols = serde_json::Map::new();
    for sym in DEFAULT_SYMBOLS {
        symbols.insert(sym.to_string(), json!({ "probability": 0 }));
    }
    symbols.insert("coin_1".to_string(), json!({ "probability": 1 }));
    std::fs::write(
        dir.path().join("symbol-weights.json"),
        json!({ "symbols": symbols }).to_string(),
    )
    .unwrap();
    let app = test_app(dir.path());

    let (_, body) = get_json(&app, "/api/init-game").await;
    for reel in reels(&body) {
        assert!(reel.iter().all(|s| s == "coin_1"));
    }
}

#[tokio::test]
async fn broken_weight_overrides_fall_back() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("symbol-weights.json"), "{ nope").unwrap();
    let app = test_app(dir.path());

    let (status, body) = get_json(&app, "/api/generate-reel").await;
    assert_eq!(status, StatusCode::OK);
    let strip = strip(&body);
    assert_eq!(strip.len(), 6);
    assert_default_symbols(&strip);
}

#[tokio::test]
async fn ad_videos_listing() {
    let dir = TempDir::new().unwrap();
    let app = test_app(dir.path());

    // Directory absent: empty array, not an error.
    let (status, body) = get_json(&app, "/api/get-ad-videos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let video_dir = dir.path().join("ad").join("video");
    std::fs::create_dir_all(&video_dir).unwrap();
    std::fs::write(video_dir.join("promo.mp4"), b"").unwrap();
    std::fs::write(video_dir.join("banner.webm"), b"").unwrap();
    std::fs::write(video_dir.join("readme.txt"), b"").unwrap();

    let (status, body) = get_json(&app, "/api/get-ad-videos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["banner.webm", "promo.mp4"]));
}

#[tokio::test]
async fn static_files_served_from_content_root() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>slots</html>").unwrap();
    let js_dir = dir.path().join("js");
    std::fs::create_dir_all(&js_dir).unwrap();
    std::fs::write(js_dir.join("app.js"), "console.log('spin');").unwrap();
    let app = test_app(dir.path());

    let (status, bytes) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"<html>slots</html>");

    let (status, bytes) = get(&app, "/js/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"console.log('spin');");

    let (status, _) = get(&app, "/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
