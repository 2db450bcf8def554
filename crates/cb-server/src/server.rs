use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tower_http::services::ServeDir;

use cb_slot::{ReelGenerator, WeightTable};

use crate::config::ServerConfig;
use crate::media::list_ad_videos;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen_addr {0:?}")]
    ListenAddr(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<ServerConfig>,
}

/// Build the full application router: the JSON API, with everything else
/// (index page, js/css, config.json itself) served from the content root.
pub fn build_router(cfg: Arc<ServerConfig>) -> Router {
    let static_files = ServeDir::new(&cfg.content_root);

    Router::new()
        .route("/api/init-game", get(init_game))
        .route("/api/generate-reel", get(generate_reel))
        .route("/api/get-ad-videos", get(get_ad_videos))
        .fallback_service(static_files)
        .with_state(AppState { cfg })
}

pub async fn run_server(cfg: ServerConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = cfg
        .listen_addr
        .parse()
        .map_err(|_| ServerError::ListenAddr(cfg.listen_addr.clone()))?;

    let app = build_router(Arc::new(cfg));

    tracing::info!(%addr, "coinbomb HTTP server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════════
// GET /api/init-game
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct InitGameParams {
    reel_count: Option<String>,
    bomb_multiplier: Option<String>,
}

/// Initial game state: `reel_count` independent unbiased reels.
async fn init_game(State(st): State<AppState>, Query(params): Query<InitGameParams>) -> Json<Value> {
    let reel_count = parse_int_or(params.reel_count.as_deref(), 3);
    let bomb_multiplier = parse_float_or(params.bomb_multiplier.as_deref(), 1.0);

    let length = st.cfg.reel_strip_length();
    let table = WeightTable::load(&st.cfg.weights_path());
    let mut generator = ReelGenerator::new();

    let reels: Vec<Vec<String>> = (0..reel_count)
        .map(|_| generator.generate_strip(&table, length, &[], bomb_multiplier))
        .collect();

    Json(json!({ "reels": reels }))
}

// ═══════════════════════════════════════════════════════════════
// GET /api/generate-reel
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct GenerateReelParams {
    bias_symbols: Option<String>,
    bomb_multiplier: Option<String>,
}

/// One reel for a mid-game update, optionally rigged: `bias_symbols` is a
/// comma-separated list of symbols that must appear in the strip.
async fn generate_reel(
    State(st): State<AppState>,
    Query(params): Query<GenerateReelParams>,
) -> Json<Value> {
    let bias_symbols: Vec<String> = params
        .bias_symbols
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let bomb_multiplier = parse_float_or(params.bomb_multiplier.as_deref(), 1.0);

    let length = st.cfg.reel_strip_length();
    let table = WeightTable::load(&st.cfg.weights_path());
    let mut generator = ReelGenerator::new();

    let strip = generator.generate_strip(&table, length, &bias_symbols, bomb_multiplier);

    Json(json!({ "strip": strip }))
}

// ═══════════════════════════════════════════════════════════════
// GET /api/get-ad-videos
// ═══════════════════════════════════════════════════════════════

async fn get_ad_videos(State(st): State<AppState>) -> Json<Vec<String>> {
    Json(list_ad_videos(&st.cfg.ad_video_dir()))
}

// Player-facing parameters coerce instead of failing: a malformed value
// falls back to its default and the endpoint still returns 200.

fn parse_int_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

fn parse_float_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(default)
}
