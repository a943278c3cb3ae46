use anyhow::Result;
use axum::{
    extract::{Path as PathParam, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use songsim_core::catalog::{load_catalog, Catalog};
use songsim_core::resolve::{resolve_page, ResolveError, SongPage};
use songsim_core::retrievals::load_retrievals;
use songsim_core::sample::{RandomSampler, Sampler};
use songsim_core::{RetrievalSet, Song};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Immutable state loaded once at startup and shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub retrievals: Arc<BTreeMap<String, RetrievalSet>>,
    pub sampler: Arc<dyn Sampler>,
}

/// Load the song catalog and retrieval files, then build the router.
///
/// A catalog failure aborts startup. Retrieval failures are logged per file
/// and the rest of the directory is served anyway.
pub fn build_app(
    meta_path: impl AsRef<Path>,
    retrievals_dir: impl AsRef<Path>,
) -> Result<Router> {
    let catalog = load_catalog(meta_path)?;
    let (retrievals, errors) = load_retrievals(retrievals_dir);
    for e in &errors {
        tracing::warn!(file = %e.file, "skipping retrieval file: {:#}", e.error);
    }
    tracing::info!(
        songs = catalog.len(),
        retrievals = retrievals.len(),
        "data loaded"
    );

    let state = AppState {
        catalog: Arc::new(catalog),
        retrievals: Arc::new(retrievals),
        sampler: Arc::new(RandomSampler),
    };
    Ok(build_app_with_state(state))
}

/// Build the router over already-loaded state. Tests use this with
/// fabricated catalogs and deterministic samplers.
pub fn build_app_with_state(state: AppState) -> Router {
    // The research frontend is served from a different origin in development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/songs", get(songs_handler))
        .route("/song/:song_id", get(song_handler))
        .with_state(state)
        .layer(cors)
}

/// Full catalog, for the index page's song picker.
async fn songs_handler(State(state): State<AppState>) -> Json<Vec<Song>> {
    Json(state.catalog.songs().to_vec())
}

async fn song_handler(
    State(state): State<AppState>,
    PathParam(song_id): PathParam<String>,
) -> Result<Json<SongPage>, (StatusCode, String)> {
    match resolve_page(
        &song_id,
        &state.catalog,
        &state.retrievals,
        state.sampler.as_ref(),
    ) {
        Ok(page) => Ok(Json(page)),
        Err(e @ ResolveError::SongNotFound(_)) => Err((StatusCode::NOT_FOUND, e.to_string())),
        Err(e @ ResolveError::UnknownCandidate { .. }) => {
            tracing::error!(song = %song_id, "inconsistent retrieval data: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
