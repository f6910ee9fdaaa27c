use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use arc_swap::ArcSwap;
use axum::{routing::{get, post}, Router};
use floornav_core::{Graph, Navigator, SearchOptions};
use tracing::info;

use crate::errors::AppError;

pub mod config;
pub mod errors;
pub mod models;
pub mod routes;

/// One loaded location. Searches are serialized through the navigator lock.
pub struct LocationState {
    pub source: Option<PathBuf>,
    pub graph: Option<Arc<Graph>>, // None when not loaded
    pub navigator: Option<Mutex<Navigator>>,
    pub loaded_at_unix: u64,
}

impl LocationState {
    pub fn empty() -> Self {
        Self { source: None, graph: None, navigator: None, loaded_at_unix: 0 }
    }

    pub fn loaded(graph: Graph, source: Option<PathBuf>, options: &SearchOptions) -> Self {
        let graph = Arc::new(graph);
        let navigator = Navigator::with_options(Arc::clone(&graph), options.clone());
        Self { source, graph: Some(graph), navigator: Some(Mutex::new(navigator)), loaded_at_unix: now_unix() }
    }

    pub fn graph(&self) -> Result<&Arc<Graph>, AppError> {
        self.graph.as_ref().ok_or(AppError::NotLoaded)
    }

    pub fn navigator(&self) -> Result<MutexGuard<'_, Navigator>, AppError> {
        let nav = self.navigator.as_ref().ok_or(AppError::NotLoaded)?;
        nav.lock().map_err(|_| AppError::Internal(anyhow::anyhow!("navigator lock poisoned")))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub current: Arc<ArcSwap<LocationState>>, // atomic swap
    pub graph_path: Option<PathBuf>,
    pub options: SearchOptions,
}

impl AppState {
    pub fn new(graph_path: Option<PathBuf>, options: SearchOptions) -> Self {
        Self { current: Arc::new(ArcSwap::from_pointee(LocationState::empty())), graph_path, options }
    }

    /// Replaces the served location.
    pub fn install(&self, graph: Graph, source: Option<PathBuf>) {
        let state = LocationState::loaded(graph, source, &self.options);
        self.current.store(Arc::new(state));
    }

    /// Loads `graph_path` from disk, if configured.
    pub fn reload_from_disk(&self) -> anyhow::Result<usize> {
        let path = self.graph_path.as_ref().ok_or_else(|| anyhow::anyhow!("FLOORNAV_GRAPH not set"))?;
        let graph = load_graph_file(path)?;
        let n = graph.len();
        self.install(graph, Some(path.clone()));
        info!(path = %path.display(), waypoints = n, "location loaded from disk");
        Ok(n)
    }
}

pub fn load_graph_file(path: &Path) -> anyhow::Result<Graph> {
    let file = std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    let graph = Graph::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(graph)
}

pub fn now_unix() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/readyz", get(routes::readyz))
        .route("/version", get(routes::version))
        .route("/graph", post(routes::load_graph).get(routes::graph_summary))
        .route("/admin/reload", post(routes::reload))
        .route("/route", post(routes::route))
        .route("/route/length", get(routes::route_length))
        .route("/waypoints/:id", get(routes::waypoint))
        .route("/levels", get(routes::levels))
        .route("/levels/:level/waypoints", get(routes::level_waypoints))
        .with_state(state)
}
