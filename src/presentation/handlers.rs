// HTTP request handlers
use crate::domain::aspect::Lamp;
use crate::domain::frame::SignalFrame;
use crate::presentation::app_state::AppState;
use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
pub struct LampState {
    pub name: &'static str,
    pub colour: &'static str,
    pub lit: bool,
}

#[derive(Debug, Serialize)]
pub struct SignalSnapshot {
    pub server_code: String,
    pub train: String,
    pub reading: Option<i64>,
    pub available: bool,
    pub dark: bool,
    pub lamps: Vec<LampState>,
    pub lit: Vec<&'static str>,
    pub readout: String,
    pub observed_at: DateTime<Utc>,
}

impl SignalSnapshot {
    fn from_frame(frame: &SignalFrame, state: &AppState) -> Self {
        Self {
            server_code: state.selection.server_code.clone(),
            train: state.selection.train.as_str().to_string(),
            reading: frame.reading.value(),
            available: !frame.readout.is_error(),
            dark: frame.aspect.is_dark(),
            lamps: Lamp::ALL
                .iter()
                .map(|lamp| LampState {
                    name: lamp.name(),
                    colour: lamp.colour(),
                    lit: frame.aspect.is_lit(*lamp),
                })
                .collect(),
            lit: frame.aspect.lamps().map(Lamp::name).collect(),
            readout: frame.readout.to_string(),
            observed_at: frame.observed_at,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest signal frame as JSON
pub async fn signal_snapshot(State(state): State<Arc<AppState>>) -> Json<SignalSnapshot> {
    let frame = state.board.current();
    Json(SignalSnapshot::from_frame(&frame, &state))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/signal", get(signal_snapshot))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
