#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Stand-in for the calculation webhook and the stats backend.
///
/// Expressions containing `fail` get `success: false`, `boom` gets a 500,
/// anything else evaluates to 42.
#[derive(Clone, Default)]
pub struct Backend {
    pub empty: bool,
    pub stats_delay: Duration,
    pub calc_delay: Duration,
    pub calc_hits: Arc<AtomicUsize>,
    pub stats_hits: Arc<AtomicUsize>,
    pub latest_hits: Arc<AtomicUsize>,
    pub recent_hits: Arc<AtomicUsize>,
}

impl Backend {
    pub fn empty() -> Self {
        Self { empty: true, ..Self::default() }
    }

    pub fn slow_stats(delay: Duration) -> Self {
        Self { stats_delay: delay, ..Self::default() }
    }

    pub fn slow_calc(delay: Duration) -> Self {
        Self { calc_delay: delay, ..Self::default() }
    }

    pub fn hits(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn router(self) -> Router {
        Router::new()
            .route("/calc", post(calc))
            .route("/api/stats", get(stats))
            .route("/api/operations/latest", get(latest))
            .route("/api/operations/recent", get(recent))
            .with_state(self)
    }

    /// Serves on the current runtime and returns the base URL.
    pub async fn spawn(self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Serves from a dedicated thread so the backend outlives any one test runtime.
    pub fn spawn_detached(self) -> String {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let base_url = self.spawn().await;
                tx.send(base_url).unwrap();
                std::future::pending::<()>().await;
            });
        });
        rx.recv().unwrap()
    }
}

async fn calc(State(backend): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    backend.calc_hits.fetch_add(1, Ordering::SeqCst);
    let expression = body["expression"].as_str().unwrap_or_default().to_string();
    if !backend.calc_delay.is_zero() {
        sleep(backend.calc_delay).await;
    }

    if expression.contains("boom") {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "internal" })));
    }
    if expression.contains("fail") {
        return (StatusCode::OK, Json(json!({ "success": false, "error": "Expresión inválida" })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "result": 42,
            "ai_explanation": "Se multiplican los factores.",
            "city": "Quito",
            "country": "Ecuador",
            "ip": "10.0.0.7"
        })),
    )
}

async fn stats(State(backend): State<Backend>) -> (StatusCode, Json<Value>) {
    backend.stats_hits.fetch_add(1, Ordering::SeqCst);
    if !backend.stats_delay.is_zero() {
        sleep(backend.stats_delay).await;
    }
    if backend.empty {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "success": false })));
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "stats": { "total_operaciones": 128, "usuarios_unicos": 9 } })),
    )
}

async fn latest(State(backend): State<Backend>) -> Json<Value> {
    backend.latest_hits.fetch_add(1, Ordering::SeqCst);
    if backend.empty {
        return Json(json!({ "success": false }));
    }
    Json(json!({
        "success": true,
        "operation": {
            "operacion": "6 * 7",
            "resultado": "42",
            "ciudad": "Quito",
            "pais": "Ecuador",
            "fecha_hora": "2026-01-05T11:00:00Z"
        }
    }))
}

async fn recent(State(backend): State<Backend>) -> Json<Value> {
    backend.recent_hits.fetch_add(1, Ordering::SeqCst);
    if backend.empty {
        return Json(json!({ "success": true, "operations": [] }));
    }
    Json(json!({
        "success": true,
        "operations": [
            { "operacion": "6 * 7", "resultado": 42, "ciudad": "Quito", "pais": "Ecuador", "fecha_hora": "2026-01-05T11:00:00Z" },
            { "operacion": "1 + 1", "resultado": 2, "ciudad": null, "pais": "Chile", "fecha_hora": "2026-01-05 10:30:00" }
        ]
    }))
}
