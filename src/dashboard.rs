use crate::client::{
    ApiClient, LATEST_OPERATION_ENDPOINT, RECENT_OPERATIONS_ENDPOINT, STATS_ENDPOINT,
};
use crate::models::{DashboardView, LatestOperationResponse, RecentOperationsResponse, StatsResponse};
use crate::render;
use chrono::Local;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::{
    sync::RwLock,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info};

/// Polls the stats backend and keeps the three rendered regions.
#[derive(Clone)]
pub struct Dashboard {
    client: ApiClient,
    is_loading: Arc<AtomicBool>,
    view: Arc<RwLock<DashboardView>>,
}

/// Clears the busy flag however the refresh ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Dashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            is_loading: Arc::new(AtomicBool::new(false)),
            view: Arc::new(RwLock::new(DashboardView {
                stats: render::LOADING_HTML.to_string(),
                latest_operation: render::LOADING_HTML.to_string(),
                recent_operations: render::LOADING_HTML.to_string(),
                refreshed_at: None,
            })),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::Acquire)
    }

    pub async fn view(&self) -> DashboardView {
        self.view.read().await.clone()
    }

    /// Returns `false` without fetching anything when a refresh is already running.
    pub async fn load_all_data(&self) -> bool {
        if self
            .is_loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("dashboard already loading, skipping");
            return false;
        }
        let _busy = BusyGuard(&self.is_loading);

        debug!("loading all dashboard data");
        tokio::join!(
            self.load_stats(),
            self.load_latest_operation(),
            self.load_recent_operations()
        );

        self.view.write().await.refreshed_at = Some(render::format_timestamp(Local::now()));
        info!("dashboard data loaded");
        true
    }

    pub async fn load_stats(&self) {
        let data = self.client.fetch_api::<StatsResponse>(STATS_ENDPOINT).await;
        let ok = data.as_ref().is_some_and(|data| data.success);
        let html = render::render_stats(data.as_ref());
        self.view.write().await.stats = html;
        debug!(ok, "stats region rendered");
    }

    pub async fn load_latest_operation(&self) {
        let data = self
            .client
            .fetch_api::<LatestOperationResponse>(LATEST_OPERATION_ENDPOINT)
            .await;
        let html = render::render_latest_operation(data.as_ref(), Local::now());
        self.view.write().await.latest_operation = html;
        debug!("latest operation region rendered");
    }

    pub async fn load_recent_operations(&self) {
        let data = self
            .client
            .fetch_api::<RecentOperationsResponse>(RECENT_OPERATIONS_ENDPOINT)
            .await;
        let count = data.as_ref().map_or(0, |data| data.operations.len());
        let html = render::render_recent_operations(data.as_ref());
        self.view.write().await.recent_operations = html;
        debug!(count, "recent operations region rendered");
    }

    /// Loads once right away, then once per tick. Ticks that land while a
    /// refresh is still running are dropped rather than queued.
    pub fn spawn_polling(&self, every: Duration) -> JoinHandle<()> {
        let dashboard = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if dashboard.is_loading() {
                    debug!("poll tick skipped, refresh in flight");
                    continue;
                }
                let run = dashboard.clone();
                tokio::spawn(async move {
                    run.load_all_data().await;
                });
            }
        })
    }
}
