use crate::client::ApiClient;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::models::{CalculationResponse, CalculatorView};
use crate::render;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::{sync::Mutex, time::sleep};
use tracing::{debug, error, info};

pub const EMPTY_EXPRESSION_MESSAGE: &str = "Por favor ingresa una expresión";
pub const UNKNOWN_SERVER_ERROR: &str = "Error desconocido del servidor";

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Rejected locally, nothing was sent.
    Empty,
    Success,
    Failed(String),
}

/// Shows the loading indicator until dropped, including when the submitting
/// request is abandoned mid-call.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn show(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the input field and the result, error and loading panels.
#[derive(Clone)]
pub struct Calculator {
    client: ApiClient,
    dashboard: Option<Dashboard>,
    view: Arc<Mutex<CalculatorView>>,
    loading: Arc<AtomicBool>,
    // Bumped on every shown message so a stale auto-hide timer becomes a no-op.
    message_generation: Arc<AtomicU64>,
    error_hide_after: Duration,
    refresh_after_success: Duration,
}

impl Calculator {
    pub fn new(client: ApiClient, config: &Config, dashboard: Option<Dashboard>) -> Self {
        Self {
            client,
            dashboard,
            view: Arc::new(Mutex::new(CalculatorView::default())),
            loading: Arc::new(AtomicBool::new(false)),
            message_generation: Arc::new(AtomicU64::new(0)),
            error_hide_after: config.error_hide_after,
            refresh_after_success: config.refresh_after_success,
        }
    }

    pub async fn view(&self) -> CalculatorView {
        let mut view = self.view.lock().await.clone();
        view.loading = self.loading.load(Ordering::Acquire);
        view
    }

    pub async fn set_input(&self, value: &str) {
        self.view.lock().await.expression = value.to_string();
    }

    pub async fn handle_submit(&self, raw: &str) -> SubmitOutcome {
        let expression = raw.trim().to_string();
        debug!(%expression, "submit");
        self.set_input(&expression).await;

        if expression.is_empty() {
            self.show_error(EMPTY_EXPRESSION_MESSAGE).await;
            return SubmitOutcome::Empty;
        }

        self.hide_all_messages().await;
        let _loading = LoadingGuard::show(&self.loading);

        info!(url = %self.client.calc_url(), "sending expression");
        match self.client.calculate(&expression).await {
            Ok(data) if data.success => {
                info!(%expression, "calculation succeeded");
                self.show_success(&expression, &data).await;
                self.schedule_dashboard_refresh();
                SubmitOutcome::Success
            }
            Ok(data) => {
                let message = data
                    .error
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
                error!(%message, "server rejected calculation");
                self.show_error(&message).await;
                SubmitOutcome::Failed(message)
            }
            Err(err) => {
                error!("connection error: {err}");
                let message = format!("Error de conexión: {err}");
                self.show_error(&message).await;
                SubmitOutcome::Failed(message)
            }
        }
    }

    async fn show_success(&self, expression: &str, data: &CalculationResponse) {
        let panel = render::result_panel(expression, data);
        self.message_generation.fetch_add(1, Ordering::AcqRel);
        self.loading.store(false, Ordering::Release);
        let mut view = self.view.lock().await;
        view.error = None;
        view.result = Some(panel);
    }

    /// Shows `message`, hides any result, and arms the auto-hide timer.
    pub async fn show_error(&self, message: &str) {
        let generation = self.message_generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.loading.store(false, Ordering::Release);
        {
            let mut view = self.view.lock().await;
            view.result = None;
            view.error = Some(message.to_string());
        }

        let calculator = self.clone();
        let delay = self.error_hide_after;
        tokio::spawn(async move {
            sleep(delay).await;
            if calculator.message_generation.load(Ordering::Acquire) == generation {
                calculator.hide_all_messages().await;
            }
        });
    }

    pub async fn hide_all_messages(&self) {
        self.message_generation.fetch_add(1, Ordering::AcqRel);
        self.loading.store(false, Ordering::Release);
        let mut view = self.view.lock().await;
        view.result = None;
        view.error = None;
    }

    fn schedule_dashboard_refresh(&self) {
        let Some(dashboard) = self.dashboard.clone() else {
            error!("dashboard is not available, skipping refresh");
            return;
        };
        let delay = self.refresh_after_success;
        tokio::spawn(async move {
            sleep(delay).await;
            info!("refreshing dashboard after calculation");
            dashboard.load_all_data().await;
        });
    }
}
