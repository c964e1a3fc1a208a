use crate::calculator::Calculator;
use crate::client::ApiClient;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::examples::ExamplePicker;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub calculator: Calculator,
    pub dashboard: Dashboard,
    pub examples: ExamplePicker,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = ApiClient::new(&config)?;
        let dashboard = Dashboard::new(client.clone());
        let calculator = Calculator::new(client, &config, Some(dashboard.clone()));
        let examples = ExamplePicker::new(config.example_feedback);

        Ok(Self {
            config: Arc::new(config),
            calculator,
            dashboard,
            examples,
        })
    }
}
