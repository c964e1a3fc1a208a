use crate::calculator::SubmitOutcome;
use crate::errors::AppError;
use crate::models::{CalculateForm, CalculatorView, DashboardView, ExampleForm, RefreshResponse};
use crate::state::AppState;
use crate::ui::{render_index, PageSettings};
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let calculator = state.calculator.view().await;
    let dashboard = state.dashboard.view().await;
    let examples = state.examples.view().await;
    let settings = PageSettings::from_config(&state.config);
    Html(render_index(&calculator, &dashboard, &examples, &settings))
}

pub async fn calculate(
    State(state): State<AppState>,
    Form(form): Form<CalculateForm>,
) -> Redirect {
    state.calculator.handle_submit(&form.expression).await;
    Redirect::to("/")
}

pub async fn api_calculate(
    State(state): State<AppState>,
    Json(payload): Json<CalculateForm>,
) -> Result<Json<CalculatorView>, AppError> {
    match state.calculator.handle_submit(&payload.expression).await {
        SubmitOutcome::Success => Ok(Json(state.calculator.view().await)),
        SubmitOutcome::Empty => Err(AppError::bad_request(
            crate::calculator::EMPTY_EXPRESSION_MESSAGE,
        )),
        SubmitOutcome::Failed(message) => Err(AppError::bad_gateway(message)),
    }
}

pub async fn get_calculator(State(state): State<AppState>) -> Json<CalculatorView> {
    Json(state.calculator.view().await)
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.dashboard.view().await)
}

pub async fn refresh_dashboard(State(state): State<AppState>) -> Json<RefreshResponse> {
    let refreshed = state.dashboard.load_all_data().await;
    Json(RefreshResponse { refreshed })
}

pub async fn open_examples(State(state): State<AppState>) -> Redirect {
    state.examples.open().await;
    Redirect::to("/")
}

pub async fn close_examples(State(state): State<AppState>) -> Redirect {
    state.examples.close().await;
    Redirect::to("/")
}

pub async fn fill_example(
    State(state): State<AppState>,
    Form(form): Form<ExampleForm>,
) -> Redirect {
    state.examples.fill(&state.calculator, &form.example).await;
    Redirect::to("/")
}
