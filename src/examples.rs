use crate::calculator::Calculator;
use crate::models::ExamplesView;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::{sync::Mutex, time::sleep};
use tracing::debug;

pub const FEEDBACK_LABEL: &str = "Ejemplo cargado ✓";
pub const BUTTON_LABEL: &str = "Ver ejemplos";

/// (label, expression) pairs offered in the examples modal.
pub const EXAMPLES: &[(&str, &str)] = &[
    ("Suma y multiplicación", "15 + 27 * 3"),
    ("Paréntesis", "(45 - 12) / 3"),
    ("Potencia", "2 ^ 10"),
    ("Raíz cuadrada", "sqrt(144) + 5"),
    ("Porcentaje", "250 * 15 / 100"),
    ("Decimales", "3.75 * 4.2"),
];

#[derive(Clone)]
pub struct ExamplePicker {
    view: Arc<Mutex<ExamplesView>>,
    feedback_generation: Arc<AtomicU64>,
    feedback_for: Duration,
}

impl ExamplePicker {
    pub fn new(feedback_for: Duration) -> Self {
        Self {
            view: Arc::new(Mutex::new(ExamplesView::default())),
            feedback_generation: Arc::new(AtomicU64::new(0)),
            feedback_for,
        }
    }

    pub async fn view(&self) -> ExamplesView {
        self.view.lock().await.clone()
    }

    pub async fn open(&self) {
        let mut view = self.view.lock().await;
        view.modal_open = true;
        view.focus_input = false;
    }

    pub async fn close(&self) {
        self.view.lock().await.modal_open = false;
    }

    /// Copies `example` into the calculator input, closes the modal and
    /// flashes the confirmation label on the examples button.
    pub async fn fill(&self, calculator: &Calculator, example: &str) {
        calculator.set_input(example).await;
        debug!(%example, "example loaded");

        let generation = self.feedback_generation.fetch_add(1, Ordering::AcqRel) + 1;
        {
            let mut view = self.view.lock().await;
            view.modal_open = false;
            view.focus_input = true;
            view.feedback = true;
        }

        let picker = self.clone();
        tokio::spawn(async move {
            sleep(picker.feedback_for).await;
            if picker.feedback_generation.load(Ordering::Acquire) == generation {
                picker.view.lock().await.feedback = false;
            }
        });
    }

    pub fn button_label(view: &ExamplesView) -> &'static str {
        if view.feedback { FEEDBACK_LABEL } else { BUTTON_LABEL }
    }
}
