use crate::config::Config;
use crate::examples::{ExamplePicker, EXAMPLES};
use crate::models::{CalculatorView, DashboardView, ExamplesView};
use crate::render::escape_html;

/// Timer values the page script needs.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub poll_ms: u128,
    pub error_hide_ms: u128,
}

impl PageSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_ms: config.poll_interval.as_millis(),
            error_hide_ms: config.error_hide_after.as_millis(),
        }
    }
}

pub fn render_index(
    calculator: &CalculatorView,
    dashboard: &DashboardView,
    examples: &ExamplesView,
    settings: &PageSettings,
) -> String {
    let refreshed = dashboard
        .refreshed_at
        .as_deref()
        .map(|at| format!("Última actualización: {}", escape_html(at)))
        .unwrap_or_default();

    fill_template(
        INDEX_HTML,
        &[
            ("EXPRESSION", escape_html(&calculator.expression)),
            ("AUTOFOCUS", (if examples.focus_input { "autofocus" } else { "" }).to_string()),
            ("LOADING_HIDDEN", hidden_attr(!calculator.loading)),
            ("RESULT", render_result(calculator)),
            ("ERROR", render_error(calculator)),
            ("EXAMPLES_BUTTON", ExamplePicker::button_label(examples).to_string()),
            ("EXAMPLES_FEEDBACK", (if examples.feedback { "feedback" } else { "" }).to_string()),
            ("EXAMPLES_MODAL", render_examples_modal(examples)),
            ("STATS", dashboard.stats.clone()),
            ("LATEST", dashboard.latest_operation.clone()),
            ("RECENT", dashboard.recent_operations.clone()),
            ("REFRESHED", refreshed),
            ("POLL_MS", settings.poll_ms.to_string()),
            ("ERROR_HIDE_MS", settings.error_hide_ms.to_string()),
        ],
    )
}

fn render_result(calculator: &CalculatorView) -> String {
    let Some(panel) = calculator.result.as_ref() else {
        return String::new();
    };
    format!(
        r#"<section id="result" class="panel result">
      <h2>Resultado</h2>
      <p id="resultText" class="result-text">{}</p>
      <p id="explanationText">{}</p>
      <p id="locationText" class="muted">{}</p>
    </section>"#,
        escape_html(&panel.result_text),
        escape_html(&panel.explanation_text),
        escape_html(&panel.location_text),
    )
}

fn render_error(calculator: &CalculatorView) -> String {
    let Some(message) = calculator.error.as_deref() else {
        return String::new();
    };
    format!(
        r#"<section id="error" class="panel error"><p id="errorText">{}</p></section>"#,
        escape_html(message)
    )
}

fn render_examples_modal(examples: &ExamplesView) -> String {
    if !examples.modal_open {
        return String::new();
    }

    let mut items = String::new();
    for (label, expression) in EXAMPLES {
        items.push_str(&format!(
            r#"<form method="post" action="/examples/fill">
          <input type="hidden" name="example" value="{expr}" />
          <button type="submit" class="example-item"><strong>{label}</strong> <code>{expr}</code></button>
        </form>
"#,
            expr = escape_html(expression),
            label = escape_html(label),
        ));
    }

    format!(
        r#"<div id="examplesModal" class="modal" role="dialog" aria-modal="true">
      <div class="modal-card">
        <h2>Ejemplos</h2>
        {items}
        <form method="post" action="/examples/close">
          <button type="submit" class="btn-secondary">Cerrar</button>
        </form>
      </div>
    </div>"#
    )
}

fn hidden_attr(hidden: bool) -> String {
    if hidden { "hidden".to_string() } else { String::new() }
}

/// Single pass over `{{KEY}}` markers, so substituted text is never rescanned.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calculadora</title>
  <style>
    :root {
      --bg: #1f2340;
      --card: rgba(255, 255, 255, 0.08);
      --ink: #f4f4f8;
      --muted: #b8b9d0;
      --accent: #7c83fd;
      --ok: #4caf50;
      --bad: #ff6b6b;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg), #2d1f4a);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      display: grid;
      grid-template-columns: minmax(0, 1fr) minmax(0, 380px);
      gap: 24px;
      padding: 32px 18px;
    }

    @media (max-width: 860px) {
      body { grid-template-columns: 1fr; }
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 16px;
      align-content: start;
    }

    h1, h2 { margin: 0; }
    .muted { color: var(--muted); }

    input[type="text"] {
      width: 100%;
      padding: 14px 16px;
      border-radius: 12px;
      border: 1px solid rgba(255, 255, 255, 0.2);
      background: rgba(0, 0, 0, 0.2);
      color: var(--ink);
      font-size: 1.1rem;
    }

    button {
      border: none;
      border-radius: 12px;
      padding: 12px 18px;
      font-size: 1rem;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    .btn-secondary { background: transparent; border: 1px solid rgba(255, 255, 255, 0.3); }
    .examples-btn.feedback { background: rgba(76, 175, 80, 0.2); border-color: var(--ok); }

    .panel { border-radius: 14px; padding: 16px; }
    .panel.result { background: rgba(76, 175, 80, 0.12); }
    .panel.error { background: rgba(255, 107, 107, 0.15); color: var(--bad); }
    .result-text { font-size: 1.4rem; font-weight: 600; }

    .stats-number { font-size: 2rem; font-weight: 700; }
    .stats-label { color: var(--muted); font-size: 0.85rem; text-transform: uppercase; }
    .operation-item { border-bottom: 1px solid rgba(255, 255, 255, 0.1); padding: 10px 0; }
    .operation-expression { font-family: monospace; }
    .operation-result { font-weight: 600; }
    .operation-location { color: var(--muted); font-size: 0.85rem; }
    .empty-state { text-align: center; color: var(--muted); }
    .text-center { text-align: center; }

    .modal {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.55);
      display: grid;
      place-items: center;
    }

    .modal-card {
      background: var(--bg);
      border-radius: 18px;
      padding: 24px;
      display: grid;
      gap: 10px;
      min-width: min(420px, 90vw);
    }

    .example-item { width: 100%; text-align: left; background: rgba(255, 255, 255, 0.06); }
  </style>
</head>
<body>
  <main class="card">
    <header>
      <h1>Calculadora inteligente</h1>
      <p class="muted">Escribe una expresión y recibe el resultado con una explicación.</p>
    </header>

    <form id="calculatorForm" method="post" action="/calculate">
      <input id="expression" name="expression" type="text" value="{{EXPRESSION}}" placeholder="Ej: 15 + 27 * 3" {{AUTOFOCUS}} />
      <p><button type="submit">Calcular</button></p>
    </form>

    <form method="post" action="/examples/open">
      <button type="submit" class="btn-secondary examples-btn {{EXAMPLES_FEEDBACK}}">{{EXAMPLES_BUTTON}}</button>
    </form>

    <div id="loading" class="muted" {{LOADING_HIDDEN}}>Calculando...</div>
    {{RESULT}}
    {{ERROR}}
  </main>

  <aside class="card">
    <h2>Estadísticas</h2>
    <div id="statsContent">{{STATS}}</div>
    <h2>Última operación</h2>
    <div id="latestOperation">{{LATEST}}</div>
    <h2>Operaciones recientes</h2>
    <div id="recentOperations">{{RECENT}}</div>
    <small id="refreshedAt" class="muted">{{REFRESHED}}</small>
  </aside>

  {{EXAMPLES_MODAL}}

  <script>
    const regions = {
      stats: document.getElementById('statsContent'),
      latest_operation: document.getElementById('latestOperation'),
      recent_operations: document.getElementById('recentOperations'),
    };
    const refreshedEl = document.getElementById('refreshedAt');

    const refreshDashboard = async () => {
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        return;
      }
      const view = await res.json();
      Object.entries(regions).forEach(([key, el]) => {
        el.innerHTML = view[key];
      });
      refreshedEl.textContent = view.refreshed_at ? `Última actualización: ${view.refreshed_at}` : '';
    };

    setInterval(() => refreshDashboard().catch(() => {}), {{POLL_MS}});

    const errorEl = document.getElementById('error');
    if (errorEl) {
      setTimeout(() => errorEl.remove(), {{ERROR_HIDE_MS}});
    }
  </script>
</body>
</html>
"#;
