//! HTML fragments for the calculator panels and the three dashboard regions.
//!
//! Everything here is pure: callers pass in whatever the backend returned
//! (or `None` when the fetch failed) and get back markup to drop into the page.

use crate::models::{
    display_value, CalculationResponse, LatestOperationResponse, Operation,
    RecentOperationsResponse, ResultPanel, StatsResponse,
};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

pub const LOADING_HTML: &str = r#"<div class="text-center text-muted">Cargando...</div>"#;

pub const STATS_ERROR_HTML: &str =
    r#"<div class="text-center text-muted">Error cargando estadísticas</div>"#;

pub const LATEST_EMPTY_HTML: &str = r#"<div class="empty-state">
  <p>No hay operaciones recientes</p>
</div>"#;

pub const RECENT_EMPTY_HTML: &str = r#"<div class="empty-state">
  <p>No hay operaciones recientes</p>
  <small>Realiza tu primer cálculo para verlo aquí</small>
</div>"#;

const UNKNOWN_CITY: &str = "Desconocida";
const UNKNOWN_COUNTRY: &str = "Desconocido";

pub fn result_panel(expression: &str, data: &CalculationResponse) -> ResultPanel {
    let result = data
        .result
        .as_ref()
        .map(display_value)
        .unwrap_or_else(|| "N/A".to_string());

    ResultPanel {
        result_text: format!("{expression} = {result}"),
        explanation_text: non_empty(data.ai_explanation.as_deref())
            .unwrap_or("Explicación no disponible")
            .to_string(),
        location_text: format!(
            "Desde: {}, {} (IP: {})",
            non_empty(data.city.as_deref()).unwrap_or(UNKNOWN_CITY),
            non_empty(data.country.as_deref()).unwrap_or(UNKNOWN_COUNTRY),
            non_empty(data.ip.as_deref()).unwrap_or("N/A"),
        ),
    }
}

pub fn render_stats(data: Option<&StatsResponse>) -> String {
    let Some(stats) = data.filter(|data| data.success).and_then(|data| data.stats.as_ref()) else {
        return STATS_ERROR_HTML.to_string();
    };

    format!(
        r#"<div class="text-center">
  <div class="stats-number">{}</div>
  <div class="stats-label">Operaciones Totales</div>
  <div class="mt-3">
    <div class="stats-number">{}</div>
    <div class="stats-label">Usuarios Únicos</div>
  </div>
  <div class="mt-2"><small class="text-light opacity-75">Actualizado ahora</small></div>
</div>"#,
        stats.total_operaciones.unwrap_or(0),
        stats.usuarios_unicos.unwrap_or(0),
    )
}

pub fn render_latest_operation(data: Option<&LatestOperationResponse>, now: DateTime<Local>) -> String {
    let Some(op) = data.filter(|data| data.success).and_then(|data| data.operation.as_ref()) else {
        return LATEST_EMPTY_HTML.to_string();
    };

    let when = relative_time(op.fecha_hora.as_deref().and_then(parse_timestamp), now);
    format!(
        r#"<div class="operation-item">
  <div class="operation-expression">{}</div>
  <div class="operation-result">= {}</div>
  <div class="operation-location">{}</div>
  <div class="operation-location">{}</div>
</div>"#,
        escape_html(expression(op)),
        escape_html(&display_value(&op.resultado)),
        escape_html(&location(op)),
        when,
    )
}

pub fn render_recent_operations(data: Option<&RecentOperationsResponse>) -> String {
    let operations = match data {
        Some(data) if data.success && !data.operations.is_empty() => &data.operations,
        _ => return RECENT_EMPTY_HTML.to_string(),
    };

    let mut html = String::new();
    for op in operations {
        let raw = op.fecha_hora.as_deref().unwrap_or_default();
        let stamp = parse_timestamp(raw)
            .map(format_timestamp)
            .unwrap_or_else(|| raw.to_string());
        html.push_str(&format!(
            r#"<div class="operation-item">
  <div class="operation-expression">{}</div>
  <div class="operation-result">= {}</div>
  <div class="operation-location">{} <span class="ms-2">{}</span></div>
</div>
"#,
            escape_html(expression(op)),
            escape_html(&display_value(&op.resultado)),
            escape_html(&location(op)),
            escape_html(&stamp),
        ));
    }
    html
}

/// "Hace un momento" under a minute (or when the timestamp is unusable).
pub fn relative_time(when: Option<DateTime<Local>>, now: DateTime<Local>) -> String {
    let minutes = when.map(|when| (now - when).num_minutes()).unwrap_or(0);
    match minutes {
        m if m <= 0 => "Hace un momento".to_string(),
        1 => "Hace 1 minuto".to_string(),
        m => format!("Hace {m} minutos"),
    }
}

/// Accepts RFC 3339, RFC 2822 (HTTP-date style) and naive ISO timestamps in local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Local));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

pub fn format_timestamp(when: DateTime<Local>) -> String {
    when.format("%d/%m/%Y, %H:%M:%S").to_string()
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn expression(op: &Operation) -> &str {
    non_empty(op.operacion.as_deref()).unwrap_or("N/A")
}

fn location(op: &Operation) -> String {
    format!(
        "{}, {}",
        non_empty(op.ciudad.as_deref()).unwrap_or(UNKNOWN_CITY),
        non_empty(op.pais.as_deref()).unwrap_or(UNKNOWN_COUNTRY),
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatsSnapshot;
    use serde_json::json;

    fn at(raw: &str) -> DateTime<Local> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Local)
    }

    fn operation(fecha_hora: &str) -> Operation {
        Operation {
            operacion: Some("2 + 2".to_string()),
            resultado: json!(4),
            ciudad: Some("Quito".to_string()),
            pais: None,
            fecha_hora: Some(fecha_hora.to_string()),
        }
    }

    #[test]
    fn stats_placeholder_when_missing_or_unsuccessful() {
        assert_eq!(render_stats(None), STATS_ERROR_HTML);
        let failed = StatsResponse { success: false, stats: Some(StatsSnapshot::default()) };
        assert_eq!(render_stats(Some(&failed)), STATS_ERROR_HTML);
        let no_stats = StatsResponse { success: true, stats: None };
        assert_eq!(render_stats(Some(&no_stats)), STATS_ERROR_HTML);
    }

    #[test]
    fn stats_default_missing_counters_to_zero() {
        let data = StatsResponse {
            success: true,
            stats: Some(StatsSnapshot { total_operaciones: Some(12), usuarios_unicos: None }),
        };
        let html = render_stats(Some(&data));
        assert!(html.contains(r#"<div class="stats-number">12</div>"#));
        assert!(html.contains(r#"<div class="stats-number">0</div>"#));
        assert!(html.contains("Operaciones Totales"));
        assert!(html.contains("Usuarios Únicos"));
    }

    #[test]
    fn latest_placeholder_when_missing() {
        let now = at("2026-01-05T12:00:00Z");
        assert_eq!(render_latest_operation(None, now), LATEST_EMPTY_HTML);
        let empty = LatestOperationResponse { success: true, operation: None };
        assert_eq!(render_latest_operation(Some(&empty), now), LATEST_EMPTY_HTML);
    }

    #[test]
    fn latest_shows_location_fallback_and_age() {
        let now = at("2026-01-05T12:00:00Z");
        let data = LatestOperationResponse {
            success: true,
            operation: Some(operation("2026-01-05T11:55:00Z")),
        };
        let html = render_latest_operation(Some(&data), now);
        assert!(html.contains("2 + 2"));
        assert!(html.contains("= 4"));
        assert!(html.contains("Quito, Desconocido"));
        assert!(html.contains("Hace 5 minutos"));
    }

    #[test]
    fn recent_placeholder_when_missing_or_empty() {
        assert_eq!(render_recent_operations(None), RECENT_EMPTY_HTML);
        let empty = RecentOperationsResponse { success: true, operations: Vec::new() };
        assert_eq!(render_recent_operations(Some(&empty)), RECENT_EMPTY_HTML);
        let failed = RecentOperationsResponse { success: false, operations: vec![operation("")] };
        assert_eq!(render_recent_operations(Some(&failed)), RECENT_EMPTY_HTML);
    }

    #[test]
    fn recent_renders_one_item_per_operation() {
        let data = RecentOperationsResponse {
            success: true,
            operations: vec![operation("2026-01-05 10:30:00"), operation("not a date")],
        };
        let html = render_recent_operations(Some(&data));
        assert_eq!(html.matches(r#"class="operation-item""#).count(), 2);
        assert!(html.contains("05/01/2026, 10:30:00"));
        assert!(html.contains("not a date"));
    }

    #[test]
    fn recent_keeps_rows_with_missing_fields() {
        let data: RecentOperationsResponse = serde_json::from_value(json!({
            "success": true,
            "operations": [
                { "operacion": "6 * 7", "resultado": 42, "fecha_hora": "2026-01-05 10:30:00" },
                { "operacion": "2+2", "resultado": 4, "fecha_hora": null },
                { "resultado": 9 }
            ]
        }))
        .unwrap();
        let html = render_recent_operations(Some(&data));
        assert_eq!(html.matches(r#"class="operation-item""#).count(), 3);
        assert!(html.contains("2+2"));
        assert!(html.contains("= 9"));
        assert!(html.contains("N/A"));
        assert!(html.contains("05/01/2026, 10:30:00"));
    }

    #[test]
    fn latest_without_timestamp_reads_as_just_now() {
        let now = at("2026-01-05T12:00:00Z");
        let data = LatestOperationResponse {
            success: true,
            operation: Some(Operation { fecha_hora: None, ..operation("") }),
        };
        let html = render_latest_operation(Some(&data), now);
        assert!(html.contains("2 + 2"));
        assert!(html.contains("Hace un momento"));
    }

    #[test]
    fn relative_time_wording() {
        let now = at("2026-01-05T12:00:00Z");
        assert_eq!(relative_time(Some(at("2026-01-05T11:59:30Z")), now), "Hace un momento");
        assert_eq!(relative_time(Some(at("2026-01-05T11:59:00Z")), now), "Hace 1 minuto");
        assert_eq!(relative_time(Some(at("2026-01-05T11:00:00Z")), now), "Hace 60 minutos");
        assert_eq!(relative_time(Some(at("2026-01-05T12:10:00Z")), now), "Hace un momento");
        assert_eq!(relative_time(None, now), "Hace un momento");
    }

    #[test]
    fn parses_http_date_timestamps() {
        let parsed = parse_timestamp("Mon, 05 Jan 2026 11:00:00 GMT").unwrap();
        assert_eq!(parsed, at("2026-01-05T11:00:00Z"));
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn result_panel_uses_fallbacks() {
        let data = CalculationResponse {
            success: true,
            result: Some(json!(42)),
            ..CalculationResponse::default()
        };
        let panel = result_panel("6 * 7", &data);
        assert_eq!(panel.result_text, "6 * 7 = 42");
        assert_eq!(panel.explanation_text, "Explicación no disponible");
        assert_eq!(panel.location_text, "Desde: Desconocida, Desconocido (IP: N/A)");
    }

    #[test]
    fn escapes_markup_from_backend() {
        assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }
}
