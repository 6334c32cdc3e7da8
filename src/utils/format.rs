// ============================================================================
// FORMATO - Números tal y como se muestran en pantalla
// ============================================================================
// El servidor ya redondea (2 decimales para ha, 1 para %). Aquí solo se
// formatea: nada de cálculos.
// ============================================================================

/// Texto para campos ausentes
pub const PLACEHOLDER: &str = "-";

/// 12.0 -> "12", 45.2 -> "45.2"; NaN/inf -> "0"
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        // también evita "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

pub fn format_hectares(value: Option<f64>) -> String {
    format!("{} ha", format_number(value.unwrap_or(0.0)))
}

pub fn format_percent(value: Option<f64>) -> String {
    format!("{}%", format_number(value.unwrap_or(0.0)))
}

pub fn format_count(value: Option<i64>) -> String {
    value.unwrap_or(0).to_string()
}

pub fn format_day(value: Option<i64>) -> String {
    format!("#{}", value.unwrap_or(0))
}

/// "+3" / "-2"
pub fn format_signed_count(value: i64) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// "+1.5" / "-2.25"
pub fn format_signed_number(value: f64) -> String {
    let text = format_number(value);
    if text.starts_with('-') {
        text
    } else {
        format!("+{}", text)
    }
}

pub fn format_signed_hectares(value: f64) -> String {
    format!("{} ha", format_signed_number(value))
}

pub fn text_or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Ancho de la barra de progreso, acotado a [0, 100]
pub fn progress_width(percent: Option<f64>) -> f64 {
    match percent {
        Some(p) if p.is_finite() => p.clamp(0.0, 100.0),
        _ => 0.0,
    }
}
