// ============================================================================
// TOAST - Notificaciones efímeras
// ============================================================================
// Cada toast lleva sus propios timers: aparece, se desvanece tras
// `toast_duration_ms` y se elimina `toast_fade_ms` después.
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;

use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, ElementBuilder};
use crate::viewmodels::Severity;
use crate::views::ids;

/// Retardo antes de añadir `show`, para que la transición CSS arranque
const ENTER_DELAY_MS: u32 = 10;

pub fn show_toast(message: &str, severity: Severity) -> Result<(), JsValue> {
    let container = get_element_by_id(ids::TOAST_CONTAINER)
        .ok_or_else(|| JsValue::from_str("#toast-container not found"))?;

    let toast = ElementBuilder::new("div")?
        .class(&format!("toast {}", severity.css_class()))
        .text(message)
        .build();
    append_child(&container, &toast)?;

    {
        let toast = toast.clone();
        Timeout::new(ENTER_DELAY_MS, move || {
            if let Err(e) = toast.class_list().add_1("show") {
                log::warn!("⚠️ No se pudo mostrar el toast: {:?}", e);
            }
        })
        .forget();
    }

    let fade_ms = CONFIG.ui_config.toast_fade_ms;
    Timeout::new(CONFIG.ui_config.toast_duration_ms, move || {
        if let Err(e) = toast.class_list().remove_1("show") {
            log::warn!("⚠️ No se pudo ocultar el toast: {:?}", e);
        }
        Timeout::new(fade_ms, move || toast.remove()).forget();
    })
    .forget();

    Ok(())
}
