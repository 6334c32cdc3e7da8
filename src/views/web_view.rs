// ============================================================================
// WEB VIEW - ViewPort sobre el DOM real
// ============================================================================

use crate::dom::{apply_page, get_element_by_id, set_display, window};
use crate::viewmodels::{PageViewModel, Severity, ViewPort};
use crate::views::{ids, show_toast};

/// Los errores de DOM se registran y nunca tumban la página
#[derive(Clone, Copy, Default)]
pub struct WebView;

impl ViewPort for WebView {
    fn render(&self, page: &PageViewModel) {
        if let Err(e) = apply_page(page) {
            log::error!("❌ Error aplicando render: {:?}", e);
        }
    }

    fn notify(&self, message: &str, severity: Severity) {
        if let Err(e) = show_toast(message, severity) {
            log::error!("❌ Error mostrando toast '{}': {:?}", message, e);
        }
    }

    fn set_busy(&self, busy: bool) {
        let Some(overlay) = get_element_by_id(ids::LOADING_OVERLAY) else {
            log::warn!("⚠️ #{} no encontrado", ids::LOADING_OVERLAY);
            return;
        };
        if let Err(e) = set_display(&overlay, if busy { "flex" } else { "none" }) {
            log::error!("❌ Error cambiando overlay: {:?}", e);
        }
    }

    fn navigate(&self, url: &str) {
        let result = window()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("No window"))
            .and_then(|w| w.location().set_href(url));
        if let Err(e) = result {
            log::error!("❌ Error navegando a {}: {:?}", url, e);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
