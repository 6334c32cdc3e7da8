// ============================================================================
// ZONE SURVEY PWA - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que crean el DOM y emiten Intents (sin lógica)
// - ViewModels: Sesión + lógica de la página, testeable sin navegador
// - Services: SOLO comunicación API
// - State: Sesión y últimos datos del servidor
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
mod dom;
mod views;
mod app;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!(
        "🚀 Zone Survey PWA - entorno {} - API {}",
        CONFIG.environment,
        if CONFIG.api_base_url.is_empty() { "(mismo origen)" } else { CONFIG.api_base_url.as_str() }
    );

    let app = App::new()?;
    app.mount()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}
