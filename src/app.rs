// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Monta el esqueleto en #app y conecta vistas -> Intent -> ZoneViewModel.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::services::ApiClient;
use crate::viewmodels::{Intent, ZoneViewModel};
use crate::views::{render_app, Dispatch, WebView};

type PageController = ZoneViewModel<ApiClient, WebView>;

pub struct App {
    view_model: Rc<PageController>,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let view_model = Rc::new(ZoneViewModel::new(ApiClient::new(), WebView, today));

        Ok(Self { view_model, root })
    }

    /// Cada intent corre como su propio future en el event loop del navegador
    fn dispatcher(&self) -> Dispatch {
        let view_model = self.view_model.clone();
        Rc::new(move |intent: Intent<web_sys::File>| {
            let view_model = view_model.clone();
            spawn_local(async move {
                view_model.handle(intent).await;
            });
        })
    }

    /// Montar el esqueleto y lanzar la carga inicial
    pub fn mount(&self) -> Result<(), JsValue> {
        let dispatch = self.dispatcher();

        clear_children(&self.root);
        let page = render_app(&dispatch)?;
        append_child(&self.root, &page)?;
        log::info!("✅ Página montada");

        dispatch(Intent::Init);
        Ok(())
    }
}
