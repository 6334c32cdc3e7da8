// ============================================================================
// APP VIEW - Esqueleto completo de la página
// ============================================================================
// Se crea una sola vez. Todas las secciones dependientes de zona empiezan
// ocultas; el primer render del ViewModel decide qué se ve.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::views::enquete::{render_enquete_section, render_history_section};
use crate::views::limite::render_limite_section;
use crate::views::overview::render_overview;
use crate::views::selector::render_selector_bar;
use crate::views::zone_panels::{render_info_section, render_stats_section};
use crate::views::{ids, Dispatch};

fn render_loading_overlay() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .id(ids::LOADING_OVERLAY)?
        .class("loading-overlay")
        .hidden()?
        .child(&ElementBuilder::new("div")?.class("spinner").build())?
        .build())
}

pub fn render_app(dispatch: &Dispatch) -> Result<Element, JsValue> {
    log::debug!("🎬 render_app()");

    let header = render_selector_bar(dispatch)?;

    let zone_column = ElementBuilder::new("div")?
        .class("zone-column")
        .child(&render_limite_section(dispatch)?)?
        .child(&render_stats_section()?)?
        .child(&render_info_section(dispatch)?)?
        .child(&render_enquete_section(dispatch)?)?
        .child(&render_history_section()?)?
        .build();

    let main = ElementBuilder::new("main")?
        .class("app-main")
        .child(&zone_column)?
        .child(&render_overview(dispatch)?)?
        .build();

    let toasts = ElementBuilder::new("div")?
        .id(ids::TOAST_CONTAINER)?
        .class("toast-container")
        .build();

    Ok(ElementBuilder::new("div")?
        .class("app-container")
        .children(&[&header, &main, &toasts, &render_loading_overlay()?])?
        .build())
}
