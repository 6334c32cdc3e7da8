// ============================================================================
// OVERVIEW VIEW - Vue d'ensemble de toutes les zones configurées
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::viewmodels::Intent;
use crate::views::{ids, Dispatch};

/// Cabecera `<thead>` con las columnas dadas
pub fn render_table_head(columns: &[&str]) -> Result<Element, JsValue> {
    let row = ElementBuilder::new("tr")?.build();
    for column in columns {
        append_child(&row, &ElementBuilder::new("th")?.text(column).build())?;
    }
    Ok(ElementBuilder::new("thead")?.child(&row)?.build())
}

pub fn render_overview(dispatch: &Dispatch) -> Result<Element, JsValue> {
    let refresh_btn = ElementBuilder::new("button")?
        .id(ids::REFRESH_OVERVIEW_BTN)?
        .class("btn btn-small")
        .text("🔄 Actualiser")
        .build();
    {
        let dispatch = dispatch.clone();
        on_click(&refresh_btn, move |_| dispatch(Intent::RefreshOverview))?;
    }

    let title = ElementBuilder::new("div")?
        .class("section-title")
        .child(&ElementBuilder::new("h2")?.text("Vue d'ensemble").build())?
        .child(&refresh_btn)?
        .build();

    let table = ElementBuilder::new("table")?
        .class("data-table")
        .child(&render_table_head(&[
            "Province", "Zone", "Enquêteur", "Avancement", "Parcelles", "Statut",
        ])?)?
        .child(&ElementBuilder::new("tbody")?.id(ids::OVERVIEW_BODY)?.build())?
        .build();

    let empty = ElementBuilder::new("p")?
        .id(ids::OVERVIEW_EMPTY)?
        .class("empty-state")
        .text("Aucune zone configurée")
        .build();

    Ok(ElementBuilder::new("section")?
        .class("card overview-section")
        .children(&[&title, &table, &empty])?
        .build())
}
