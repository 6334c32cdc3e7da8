// ============================================================================
// SELECTOR VIEW - Cabecera con provincia, zona y export
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{event_value, on_change, on_click, ElementBuilder};
use crate::viewmodels::page_viewmodel::{PROVINCE_PLACEHOLDER, ZONE_PLACEHOLDER};
use crate::viewmodels::Intent;
use crate::views::{ids, Dispatch};

fn render_select(id: &str, label: &str, placeholder: &str) -> Result<(Element, Element), JsValue> {
    let select = ElementBuilder::new("select")?
        .id(id)?
        .class("form-select")
        .child(
            &ElementBuilder::new("option")?
                .attr("value", "")?
                .text(placeholder)
                .build(),
        )?
        .build();

    let group = ElementBuilder::new("div")?
        .class("form-group")
        .child(&ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(&select)?
        .build();

    Ok((group, select))
}

pub fn render_selector_bar(dispatch: &Dispatch) -> Result<Element, JsValue> {
    let (province_group, province_select) =
        render_select(ids::PROVINCE_SELECT, "Province", PROVINCE_PLACEHOLDER)?;
    let (zone_group, zone_select) = render_select(ids::ZONE_SELECT, "Zone", ZONE_PLACEHOLDER)?;
    zone_select.set_attribute("disabled", "")?;

    {
        let dispatch = dispatch.clone();
        on_change(&province_select, move |e| {
            if let Some(value) = event_value(&e) {
                dispatch(Intent::ProvinceSelected(value));
            }
        })?;
    }
    {
        let dispatch = dispatch.clone();
        on_change(&zone_select, move |e| {
            if let Some(value) = event_value(&e) {
                dispatch(Intent::ZoneSelected(value));
            }
        })?;
    }

    let export_btn = ElementBuilder::new("button")?
        .id(ids::EXPORT_BTN)?
        .class("btn btn-export")
        .attr("disabled", "")?
        .text("📊 Export PH1")
        .build();
    {
        let dispatch = dispatch.clone();
        on_click(&export_btn, move |_| dispatch(Intent::Export))?;
    }

    let bar = ElementBuilder::new("div")?
        .class("selector-bar")
        .children(&[&province_group, &zone_group, &export_btn])?
        .build();

    ElementBuilder::new("header")?
        .class("app-header")
        .child(&ElementBuilder::new("h1")?.text("Suivi des enquêtes").build())?
        .child(&bar)
        .map(ElementBuilder::build)
}
