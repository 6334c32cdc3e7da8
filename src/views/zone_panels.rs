// ============================================================================
// ZONE PANELS - Estadísticas e información de la zona configurada
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::viewmodels::Intent;
use crate::views::{ids, Dispatch};

fn stat_card(id: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("stat-card")
        .child(&ElementBuilder::new("div")?.id(id)?.class("stat-value").text("0").build())?
        .child(&ElementBuilder::new("div")?.class("stat-label").text(label).build())?
        .build())
}

pub fn render_stats_section() -> Result<Element, JsValue> {
    let grid = ElementBuilder::new("div")?.class("stats-grid").build();
    for (id, label) in [
        (ids::STAT_SURFACE_TOTALE, "Surface zone"),
        (ids::STAT_SURFACE_ENQUETEE, "Surface enquêtée"),
        (ids::STAT_SURFACE_RESTANTE, "Surface restante"),
        (ids::STAT_PARCELLES, "Parcelles"),
        (ids::STAT_POURCENTAGE, "Avancement"),
        (ids::STAT_JOUR, "Jour"),
    ] {
        append_child(&grid, &stat_card(id, label)?)?;
    }

    let progress = ElementBuilder::new("div")?
        .class("progress")
        .child(&ElementBuilder::new("div")?.id(ids::PROGRESS_BAR)?.class("progress-bar").build())?
        .build();

    let daily = ElementBuilder::new("div")?
        .class("stats-grid daily")
        .child(&stat_card(ids::STAT_PARCELLES_AJOUTEES, "Parcelles ajoutées aujourd'hui")?)?
        .child(&stat_card(ids::STAT_SURFACE_AJOUTEE, "Surface ajoutée aujourd'hui")?)?
        .build();

    Ok(ElementBuilder::new("section")?
        .id(ids::STATS_SECTION)?
        .class("card stats-section")
        .hidden()?
        .child(&ElementBuilder::new("h2")?.text("📈 Avancement").build())?
        .children(&[&grid, &progress, &daily])?
        .build())
}

fn info_line(id: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("info-line")
        .child(&ElementBuilder::new("span")?.class("info-label").text(label).build())?
        .child(&ElementBuilder::new("span")?.id(id)?.class("info-value").text("-").build())?
        .build())
}

pub fn render_info_section(dispatch: &Dispatch) -> Result<Element, JsValue> {
    let badge = ElementBuilder::new("span")?
        .id(ids::CLOSED_BADGE)?
        .class("badge badge-closed")
        .text("Clôturée")
        .hidden()?
        .build();

    let close_btn = ElementBuilder::new("button")?
        .id(ids::CLOSE_ZONE_BTN)?
        .class("btn btn-danger")
        .text("🔒 Clôturer la zone")
        .build();
    let reopen_btn = ElementBuilder::new("button")?
        .id(ids::REOPEN_ZONE_BTN)?
        .class("btn btn-secondary")
        .text("🔓 Rouvrir la zone")
        .hidden()?
        .build();
    {
        let dispatch = dispatch.clone();
        on_click(&close_btn, move |_| dispatch(Intent::CloseZone))?;
    }
    {
        let dispatch = dispatch.clone();
        on_click(&reopen_btn, move |_| dispatch(Intent::ReopenZone))?;
    }

    let title = ElementBuilder::new("div")?
        .class("section-title")
        .child(&ElementBuilder::new("h2")?.text("ℹ️ Informations").build())?
        .child(&badge)?
        .build();

    Ok(ElementBuilder::new("section")?
        .id(ids::INFO_SECTION)?
        .class("card info-section")
        .hidden()?
        .child(&title)?
        .child(&info_line(ids::INFO_PROVINCE, "Province")?)?
        .child(&info_line(ids::INFO_ZONE, "Zone")?)?
        .child(&info_line(ids::INFO_ENQUETEUR, "Enquêteur")?)?
        .child(&info_line(ids::INFO_DATE_DEBUT, "Début enquête")?)?
        .children(&[&close_btn, &reopen_btn])?
        .build())
}
