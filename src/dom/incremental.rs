// ============================================================================
// INCREMENTAL DOM UPDATES - Actualización incremental del DOM (estilo vanilla JS)
// ============================================================================
// El esqueleto se crea una vez; cada render solo toca los nodos cuyo
// contenido cambió. Inputs y file inputs se respetan mientras el usuario
// escribe.
// ============================================================================

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlSelectElement};

use crate::dom::{
    append_child, clear_children, create_element, get_element_by_id, input_value,
    set_disabled, set_input_value, set_style, set_text, set_visible, toggle_class,
    ElementBuilder,
};
use crate::viewmodels::page_viewmodel::{
    EnqueteSectionViewModel, HistoryRowViewModel, InfoViewModel, LimiteSectionViewModel,
    OverviewRowViewModel, PageViewModel, SelectViewModel, StatsViewModel,
};
use crate::views::ids;

/// Atributo con la firma de las opciones pintadas en un select/tbody
const SIGNATURE_ATTR: &str = "data-signature";

/// Huella corta de las filas de una tabla para saber si hay que repintarla
fn rows_signature<T: Hash>(rows: &[T]) -> String {
    let mut hasher = DefaultHasher::new();
    rows.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

fn by_id(id: &str) -> Result<Element, JsValue> {
    get_element_by_id(id).ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))
}

/// Aplicar el PageViewModel completo
pub fn apply_page(page: &PageViewModel) -> Result<(), JsValue> {
    update_select(ids::PROVINCE_SELECT, &page.provinces)?;
    update_select(ids::ZONE_SELECT, &page.zones)?;
    set_disabled(&by_id(ids::EXPORT_BTN)?, !page.export_enabled)?;

    update_limite(&page.limite)?;
    update_stats(page.stats.as_ref())?;
    update_info(page.info.as_ref())?;
    update_enquete(page.enquete.as_ref())?;
    update_history(&page.history)?;
    update_overview(&page.overview)?;
    Ok(())
}

/// Reconstruye las opciones solo si la lista cambió; si no, solo sincroniza
/// la selección y el estado habilitado.
fn update_select(id: &str, model: &SelectViewModel) -> Result<(), JsValue> {
    let select = by_id(id)?;

    let signature = model
        .options
        .iter()
        .map(|o| format!("{}={}", o.value, o.label))
        .collect::<Vec<_>>()
        .join("|");

    if select.get_attribute(SIGNATURE_ATTR).as_deref() != Some(signature.as_str()) {
        clear_children(&select);
        let placeholder = ElementBuilder::new("option")?
            .attr("value", "")?
            .text(model.placeholder)
            .build();
        append_child(&select, &placeholder)?;
        for option in &model.options {
            let node = ElementBuilder::new("option")?
                .attr("value", &option.value)?
                .text(&option.label)
                .build();
            append_child(&select, &node)?;
        }
        select.set_attribute(SIGNATURE_ATTR, &signature)?;
    }

    if let Some(element) = select.dyn_ref::<HtmlSelectElement>() {
        let selected = model.selected.as_deref().unwrap_or("");
        if element.value() != selected {
            element.set_value(selected);
        }
    }
    set_disabled(&select, !model.enabled)
}

fn update_file_input(input_id: &str, name_id: &str, file_name: Option<&str>) -> Result<(), JsValue> {
    set_text(&by_id(name_id)?, file_name.unwrap_or(""));
    if file_name.is_none() {
        let input = by_id(input_id)?;
        // Un archivo ya enviado no debe quedar seleccionado en el input
        if input_value(&input).map_or(false, |v| !v.is_empty()) {
            set_input_value(&input, "");
        }
    }
    Ok(())
}

fn update_limite(limite: &LimiteSectionViewModel) -> Result<(), JsValue> {
    set_visible(&by_id(ids::LIMITE_SECTION)?, limite.visible)?;
    update_file_input(ids::LIMITE_FILE, ids::LIMITE_FILE_NAME, limite.file_name.as_deref())?;
    set_input_value(&by_id(ids::ENQUETEUR_INPUT)?, &limite.enqueteur);
    set_input_value(&by_id(ids::DATE_DEBUT_INPUT)?, &limite.date_debut);
    set_disabled(&by_id(ids::UPLOAD_LIMITE_BTN)?, !limite.upload_enabled)
}

fn update_stats(stats: Option<&StatsViewModel>) -> Result<(), JsValue> {
    let section = by_id(ids::STATS_SECTION)?;
    let Some(stats) = stats else {
        return set_visible(&section, false);
    };
    set_visible(&section, true)?;

    let cells = [
        (ids::STAT_SURFACE_TOTALE, &stats.surface_totale),
        (ids::STAT_SURFACE_ENQUETEE, &stats.surface_enquetee),
        (ids::STAT_SURFACE_RESTANTE, &stats.surface_restante),
        (ids::STAT_PARCELLES, &stats.parcelles),
        (ids::STAT_POURCENTAGE, &stats.pourcentage),
        (ids::STAT_JOUR, &stats.jour),
        (ids::STAT_PARCELLES_AJOUTEES, &stats.parcelles_ajoutees),
        (ids::STAT_SURFACE_AJOUTEE, &stats.surface_ajoutee),
    ];
    for (id, text) in cells {
        set_text(&by_id(id)?, text);
    }

    set_style(&by_id(ids::PROGRESS_BAR)?, "width", &format!("{}%", stats.progress_width))
}

fn update_info(info: Option<&InfoViewModel>) -> Result<(), JsValue> {
    let section = by_id(ids::INFO_SECTION)?;
    let Some(info) = info else {
        return set_visible(&section, false);
    };
    set_visible(&section, true)?;

    set_text(&by_id(ids::INFO_PROVINCE)?, &info.province);
    set_text(&by_id(ids::INFO_ZONE)?, &info.zone);
    set_text(&by_id(ids::INFO_ENQUETEUR)?, &info.enqueteur);
    set_text(&by_id(ids::INFO_DATE_DEBUT)?, &info.date_debut);
    set_visible(&by_id(ids::CLOSED_BADGE)?, info.closed)?;
    set_visible(&by_id(ids::CLOSE_ZONE_BTN)?, !info.closed)?;
    set_visible(&by_id(ids::REOPEN_ZONE_BTN)?, info.closed)
}

fn update_enquete(enquete: Option<&EnqueteSectionViewModel>) -> Result<(), JsValue> {
    let section = by_id(ids::ENQUETE_SECTION)?;
    let Some(enquete) = enquete else {
        return set_visible(&section, false);
    };
    set_visible(&section, true)?;

    set_visible(&by_id(ids::ENQUETE_FORM)?, enquete.form_visible)?;
    let notice = by_id(ids::CLOSURE_NOTICE)?;
    set_text(&notice, enquete.closure_notice.as_deref().unwrap_or(""));
    set_visible(&notice, enquete.closure_notice.is_some())?;

    update_file_input(ids::ENQUETE_FILE, ids::ENQUETE_FILE_NAME, enquete.file_name.as_deref())?;
    set_input_value(&by_id(ids::NUMERO_JOUR_INPUT)?, &enquete.numero_jour);
    set_disabled(&by_id(ids::UPLOAD_ENQUETE_BTN)?, !enquete.upload_enabled)
}

fn text_cell(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("td")?.text(text).build())
}

fn history_row(row: &HistoryRowViewModel) -> Result<Element, JsValue> {
    let tr = create_element("tr")?;
    for text in [&row.date, &row.jour, &row.parcelles, &row.surface] {
        append_child(&tr, &text_cell(text)?)?;
    }
    for delta in [&row.parcelles_ajoutees, &row.surface_ajoutee] {
        let td = ElementBuilder::new("td")?
            .class(delta.css_class())
            .text(&delta.text)
            .build();
        append_child(&tr, &td)?;
    }
    Ok(tr)
}

fn update_history(rows: &[HistoryRowViewModel]) -> Result<(), JsValue> {
    set_visible(&by_id(ids::HISTORY_SECTION)?, !rows.is_empty())?;

    let body = by_id(ids::HISTORY_BODY)?;
    let signature = rows_signature(rows);
    if body.get_attribute(SIGNATURE_ATTR).as_deref() == Some(signature.as_str()) {
        return Ok(());
    }
    clear_children(&body);
    for row in rows {
        append_child(&body, &history_row(row)?)?;
    }
    body.set_attribute(SIGNATURE_ATTR, &signature)
}

fn overview_row(row: &OverviewRowViewModel) -> Result<Element, JsValue> {
    let tr = create_element("tr")?;
    for text in [&row.province, &row.zone, &row.enqueteur, &row.avancement, &row.parcelles] {
        append_child(&tr, &text_cell(text)?)?;
    }
    let status = ElementBuilder::new("td")?
        .class(if row.closed { "status status-closed" } else { "status status-open" })
        .text(&row.statut)
        .build();
    append_child(&tr, &status)?;
    toggle_class(&tr, "row-closed", row.closed)?;
    Ok(tr)
}

fn update_overview(rows: &[OverviewRowViewModel]) -> Result<(), JsValue> {
    set_visible(&by_id(ids::OVERVIEW_EMPTY)?, rows.is_empty())?;

    let body = by_id(ids::OVERVIEW_BODY)?;
    let signature = rows_signature(rows);
    if body.get_attribute(SIGNATURE_ATTR).as_deref() == Some(signature.as_str()) {
        return Ok(());
    }
    clear_children(&body);
    for row in rows {
        append_child(&body, &overview_row(row)?)?;
    }
    body.set_attribute(SIGNATURE_ATTR, &signature)
}
