// ============================================================================
// ENQUETE VIEW - Upload journalier + historique
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::viewmodels::Intent;
use crate::views::limite::{render_file_picker, render_text_field};
use crate::views::overview::render_table_head;
use crate::views::{ids, Dispatch};

pub fn render_enquete_section(dispatch: &Dispatch) -> Result<Element, JsValue> {
    let file_picker = render_file_picker(
        ids::ENQUETE_FILE,
        ids::ENQUETE_FILE_NAME,
        "Fichier enquête du jour (.gpkg)",
        dispatch,
        Intent::EnqueteFileSelected,
    )?;
    let numero_jour = render_text_field(
        ids::NUMERO_JOUR_INPUT,
        "Numéro de jour",
        "number",
        "input",
        dispatch,
        Intent::NumeroJourChanged,
    )?;

    let upload_btn = ElementBuilder::new("button")?
        .id(ids::UPLOAD_ENQUETE_BTN)?
        .class("btn btn-primary")
        .attr("disabled", "")?
        .text("📤 Uploader l'enquête")
        .build();
    {
        let dispatch = dispatch.clone();
        on_click(&upload_btn, move |_| dispatch(Intent::SubmitEnquete))?;
    }

    let form = ElementBuilder::new("div")?
        .id(ids::ENQUETE_FORM)?
        .class("upload-form")
        .children(&[&file_picker, &numero_jour, &upload_btn])?
        .build();

    let notice = ElementBuilder::new("p")?
        .id(ids::CLOSURE_NOTICE)?
        .class("closure-notice")
        .hidden()?
        .build();

    Ok(ElementBuilder::new("section")?
        .id(ids::ENQUETE_SECTION)?
        .class("card enquete-section")
        .hidden()?
        .child(&ElementBuilder::new("h2")?.text("📋 Enquête journalière").build())?
        .children(&[&form, &notice])?
        .build())
}

pub fn render_history_section() -> Result<Element, JsValue> {
    let table = ElementBuilder::new("table")?
        .class("data-table")
        .child(&render_table_head(&[
            "Date", "Jour", "Parcelles", "Surface (ha)", "Parcelles +/-", "Surface +/-",
        ])?)?
        .child(&ElementBuilder::new("tbody")?.id(ids::HISTORY_BODY)?.build())?
        .build();

    Ok(ElementBuilder::new("section")?
        .id(ids::HISTORY_SECTION)?
        .class("card history-section")
        .hidden()?
        .child(&ElementBuilder::new("h2")?.text("🗓️ Historique").build())?
        .child(&table)?
        .build())
}
