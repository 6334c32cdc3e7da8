// ============================================================================
// LIMITE VIEW - Upload de la limite de zone (zona sin configurar)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{event_file, event_value, on_change, on_click, on_input, ElementBuilder};
use crate::models::PendingFile;
use crate::viewmodels::Intent;
use crate::views::{ids, Dispatch};

/// Input de archivo + etiqueta con el nombre elegido.
/// `to_intent` decide a qué slot va el archivo.
pub fn render_file_picker(
    input_id: &str,
    name_id: &str,
    label: &str,
    dispatch: &Dispatch,
    to_intent: fn(PendingFile<web_sys::File>) -> Intent<web_sys::File>,
) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(input_id)?
        .attr("type", "file")?
        .attr("accept", ".gpkg")?
        .build();
    {
        let dispatch = dispatch.clone();
        on_change(&input, move |e| {
            // Cancelar el diálogo no borra el archivo ya elegido
            if let Some(file) = event_file(&e) {
                dispatch(to_intent(PendingFile::new(file.name(), file)));
            }
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("form-group file-picker")
        .child(&ElementBuilder::new("label")?.attr("for", input_id)?.text(label).build())?
        .child(&input)?
        .child(&ElementBuilder::new("span")?.id(name_id)?.class("file-name").build())?
        .build())
}

/// Input de texto con etiqueta que emite un intent por cada cambio
pub fn render_text_field(
    id: &str,
    label: &str,
    input_type: &str,
    event: &str,
    dispatch: &Dispatch,
    to_intent: fn(String) -> Intent<web_sys::File>,
) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("form-input")
        .attr("type", input_type)?
        .build();

    let dispatch = dispatch.clone();
    let handler = move |e: web_sys::Event| {
        if let Some(value) = event_value(&e) {
            dispatch(to_intent(value));
        }
    };
    if event == "change" {
        on_change(&input, handler)?;
    } else {
        on_input(&input, handler)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(&ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(&input)?
        .build())
}

pub fn render_limite_section(dispatch: &Dispatch) -> Result<Element, JsValue> {
    let file_picker = render_file_picker(
        ids::LIMITE_FILE,
        ids::LIMITE_FILE_NAME,
        "Fichier limite (.gpkg)",
        dispatch,
        Intent::LimiteFileSelected,
    )?;
    let enqueteur = render_text_field(
        ids::ENQUETEUR_INPUT,
        "Enquêteur",
        "text",
        "input",
        dispatch,
        Intent::EnqueteurChanged,
    )?;
    let date_debut = render_text_field(
        ids::DATE_DEBUT_INPUT,
        "Date début enquête",
        "date",
        "change",
        dispatch,
        Intent::DateDebutChanged,
    )?;

    let upload_btn = ElementBuilder::new("button")?
        .id(ids::UPLOAD_LIMITE_BTN)?
        .class("btn btn-primary")
        .attr("disabled", "")?
        .text("📤 Uploader la limite")
        .build();
    {
        let dispatch = dispatch.clone();
        on_click(&upload_btn, move |_| dispatch(Intent::SubmitLimite))?;
    }

    Ok(ElementBuilder::new("section")?
        .id(ids::LIMITE_SECTION)?
        .class("card limite-section")
        .hidden()?
        .child(&ElementBuilder::new("h2")?.text("Configuration de la zone").build())?
        .children(&[&file_picker, &enqueteur, &date_debut, &upload_btn])?
        .build())
}
