use serde::{Deserialize, Serialize};

/// Archivo elegido por el usuario y todavía no enviado.
/// `F` es el handle de plataforma (`web_sys::File` en el navegador).
#[derive(Clone, PartialEq, Debug)]
pub struct PendingFile<F> {
    pub name: String,
    pub handle: F,
}

impl<F> PendingFile<F> {
    pub fn new(name: impl Into<String>, handle: F) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// Campos multipart de `POST /api/upload/limite`
#[derive(Clone, Debug)]
pub struct LimiteUpload<F> {
    pub file: PendingFile<F>,
    pub province: String,
    pub code_zone: String,
    pub enqueteur: String,
    pub date_debut_enquete: String,
}

/// Campos multipart de `POST /api/upload/enquete`
#[derive(Clone, Debug)]
pub struct EnqueteUpload<F> {
    pub file: PendingFile<F>,
    pub province: String,
    pub code_zone: String,
    pub numero_jour: u32,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct UploadLimiteResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub surface_totale_ha: Option<f64>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct UploadEnqueteResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub nb_parcelles: Option<i64>,
    pub surface_enquetee_ha: Option<f64>,
    pub surface_restante_ha: Option<f64>,
    pub pourcentage_avancement: Option<f64>,
    pub parcelles_ajoutees: Option<i64>,
    pub surface_ajoutee_ha: Option<f64>,
}

/// Respuesta de cloturer / decloturer
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Mensaje de error de aplicación, con un texto por defecto si el servidor no manda ninguno
pub fn error_text(error: &Option<String>) -> String {
    error
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or("Erreur inconnue")
        .to_string()
}
