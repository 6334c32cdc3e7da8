use crate::models::PendingFile;

/// Acción del usuario (o del ciclo de vida de la página) como dato.
/// Las vistas solo emiten intents; toda la lógica vive en `ZoneViewModel::handle`.
#[derive(Clone, Debug)]
pub enum Intent<F> {
    /// Carga inicial: provincias + vista de conjunto
    Init,
    ProvinceSelected(String),
    ZoneSelected(String),
    LimiteFileSelected(PendingFile<F>),
    EnqueteFileSelected(PendingFile<F>),
    EnqueteurChanged(String),
    DateDebutChanged(String),
    NumeroJourChanged(String),
    SubmitLimite,
    SubmitEnquete,
    Export,
    CloseZone,
    ReopenZone,
    RefreshOverview,
}

impl<F> Intent<F> {
    /// Nombre corto para los logs (sin volcar archivos ni texto del usuario)
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Init => "init",
            Intent::ProvinceSelected(_) => "province_selected",
            Intent::ZoneSelected(_) => "zone_selected",
            Intent::LimiteFileSelected(_) => "limite_file_selected",
            Intent::EnqueteFileSelected(_) => "enquete_file_selected",
            Intent::EnqueteurChanged(_) => "enqueteur_changed",
            Intent::DateDebutChanged(_) => "date_debut_changed",
            Intent::NumeroJourChanged(_) => "numero_jour_changed",
            Intent::SubmitLimite => "submit_limite",
            Intent::SubmitEnquete => "submit_enquete",
            Intent::Export => "export",
            Intent::CloseZone => "close_zone",
            Intent::ReopenZone => "reopen_zone",
            Intent::RefreshOverview => "refresh_overview",
        }
    }
}
