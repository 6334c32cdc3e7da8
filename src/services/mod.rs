// ============================================================================
// SERVICES - SOLO comunicación con el backend
// ============================================================================

pub mod api_client;

pub use api_client::ApiClient;

use crate::models::{
    ActionResponse, EnqueteUpload, LimiteUpload, UploadEnqueteResponse, UploadLimiteResponse,
    ZoneEntry, ZoneStatus, ZonesOverview,
};

/// Contrato HTTP que consume el ViewModel.
///
/// `Err(String)` = fallo de transporte o de parseo. Los fallos de aplicación
/// llegan como `Ok` con `success == false` dentro de la respuesta.
// Single-threaded (WASM): los futures no necesitan ser Send
#[allow(async_fn_in_trait)]
pub trait ZoneApi {
    /// Handle de archivo de la plataforma
    type File: Clone;

    async fn list_provinces(&self) -> Result<Vec<String>, String>;

    async fn list_zones(&self, province: &str) -> Result<Vec<ZoneEntry>, String>;

    async fn zone_info(&self, province: &str, code_zone: &str) -> Result<ZoneStatus, String>;

    async fn upload_limite(
        &self,
        upload: &LimiteUpload<Self::File>,
    ) -> Result<UploadLimiteResponse, String>;

    async fn upload_enquete(
        &self,
        upload: &EnqueteUpload<Self::File>,
    ) -> Result<UploadEnqueteResponse, String>;

    async fn close_zone(&self, province: &str, code_zone: &str) -> Result<ActionResponse, String>;

    async fn reopen_zone(&self, province: &str, code_zone: &str) -> Result<ActionResponse, String>;

    async fn zones_overview(&self) -> Result<ZonesOverview, String>;

    /// URL de descarga del Excel PH1 (se navega a ella, no se hace fetch)
    fn export_url(&self, province: &str, code_zone: &str) -> String;
}
