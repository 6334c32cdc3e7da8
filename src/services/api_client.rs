// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP al backend Flask
// ============================================================================

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};
use crate::config::CONFIG;
use crate::models::{
    ActionResponse, EnqueteUpload, LimiteUpload, PendingFile, UploadEnqueteResponse,
    UploadLimiteResponse, ZoneEntry, ZoneStatus, ZonesOverview,
};
use crate::services::ZoneApi;

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(&CONFIG.api_base_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST JSON {province, code_zone} y parseo del cuerpo
    async fn post_zone_key<T: DeserializeOwned>(
        &self,
        path: &str,
        province: &str,
        code_zone: &str,
    ) -> Result<T, String> {
        let request = ZoneKeyRequest { province, code_zone };

        let response = Request::post(&self.url(path))
            .json(&request)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        read_json_body(response).await
    }

    async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: FormData) -> Result<T, String> {
        let response = Request::post(&self.url(path))
            .body(form)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        read_json_body(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneApi for ApiClient {
    type File = File;

    /// Listar provincias
    async fn list_provinces(&self) -> Result<Vec<String>, String> {
        let response = Request::get(&self.url("/api/provinces"))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        response.json::<Vec<String>>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    /// Listar zonas de una provincia
    async fn list_zones(&self, province: &str) -> Result<Vec<ZoneEntry>, String> {
        let url = self.url(&format!("/api/zones/{}", province));

        log::info!("🗺️ Obteniendo zonas de la provincia: {}", province);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        response.json::<Vec<ZoneEntry>>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    /// Estado e información de una zona
    async fn zone_info(&self, province: &str, code_zone: &str) -> Result<ZoneStatus, String> {
        log::info!("📋 Obteniendo info de zona: {} / {}", province, code_zone);

        let response = Request::post(&self.url("/api/zone/info"))
            .json(&ZoneKeyRequest { province, code_zone })
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            let status = response.status();
            let error_text = response.text().await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("HTTP error {}: {}", status, error_text));
        }

        response.json::<ZoneStatus>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    /// Subir el archivo limite de la zona
    async fn upload_limite(&self, upload: &LimiteUpload<File>) -> Result<UploadLimiteResponse, String> {
        log::info!("📤 Subiendo limite '{}' para {} / {} (enquêteur: {})",
                   upload.file.name, upload.province, upload.code_zone, upload.enqueteur);

        let form = build_form(&upload.file, &[
            ("province", upload.province.as_str()),
            ("code_zone", upload.code_zone.as_str()),
            ("enqueteur", upload.enqueteur.as_str()),
            ("date_debut_enquete", upload.date_debut_enquete.as_str()),
        ])?;

        let response: UploadLimiteResponse = self.post_multipart("/api/upload/limite", form).await?;

        if response.success {
            log::info!("✅ Limite aceptada: {:?} ha", response.surface_totale_ha);
        } else {
            log::error!("❌ Limite rechazada: {:?}", response.error);
        }

        Ok(response)
    }

    /// Subir un archivo de enquête del día
    async fn upload_enquete(&self, upload: &EnqueteUpload<File>) -> Result<UploadEnqueteResponse, String> {
        log::info!("📤 Subiendo enquête '{}' (jour {}) para {} / {}",
                   upload.file.name, upload.numero_jour, upload.province, upload.code_zone);

        let numero_jour = upload.numero_jour.to_string();
        let form = build_form(&upload.file, &[
            ("province", upload.province.as_str()),
            ("code_zone", upload.code_zone.as_str()),
            ("numero_jour", numero_jour.as_str()),
        ])?;

        let response: UploadEnqueteResponse = self.post_multipart("/api/upload/enquete", form).await?;

        if response.success {
            log::info!("✅ Enquête aceptada: {:?} parcelas ({:?} nuevas)",
                       response.nb_parcelles, response.parcelles_ajoutees);
        } else {
            log::error!("❌ Enquête rechazada: {:?}", response.error);
        }

        Ok(response)
    }

    /// Clôturer una zona
    async fn close_zone(&self, province: &str, code_zone: &str) -> Result<ActionResponse, String> {
        log::info!("🔒 Clôturando zona: {} / {}", province, code_zone);
        self.post_zone_key("/api/zone/cloturer", province, code_zone).await
    }

    /// Dé-clôturer una zona
    async fn reopen_zone(&self, province: &str, code_zone: &str) -> Result<ActionResponse, String> {
        log::info!("🔓 Reabriendo zona: {} / {}", province, code_zone);
        self.post_zone_key("/api/zone/decloturer", province, code_zone).await
    }

    /// Vista de conjunto de todas las zonas configuradas
    async fn zones_overview(&self) -> Result<ZonesOverview, String> {
        let response = Request::get(&self.url("/api/zones/all"))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        response.json::<ZonesOverview>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    fn export_url(&self, province: &str, code_zone: &str) -> String {
        self.url(&format!("/api/export/ph1/{}/{}", province, code_zone))
    }
}

/// El backend responde los fallos de aplicación con 4xx/5xx y cuerpo JSON
/// `{success: false, error}`: se lee el cuerpo sea cual sea el status.
async fn read_json_body<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    let ok = response.ok();
    let status = response.status();
    let status_text = response.status_text();

    match response.json::<T>().await {
        Ok(body) => Ok(body),
        Err(e) if ok => Err(format!("Parse error: {}", e)),
        Err(_) => Err(format!("HTTP {}: {}", status, status_text)),
    }
}

fn build_form(file: &PendingFile<File>, fields: &[(&str, &str)]) -> Result<FormData, String> {
    let form = FormData::new()
        .map_err(|e| format!("FormData error: {:?}", e))?;
    form.append_with_blob_and_filename("file", &file.handle, &file.name)
        .map_err(|e| format!("FormData error: {:?}", e))?;
    for (name, value) in fields {
        form.append_with_str(name, value)
            .map_err(|e| format!("FormData error: {:?}", e))?;
    }
    Ok(form)
}

#[derive(serde::Serialize)]
struct ZoneKeyRequest<'a> {
    province: &'a str,
    code_zone: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_url() {
        let api = ApiClient::with_base_url("");
        assert_eq!(api.export_url("Tetouan", "Tet1"), "/api/export/ph1/Tetouan/Tet1");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let api = ApiClient::with_base_url("https://enquetes.example.org/");
        assert_eq!(
            api.export_url("Larache", "L2"),
            "https://enquetes.example.org/api/export/ph1/Larache/L2"
        );
    }

    #[test]
    fn test_zone_key_body() {
        let body = serde_json::to_value(ZoneKeyRequest { province: "Tanger", code_zone: "Tang1" }).unwrap();
        assert_eq!(body, serde_json::json!({"province": "Tanger", "code_zone": "Tang1"}));
    }
}
