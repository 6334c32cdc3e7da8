// ============================================================================
// PAGE DATA - Lo último que ha devuelto el servidor
// ============================================================================

use crate::models::{UploadEnqueteResponse, ZoneEntry, ZoneStatus, ZonesOverview};

/// Stats optimistas tras un upload de enquête, hasta que llega el refresh
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StatsPatch {
    pub nb_parcelles: Option<i64>,
    pub surface_enquetee_ha: Option<f64>,
    pub surface_restante_ha: Option<f64>,
    pub pourcentage_avancement: Option<f64>,
    pub parcelles_ajoutees: Option<i64>,
    pub surface_ajoutee_ha: Option<f64>,
    pub numero_jour: i64,
}

impl StatsPatch {
    pub fn from_response(response: &UploadEnqueteResponse, numero_jour: u32) -> Self {
        Self {
            nb_parcelles: response.nb_parcelles,
            surface_enquetee_ha: response.surface_enquetee_ha,
            surface_restante_ha: response.surface_restante_ha,
            pourcentage_avancement: response.pourcentage_avancement,
            parcelles_ajoutees: response.parcelles_ajoutees,
            surface_ajoutee_ha: response.surface_ajoutee_ha,
            numero_jour: i64::from(numero_jour),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PageData {
    pub provinces: Vec<String>,
    /// `None` = selector de zonas deshabilitado
    pub zones: Option<Vec<ZoneEntry>>,
    /// `None` = ninguna zona cargada (o carga en curso)
    pub zone: Option<ZoneStatus>,
    pub stats_patch: Option<StatsPatch>,
    pub overview: ZonesOverview,
}

impl PageData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cambio de provincia: lista de zonas vacía y secciones de zona plegadas
    pub fn reset_for_province(&mut self) {
        self.zones = None;
        self.reset_zone();
    }

    pub fn reset_zone(&mut self) {
        self.zone = None;
        self.stats_patch = None;
    }

    /// Verdad del servidor: descarta cualquier patch optimista
    pub fn set_zone_status(&mut self, status: ZoneStatus) {
        self.zone = Some(status);
        self.stats_patch = None;
    }
}
