use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Zona de una provincia (`GET /api/zones/{province}`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ZoneEntry {
    pub code: String,
    pub nom: String,
}

impl ZoneEntry {
    /// Texto de la opción en el selector: "Tet1 - Zaouiat sidi kacem"
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.nom)
    }
}

/// Fila de la vista de conjunto (`GET /api/zones/all`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ZoneSummary {
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub code_zone: String,
    pub nom_zone: Option<String>,
    pub enqueteur: Option<String>,
    pub date_debut_enquete: Option<String>,
    pub surface_totale_ha: Option<f64>,
    #[serde(default)]
    pub cloturee: bool,
    pub date_cloture: Option<String>,
    pub numero_jour: Option<i64>,
    pub nb_parcelles: Option<i64>,
    pub surface_enquetee_ha: Option<f64>,
    pub surface_restante_ha: Option<f64>,
    pub pourcentage_avancement: Option<f64>,
    pub statut: Option<String>,
}

/// Provincia -> zonas configuradas. BTreeMap para un orden estable en pantalla.
pub type ZonesOverview = BTreeMap<String, Vec<ZoneSummary>>;
