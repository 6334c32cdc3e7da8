use serde::{Deserialize, Serialize};

// ============================================================================
// ZONE INFO - Respuesta de POST /api/zone/info
// ============================================================================
// El servidor omite campos cuando aún no hay enquête (o los manda a null):
// todo lo que no sea el flag `configured` es opcional y se rellena al renderizar.
// ============================================================================

/// Estado de una zona: sin limite todavía, o configurada con sus stats
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(from = "ZoneInfoWire")]
pub enum ZoneStatus {
    Unconfigured,
    Configured(ZoneInfo),
}

impl ZoneStatus {
    pub fn is_configured(&self) -> bool {
        matches!(self, ZoneStatus::Configured(_))
    }

    pub fn info(&self) -> Option<&ZoneInfo> {
        match self {
            ZoneStatus::Configured(info) => Some(info),
            ZoneStatus::Unconfigured => None,
        }
    }
}

/// Datos de una zona configurada
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ZoneInfo {
    pub province: Option<String>,
    pub code_zone: Option<String>,
    pub nom_zone: Option<String>,
    pub enqueteur: Option<String>,
    pub date_debut_enquete: Option<String>,
    #[serde(default)]
    pub cloturee: bool,
    pub date_cloture: Option<String>,
    pub date_enquete: Option<String>,
    pub surface_totale_ha: Option<f64>,
    pub surface_enquetee_ha: Option<f64>,
    pub surface_restante_ha: Option<f64>,
    pub nb_parcelles: Option<i64>,
    pub pourcentage_avancement: Option<f64>,
    pub numero_jour: Option<i64>,
    pub parcelles_ajoutees_aujourd_hui: Option<i64>,
    pub surface_ajoutee_aujourd_hui: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub historique: Vec<HistoryEntry>,
}

impl ZoneInfo {
    pub fn parcel_count(&self) -> i64 {
        self.nb_parcelles.unwrap_or(0)
    }

    /// Número de jour sugerido para el próximo upload
    pub fn next_day_number(&self) -> i64 {
        self.numero_jour.unwrap_or(0) + 1
    }
}

/// Un upload de enquête en el histórico (orden cronológico del servidor)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct HistoryEntry {
    pub date_maj: Option<String>,
    pub numero_jour: Option<i64>,
    pub nb_parcelles: Option<i64>,
    pub surface_enquetee_ha: Option<f64>,
    pub parcelles_ajoutees: Option<i64>,
    pub surface_ajoutee_ha: Option<f64>,
}

/// Forma plana en el cable: `configured` + resto de campos al mismo nivel
#[derive(Deserialize)]
struct ZoneInfoWire {
    #[serde(default)]
    configured: bool,
    #[serde(flatten)]
    info: ZoneInfo,
}

impl From<ZoneInfoWire> for ZoneStatus {
    fn from(wire: ZoneInfoWire) -> Self {
        if wire.configured {
            ZoneStatus::Configured(wire.info)
        } else {
            ZoneStatus::Unconfigured
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<HistoryEntry>>::deserialize(deserializer)?.unwrap_or_default())
}
