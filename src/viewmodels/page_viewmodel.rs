// ============================================================================
// PAGE VIEWMODEL - Estado listo para pintar, un registro por sección
// ============================================================================
// `build_page` es una función pura de Session + PageData: no toca el DOM,
// así que toda la lógica de visibilidad se prueba sin navegador.
// ============================================================================

use crate::models::{HistoryEntry, ZoneInfo, ZoneStatus, ZonesOverview};
use crate::state::{PageData, Session, StatsPatch};
use crate::utils::{
    format_count, format_day, format_hectares, format_number, format_percent,
    format_signed_count, format_signed_hectares, format_signed_number, progress_width,
    text_or_placeholder, PLACEHOLDER,
};

pub const PROVINCE_PLACEHOLDER: &str = "-- Sélectionner Province --";
pub const ZONE_PLACEHOLDER: &str = "-- Sélectionner Zone --";

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectViewModel {
    pub placeholder: &'static str,
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LimiteSectionViewModel {
    pub visible: bool,
    pub file_name: Option<String>,
    pub enqueteur: String,
    pub date_debut: String,
    pub upload_enabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsViewModel {
    pub surface_totale: String,
    pub surface_enquetee: String,
    pub surface_restante: String,
    pub parcelles: String,
    pub pourcentage: String,
    pub jour: String,
    pub parcelles_ajoutees: String,
    pub surface_ajoutee: String,
    /// Ancho de la barra de progreso en %
    pub progress_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnqueteSectionViewModel {
    pub form_visible: bool,
    pub closure_notice: Option<String>,
    pub file_name: Option<String>,
    pub numero_jour: String,
    pub upload_enabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfoViewModel {
    pub province: String,
    pub zone: String,
    pub enqueteur: String,
    pub date_debut: String,
    pub closed: bool,
}

#[derive(Clone, Debug, PartialEq, Hash)]
pub struct DeltaCell {
    pub text: String,
    pub positive: bool,
}

impl DeltaCell {
    pub fn css_class(&self) -> &'static str {
        if self.positive { "positive" } else { "negative" }
    }
}

#[derive(Clone, Debug, PartialEq, Hash)]
pub struct HistoryRowViewModel {
    pub date: String,
    pub jour: String,
    pub parcelles: String,
    pub surface: String,
    pub parcelles_ajoutees: DeltaCell,
    pub surface_ajoutee: DeltaCell,
}

#[derive(Clone, Debug, PartialEq, Hash)]
pub struct OverviewRowViewModel {
    pub province: String,
    pub zone: String,
    pub enqueteur: String,
    pub avancement: String,
    pub parcelles: String,
    pub statut: String,
    pub closed: bool,
}

/// Página completa
#[derive(Clone, Debug, PartialEq)]
pub struct PageViewModel {
    pub provinces: SelectViewModel,
    pub zones: SelectViewModel,
    pub limite: LimiteSectionViewModel,
    /// `Some` solo para zonas configuradas (igual que `enquete` e `info`)
    pub stats: Option<StatsViewModel>,
    pub enquete: Option<EnqueteSectionViewModel>,
    pub info: Option<InfoViewModel>,
    /// Vacío = sección de histórico oculta
    pub history: Vec<HistoryRowViewModel>,
    pub overview: Vec<OverviewRowViewModel>,
    pub export_enabled: bool,
}

pub fn build_page<F: Clone>(session: &Session<F>, data: &PageData) -> PageViewModel {
    let provinces = SelectViewModel {
        placeholder: PROVINCE_PLACEHOLDER,
        options: data
            .provinces
            .iter()
            .map(|p| SelectOption { value: p.clone(), label: p.clone() })
            .collect(),
        selected: session.selected_province().map(str::to_string),
        enabled: true,
    };

    let zones = SelectViewModel {
        placeholder: ZONE_PLACEHOLDER,
        options: data
            .zones
            .iter()
            .flatten()
            .map(|z| SelectOption { value: z.code.clone(), label: z.label() })
            .collect(),
        selected: session.selected_zone().map(str::to_string),
        enabled: data.zones.is_some(),
    };

    let form = session.form();
    let limite = LimiteSectionViewModel {
        visible: matches!(data.zone, Some(ZoneStatus::Unconfigured)),
        file_name: session.boundary_file().map(|f| f.name.clone()),
        enqueteur: form.enqueteur.clone(),
        date_debut: form.date_debut.clone(),
        upload_enabled: session.can_submit_limite(),
    };

    let mut page = PageViewModel {
        provinces,
        zones,
        limite,
        stats: None,
        enquete: None,
        info: None,
        history: Vec::new(),
        overview: overview_rows(&data.overview),
        export_enabled: false,
    };

    // Las secciones de zona configurada solo aparecen cuando la sesión lo confirma
    if let Some(ZoneStatus::Configured(info)) = &data.zone {
        if session.zone_configured() {
            let patch = data.stats_patch.as_ref();
            page.stats = Some(stats_view(info, patch));
            page.enquete = Some(EnqueteSectionViewModel {
                form_visible: !info.cloturee,
                closure_notice: info.cloturee.then(|| closure_notice(info)),
                file_name: session.survey_file().map(|f| f.name.clone()),
                numero_jour: form.numero_jour.clone(),
                upload_enabled: !info.cloturee && session.can_submit_enquete(),
            });
            page.info = Some(InfoViewModel {
                province: text_or_placeholder(session.selected_province()),
                zone: text_or_placeholder(info.nom_zone.as_deref()),
                enqueteur: text_or_placeholder(info.enqueteur.as_deref()),
                date_debut: text_or_placeholder(info.date_debut_enquete.as_deref()),
                closed: info.cloturee,
            });
            page.history = info.historique.iter().map(history_row).collect();
            page.export_enabled = patch.is_some() || info.parcel_count() > 0;
        }
    }

    page
}

fn stats_view(info: &ZoneInfo, patch: Option<&StatsPatch>) -> StatsViewModel {
    let nb_parcelles = patch.and_then(|p| p.nb_parcelles).or(info.nb_parcelles);
    let surface_enquetee = patch.and_then(|p| p.surface_enquetee_ha).or(info.surface_enquetee_ha);
    let surface_restante = patch.and_then(|p| p.surface_restante_ha).or(info.surface_restante_ha);
    let pourcentage = patch.and_then(|p| p.pourcentage_avancement).or(info.pourcentage_avancement);
    let jour = patch.map(|p| p.numero_jour).or(info.numero_jour);
    let parcelles_ajoutees = patch
        .and_then(|p| p.parcelles_ajoutees)
        .or(info.parcelles_ajoutees_aujourd_hui)
        .unwrap_or(0);
    let surface_ajoutee = patch
        .and_then(|p| p.surface_ajoutee_ha)
        .or(info.surface_ajoutee_aujourd_hui)
        .unwrap_or(0.0);

    StatsViewModel {
        surface_totale: format_hectares(info.surface_totale_ha),
        surface_enquetee: format_hectares(surface_enquetee),
        surface_restante: format_hectares(surface_restante),
        parcelles: format_count(nb_parcelles),
        pourcentage: format_percent(pourcentage),
        jour: format_day(jour),
        parcelles_ajoutees: format_signed_count(parcelles_ajoutees),
        surface_ajoutee: format_signed_hectares(surface_ajoutee),
        progress_width: progress_width(pourcentage),
    }
}

fn closure_notice(info: &ZoneInfo) -> String {
    match info.date_cloture.as_deref().filter(|d| !d.is_empty()) {
        Some(date) => format!("Zone clôturée le {}. Aucun nouvel upload d'enquête n'est accepté.", date),
        None => "Zone clôturée. Aucun nouvel upload d'enquête n'est accepté.".to_string(),
    }
}

fn history_row(entry: &HistoryEntry) -> HistoryRowViewModel {
    let parcelles_ajoutees = entry.parcelles_ajoutees.unwrap_or(0);
    let surface_ajoutee = entry.surface_ajoutee_ha.unwrap_or(0.0);

    HistoryRowViewModel {
        date: text_or_placeholder(entry.date_maj.as_deref()),
        jour: entry.numero_jour.map(|d| d.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string()),
        parcelles: format_count(entry.nb_parcelles),
        surface: format_number(entry.surface_enquetee_ha.unwrap_or(0.0)),
        parcelles_ajoutees: DeltaCell {
            text: format_signed_count(parcelles_ajoutees),
            positive: parcelles_ajoutees >= 0,
        },
        surface_ajoutee: DeltaCell {
            text: format_signed_number(surface_ajoutee),
            positive: surface_ajoutee >= 0.0,
        },
    }
}

fn overview_rows(overview: &ZonesOverview) -> Vec<OverviewRowViewModel> {
    overview
        .iter()
        .flat_map(|(province, zones)| {
            zones.iter().map(move |zone| OverviewRowViewModel {
                province: province.clone(),
                zone: match zone.nom_zone.as_deref() {
                    Some(nom) if !nom.is_empty() => format!("{} - {}", zone.code_zone, nom),
                    _ => zone.code_zone.clone(),
                },
                enqueteur: text_or_placeholder(zone.enqueteur.as_deref()),
                avancement: format_percent(zone.pourcentage_avancement),
                parcelles: format_count(zone.nb_parcelles),
                statut: if zone.cloturee { "Clôturée" } else { "En cours" }.to_string(),
                closed: zone.cloturee,
            })
        })
        .collect()
}
