// ============================================================================
// SESSION STATE - Sesión de la página (una por instancia, sin persistencia)
// ============================================================================
// Selección provincia/zona, flag de zona configurada, archivos pendientes y
// texto de los campos del formulario. Solo se modifica vía métodos.
// ============================================================================

use crate::models::{EnqueteUpload, LimiteUpload, PendingFile};

pub const MSG_MISSING_FIELDS: &str = "Veuillez remplir tous les champs";
pub const MSG_MISSING_ENQUETEUR: &str = "Veuillez entrer l'enquêteur et la date de début";
pub const MSG_MISSING_DAY: &str = "Veuillez remplir le numéro de jour";
pub const MSG_INVALID_DAY: &str = "Numéro de jour invalide";

/// Texto tecleado en los formularios
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields {
    pub enqueteur: String,
    pub date_debut: String,
    pub numero_jour: String,
}

/// Sesión de la página
#[derive(Clone, Debug)]
pub struct Session<F> {
    selected_province: Option<String>,
    selected_zone: Option<String>,
    zone_configured: bool,
    pending_boundary_file: Option<PendingFile<F>>,
    pending_survey_file: Option<PendingFile<F>>,
    form: FormFields,
}

impl<F: Clone> Session<F> {
    /// Crear sesión vacía; `today` pre-rellena la fecha de inicio (YYYY-MM-DD)
    pub fn new(today: impl Into<String>) -> Self {
        Self {
            selected_province: None,
            selected_zone: None,
            zone_configured: false,
            pending_boundary_file: None,
            pending_survey_file: None,
            form: FormFields {
                date_debut: today.into(),
                ..FormFields::default()
            },
        }
    }

    pub fn selected_province(&self) -> Option<&str> {
        self.selected_province.as_deref()
    }

    pub fn selected_zone(&self) -> Option<&str> {
        self.selected_zone.as_deref()
    }

    /// (provincia, zona) si ambas están seleccionadas
    pub fn selection(&self) -> Option<(String, String)> {
        match (&self.selected_province, &self.selected_zone) {
            (Some(province), Some(zone)) => Some((province.clone(), zone.clone())),
            _ => None,
        }
    }

    pub fn zone_configured(&self) -> bool {
        self.zone_configured
    }

    pub fn set_zone_configured(&mut self, configured: bool) {
        self.zone_configured = configured;
    }

    /// Cambiar de provincia invalida la zona y lo que dependía de ella
    pub fn select_province(&mut self, province: impl Into<String>) {
        self.selected_province = Some(province.into());
        self.reset_zone();
    }

    pub fn select_zone(&mut self, code_zone: impl Into<String>) {
        self.reset_zone();
        self.selected_zone = Some(code_zone.into());
    }

    fn reset_zone(&mut self) {
        self.selected_zone = None;
        self.zone_configured = false;
        self.pending_boundary_file = None;
        self.pending_survey_file = None;
    }

    pub fn boundary_file(&self) -> Option<&PendingFile<F>> {
        self.pending_boundary_file.as_ref()
    }

    pub fn set_boundary_file(&mut self, file: PendingFile<F>) {
        self.pending_boundary_file = Some(file);
    }

    pub fn clear_boundary_file(&mut self) {
        self.pending_boundary_file = None;
    }

    pub fn survey_file(&self) -> Option<&PendingFile<F>> {
        self.pending_survey_file.as_ref()
    }

    pub fn set_survey_file(&mut self, file: PendingFile<F>) {
        self.pending_survey_file = Some(file);
    }

    pub fn clear_survey_file(&mut self) {
        self.pending_survey_file = None;
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn set_enqueteur(&mut self, enqueteur: impl Into<String>) {
        self.form.enqueteur = enqueteur.into();
    }

    pub fn set_date_debut(&mut self, date: impl Into<String>) {
        self.form.date_debut = date.into();
    }

    pub fn set_numero_jour(&mut self, numero_jour: impl Into<String>) {
        self.form.numero_jour = numero_jour.into();
    }

    /// El botón de upload limite solo se activa con archivo, enquêteur y fecha
    pub fn can_submit_limite(&self) -> bool {
        self.pending_boundary_file.is_some()
            && !self.form.enqueteur.trim().is_empty()
            && !self.form.date_debut.trim().is_empty()
    }

    pub fn can_submit_enquete(&self) -> bool {
        self.pending_survey_file.is_some() && !self.form.numero_jour.trim().is_empty()
    }

    /// Validación local + construcción de la petición.
    /// `Err` lleva el mensaje a mostrar; en ese caso no se envía nada.
    pub fn limite_upload(&self) -> Result<LimiteUpload<F>, &'static str> {
        let (province, code_zone) = self.selection().ok_or(MSG_MISSING_FIELDS)?;
        let file = self.pending_boundary_file.clone().ok_or(MSG_MISSING_FIELDS)?;

        let enqueteur = self.form.enqueteur.trim();
        let date_debut = self.form.date_debut.trim();
        if enqueteur.is_empty() || date_debut.is_empty() {
            return Err(MSG_MISSING_ENQUETEUR);
        }

        Ok(LimiteUpload {
            file,
            province,
            code_zone,
            enqueteur: enqueteur.to_string(),
            date_debut_enquete: date_debut.to_string(),
        })
    }

    pub fn enquete_upload(&self) -> Result<EnqueteUpload<F>, &'static str> {
        let (province, code_zone) = self.selection().ok_or(MSG_MISSING_FIELDS)?;
        let file = self.pending_survey_file.clone().ok_or(MSG_MISSING_FIELDS)?;

        let raw_day = self.form.numero_jour.trim();
        if raw_day.is_empty() {
            return Err(MSG_MISSING_DAY);
        }
        let numero_jour = match raw_day.parse::<u32>() {
            Ok(day) if day > 0 => day,
            _ => return Err(MSG_INVALID_DAY),
        };

        Ok(EnqueteUpload {
            file,
            province,
            code_zone,
            numero_jour,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_zone() -> Session<&'static str> {
        let mut session = Session::new("2024-03-01");
        session.select_province("Tetouan");
        session.select_zone("Tet1");
        session
    }

    #[test]
    fn test_province_change_resets_zone() {
        let mut session = session_with_zone();
        session.set_zone_configured(true);
        session.set_survey_file(PendingFile::new("jour1.gpkg", "blob"));

        session.select_province("Larache");

        assert_eq!(session.selected_province(), Some("Larache"));
        assert_eq!(session.selected_zone(), None);
        assert!(!session.zone_configured());
        assert!(session.survey_file().is_none());
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_form_survives_zone_change() {
        let mut session = session_with_zone();
        session.set_enqueteur("Ahmed");
        session.select_zone("Tet2");
        assert_eq!(session.form().enqueteur, "Ahmed");
        assert_eq!(session.form().date_debut, "2024-03-01");
    }

    #[test]
    fn test_limite_requires_file() {
        let mut session = session_with_zone();
        session.set_enqueteur("Ahmed");
        assert_eq!(session.limite_upload().unwrap_err(), MSG_MISSING_FIELDS);
        assert!(!session.can_submit_limite());
    }

    #[test]
    fn test_limite_requires_enqueteur_and_date() {
        let mut session = session_with_zone();
        session.set_boundary_file(PendingFile::new("limite.gpkg", "blob"));
        session.set_enqueteur("   ");
        assert_eq!(session.limite_upload().unwrap_err(), MSG_MISSING_ENQUETEUR);

        session.set_enqueteur("Ahmed");
        session.set_date_debut("");
        assert_eq!(session.limite_upload().unwrap_err(), MSG_MISSING_ENQUETEUR);
        assert!(!session.can_submit_limite());

        session.set_date_debut("2024-03-05");
        let upload = session.limite_upload().unwrap();
        assert_eq!(upload.enqueteur, "Ahmed");
        assert_eq!(upload.date_debut_enquete, "2024-03-05");
        assert_eq!(upload.code_zone, "Tet1");
        assert!(session.can_submit_limite());
    }

    #[test]
    fn test_enquete_day_number() {
        let mut session = session_with_zone();
        session.set_survey_file(PendingFile::new("jour3.gpkg", "blob"));

        assert_eq!(session.enquete_upload().unwrap_err(), MSG_MISSING_DAY);
        session.set_numero_jour("abc");
        assert_eq!(session.enquete_upload().unwrap_err(), MSG_INVALID_DAY);
        session.set_numero_jour("0");
        assert_eq!(session.enquete_upload().unwrap_err(), MSG_INVALID_DAY);

        session.set_numero_jour(" 3 ");
        assert_eq!(session.enquete_upload().unwrap().numero_jour, 3);
    }

    #[test]
    fn test_nothing_selected() {
        let session: Session<&'static str> = Session::new("2024-03-01");
        assert_eq!(session.enquete_upload().unwrap_err(), MSG_MISSING_FIELDS);
        assert_eq!(session.limite_upload().unwrap_err(), MSG_MISSING_FIELDS);
    }
}
