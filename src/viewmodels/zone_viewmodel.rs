// ============================================================================
// ZONE VIEWMODEL - Controlador de la página
// ============================================================================
// Único punto de entrada: `handle(intent)`. Modifica Session/PageData,
// habla con el backend a través de `ZoneApi` y pinta con `ViewPort`.
// Nunca se mantiene un borrow de RefCell a través de un `.await`.
// ============================================================================

use std::cell::{Cell, RefCell};

use crate::models::upload::error_text;
use crate::models::ZoneInfo;
use crate::services::ZoneApi;
use crate::state::{PageData, Session, StatsPatch};
use crate::viewmodels::intent::Intent;
use crate::viewmodels::page_viewmodel::{build_page, PageViewModel};
use crate::viewmodels::view_port::{Severity, ViewPort};

pub const MSG_PROVINCES_FAILED: &str = "Erreur chargement provinces";
pub const MSG_ZONES_FAILED: &str = "Erreur chargement zones";
pub const MSG_ZONE_FAILED: &str = "Erreur chargement zone";
pub const MSG_ZONE_LOADED: &str = "Zone chargée avec succès";
pub const MSG_ZONE_UNCONFIGURED: &str = "Zone non configurée. Veuillez uploader la limite.";
pub const MSG_UPLOAD_FAILED: &str = "❌ Erreur lors de l'upload";
pub const MSG_UPLOAD_IN_FLIGHT: &str = "Un envoi est déjà en cours";
pub const MSG_SELECT_ZONE: &str = "Veuillez sélectionner une zone";
pub const MSG_EXPORT_STARTED: &str = "Téléchargement Excel PH1 en cours...";
pub const MSG_SERVER_UNREACHABLE: &str = "❌ Erreur de communication avec le serveur";
pub const MSG_OVERVIEW_FAILED: &str = "Vue d'ensemble indisponible";

/// Overlay de carga con contador: solo la primera adquisición lo muestra y
/// solo la última liberación lo oculta.
struct BusyGuard<'a, V: ViewPort> {
    depth: &'a Cell<u32>,
    view: &'a V,
}

impl<'a, V: ViewPort> BusyGuard<'a, V> {
    fn acquire(depth: &'a Cell<u32>, view: &'a V) -> Self {
        let previous = depth.get();
        depth.set(previous + 1);
        if previous == 0 {
            view.set_busy(true);
        }
        Self { depth, view }
    }
}

impl<V: ViewPort> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        let remaining = self.depth.get().saturating_sub(1);
        self.depth.set(remaining);
        if remaining == 0 {
            self.view.set_busy(false);
        }
    }
}

/// Marca de "upload en curso"; se libera al salir del handler
struct UploadGuard<'a>(&'a Cell<bool>);

impl<'a> UploadGuard<'a> {
    fn try_acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct ZoneViewModel<A: ZoneApi, V: ViewPort> {
    api: A,
    view: V,
    session: RefCell<Session<A::File>>,
    data: RefCell<PageData>,
    busy_depth: Cell<u32>,
    upload_in_flight: Cell<bool>,
}

impl<A: ZoneApi, V: ViewPort> ZoneViewModel<A, V> {
    /// `today` (YYYY-MM-DD) pre-rellena la fecha de inicio de enquête
    pub fn new(api: A, view: V, today: impl Into<String>) -> Self {
        Self {
            api,
            view,
            session: RefCell::new(Session::new(today)),
            data: RefCell::new(PageData::new()),
            busy_depth: Cell::new(0),
            upload_in_flight: Cell::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Copia de la sesión actual
    pub fn session(&self) -> Session<A::File> {
        self.session.borrow().clone()
    }

    /// ViewModel de la página tal y como se pintaría ahora
    pub fn page(&self) -> PageViewModel {
        build_page(&self.session.borrow(), &self.data.borrow())
    }

    pub async fn handle(&self, intent: Intent<A::File>) {
        log::debug!("➡️ Intent: {}", intent.name());

        match intent {
            Intent::Init => {
                self.render();
                let _busy = self.busy();
                self.load_provinces().await;
                self.load_overview().await;
            }
            Intent::ProvinceSelected(province) => self.select_province(province).await,
            Intent::ZoneSelected(code_zone) => self.select_zone(code_zone).await,
            Intent::LimiteFileSelected(file) => {
                self.session.borrow_mut().set_boundary_file(file);
                self.render();
            }
            Intent::EnqueteFileSelected(file) => {
                self.session.borrow_mut().set_survey_file(file);
                self.render();
            }
            Intent::EnqueteurChanged(value) => {
                self.session.borrow_mut().set_enqueteur(value);
                self.render();
            }
            Intent::DateDebutChanged(value) => {
                self.session.borrow_mut().set_date_debut(value);
                self.render();
            }
            Intent::NumeroJourChanged(value) => {
                self.session.borrow_mut().set_numero_jour(value);
                self.render();
            }
            Intent::SubmitLimite => self.submit_limite().await,
            Intent::SubmitEnquete => self.submit_enquete().await,
            Intent::Export => self.export(),
            Intent::CloseZone => self.set_zone_closed(true).await,
            Intent::ReopenZone => self.set_zone_closed(false).await,
            Intent::RefreshOverview => self.load_overview().await,
        }
    }

    fn render(&self) {
        let page = self.page();
        self.view.render(&page);
    }

    fn busy(&self) -> BusyGuard<'_, V> {
        BusyGuard::acquire(&self.busy_depth, &self.view)
    }

    fn is_current(&self, province: &str, code_zone: &str) -> bool {
        let session = self.session.borrow();
        session.selected_province() == Some(province) && session.selected_zone() == Some(code_zone)
    }

    // ------------------------------------------------------------------------
    // Selección
    // ------------------------------------------------------------------------

    async fn load_provinces(&self) {
        let result = {
            let _busy = self.busy();
            self.api.list_provinces().await
        };

        match result {
            Ok(provinces) => {
                log::info!("🗺️ {} provincias", provinces.len());
                self.data.borrow_mut().provinces = provinces;
            }
            Err(e) => {
                log::error!("❌ Error cargando provincias: {}", e);
                self.data.borrow_mut().provinces.clear();
                self.view.notify(MSG_PROVINCES_FAILED, Severity::Error);
            }
        }
        self.render();
    }

    async fn select_province(&self, province: String) {
        if province.is_empty() {
            return;
        }

        self.session.borrow_mut().select_province(province.clone());
        self.data.borrow_mut().reset_for_province();
        self.render();

        let result = {
            let _busy = self.busy();
            self.api.list_zones(&province).await
        };

        if self.session.borrow().selected_province() != Some(province.as_str()) {
            log::debug!("⏭️ Zonas de {} descartadas (provincia cambiada)", province);
            return;
        }

        match result {
            Ok(zones) => {
                log::info!("📍 {} zonas en {}", zones.len(), province);
                self.data.borrow_mut().zones = Some(zones);
            }
            Err(e) => {
                log::error!("❌ Error cargando zonas de {}: {}", province, e);
                self.data.borrow_mut().zones = None;
                self.view.notify(MSG_ZONES_FAILED, Severity::Error);
            }
        }
        self.render();
    }

    async fn select_zone(&self, code_zone: String) {
        if code_zone.is_empty() || self.session.borrow().selected_province().is_none() {
            return;
        }

        self.session.borrow_mut().select_zone(code_zone);
        self.data.borrow_mut().reset_zone();
        self.render();

        self.load_zone_info().await;
    }

    /// Carga (o recarga) la zona seleccionada y cambia de vista según su estado
    async fn load_zone_info(&self) {
        let selection = self.session.borrow().selection();
        let Some((province, code_zone)) = selection else {
            return;
        };

        let result = {
            let _busy = self.busy();
            self.api.zone_info(&province, &code_zone).await
        };

        if !self.is_current(&province, &code_zone) {
            log::debug!("⏭️ Respuesta de {}/{} descartada (zona cambiada)", province, code_zone);
            return;
        }

        match result {
            Ok(status) => {
                let configured = status.is_configured();
                let next_day = status.info().map(ZoneInfo::next_day_number);
                {
                    let mut session = self.session.borrow_mut();
                    session.set_zone_configured(configured);
                    if let Some(day) = next_day {
                        session.set_numero_jour(day.to_string());
                    }
                }
                self.data.borrow_mut().set_zone_status(status);
                self.render();

                if configured {
                    log::info!("✅ Zona {}/{} cargada", province, code_zone);
                    self.view.notify(MSG_ZONE_LOADED, Severity::Success);
                } else {
                    log::info!("⚠️ Zona {}/{} sin configurar", province, code_zone);
                    self.view.notify(MSG_ZONE_UNCONFIGURED, Severity::Warning);
                }
            }
            Err(e) => {
                log::error!("❌ Error cargando zona {}/{}: {}", province, code_zone, e);
                self.view.notify(MSG_ZONE_FAILED, Severity::Error);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Uploads
    // ------------------------------------------------------------------------

    async fn submit_limite(&self) {
        let Some(_in_flight) = UploadGuard::try_acquire(&self.upload_in_flight) else {
            self.view.notify(MSG_UPLOAD_IN_FLIGHT, Severity::Info);
            return;
        };

        let request = self.session.borrow().limite_upload();
        let upload = match request {
            Ok(upload) => upload,
            Err(message) => {
                self.view.notify(message, Severity::Error);
                return;
            }
        };

        let _busy = self.busy();
        log::info!("📤 Upload limite {}/{} ({})", upload.province, upload.code_zone, upload.file.name);

        match self.api.upload_limite(&upload).await {
            Ok(response) if response.success => {
                self.view.notify(
                    &format!("✅ {}", response.message.unwrap_or_default()),
                    Severity::Success,
                );
                if !self.is_current(&upload.province, &upload.code_zone) {
                    log::debug!(
                        "⏭️ Limite de {}/{} no se aplica (zona cambiada)",
                        upload.province,
                        upload.code_zone
                    );
                    return;
                }
                self.session.borrow_mut().clear_boundary_file();
                self.render();
                self.load_zone_info().await;
            }
            Ok(response) => {
                log::warn!("⚠️ Limite rechazada: {:?}", response.error);
                self.view
                    .notify(&format!("❌ Erreur: {}", error_text(&response.error)), Severity::Error);
            }
            Err(e) => {
                log::error!("❌ Error en upload limite: {}", e);
                self.view.notify(MSG_UPLOAD_FAILED, Severity::Error);
            }
        }
    }

    async fn submit_enquete(&self) {
        let Some(_in_flight) = UploadGuard::try_acquire(&self.upload_in_flight) else {
            self.view.notify(MSG_UPLOAD_IN_FLIGHT, Severity::Info);
            return;
        };

        let request = self.session.borrow().enquete_upload();
        let upload = match request {
            Ok(upload) => upload,
            Err(message) => {
                self.view.notify(message, Severity::Error);
                return;
            }
        };

        let _busy = self.busy();
        log::info!(
            "📤 Upload enquête {}/{} jour {} ({})",
            upload.province,
            upload.code_zone,
            upload.numero_jour,
            upload.file.name
        );

        match self.api.upload_enquete(&upload).await {
            Ok(response) if response.success => {
                self.view.notify(
                    &format!("✅ {}", response.message.clone().unwrap_or_default()),
                    Severity::Success,
                );
                // El patch y el día siguiente solo valen para la zona subida
                if !self.is_current(&upload.province, &upload.code_zone) {
                    log::debug!(
                        "⏭️ Enquête de {}/{} no se aplica (zona cambiada)",
                        upload.province,
                        upload.code_zone
                    );
                    return;
                }
                self.data.borrow_mut().stats_patch =
                    Some(StatsPatch::from_response(&response, upload.numero_jour));
                {
                    let mut session = self.session.borrow_mut();
                    session.clear_survey_file();
                    session.set_numero_jour((u64::from(upload.numero_jour) + 1).to_string());
                }
                self.render();
                self.load_zone_info().await;
            }
            Ok(response) => {
                log::warn!("⚠️ Enquête rechazada: {:?}", response.error);
                self.view
                    .notify(&format!("❌ Erreur: {}", error_text(&response.error)), Severity::Error);
            }
            Err(e) => {
                log::error!("❌ Error en upload enquête: {}", e);
                self.view.notify(MSG_UPLOAD_FAILED, Severity::Error);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Export / clôture / vue d'ensemble
    // ------------------------------------------------------------------------

    fn export(&self) {
        let selection = self.session.borrow().selection();
        let Some((province, code_zone)) = selection else {
            self.view.notify(MSG_SELECT_ZONE, Severity::Error);
            return;
        };

        let url = self.api.export_url(&province, &code_zone);
        log::info!("📊 Export PH1: {}", url);
        self.view.navigate(&url);
        self.view.notify(MSG_EXPORT_STARTED, Severity::Info);
    }

    async fn set_zone_closed(&self, close: bool) {
        let selection = self.session.borrow().selection();
        let Some((province, code_zone)) = selection else {
            self.view.notify(MSG_SELECT_ZONE, Severity::Error);
            return;
        };

        let currently_closed = {
            let data = self.data.borrow();
            match data.zone.as_ref().and_then(|status| status.info()) {
                Some(info) => info.cloturee,
                None => {
                    log::debug!("Zona {}/{} sin configurar: nada que cerrar", province, code_zone);
                    return;
                }
            }
        };
        if currently_closed == close {
            return;
        }

        let question = if close {
            format!(
                "Clôturer la zone {} ? Aucun nouvel upload d'enquête ne sera accepté.",
                code_zone
            )
        } else {
            format!("Rouvrir la zone {} ?", code_zone)
        };
        if !self.view.confirm(&question) {
            return;
        }

        let _busy = self.busy();
        let result = if close {
            self.api.close_zone(&province, &code_zone).await
        } else {
            self.api.reopen_zone(&province, &code_zone).await
        };

        match result {
            Ok(response) if response.success => {
                log::info!("🔒 Zona {}/{} cloturee={}", province, code_zone, close);
                self.view.notify(
                    &format!("✅ {}", response.message.unwrap_or_default()),
                    Severity::Success,
                );
                self.load_zone_info().await;
                self.load_overview().await;
            }
            Ok(response) => {
                self.view
                    .notify(&format!("❌ Erreur: {}", error_text(&response.error)), Severity::Error);
            }
            Err(e) => {
                log::error!("❌ Error cambiando clôture de {}/{}: {}", province, code_zone, e);
                self.view.notify(MSG_SERVER_UNREACHABLE, Severity::Error);
            }
        }
    }

    async fn load_overview(&self) {
        let result = {
            let _busy = self.busy();
            self.api.zones_overview().await
        };

        match result {
            Ok(overview) => {
                self.data.borrow_mut().overview = overview;
                self.render();
            }
            Err(e) => {
                log::error!("❌ Error cargando vista de conjunto: {}", e);
                self.view.notify(MSG_OVERVIEW_FAILED, Severity::Warning);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActionResponse, EnqueteUpload, LimiteUpload, PendingFile, UploadEnqueteResponse,
        UploadLimiteResponse, ZoneEntry, ZoneStatus, ZonesOverview,
    };
    use futures::executor::block_on;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Devuelve Pending una vez para que otro future pueda avanzar
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    struct MockApi {
        calls: RefCell<Vec<String>>,
        provinces: RefCell<Result<Vec<String>, String>>,
        zones: RefCell<Result<Vec<ZoneEntry>, String>>,
        zone_info: RefCell<Result<ZoneStatus, String>>,
        limite: RefCell<Result<UploadLimiteResponse, String>>,
        enquete: RefCell<Result<UploadEnqueteResponse, String>>,
        action: RefCell<Result<ActionResponse, String>>,
        overview: RefCell<Result<ZonesOverview, String>>,
        slow_uploads: Cell<bool>,
        slow_reads: Cell<bool>,
    }

    impl MockApi {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                provinces: RefCell::new(Ok(vec!["Larache".to_string(), "Tetouan".to_string()])),
                zones: RefCell::new(Ok(vec![ZoneEntry {
                    code: "Tet1".to_string(),
                    nom: "Zaouiat sidi kacem".to_string(),
                }])),
                zone_info: RefCell::new(Ok(ZoneStatus::Unconfigured)),
                limite: RefCell::new(Err("unset".to_string())),
                enquete: RefCell::new(Err("unset".to_string())),
                action: RefCell::new(Err("unset".to_string())),
                overview: RefCell::new(Ok(ZonesOverview::new())),
                slow_uploads: Cell::new(false),
                slow_reads: Cell::new(false),
            }
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
        }
    }

    impl ZoneApi for MockApi {
        type File = &'static str;

        async fn list_provinces(&self) -> Result<Vec<String>, String> {
            self.record("provinces".to_string());
            self.provinces.borrow().clone()
        }

        async fn list_zones(&self, province: &str) -> Result<Vec<ZoneEntry>, String> {
            self.record(format!("zones:{}", province));
            if self.slow_reads.get() {
                YieldOnce(false).await;
            }
            self.zones.borrow().clone()
        }

        async fn zone_info(&self, province: &str, code_zone: &str) -> Result<ZoneStatus, String> {
            self.record(format!("zone_info:{}/{}", province, code_zone));
            if self.slow_reads.get() {
                YieldOnce(false).await;
            }
            self.zone_info.borrow().clone()
        }

        async fn upload_limite(
            &self,
            upload: &LimiteUpload<&'static str>,
        ) -> Result<UploadLimiteResponse, String> {
            self.record(format!("upload_limite:{}:{}", upload.code_zone, upload.enqueteur));
            if self.slow_uploads.get() {
                YieldOnce(false).await;
            }
            self.limite.borrow().clone()
        }

        async fn upload_enquete(
            &self,
            upload: &EnqueteUpload<&'static str>,
        ) -> Result<UploadEnqueteResponse, String> {
            self.record(format!("upload_enquete:{}:{}", upload.code_zone, upload.numero_jour));
            if self.slow_uploads.get() {
                YieldOnce(false).await;
            }
            self.enquete.borrow().clone()
        }

        async fn close_zone(&self, _province: &str, code_zone: &str) -> Result<ActionResponse, String> {
            self.record(format!("close:{}", code_zone));
            self.action.borrow().clone()
        }

        async fn reopen_zone(&self, _province: &str, code_zone: &str) -> Result<ActionResponse, String> {
            self.record(format!("reopen:{}", code_zone));
            self.action.borrow().clone()
        }

        async fn zones_overview(&self) -> Result<ZonesOverview, String> {
            self.record("overview".to_string());
            self.overview.borrow().clone()
        }

        fn export_url(&self, province: &str, code_zone: &str) -> String {
            format!("/api/export/ph1/{}/{}", province, code_zone)
        }
    }

    #[derive(Default)]
    struct MockView {
        renders: RefCell<Vec<PageViewModel>>,
        toasts: RefCell<Vec<(String, Severity)>>,
        busy: RefCell<Vec<bool>>,
        navigations: RefCell<Vec<String>>,
        confirms: RefCell<Vec<String>>,
        decline: Cell<bool>,
    }

    impl MockView {
        fn last_page(&self) -> PageViewModel {
            self.renders.borrow().last().cloned().unwrap()
        }

        fn last_toast(&self) -> (String, Severity) {
            self.toasts.borrow().last().cloned().unwrap()
        }

        fn has_toast(&self, message: &str) -> bool {
            self.toasts.borrow().iter().any(|(m, _)| m == message)
        }
    }

    impl ViewPort for MockView {
        fn render(&self, page: &PageViewModel) {
            self.renders.borrow_mut().push(page.clone());
        }

        fn notify(&self, message: &str, severity: Severity) {
            self.toasts.borrow_mut().push((message.to_string(), severity));
        }

        fn set_busy(&self, busy: bool) {
            self.busy.borrow_mut().push(busy);
        }

        fn navigate(&self, url: &str) {
            self.navigations.borrow_mut().push(url.to_string());
        }

        fn confirm(&self, message: &str) -> bool {
            self.confirms.borrow_mut().push(message.to_string());
            !self.decline.get()
        }
    }

    type TestViewModel = ZoneViewModel<MockApi, MockView>;

    fn view_model() -> TestViewModel {
        ZoneViewModel::new(MockApi::new(), MockView::default(), "2024-03-01")
    }

    fn configured(json: &str) -> ZoneStatus {
        serde_json::from_str(json).unwrap()
    }

    /// Provincia Tetouan + zona Tet1 seleccionadas con la respuesta de zona dada
    fn with_zone(status: ZoneStatus) -> TestViewModel {
        let vm = view_model();
        *vm.api().zone_info.borrow_mut() = Ok(status);
        block_on(vm.handle(Intent::ProvinceSelected("Tetouan".to_string())));
        block_on(vm.handle(Intent::ZoneSelected("Tet1".to_string())));
        vm.view().toasts.borrow_mut().clear();
        vm.view().busy.borrow_mut().clear();
        vm.api().calls.borrow_mut().clear();
        vm
    }

    fn ready_for_survey() -> TestViewModel {
        let vm = with_zone(configured(
            r#"{"configured": true, "surface_totale_ha": 75, "nb_parcelles": 0, "numero_jour": 1}"#,
        ));
        block_on(vm.handle(Intent::EnqueteFileSelected(PendingFile::new("jour2.gpkg", "blob"))));
        vm
    }

    #[test]
    fn test_init_loads_provinces_and_overview() {
        let vm = view_model();
        block_on(vm.handle(Intent::Init));

        assert_eq!(vm.api().calls(), vec!["provinces", "overview"]);
        let page = vm.view().last_page();
        assert_eq!(page.provinces.options.len(), 2);
        assert!(!page.zones.enabled);
        assert_eq!(*vm.view().busy.borrow(), vec![true, false]);
    }

    #[test]
    fn test_provinces_failure_notifies() {
        let vm = view_model();
        *vm.api().provinces.borrow_mut() = Err("Network error: offline".to_string());
        block_on(vm.handle(Intent::Init));

        assert!(vm.view().has_toast(MSG_PROVINCES_FAILED));
        assert!(vm.view().last_page().provinces.options.is_empty());
    }

    #[test]
    fn test_overview_failure_only_warns() {
        let vm = view_model();
        *vm.api().overview.borrow_mut() = Err("HTTP 500".to_string());
        block_on(vm.handle(Intent::Init));

        assert_eq!(vm.view().last_toast(), (MSG_OVERVIEW_FAILED.to_string(), Severity::Warning));
        assert_eq!(vm.view().last_page().provinces.options.len(), 2);
    }

    #[test]
    fn test_province_selection_fetches_zones_once() {
        let vm = with_zone(configured(r#"{"configured": true, "nb_parcelles": 5}"#));
        assert!(vm.view().last_page().stats.is_some());

        block_on(vm.handle(Intent::ProvinceSelected("Larache".to_string())));

        assert_eq!(vm.api().calls(), vec!["zones:Larache"]);
        let page = vm.view().last_page();
        assert!(page.zones.enabled);
        assert!(page.stats.is_none() && page.enquete.is_none() && page.info.is_none());
        assert!(!page.limite.visible);
        assert!(!page.export_enabled);
        assert_eq!(vm.session().selected_zone(), None);
    }

    #[test]
    fn test_placeholder_selection_is_ignored() {
        let vm = view_model();
        block_on(vm.handle(Intent::ProvinceSelected(String::new())));
        block_on(vm.handle(Intent::ZoneSelected(String::new())));
        assert!(vm.api().calls().is_empty());
    }

    #[test]
    fn test_zones_failure_leaves_selector_disabled() {
        let vm = view_model();
        *vm.api().zones.borrow_mut() = Err("Network error".to_string());
        block_on(vm.handle(Intent::ProvinceSelected("Tetouan".to_string())));

        assert!(vm.view().has_toast(MSG_ZONES_FAILED));
        let page = vm.view().last_page();
        assert!(!page.zones.enabled);
        assert!(page.zones.options.is_empty());
    }

    #[test]
    fn test_unconfigured_zone_shows_limite_only() {
        let vm = view_model();
        block_on(vm.handle(Intent::ProvinceSelected("Tetouan".to_string())));
        block_on(vm.handle(Intent::ZoneSelected("Tet1".to_string())));

        let page = vm.view().last_page();
        assert!(page.limite.visible);
        assert!(page.stats.is_none());
        assert!(!page.export_enabled);
        assert_eq!(vm.view().last_toast(), (MSG_ZONE_UNCONFIGURED.to_string(), Severity::Warning));
        assert!(!vm.session().zone_configured());
    }

    #[test]
    fn test_configured_zone_prefills_next_day() {
        let vm = with_zone(configured(r#"{"configured": true, "numero_jour": 3, "nb_parcelles": 5}"#));
        assert_eq!(vm.session().form().numero_jour, "4");
        let page = vm.view().last_page();
        assert!(page.export_enabled);
        assert!(vm.session().zone_configured());
    }

    #[test]
    fn test_zone_info_failure_keeps_view() {
        let vm = view_model();
        *vm.api().zone_info.borrow_mut() = Err("HTTP error 500: boom".to_string());
        block_on(vm.handle(Intent::ProvinceSelected("Tetouan".to_string())));
        block_on(vm.handle(Intent::ZoneSelected("Tet1".to_string())));

        assert_eq!(vm.view().last_toast(), (MSG_ZONE_FAILED.to_string(), Severity::Error));
        assert!(!vm.view().last_page().limite.visible);
        assert_eq!(vm.view().busy.borrow().last(), Some(&false));
    }

    #[test]
    fn test_limite_validation_sends_nothing() {
        let vm = with_zone(ZoneStatus::Unconfigured);

        // Sin archivo
        block_on(vm.handle(Intent::EnqueteurChanged("Ahmed".to_string())));
        block_on(vm.handle(Intent::SubmitLimite));
        assert_eq!(vm.view().last_toast().0, crate::state::session_state::MSG_MISSING_FIELDS);

        // Enquêteur vacío
        block_on(vm.handle(Intent::LimiteFileSelected(PendingFile::new("limite.gpkg", "blob"))));
        block_on(vm.handle(Intent::EnqueteurChanged("   ".to_string())));
        assert!(!vm.view().last_page().limite.upload_enabled);
        block_on(vm.handle(Intent::SubmitLimite));
        assert_eq!(vm.view().last_toast().0, crate::state::session_state::MSG_MISSING_ENQUETEUR);

        // Fecha vacía
        block_on(vm.handle(Intent::EnqueteurChanged("Ahmed".to_string())));
        block_on(vm.handle(Intent::DateDebutChanged(String::new())));
        block_on(vm.handle(Intent::SubmitLimite));
        assert_eq!(vm.view().last_toast().0, crate::state::session_state::MSG_MISSING_ENQUETEUR);

        assert_eq!(vm.api().count("upload_limite"), 0);
        assert!(vm.view().busy.borrow().is_empty());
    }

    #[test]
    fn test_limite_success_refreshes_zone() {
        let vm = with_zone(ZoneStatus::Unconfigured);
        *vm.api().limite.borrow_mut() = Ok(UploadLimiteResponse {
            success: true,
            message: Some("Limite uploadée: 75 ha".to_string()),
            surface_totale_ha: Some(75.0),
            ..UploadLimiteResponse::default()
        });
        *vm.api().zone_info.borrow_mut() =
            Ok(configured(r#"{"configured": true, "surface_totale_ha": 75, "numero_jour": 0}"#));

        block_on(vm.handle(Intent::LimiteFileSelected(PendingFile::new("limite.gpkg", "blob"))));
        block_on(vm.handle(Intent::EnqueteurChanged("Ahmed".to_string())));
        block_on(vm.handle(Intent::SubmitLimite));

        assert_eq!(vm.api().calls(), vec!["upload_limite:Tet1:Ahmed", "zone_info:Tetouan/Tet1"]);
        assert!(vm.view().has_toast("✅ Limite uploadée: 75 ha"));
        assert!(vm.session().boundary_file().is_none());
        let page = vm.view().last_page();
        assert!(!page.limite.visible);
        assert_eq!(page.stats.unwrap().surface_totale, "75 ha");
        assert_eq!(vm.session().form().numero_jour, "1");
        assert_eq!(*vm.view().busy.borrow(), vec![true, false]);
    }

    #[test]
    fn test_limite_application_failure_keeps_session() {
        let vm = with_zone(ZoneStatus::Unconfigured);
        *vm.api().limite.borrow_mut() = Ok(UploadLimiteResponse {
            success: false,
            error: Some("Fichier invalide".to_string()),
            ..UploadLimiteResponse::default()
        });
        block_on(vm.handle(Intent::LimiteFileSelected(PendingFile::new("limite.gpkg", "blob"))));
        block_on(vm.handle(Intent::EnqueteurChanged("Ahmed".to_string())));
        block_on(vm.handle(Intent::SubmitLimite));

        assert_eq!(vm.view().last_toast(), ("❌ Erreur: Fichier invalide".to_string(), Severity::Error));
        assert!(vm.session().boundary_file().is_some());
        assert_eq!(vm.api().count("zone_info"), 0);
        assert_eq!(*vm.view().busy.borrow(), vec![true, false]);
    }

    #[test]
    fn test_limite_transport_failure() {
        let vm = with_zone(ZoneStatus::Unconfigured);
        block_on(vm.handle(Intent::LimiteFileSelected(PendingFile::new("limite.gpkg", "blob"))));
        block_on(vm.handle(Intent::EnqueteurChanged("Ahmed".to_string())));
        block_on(vm.handle(Intent::SubmitLimite));

        assert_eq!(vm.view().last_toast().0, MSG_UPLOAD_FAILED);
        assert_eq!(*vm.view().busy.borrow(), vec![true, false]);
        assert!(!vm.upload_in_flight.get());
    }

    #[test]
    fn test_enquete_success_applies_patch_then_refreshes() {
        let vm = ready_for_survey();
        *vm.api().enquete.borrow_mut() = Ok(UploadEnqueteResponse {
            success: true,
            message: Some("12 parcelles ajoutées".to_string()),
            nb_parcelles: Some(12),
            surface_enquetee_ha: Some(45.2),
            surface_restante_ha: Some(29.8),
            pourcentage_avancement: Some(60.0),
            parcelles_ajoutees: Some(12),
            surface_ajoutee_ha: Some(45.2),
            ..UploadEnqueteResponse::default()
        });
        // El refresh devuelve el día 2 ya persistido
        *vm.api().zone_info.borrow_mut() = Ok(configured(
            r#"{"configured": true, "surface_totale_ha": 75, "nb_parcelles": 12,
                "surface_enquetee_ha": 45.2, "pourcentage_avancement": 60.3, "numero_jour": 2}"#,
        ));
        vm.view().renders.borrow_mut().clear();

        block_on(vm.handle(Intent::SubmitEnquete));

        assert_eq!(vm.api().calls(), vec!["upload_enquete:Tet1:2", "zone_info:Tetouan/Tet1"]);
        assert_eq!(vm.view().toasts.borrow()[0].0, "✅ 12 parcelles ajoutées");

        // Primer render = patch optimista
        let optimistic = vm.view().renders.borrow()[0].clone();
        let stats = optimistic.stats.unwrap();
        assert_eq!(stats.parcelles, "12");
        assert_eq!(stats.surface_enquetee, "45.2 ha");
        assert_eq!(stats.pourcentage, "60%");
        assert_eq!(stats.jour, "#2");
        assert!(optimistic.export_enabled);
        assert_eq!(optimistic.enquete.unwrap().numero_jour, "3");

        // Después, la verdad del servidor
        let page = vm.view().last_page();
        assert_eq!(page.stats.unwrap().pourcentage, "60.3%");
        assert!(vm.session().survey_file().is_none());
        assert_eq!(vm.session().form().numero_jour, "3");
        assert_eq!(*vm.view().busy.borrow(), vec![true, false]);
    }

    #[test]
    fn test_enquete_validation() {
        let vm = ready_for_survey();
        block_on(vm.handle(Intent::NumeroJourChanged(String::new())));
        block_on(vm.handle(Intent::SubmitEnquete));
        assert_eq!(vm.view().last_toast().0, crate::state::session_state::MSG_MISSING_DAY);

        block_on(vm.handle(Intent::NumeroJourChanged("abc".to_string())));
        block_on(vm.handle(Intent::SubmitEnquete));
        assert_eq!(vm.view().last_toast().0, crate::state::session_state::MSG_INVALID_DAY);
        assert_eq!(vm.api().count("upload_enquete"), 0);
    }

    #[test]
    fn test_enquete_missing_file_sends_nothing() {
        let vm = with_zone(configured(r#"{"configured": true, "numero_jour": 1}"#));
        assert_eq!(vm.session().form().numero_jour, "2");

        block_on(vm.handle(Intent::SubmitEnquete));

        assert_eq!(vm.view().last_toast().0, crate::state::session_state::MSG_MISSING_FIELDS);
        assert!(vm.api().calls().is_empty());
        assert!(vm.view().busy.borrow().is_empty());
    }

    #[test]
    fn test_enquete_transport_failure() {
        let vm = ready_for_survey();
        *vm.api().enquete.borrow_mut() = Err("Network error: offline".to_string());
        block_on(vm.handle(Intent::SubmitEnquete));

        assert_eq!(vm.view().last_toast(), (MSG_UPLOAD_FAILED.to_string(), Severity::Error));
        assert_eq!(vm.api().calls(), vec!["upload_enquete:Tet1:2"]);
        assert!(vm.session().survey_file().is_some());
        assert_eq!(vm.session().form().numero_jour, "2");
        assert_eq!(*vm.view().busy.borrow(), vec![true, false]);
        assert!(!vm.upload_in_flight.get());
    }

    #[test]
    fn test_enquete_result_for_previous_zone_is_not_applied() {
        let vm = ready_for_survey();
        vm.api().slow_uploads.set(true);
        *vm.api().enquete.borrow_mut() = Ok(UploadEnqueteResponse {
            success: true,
            message: Some("12 parcelles ajoutées".to_string()),
            nb_parcelles: Some(12),
            parcelles_ajoutees: Some(12),
            ..UploadEnqueteResponse::default()
        });
        vm.view().renders.borrow_mut().clear();

        block_on(futures::future::join3(
            vm.handle(Intent::SubmitEnquete),
            vm.handle(Intent::ZoneSelected("Tet2".to_string())),
            vm.handle(Intent::EnqueteFileSelected(PendingFile::new("tet2.gpkg", "blob"))),
        ));

        // El toast del upload se muestra igualmente
        assert!(vm.view().has_toast("✅ 12 parcelles ajoutées"));
        assert_eq!(
            vm.api().calls(),
            vec!["upload_enquete:Tet1:2", "zone_info:Tetouan/Tet2"]
        );

        assert_eq!(vm.session().selected_zone(), Some("Tet2"));
        assert_eq!(vm.session().survey_file().map(|f| f.name.clone()), Some("tet2.gpkg".to_string()));
        assert_eq!(vm.session().form().numero_jour, "2");

        let renders = vm.view().renders.borrow();
        assert!(renders
            .iter()
            .filter_map(|page| page.stats.as_ref())
            .all(|stats| stats.parcelles == "0"));
        assert!(!vm.page().export_enabled);
        assert_eq!(vm.view().busy.borrow().last(), Some(&false));
        assert!(!vm.upload_in_flight.get());
    }

    #[test]
    fn test_limite_result_for_previous_zone_is_not_applied() {
        let vm = with_zone(ZoneStatus::Unconfigured);
        vm.api().slow_uploads.set(true);
        *vm.api().limite.borrow_mut() = Ok(UploadLimiteResponse {
            success: true,
            message: Some("Limite uploadée".to_string()),
            ..UploadLimiteResponse::default()
        });
        block_on(vm.handle(Intent::LimiteFileSelected(PendingFile::new("limite.gpkg", "blob"))));
        block_on(vm.handle(Intent::EnqueteurChanged("Ahmed".to_string())));

        block_on(futures::future::join3(
            vm.handle(Intent::SubmitLimite),
            vm.handle(Intent::ZoneSelected("Tet2".to_string())),
            vm.handle(Intent::LimiteFileSelected(PendingFile::new("tet2.gpkg", "blob"))),
        ));

        assert!(vm.view().has_toast("✅ Limite uploadée"));
        assert_eq!(vm.api().calls(), vec!["upload_limite:Tet1:Ahmed", "zone_info:Tetouan/Tet2"]);
        assert_eq!(vm.session().boundary_file().map(|f| f.name.clone()), Some("tet2.gpkg".to_string()));
    }

    #[test]
    fn test_refresh_overview_shows_busy() {
        let vm = view_model();
        block_on(vm.handle(Intent::RefreshOverview));

        assert_eq!(vm.api().calls(), vec!["overview"]);
        assert_eq!(*vm.view().busy.borrow(), vec![true, false]);
    }

    #[test]
    fn test_enquete_application_failure_keeps_state() {
        let vm = ready_for_survey();
        *vm.api().enquete.borrow_mut() = Ok(UploadEnqueteResponse {
            success: false,
            error: Some("Zone clôturée".to_string()),
            ..UploadEnqueteResponse::default()
        });
        let before = vm.session();
        block_on(vm.handle(Intent::SubmitEnquete));

        assert_eq!(vm.view().last_toast().0, "❌ Erreur: Zone clôturée");
        assert_eq!(vm.session().form(), before.form());
        assert!(vm.session().survey_file().is_some());
        assert!(vm.page().stats.unwrap().parcelles == "0");
        assert_eq!(*vm.view().busy.borrow(), vec![true, false]);
    }

    #[test]
    fn test_second_upload_while_in_flight_is_rejected() {
        let vm = ready_for_survey();
        vm.api().slow_uploads.set(true);
        *vm.api().enquete.borrow_mut() = Ok(UploadEnqueteResponse {
            success: false,
            error: Some("x".to_string()),
            ..UploadEnqueteResponse::default()
        });

        block_on(futures::future::join(
            vm.handle(Intent::SubmitEnquete),
            vm.handle(Intent::SubmitEnquete),
        ));

        assert_eq!(vm.api().count("upload_enquete"), 1);
        assert!(vm.view().has_toast(MSG_UPLOAD_IN_FLIGHT));
        assert!(!vm.upload_in_flight.get());
    }

    #[test]
    fn test_stale_zone_response_is_discarded() {
        let vm = view_model();
        block_on(vm.handle(Intent::ProvinceSelected("Tetouan".to_string())));
        *vm.api().zone_info.borrow_mut() = Ok(configured(r#"{"configured": true}"#));
        vm.api().slow_reads.set(true);
        vm.view().toasts.borrow_mut().clear();

        block_on(futures::future::join(
            vm.handle(Intent::ZoneSelected("Tet1".to_string())),
            vm.handle(Intent::ZoneSelected("Tet2".to_string())),
        ));

        assert_eq!(vm.api().count("zone_info"), 2);
        let loaded = vm.view().toasts.borrow().iter().filter(|(m, _)| m == MSG_ZONE_LOADED).count();
        assert_eq!(loaded, 1);
        assert_eq!(vm.session().selected_zone(), Some("Tet2"));
        assert!(vm.session().zone_configured());
        assert_eq!(vm.view().busy.borrow().last(), Some(&false));
    }

    #[test]
    fn test_stale_zone_list_is_discarded() {
        let vm = view_model();
        vm.api().slow_reads.set(true);

        block_on(futures::future::join(
            vm.handle(Intent::ProvinceSelected("Tetouan".to_string())),
            vm.handle(Intent::ProvinceSelected("Larache".to_string())),
        ));

        assert_eq!(vm.api().calls(), vec!["zones:Tetouan", "zones:Larache"]);
        assert_eq!(vm.session().selected_province(), Some("Larache"));
        assert!(vm.view().last_page().zones.enabled);
    }

    #[test]
    fn test_export_navigates() {
        let vm = with_zone(configured(r#"{"configured": true, "nb_parcelles": 5}"#));
        block_on(vm.handle(Intent::Export));

        assert_eq!(*vm.view().navigations.borrow(), vec!["/api/export/ph1/Tetouan/Tet1"]);
        assert_eq!(vm.view().last_toast(), (MSG_EXPORT_STARTED.to_string(), Severity::Info));
    }

    #[test]
    fn test_export_requires_zone() {
        let vm = view_model();
        block_on(vm.handle(Intent::Export));
        assert!(vm.view().navigations.borrow().is_empty());
        assert_eq!(vm.view().last_toast().0, MSG_SELECT_ZONE);
    }

    #[test]
    fn test_close_zone_confirms_and_refreshes() {
        let vm = with_zone(configured(r#"{"configured": true, "nb_parcelles": 5}"#));
        *vm.api().action.borrow_mut() = Ok(ActionResponse {
            success: true,
            message: Some("Zone Tet1 clôturée".to_string()),
            error: None,
        });
        *vm.api().zone_info.borrow_mut() =
            Ok(configured(r#"{"configured": true, "cloturee": true, "nb_parcelles": 5}"#));

        block_on(vm.handle(Intent::CloseZone));

        assert_eq!(vm.view().confirms.borrow().len(), 1);
        assert_eq!(vm.api().calls(), vec!["close:Tet1", "zone_info:Tetouan/Tet1", "overview"]);
        assert!(vm.view().has_toast("✅ Zone Tet1 clôturée"));
        let enquete = vm.view().last_page().enquete.unwrap();
        assert!(!enquete.form_visible);
        assert!(enquete.closure_notice.is_some());
    }

    #[test]
    fn test_close_zone_declined_sends_nothing() {
        let vm = with_zone(configured(r#"{"configured": true}"#));
        vm.view().decline.set(true);
        block_on(vm.handle(Intent::CloseZone));
        assert!(vm.api().calls().is_empty());
        assert!(vm.view().busy.borrow().is_empty());
    }

    #[test]
    fn test_reopen_only_when_closed() {
        let vm = with_zone(configured(r#"{"configured": true}"#));
        block_on(vm.handle(Intent::ReopenZone));
        assert!(vm.view().confirms.borrow().is_empty());

        let vm = with_zone(ZoneStatus::Unconfigured);
        block_on(vm.handle(Intent::CloseZone));
        assert!(vm.api().calls().is_empty());
    }

    #[test]
    fn test_reopen_transport_failure() {
        let vm = with_zone(configured(r#"{"configured": true, "cloturee": true}"#));
        *vm.api().action.borrow_mut() = Err("Network error".to_string());
        block_on(vm.handle(Intent::ReopenZone));

        assert_eq!(vm.api().calls(), vec!["reopen:Tet1"]);
        assert_eq!(vm.view().last_toast().0, MSG_SERVER_UNREACHABLE);
        assert_eq!(*vm.view().busy.borrow(), vec![true, false]);
    }
}
