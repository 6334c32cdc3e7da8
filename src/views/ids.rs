// IDs del esqueleto de la página. Las vistas los crean, incremental.rs los actualiza.

pub const PROVINCE_SELECT: &str = "province-select";
pub const ZONE_SELECT: &str = "zone-select";
pub const EXPORT_BTN: &str = "export-btn";

pub const OVERVIEW_BODY: &str = "overview-body";
pub const OVERVIEW_EMPTY: &str = "overview-empty";
pub const REFRESH_OVERVIEW_BTN: &str = "refresh-overview-btn";

pub const LIMITE_SECTION: &str = "limite-section";
pub const LIMITE_FILE: &str = "limite-file";
pub const LIMITE_FILE_NAME: &str = "limite-file-name";
pub const ENQUETEUR_INPUT: &str = "enqueteur-input";
pub const DATE_DEBUT_INPUT: &str = "date-debut-input";
pub const UPLOAD_LIMITE_BTN: &str = "upload-limite-btn";

pub const STATS_SECTION: &str = "stats-section";
pub const STAT_SURFACE_TOTALE: &str = "stat-surface-totale";
pub const STAT_SURFACE_ENQUETEE: &str = "stat-surface-enquetee";
pub const STAT_SURFACE_RESTANTE: &str = "stat-surface-restante";
pub const STAT_PARCELLES: &str = "stat-parcelles";
pub const STAT_POURCENTAGE: &str = "stat-pourcentage";
pub const STAT_JOUR: &str = "stat-jour";
pub const STAT_PARCELLES_AJOUTEES: &str = "stat-parcelles-ajoutees";
pub const STAT_SURFACE_AJOUTEE: &str = "stat-surface-ajoutee";
pub const PROGRESS_BAR: &str = "progress-bar";

pub const INFO_SECTION: &str = "info-section";
pub const INFO_PROVINCE: &str = "info-province";
pub const INFO_ZONE: &str = "info-zone";
pub const INFO_ENQUETEUR: &str = "info-enqueteur";
pub const INFO_DATE_DEBUT: &str = "info-date-debut";
pub const CLOSED_BADGE: &str = "closed-badge";
pub const CLOSE_ZONE_BTN: &str = "close-zone-btn";
pub const REOPEN_ZONE_BTN: &str = "reopen-zone-btn";

pub const ENQUETE_SECTION: &str = "enquete-section";
pub const ENQUETE_FORM: &str = "enquete-form";
pub const ENQUETE_FILE: &str = "enquete-file";
pub const ENQUETE_FILE_NAME: &str = "enquete-file-name";
pub const NUMERO_JOUR_INPUT: &str = "numero-jour-input";
pub const UPLOAD_ENQUETE_BTN: &str = "upload-enquete-btn";
pub const CLOSURE_NOTICE: &str = "closure-notice";

pub const HISTORY_SECTION: &str = "history-section";
pub const HISTORY_BODY: &str = "history-body";

pub const TOAST_CONTAINER: &str = "toast-container";
pub const LOADING_OVERLAY: &str = "loading-overlay";
