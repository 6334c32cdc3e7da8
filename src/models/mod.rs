pub mod zone;
pub mod zone_info;
pub mod upload;

pub use zone::{ZoneEntry, ZoneSummary, ZonesOverview};
pub use zone_info::{HistoryEntry, ZoneInfo, ZoneStatus};
pub use upload::{
    ActionResponse, EnqueteUpload, LimiteUpload, PendingFile, UploadEnqueteResponse,
    UploadLimiteResponse,
};
