// ============================================================================
// VIEWMODELS - Lógica de la página, sin DOM
// ============================================================================

pub mod intent;
pub mod page_viewmodel;
pub mod view_port;
pub mod zone_viewmodel;

pub use intent::Intent;
pub use page_viewmodel::{build_page, PageViewModel};
pub use view_port::{Severity, ViewPort};
pub use zone_viewmodel::ZoneViewModel;
