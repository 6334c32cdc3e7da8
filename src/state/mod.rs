// ============================================================================
// STATE MODULE - Sesión + datos del servidor
// ============================================================================

pub mod session_state;
pub mod page_data;

pub use session_state::{FormFields, Session};
pub use page_data::{PageData, StatsPatch};
