// ============================================================================
// VIEWS - Esqueleto DOM + adaptador ViewPort del navegador
// ============================================================================
// Las vistas crean nodos y traducen eventos DOM en `Intent`s. No deciden nada.
// ============================================================================

use std::rc::Rc;

use crate::viewmodels::Intent;

pub mod ids;
pub mod app;
pub mod selector;
pub mod overview;
pub mod limite;
pub mod zone_panels;
pub mod enquete;
pub mod toast;
pub mod web_view;

pub use app::render_app;
pub use toast::show_toast;
pub use web_view::WebView;

/// Canal vista -> ViewModel
pub type Dispatch = Rc<dyn Fn(Intent<web_sys::File>)>;
