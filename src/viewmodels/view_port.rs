use crate::viewmodels::page_viewmodel::PageViewModel;

/// Nivel de un toast
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "toast-info",
            Severity::Success => "toast-success",
            Severity::Warning => "toast-warning",
            Severity::Error => "toast-error",
        }
    }
}

/// Superficie de salida del ViewModel.
/// En el navegador es `WebView` (DOM); en los tests, un doble que registra llamadas.
pub trait ViewPort {
    /// Aplicar el estado completo de la página
    fn render(&self, page: &PageViewModel);

    /// Toast efímero; varios pueden coexistir
    fn notify(&self, message: &str, severity: Severity);

    /// Overlay de carga a pantalla completa
    fn set_busy(&self, busy: bool);

    /// Navegar a una URL (descarga del export)
    fn navigate(&self, url: &str);

    /// Pedir confirmación al usuario
    fn confirm(&self, message: &str) -> bool;
}
