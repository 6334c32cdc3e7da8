// Utils compartidos

pub mod format;

pub use format::*;
