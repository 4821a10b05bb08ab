//! Infrastructure layer
//!
//! Concrete implementations of the collaborators around the statistics
//! engine: file loading, exports, chart rendering and email delivery.

pub mod chart_renderer;
pub mod csv_export;
pub mod emailjs;
pub mod excel_export;
pub mod workbook_loader;
