pub mod config;
pub mod csv;
pub mod layout;
mod render;
pub mod types;

pub mod pdf;

pub use config::{BadgeOptions, Config, FontConfig, FontSpec, PdfOffset};
pub use self::csv::load_from_csv;
pub use layout::{LayoutSlot, SheetLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
pub use pdf::{generate_pdf, generate_pdf_bytes};
pub use types::{BadgeError, BadgeRecord, Result};
