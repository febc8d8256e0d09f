pub mod document;
pub mod types;

pub mod prelude {
    pub use super::document::{encode_windows1252, render_document};
    pub use super::types::{OfxDate, format_ofx_date};
}
