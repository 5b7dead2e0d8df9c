//! HTML page rendering
//!
//! One page per namespace, each carrying navigation links to every page.

mod error;
mod html;
mod writer;

use crate::config::runtime::RenderPreferences;
use crate::logging::codes;

pub use error::RenderError;
pub use writer::{format_signature, page_file_name, HtmlWriter, PageMap};

/// Create a writer from runtime preferences
pub fn create_writer(preferences: &RenderPreferences) -> HtmlWriter {
    HtmlWriter::new(preferences.clone())
}

/// Initialize render logging validation (for system startup)
pub fn init_render_logging() -> Result<(), String> {
    codes::ensure_registered(
        &[
            codes::render::OUTPUT_DIRECTORY_FAILURE,
            codes::render::PAGE_WRITE_FAILURE,
            codes::render::TOO_MANY_PAGES,
        ],
        "render",
    )
}
