//! Export affordances for mounted diagrams.
//!
//! Two user-facing conveniences layered over a mounted
//! [`Container`](mmd_render::Container):
//!
//! - [`copy_png`]: rasterize the mounted vector markup at 2x scale and
//!   place it on the system clipboard (quiet best-effort)
//! - [`save_svg`]: write the vector markup unchanged to a file named
//!   [`DEFAULT_SVG_FILENAME`]
//!
//! Both read the markup that is mounted at invocation time, never a cached
//! render, so they always reflect what is on screen.

mod raster;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use mmd_render::Container;

pub use raster::{Raster, extract_svg, rasterize, svg_to_png};

/// Scale applied when rasterizing for the clipboard.
pub const EXPORT_SCALE: f32 = 2.0;

/// Filename used for vector downloads.
pub const DEFAULT_SVG_FILENAME: &str = "diagram.svg";

/// Errors raised by export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no vector markup is mounted")]
    NoVector,

    #[error("failed to parse SVG")]
    SvgParse,

    #[error("failed to allocate pixmap for raster export")]
    PixmapAlloc,

    #[error("failed to encode PNG")]
    PngEncode,

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Copy the mounted diagram to the clipboard as a raster image.
///
/// Best-effort: a missing vector element, a rasterization problem or an
/// unavailable clipboard logs a warning and leaves the clipboard alone.
/// Returns whether the copy happened.
pub fn copy_png(container: &dyn Container) -> bool {
    match try_copy_png(container) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(%error, "diagram copy skipped");
            false
        }
    }
}

fn try_copy_png(container: &dyn Container) -> Result<(), ExportError> {
    let svg = extract_svg(container.markup()).ok_or(ExportError::NoVector)?;
    let raster = rasterize(svg, EXPORT_SCALE)?;

    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;
    clipboard
        .set_image(arboard::ImageData {
            width: raster.width as usize,
            height: raster.height as usize,
            bytes: Cow::Borrowed(&raster.rgba),
        })
        .map_err(|e| ExportError::Clipboard(e.to_string()))?;

    tracing::debug!(
        width = raster.width,
        height = raster.height,
        "copied diagram raster to clipboard"
    );
    Ok(())
}

/// Write the mounted vector markup to `dir` as [`DEFAULT_SVG_FILENAME`].
///
/// Unlike [`copy_png`] this surfaces failures: a missing vector element or
/// an io problem is the caller's to handle.
pub fn save_svg(container: &dyn Container, dir: &Path) -> Result<PathBuf, ExportError> {
    let svg = extract_svg(container.markup()).ok_or(ExportError::NoVector)?;
    let path = dir.join(DEFAULT_SVG_FILENAME);
    std::fs::write(&path, svg)?;
    tracing::debug!(path = %path.display(), "saved diagram vector");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use mmd_render::InMemoryContainer;

    use super::*;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;

    #[test]
    fn test_save_svg_writes_markup_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut container = InMemoryContainer::default();
        container.set_markup(SVG);

        let path = save_svg(&container, dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), DEFAULT_SVG_FILENAME);
        assert_eq!(std::fs::read_to_string(path).unwrap(), SVG);
    }

    #[test]
    fn test_save_svg_without_mounted_vector_fails() {
        let dir = tempfile::tempdir().unwrap();
        let container = InMemoryContainer::default();

        let result = save_svg(&container, dir.path());

        assert!(matches!(result, Err(ExportError::NoVector)));
    }

    #[test]
    fn test_save_svg_extracts_element_from_surrounding_markup() {
        let dir = tempfile::tempdir().unwrap();
        let mut container = InMemoryContainer::default();
        container.set_markup(&format!("<div>{SVG}</div>"));

        let path = save_svg(&container, dir.path()).unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), SVG);
    }

    #[test]
    fn test_copy_png_without_vector_is_quiet() {
        let container = InMemoryContainer::default();

        assert!(!copy_png(&container));
    }
}
