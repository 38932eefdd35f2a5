//! SVG rasterization for the copy affordance.

use crate::ExportError;

/// An RGBA raster of a rendered diagram.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// Straight (non-premultiplied) RGBA bytes, row-major.
    pub rgba: Vec<u8>,
}

/// Find the vector element inside mounted markup.
///
/// Cheap, non-validating scan for the first `<svg …>…</svg>` span; this is
/// sufficient for engine-produced markup.
#[must_use]
pub fn extract_svg(markup: &str) -> Option<&str> {
    let start = markup.find("<svg")?;
    let rest = &markup[start..];
    let end = rest.find("</svg>")? + "</svg>".len();
    Some(&rest[..end])
}

/// Rasterize SVG text at the given scale.
pub fn rasterize(svg: &str, scale: f32) -> Result<Raster, ExportError> {
    let pixmap = svg_to_pixmap(svg, scale)?;
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    Ok(Raster {
        width: pixmap.width(),
        height: pixmap.height(),
        rgba,
    })
}

/// Rasterize SVG text at the given scale and encode as PNG.
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, ExportError> {
    let pixmap = svg_to_pixmap(svg, scale)?;
    pixmap.encode_png().map_err(|_| ExportError::PngEncode)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn svg_to_pixmap(svg: &str, scale: f32) -> Result<tiny_skia::Pixmap, ExportError> {
    let mut opt = usvg::Options::default();
    // Text labels need fonts; system selection is best-effort.
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| ExportError::SvgParse)?;

    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(ExportError::PixmapAlloc)?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" width="10" height="10"><rect width="10" height="10" fill="black"/></svg>"#;

    #[test]
    fn test_extract_svg_spans_element() {
        let markup = format!("<figure>{SVG}<figcaption>x</figcaption></figure>");

        assert_eq!(extract_svg(&markup), Some(SVG));
    }

    #[test]
    fn test_extract_svg_missing() {
        assert_eq!(extract_svg("<div>nothing here</div>"), None);
        assert_eq!(extract_svg(""), None);
    }

    #[test]
    fn test_rasterize_scales_dimensions() {
        let raster = rasterize(SVG, 2.0).unwrap();

        assert_eq!((raster.width, raster.height), (20, 20));
        assert_eq!(raster.rgba.len(), 20 * 20 * 4);
        // The rect fills the surface with opaque black.
        assert_eq!(&raster.rgba[..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_svg_to_png_produces_png_signature() {
        let bytes = svg_to_png(SVG, 2.0).unwrap();

        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn test_rasterize_rejects_invalid_svg() {
        assert!(matches!(
            rasterize("<svg", 2.0),
            Err(ExportError::SvgParse)
        ));
    }
}
