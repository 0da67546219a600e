use std::io::Cursor;

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::foundation::{
    core::Canvas,
    error::{FukuwaraiError, FukuwaraiResult},
};

/// Prefix of the data URIs produced for serialized scenes.
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;charset=utf-8;base64,";

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// An encoded PNG snapshot of a scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG bytes (straight alpha).
    pub png: Vec<u8>,
}

impl Snapshot {
    /// Embeddable `data:image/png;base64,...` resource.
    pub fn to_data_uri(&self) -> String {
        format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(&self.png))
    }

    /// Decode the PNG back into straight-alpha RGBA8 pixels.
    pub fn decode_rgba8(&self) -> FukuwaraiResult<image::RgbaImage> {
        let img = image::load_from_memory_with_format(&self.png, image::ImageFormat::Png)
            .context("decode snapshot png")?;
        Ok(img.to_rgba8())
    }
}

/// Wrap serialized SVG markup in a base64 data URI.
pub fn encode_svg_data_uri(markup: &str) -> String {
    format!("{SVG_DATA_URI_PREFIX}{}", STANDARD.encode(markup.as_bytes()))
}

/// Extract the markup bytes from an SVG data URI.
pub fn decode_svg_data_uri(uri: &str) -> FukuwaraiResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:image/svg+xml")
        .ok_or_else(|| FukuwaraiError::decode("not an svg data uri"))?;
    let (params, payload) = rest
        .split_once(',')
        .ok_or_else(|| FukuwaraiError::decode("svg data uri has no payload"))?;
    if !params.split(';').any(|p| p == "base64") {
        return Err(FukuwaraiError::decode("svg data uri is not base64 encoded"));
    }
    STANDARD
        .decode(payload)
        .map_err(|e| FukuwaraiError::decode(format!("svg data uri payload: {e}")))
}

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> FukuwaraiResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| FukuwaraiError::decode(format!("parse svg tree: {e}")))
}

/// Rasterize `tree` into a premultiplied RGBA8 buffer of `canvas` size.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    canvas: Canvas,
) -> FukuwaraiResult<Vec<u8>> {
    if canvas.width > Canvas::MAX_DIM || canvas.height > Canvas::MAX_DIM {
        return Err(FukuwaraiError::decode(format!(
            "svg raster size too large: {}x{} (max {MAX}x{MAX})",
            canvas.width,
            canvas.height,
            MAX = Canvas::MAX_DIM
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| FukuwaraiError::decode("failed to allocate snapshot pixmap"))?;

    let size = tree.size();
    let sx = (canvas.width as f32) / size.width();
    let sy = (canvas.height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

/// Encode premultiplied RGBA8 pixels as PNG.
pub fn encode_png(canvas: Canvas, mut rgba8_premul: Vec<u8>) -> FukuwaraiResult<Vec<u8>> {
    demultiply_rgba8_in_place(&mut rgba8_premul);
    let img = image::RgbaImage::from_raw(canvas.width, canvas.height, rgba8_premul)
        .ok_or_else(|| FukuwaraiError::decode("pixel buffer does not match canvas size"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode snapshot png")?;
    Ok(buf)
}

/// Decode an SVG data URI, draw it onto a `canvas`-sized raster and export PNG.
pub fn rasterize_data_uri(uri: &str, canvas: Canvas) -> FukuwaraiResult<Snapshot> {
    let bytes = decode_svg_data_uri(uri)?;
    let tree = parse_svg(&bytes)?;
    let pixels = rasterize_svg_to_premul_rgba8(&tree, canvas)?;
    Ok(Snapshot {
        width: canvas.width,
        height: canvas.height,
        png: encode_png(canvas, pixels)?,
    })
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/raster.rs"]
mod tests;
