//! PNG export with embedded metadata (tEXt chunks).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use escapist_core::{FractalMode, SimulationParams, Viewport};

use crate::buffer::RenderBuffer;

/// Frame parameters to embed in an exported PNG as tEXt chunks.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub mode: FractalMode,
    pub viewport: Viewport,
    pub params: SimulationParams,
    pub gradient_name: String,
}

/// Write an RGBA buffer as a PNG file with embedded frame metadata.
///
/// Uses the `png` crate directly to inject custom tEXt chunks readable by
/// exiftool and most image viewers. Parent directories are created.
pub fn export_png(
    buffer: &RenderBuffer,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "Escapist".to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(buffer, metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        "Exported PNG {}x{} to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let mut desc = format!(
        "{} - Start: {}, Size: {} x {}, Resolution: {}, Accuracy: {}",
        meta.mode.label(),
        meta.viewport.start,
        meta.viewport.width,
        meta.viewport.height,
        meta.params.resolution,
        meta.params.accuracy,
    );
    if let Some(c) = meta.mode.julia_c() {
        desc.push_str(&format!(", Julia C: {c}"));
    }
    desc
}

fn build_metadata_pairs(buffer: &RenderBuffer, meta: &ExportMetadata) -> Vec<(String, String)> {
    let vp = &meta.viewport;
    let mut pairs = vec![
        ("Escapist.Mode".into(), meta.mode.label().to_string()),
        ("Escapist.StartRe".into(), vp.start.re.to_string()),
        ("Escapist.StartIm".into(), vp.start.im.to_string()),
        ("Escapist.ViewWidth".into(), vp.width.to_string()),
        ("Escapist.ViewHeight".into(), vp.height.to_string()),
        ("Escapist.Resolution".into(), meta.params.resolution.to_string()),
        ("Escapist.Accuracy".into(), meta.params.accuracy.to_string()),
        ("Escapist.Gradient".into(), meta.gradient_name.clone()),
        (
            "Escapist.Size".into(),
            format!("{}x{}", buffer.width, buffer.height),
        ),
    ];
    if let Some(c) = meta.mode.julia_c() {
        pairs.push(("Escapist.JuliaC_Re".into(), c.re.to_string()));
        pairs.push(("Escapist.JuliaC_Im".into(), c.im.to_string()));
    }
    pairs
}
