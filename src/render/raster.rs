//! SVG → PNG through `usvg`/`resvg`.
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::foundation::error::{SceneError, SceneResult};

#[derive(Clone, Debug, PartialEq)]
pub struct RasterOpts {
    /// Pixel density multiplier over the SVG's user units.
    pub scale: f32,
    /// Extra directory scanned for `.ttf`/`.otf`/`.ttc` files.
    pub fonts_dir: Option<PathBuf>,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            scale: 1.0,
            fonts_dir: None,
        }
    }
}

fn build_fontdb(fonts_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = fonts_dir {
        db.load_fonts_dir(dir);
    }
    tracing::debug!(faces = db.faces().count(), "font database ready");
    Arc::new(db)
}

/// Parse SVG text into a render tree.
pub fn parse_svg(svg: &str, opts: &RasterOpts) -> SceneResult<usvg::Tree> {
    let options = usvg::Options {
        fontdb: build_fontdb(opts.fonts_dir.as_deref()),
        ..Default::default()
    };
    usvg::Tree::from_str(svg, &options).map_err(|e| SceneError::render(format!("parse svg: {e}")))
}

/// Rasterize onto an opaque white background.
pub fn rasterize(svg: &str, opts: &RasterOpts) -> SceneResult<image::RgbaImage> {
    if !opts.scale.is_finite() || opts.scale <= 0.0 {
        return Err(SceneError::validation("raster scale must be > 0"));
    }
    let tree = parse_svg(svg, opts)?;

    let size = tree.size();
    let width = (size.width() * opts.scale).ceil() as u32;
    let height = (size.height() * opts.scale).ceil() as u32;

    const MAX_DIM: u32 = 16_384;
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(SceneError::render(format!(
            "raster size {width}x{height} out of bounds (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SceneError::render("failed to allocate pixmap"))?;
    pixmap.fill(resvg::tiny_skia::Color::WHITE);
    let xform = resvg::tiny_skia::Transform::from_scale(opts.scale, opts.scale);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    // Opaque background: premultiplied and straight alpha coincide.
    image::RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| SceneError::render("pixmap size mismatch"))
}

pub fn write_png(svg: &str, path: &Path, opts: &RasterOpts) -> SceneResult<()> {
    let img = rasterize(svg, opts)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| SceneError::render(format!("write png '{}': {e}", path.display())))?;
    tracing::debug!(path = %path.display(), width = img.width(), height = img.height(), "wrote png");
    Ok(())
}
