use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::align::calculator::Side;
use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::geometry::rect::DrawRect;
use crate::render::cpu::{Painter, SourcePaint};

/// Appearance of the "Before"/"After" overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    /// Text drawn over the before photo.
    pub before_text: String,
    /// Text drawn over the after photo.
    pub after_text: String,
    /// Extra directory scanned for `.ttf`/`.otf`/`.ttc` files, on top of system fonts.
    pub font_dir: Option<PathBuf>,
    /// Font size as a fraction of the panel width.
    pub size_frac: f64,
    /// Baseline position as a fraction of the canvas height.
    pub baseline_frac: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            before_text: "Before".to_owned(),
            after_text: "After".to_owned(),
            font_dir: None,
            size_frac: 0.04,
            baseline_frac: 0.94,
        }
    }
}

impl LabelStyle {
    /// Replace both label texts.
    pub fn with_texts(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.before_text = before.into();
        self.after_text = after.into();
        self
    }

    /// Load extra fonts from `dir`.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dir = Some(dir.into());
        self
    }

    /// Font size relative to panel width.
    pub fn with_size_frac(mut self, size_frac: f64) -> Self {
        self.size_frac = size_frac;
        self
    }

    /// Text for one side.
    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::Before => &self.before_text,
            Side::After => &self.after_text,
        }
    }
}

/// Rasterizes label text through usvg/resvg and caches the result per side and panel width.
///
/// Labels are cosmetic: when no font face is available the renderer draws nothing.
pub struct LabelRenderer {
    style: LabelStyle,
    fontdb: Arc<usvg::fontdb::Database>,
    cache: HashMap<(Side, u32), Option<SourcePaint>>,
}

impl LabelRenderer {
    /// Build the font database for `style`.
    pub fn new(style: LabelStyle) -> Self {
        let fontdb = build_label_fontdb(style.font_dir.as_deref());
        if fontdb.is_empty() {
            tracing::debug!("no fonts available, labels will be skipped");
        }
        Self {
            style,
            fontdb,
            cache: HashMap::new(),
        }
    }

    /// Style in use.
    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    /// Draw the label for `side`, centered horizontally in `region`.
    ///
    /// `panel_width` sizes the text; `canvas` fixes the baseline row.
    pub fn draw(
        &mut self,
        painter: &mut Painter,
        side: Side,
        region: Rect,
        panel_width: f64,
        canvas: Canvas,
    ) -> SplitshotResult<()> {
        let key = (side, panel_width.round().max(1.0) as u32);
        if !self.cache.contains_key(&key) {
            let raster = self.rasterize(side, panel_width)?;
            self.cache.insert(key, raster);
        }
        let Some(Some(paint)) = self.cache.get(&key) else {
            return Ok(());
        };

        let w = f64::from(paint.width());
        let h = f64::from(paint.height());
        let baseline = canvas.h() * self.style.baseline_frac;
        let cx = (region.x0 + region.x1) / 2.0;
        let dst = DrawRect {
            x: (cx - w / 2.0).round(),
            y: (baseline - h * BASELINE_IN_BOX).round(),
            width: w,
            height: h,
        };
        painter.draw_image(paint, dst, region, 1.0);
        Ok(())
    }

    fn rasterize(&self, side: Side, panel_width: f64) -> SplitshotResult<Option<SourcePaint>> {
        let text = self.style.text(side);
        if text.trim().is_empty() || self.fontdb.is_empty() {
            return Ok(None);
        }
        let font_size = (panel_width * self.style.size_frac).max(6.0);
        let svg = label_svg(text, font_size);

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opts)
            .map_err(|e| SplitshotError::surface(format!("parse label svg: {e}")))?;
        if tree.root().children().is_empty() {
            // Text could not be shaped with any installed face.
            return Ok(None);
        }

        let size = tree.size();
        let (w, h) = (
            size.width().ceil().max(1.0) as u32,
            size.height().ceil().max(1.0) as u32,
        );
        let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
            .ok_or_else(|| SplitshotError::surface("failed to allocate label pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        SourcePaint::from_premul_bytes(pixmap.data(), w, h).map(Some)
    }
}

/// Where the text baseline sits inside the label box, as a fraction of its height.
const BASELINE_IN_BOX: f64 = 0.75;

fn label_svg(text: &str, font_size: f64) -> String {
    let glyph_w = font_size * 0.62;
    let width = (glyph_w * text.chars().count() as f64 + font_size * 2.0).ceil();
    let text = escape_xml(text);
    let height = (font_size * 1.5).ceil();
    let cx = width / 2.0;
    let baseline = (height * BASELINE_IN_BOX).round();
    let blur = (font_size * 0.08).max(1.0);
    let dy = (font_size * 0.05).max(1.0);
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
<defs><filter id="s" x="-20%" y="-50%" width="140%" height="200%"><feGaussianBlur stdDeviation="{blur}"/></filter></defs>
<text x="{cx}" y="{sy}" font-family="sans-serif" font-weight="bold" font-size="{font_size}" text-anchor="middle" fill="#000000" fill-opacity="0.6" filter="url(#s)">{text}</text>
<text x="{cx}" y="{baseline}" font-family="sans-serif" font-weight="bold" font-size="{font_size}" text-anchor="middle" fill="#ffffff">{text}</text>
</svg>"##,
        sy = baseline + dy,
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn build_label_fontdb(font_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = font_dir {
        load_fonts_from_dir(&mut db, dir);
    }
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/label.rs"]
mod tests;
