//! Rendered geometry.
//!
//! A parsed document has no layout engine behind it, so geometry is a seam:
//! the engine asks a [`Layout`] for each candidate's bounding box. Hosts that
//! do render (a headless browser bridge, a layout crate) plug in their own
//! implementation; [`DeclaredLayout`] reads the sizes authored in the markup.

use crate::dom::{self, NodeRef};
use crate::patterns::STYLE_DIMENSION;

/// A rendered bounding box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl Rect {
    /// Build a rect from its dimensions.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Source of rendered geometry for element nodes.
pub trait Layout {
    /// Bounding box of `node`, or `None` when it has no resolvable geometry.
    ///
    /// Callers treat `None` as a zero-size box, the same as an unrendered node.
    fn rect(&self, node: &NodeRef) -> Option<Rect>;
}

/// Geometry taken from sizes declared in the markup.
///
/// Reads `height`/`width` declarations from the inline `style` attribute
/// (pixel or unitless values) and falls back to the `height`/`width`
/// attributes. A dimension that cannot be resolved counts as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredLayout;

impl DeclaredLayout {
    fn declared(node: &NodeRef) -> (Option<f64>, Option<f64>) {
        let mut width = None;
        let mut height = None;

        if let Some(style) = dom::attr(node, "style") {
            for decl in style.split(';') {
                let Some(caps) = STYLE_DIMENSION.captures(decl) else {
                    continue;
                };
                let Ok(value) = caps[2].parse::<f64>() else {
                    continue;
                };
                if caps[1].eq_ignore_ascii_case("width") {
                    width = Some(value);
                } else {
                    height = Some(value);
                }
            }
        }

        let from_attr = |name: &str| {
            dom::attr(node, name).and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
        };
        (width.or_else(|| from_attr("width")), height.or_else(|| from_attr("height")))
    }
}

impl Layout for DeclaredLayout {
    fn rect(&self, node: &NodeRef) -> Option<Rect> {
        match Self::declared(node) {
            (None, None) => None,
            (w, h) => Some(Rect::new(w.unwrap_or(0.0), h.unwrap_or(0.0))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn rect_of(html: &str) -> Option<Rect> {
        let doc = dom::parse(html);
        let node = doc.select("#t").nodes()[0];
        let rect = DeclaredLayout.rect(&node);
        rect
    }

    #[test]
    fn test_inline_style_dimensions() {
        let r = rect_of(r#"<div id="t" style="height: 120px; width: 400px">x</div>"#);
        assert_eq!(r, Some(Rect::new(400.0, 120.0)));
    }

    #[test]
    fn test_attribute_fallback() {
        let r = rect_of(r#"<div id="t" width="300" height="90px">x</div>"#);
        assert_eq!(r, Some(Rect::new(300.0, 90.0)));
    }

    #[test]
    fn test_style_wins_over_attribute() {
        let r = rect_of(r#"<div id="t" style="width:250px" width="100" height="40">x</div>"#);
        assert_eq!(r, Some(Rect::new(250.0, 40.0)));
    }

    #[test]
    fn test_undeclared_geometry_is_none() {
        assert_eq!(rect_of(r#"<div id="t" style="color: red">x</div>"#), None);
        assert_eq!(rect_of(r#"<div id="t">x</div>"#), None);
    }

    #[test]
    fn test_partial_declaration_zero_fills() {
        let r = rect_of(r#"<div id="t" style="height:50px">x</div>"#);
        assert_eq!(r, Some(Rect::new(0.0, 50.0)));
    }
}
