#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn font_scale_css_is_percent() {
    assert_eq!(font_scale_css(100), "100%");
    assert_eq!(font_scale_css(175), "175%");
}

#[test]
fn document_surface_is_noop_but_callable() {
    DocumentSurface.set_root_font_scale(150);
    DocumentSurface.set_class(Element::Root, "dark", true);
    DocumentSurface.set_class(Element::Body, "high-contrast", false);
}

#[test]
fn browser_surface_accepts_presentation_calls() {
    let surface = browser_surface();
    surface.set_root_font_scale(120);
    surface.set_class(Element::Root, "dark", true);
}
