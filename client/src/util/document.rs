//! Live-document presentation surface.
//!
//! Applies root font scale to `<html style="font-size">` and toggles
//! presentation classes on `<html>` or `<body>`. Requires a browser
//! environment; SSR paths record into a `MemorySurface` instead.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use std::sync::Arc;

#[cfg(not(feature = "hydrate"))]
use prefs::MemorySurface;
use prefs::{Element, PresentationSurface};

/// CSS value for a root font scale.
#[must_use]
pub fn font_scale_css(percent: u16) -> String {
    format!("{percent}%")
}

/// Presentation surface that writes to `window.document`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentSurface;

impl PresentationSurface for DocumentSurface {
    fn set_root_font_scale(&self, percent: u16) {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(root) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.document_element())
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            else {
                return;
            };
            let _ = root.style().set_property("font-size", &font_scale_css(percent));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = percent;
        }
    }

    fn set_class(&self, element: Element, class: &'static str, enabled: bool) {
        #[cfg(feature = "hydrate")]
        {
            let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let target: Option<web_sys::Element> = match element {
                Element::Root => doc.document_element(),
                Element::Body => doc.body().map(Into::into),
            };
            if let Some(el) = target {
                let class_list = el.class_list();
                if enabled {
                    let _ = class_list.add_1(class);
                } else {
                    let _ = class_list.remove_1(class);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (element, class, enabled);
        }
    }
}

/// Surface for the current environment: the live document in the browser,
/// a recording surface on the server.
#[must_use]
pub fn browser_surface() -> Arc<dyn PresentationSurface> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(DocumentSurface)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(MemorySurface::new())
    }
}
