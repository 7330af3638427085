//! DOM glue: element lookup, geometry reads, transform writes, clocks.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{HtmlElement, Window};

use crate::config::Selectors;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Handles to the page pieces the controller touches. Resolved once at init;
/// a missing container is a fatal misconfiguration.
pub struct Page {
    window: Window,
    container: HtmlElement,
    elements: Vec<HtmlElement>,
}

impl Page {
    pub fn attach(selectors: &Selectors) -> Result<Self, String> {
        let window = web_sys::window().ok_or("no global `window` exists")?;
        let document = window.document().ok_or("window has no document")?;

        let container = document
            .query_selector(&selectors.container)
            .map_err(|_| format!("invalid container selector `{}`", selectors.container))?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| format!("container `{}` not found", selectors.container))?;

        let mut elements = Vec::new();
        let list = document
            .query_selector_all(&selectors.elements)
            .map_err(|_| format!("invalid elements selector `{}`", selectors.elements))?;
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                elements.push(el);
            }
        }
        // an empty element list just makes the skew a no-op

        Ok(Self {
            window,
            container,
            elements,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn content_height(&self) -> f64 {
        self.container.offset_height() as f64
    }

    pub fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    /// Monotonic milliseconds, same epoch as the animation-frame timestamps.
    pub fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Move the container so the page appears scrolled to `offset`.
    pub fn apply_scroll(&self, offset: f64) {
        self.container
            .style()
            .set_property("transform", &format!("translate3d(0px, {}px, 0px)", -offset))
            .ok();
    }

    /// Shear the tracked sections by `deg` degrees.
    pub fn apply_skew(&self, deg: f64) {
        for el in &self.elements {
            el.style()
                .set_property("transform", &format!("skewY({}deg)", deg))
                .ok();
        }
    }
}
