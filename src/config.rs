//! Typed configuration with documented defaults.
//!
//! Callers pass a plain options object from JS; every field is optional and
//! nested groups overlay independently, so overriding `touch.touchFactor`
//! keeps the default `touch.frictionInertia`. The merged result is an
//! immutable `Config` for the lifetime of the controller.

use serde::{Deserialize, Serialize};

/// Resolved configuration. Immutable after `init`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub selectors: Selectors,
    pub scroll: ScrollConfig,
    pub touch: TouchConfig,
    /// Speed ceiling for the skew computation, px/ms.
    pub max_speed: f64,
    /// Degrees of skew per unit of scroll speed.
    pub skew_factor: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selectors {
    /// Element whose translation replaces native scrolling.
    pub container: String,
    /// Elements receiving the skew transform.
    pub elements: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrollConfig {
    /// Pixels per normalized wheel-spin unit.
    pub spin_factor: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TouchConfig {
    /// Rate converting touch travel to scroll travel.
    pub touch_factor: f64,
    /// Per-tick velocity retention of the inertia loop; must stay below 1.
    pub friction_inertia: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            scroll: ScrollConfig::default(),
            touch: TouchConfig::default(),
            max_speed: 15.0,
            skew_factor: 0.2,
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            container: ".js-jelly-scroll".into(),
            elements: ".js-jelly-scroll > *".into(),
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { spin_factor: 150.0 }
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            touch_factor: 1.0,
            friction_inertia: 0.6,
        }
    }
}

/// Caller-supplied overrides; absent fields keep defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub selectors: SelectorOverrides,
    pub scroll: ScrollOverrides,
    pub touch: TouchOverrides,
    pub max_speed: Option<f64>,
    pub skew_factor: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectorOverrides {
    pub container: Option<String>,
    pub elements: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrollOverrides {
    pub spin_factor: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TouchOverrides {
    pub touch_factor: Option<f64>,
    pub friction_inertia: Option<f64>,
}

impl Config {
    /// Overlay options onto the defaults, field by field.
    pub fn with_overrides(options: Options) -> Self {
        let mut cfg = Config::default();
        if let Some(v) = options.selectors.container {
            cfg.selectors.container = v;
        }
        if let Some(v) = options.selectors.elements {
            cfg.selectors.elements = v;
        }
        if let Some(v) = options.scroll.spin_factor {
            cfg.scroll.spin_factor = v;
        }
        if let Some(v) = options.touch.touch_factor {
            cfg.touch.touch_factor = v;
        }
        if let Some(v) = options.touch.friction_inertia {
            cfg.touch.friction_inertia = v;
        }
        if let Some(v) = options.max_speed {
            cfg.max_speed = v;
        }
        if let Some(v) = options.skew_factor {
            cfg.skew_factor = v;
        }
        cfg
    }
}
