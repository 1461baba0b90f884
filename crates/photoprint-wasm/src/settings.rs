//! Print settings WASM bindings.
//!
//! The browser host owns persistence (e.g. `localStorage`); this wrapper
//! only validates values and converts to and from plain JS objects.

use crate::types::to_js_error;
use photoprint_core::settings::{ParseError, PrintSettings};
use wasm_bindgen::prelude::*;

/// Print preferences wrapper for JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct JsPrintSettings {
    inner: PrintSettings,
}

#[wasm_bindgen]
impl JsPrintSettings {
    /// Create settings with default values (4x6, 300 DPI, fill, high quality)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a plain object. Missing fields take their defaults.
    pub fn from_object(value: JsValue) -> Result<JsPrintSettings, JsValue> {
        let inner: PrintSettings = serde_wasm_bindgen::from_value(value)
            .map_err(|e| to_js_error(format!("Invalid print settings: {e}")))?;
        Ok(Self { inner })
    }

    /// Plain object suitable for `JSON.stringify`.
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Update one setting by key: `mode`, `printer`, `paper`, `dpi`,
    /// `quality` or `policy`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), JsValue> {
        self.set_value(key, value).map_err(to_js_error)
    }

    /// Read one setting by key in its textual form.
    pub fn get(&self, key: &str) -> Result<String, JsValue> {
        self.inner.get(key).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.last_scale_mode.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn printer_name(&self) -> String {
        self.inner.printer_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn paper(&self) -> String {
        self.inner.paper_size.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn dpi(&self) -> u32 {
        self.inner.dpi
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> String {
        self.inner.quality.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn policy(&self) -> String {
        self.inner.orientation_policy.to_string()
    }
}

impl JsPrintSettings {
    pub(crate) fn inner(&self) -> &PrintSettings {
        &self.inner
    }

    pub(crate) fn set_value(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        self.inner.set(key, value)
    }
}
