//! Browser entry points.

use std::rc::Rc;

use secrecy::SecretString;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::EnhancerConfig;
use crate::dom::WebDom;
use crate::effects::AnimePlayer;
use crate::enhancer::init;
use crate::evaluator::score_password;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn config_from_js(config: JsValue) -> Result<EnhancerConfig, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        return Ok(EnhancerConfig::default());
    }
    swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))
}

/// Enhances the forms of the current document now.
///
/// Pass a config object or undefined/null for defaults.
#[wasm_bindgen(js_name = enhanceForms)]
pub fn enhance_forms(config: JsValue) -> Result<(), JsError> {
    console_error_panic_hook::set_once();

    let config = config_from_js(config)?;
    let dom = WebDom::from_window().map_err(|e| JsError::new(&e.to_string()))?;
    init(Rc::new(dom), Rc::new(AnimePlayer::new()), config);
    Ok(())
}

/// Enhances the forms once `DOMContentLoaded` has fired, or now if the
/// document is already parsed.
#[wasm_bindgen(js_name = enhanceFormsWhenReady)]
pub fn enhance_forms_when_ready(config: JsValue) -> Result<(), JsError> {
    let dom = WebDom::from_window().map_err(|e| JsError::new(&e.to_string()))?;
    let document = dom.document();
    if document.ready_state() != "loading" {
        return enhance_forms(config);
    }

    let callback = Closure::once_into_js(move || {
        if let Err(err) = enhance_forms(config) {
            web_sys::console::error_1(&JsValue::from(err));
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|e| JsError::new(&format!("{e:?}")))
}

/// Strength score (0, 25, 50, 75 or 100) of a password.
#[wasm_bindgen(js_name = scorePassword)]
pub fn score_password_js(password: &str) -> u8 {
    let password = SecretString::new(password.to_string().into());
    score_password(&password).value()
}
