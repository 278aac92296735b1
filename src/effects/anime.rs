//! Effects player backed by the page's anime.js.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::{Animation, Completion, EffectsPlayer};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = anime)]
    fn anime(params: &Object) -> Result<JsValue, JsValue>;
}

/// Forwards animations to the global `anime()` function.
///
/// When anime.js is not loaded the call fails and the effect is skipped;
/// completions of skipped effects never run.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnimePlayer;

impl AnimePlayer {
    pub fn new() -> Self {
        Self
    }
}

fn anime_params(
    target: &JsValue,
    animation: &Animation,
    on_complete: Option<Completion>,
) -> Result<Object, JsValue> {
    let params = Object::new();
    Reflect::set(&params, &JsValue::from_str("targets"), target)?;
    for track in &animation.tracks {
        let keyframes: Array = track
            .keyframes
            .iter()
            .map(|v| JsValue::from_f64(*v))
            .collect();
        Reflect::set(
            &params,
            &JsValue::from_str(track.property.anime_key()),
            &keyframes,
        )?;
    }
    Reflect::set(
        &params,
        &JsValue::from_str("duration"),
        &JsValue::from_f64(animation.duration.as_secs_f64() * 1000.0),
    )?;
    Reflect::set(
        &params,
        &JsValue::from_str("easing"),
        &JsValue::from_str(&animation.easing.to_string()),
    )?;
    if let Some(complete) = on_complete {
        let callback = Closure::once_into_js(move || complete());
        Reflect::set(&params, &JsValue::from_str("complete"), &callback)?;
    }
    Ok(params)
}

impl EffectsPlayer<Element> for AnimePlayer {
    fn play(&self, target: &Element, animation: Animation, on_complete: Option<Completion>) {
        let result = anime_params(target.as_ref(), &animation, on_complete).and_then(|p| anime(&p));
        if let Err(_err) = result {
            #[cfg(feature = "tracing")]
            tracing::warn!("anime() call failed: {:?}", _err);
        }
    }
}
