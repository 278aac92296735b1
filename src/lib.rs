//! Form enhancement library
//!
//! Adds visual feedback to HTML forms: focus ripples, button press
//! effects, label pulses on radio/checkbox changes and a password
//! strength meter.
//!
//! The page is reached through the [`Dom`] trait and every animation goes
//! through an [`EffectsPlayer`], so the same wiring runs against the live
//! browser document or the in-memory [`MemoryDom`].
//!
//! # Features
//!
//! - `async` (default): debounced scoring and a tokio frame loop for
//!   [`TimelinePlayer`]
//! - `tracing`: Enables logging via tracing crate
//! - `web`: `web-sys` document, anime.js player and `wasm-bindgen` entry points
//!
//! # Environment Variables
//!
//! - `FORM_ENHANCE_CONFIG_PATH`: Custom path to the JSON config file
//!   (default: `./assets/form-enhance.json`)
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use form_enhance::{init, EnhancerConfig, EventKind, MemoryDom, TimelinePlayer};
//!
//! let dom = Rc::new(MemoryDom::new());
//! let form = dom.element(dom.root(), "form");
//! let password = dom.input(form, "password");
//! let player = Rc::new(TimelinePlayer::new(Rc::clone(&dom)));
//!
//! let report = init(Rc::clone(&dom), Rc::clone(&player), EnhancerConfig::default());
//! assert_eq!(report.password_fields, 1);
//!
//! dom.set_value(password, "Abcdefg1");
//! dom.dispatch(password, EventKind::Input);
//! player.advance(Duration::from_millis(16));
//! ```

// Internal modules
mod config;
mod dom;
mod effects;
mod enhancer;
mod evaluator;
mod sections;

#[cfg(feature = "web")]
mod web;

// Public API
pub use config::{
    get_config_path, load_config, load_config_from_path, load_config_or_default, ButtonConfig,
    ConfigError, EnhancerConfig, IndicatorConfig, RippleConfig, RipplePolicy, CONFIG_PATH_ENV,
};
pub use dom::{ControlQuery, Dom, DomError, DomEvent, EventKind, Listener, MemoryDom, NodeId};
pub use effects::{Animation, Completion, Easing, EffectsPlayer, Property, TimelinePlayer, Track};
pub use enhancer::{
    init, AttachReport, FormEnhancer, CONTENT_CLASS, FOCUS_CLASS, INDICATOR_CLASS, RIPPLE_CLASS,
};
pub use evaluator::{score_password, score_value, StrengthBand, StrengthScore};

#[cfg(feature = "async")]
pub use effects::drive;
#[cfg(feature = "async")]
pub use evaluator::{score_password_tx, SCORE_DEBOUNCE};

#[cfg(feature = "web")]
pub use dom::WebDom;
#[cfg(feature = "web")]
pub use effects::AnimePlayer;
#[cfg(feature = "web")]
pub use web::{enhance_forms, enhance_forms_when_ready, score_password_js};
