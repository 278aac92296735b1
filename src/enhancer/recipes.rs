//! The animations played by the enhancer.

use std::time::Duration;

use crate::config::RippleConfig;
use crate::effects::{Animation, Easing, Property};

/// Focus ripple: grow and fade out.
pub fn ripple(config: &RippleConfig) -> Animation {
    Animation::new(Duration::from_millis(config.duration_ms), Easing::EaseOutExpo)
        .track(Property::Scale, [1.0, config.max_scale])
        .track(Property::Opacity, [config.start_opacity, 0.0])
}

/// First half of a button press: shrink.
pub fn press_down() -> Animation {
    Animation::new(Duration::from_millis(100), Easing::EaseInOutQuad)
        .track(Property::Scale, [1.0, 0.95])
}

/// Second half of a button press: spring back.
pub fn press_release() -> Animation {
    Animation::new(Duration::from_millis(300), Easing::ELASTIC).track(Property::Scale, [0.95, 1.0])
}

pub fn radio_pulse() -> Animation {
    Animation::new(Duration::from_millis(400), Easing::ELASTIC)
        .track(Property::Scale, [1.0, 1.05, 1.0])
}

pub fn checkbox_nudge() -> Animation {
    Animation::new(Duration::from_millis(300), Easing::ELASTIC)
        .track(Property::TranslateX, [0.0, 5.0, 0.0])
}

pub fn submit_pulse() -> Animation {
    Animation::new(Duration::from_millis(600), Easing::EaseInOutQuad)
        .track(Property::Scale, [1.0, 1.05, 1.0])
        .track(Property::Opacity, [1.0, 0.8, 1.0])
}
