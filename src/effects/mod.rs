//! Visual effects
//!
//! An [`Animation`] describes keyframed property tracks; an
//! [`EffectsPlayer`] plays it on a target and reports completion.

mod easing;
mod timeline;

#[cfg(feature = "async")]
mod driver;
#[cfg(feature = "web")]
mod anime;

pub use easing::Easing;
pub use timeline::TimelinePlayer;

#[cfg(feature = "async")]
pub use driver::drive;
#[cfg(feature = "web")]
pub use anime::AnimePlayer;

use std::time::Duration;

/// Callback run once when a playback finishes.
pub type Completion = Box<dyn FnOnce()>;

/// Animatable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Scale,
    Opacity,
    /// Horizontal offset in pixels.
    TranslateX,
    /// Vertical offset in pixels.
    TranslateY,
}

impl Property {
    /// Property key understood by anime.js.
    pub fn anime_key(self) -> &'static str {
        match self {
            Property::Scale => "scale",
            Property::Opacity => "opacity",
            Property::TranslateX => "translateX",
            Property::TranslateY => "translateY",
        }
    }
}

/// Keyframes for one property; values are spread evenly over the duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub property: Property,
    pub keyframes: Vec<f64>,
}

impl Track {
    pub fn new(property: Property, keyframes: impl Into<Vec<f64>>) -> Self {
        Self {
            property,
            keyframes: keyframes.into(),
        }
    }

    /// Value at `progress` in `[0, 1]`, each segment eased on its own.
    pub fn sample(&self, progress: f64, easing: Easing) -> Option<f64> {
        let (first, rest) = self.keyframes.split_first()?;
        if rest.is_empty() {
            return Some(*first);
        }
        let segments = rest.len();
        let scaled = progress.clamp(0.0, 1.0) * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f64;
        let from = self.keyframes[index];
        let to = self.keyframes[index + 1];
        Some(from + (to - from) * easing.apply(local))
    }

    pub fn last(&self) -> Option<f64> {
        self.keyframes.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub tracks: Vec<Track>,
    pub duration: Duration,
    pub easing: Easing,
}

impl Animation {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            tracks: Vec::new(),
            duration,
            easing,
        }
    }

    pub fn track(mut self, property: Property, keyframes: impl Into<Vec<f64>>) -> Self {
        self.tracks.push(Track::new(property, keyframes));
        self
    }

    pub fn track_for(&self, property: Property) -> Option<&Track> {
        self.tracks.iter().find(|t| t.property == property)
    }
}

/// Plays animations on targets of node type `N`.
pub trait EffectsPlayer<N> {
    /// Starts `animation` on `target`; `on_complete` runs once it finishes.
    fn play(&self, target: &N, animation: Animation, on_complete: Option<Completion>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_sample_endpoints() {
        let track = Track::new(Property::Scale, [1.0, 1.05, 1.0]);
        assert_eq!(track.sample(0.0, Easing::Linear), Some(1.0));
        assert_eq!(track.sample(0.5, Easing::Linear), Some(1.05));
        assert_eq!(track.sample(1.0, Easing::Linear), Some(1.0));
    }

    #[test]
    fn test_track_sample_segments_are_eased_independently() {
        let track = Track::new(Property::TranslateX, [0.0, 5.0, 0.0]);
        let quarter = track.sample(0.25, Easing::Linear).unwrap();
        assert!((quarter - 2.5).abs() < 1e-9);
        let three_quarters = track.sample(0.75, Easing::Linear).unwrap();
        assert!((three_quarters - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_track_single_and_empty_keyframes() {
        assert_eq!(Track::new(Property::Opacity, [0.4]).sample(0.7, Easing::Linear), Some(0.4));
        assert_eq!(Track::new(Property::Opacity, Vec::<f64>::new()).sample(0.7, Easing::Linear), None);
    }

    #[test]
    fn test_animation_builder() {
        let animation = Animation::new(Duration::from_millis(600), Easing::EaseInOutQuad)
            .track(Property::Scale, [1.0, 1.05, 1.0])
            .track(Property::Opacity, [1.0, 0.8, 1.0]);
        assert_eq!(animation.tracks.len(), 2);
        assert_eq!(animation.track_for(Property::Opacity).and_then(Track::last), Some(1.0));
        assert!(animation.track_for(Property::TranslateY).is_none());
    }
}
