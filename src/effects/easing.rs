//! Easing curves, named the way anime.js names them.

use std::f64::consts::PI;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseOutExpo,
    EaseInOutQuad,
    /// Damped oscillation overshooting the target.
    EaseOutElastic { amplitude: f64, period: f64 },
}

impl Easing {
    /// The `easeOutElastic(1, .5)` curve used by press and toggle effects.
    pub const ELASTIC: Easing = Easing::EaseOutElastic {
        amplitude: 1.0,
        period: 0.5,
    };

    /// Eased progress for linear progress `t` in `[0, 1]`.
    ///
    /// Every curve maps 0 to 0 and 1 to 1.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutExpo => 1.0 - expo_in(1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutElastic { amplitude, period } => {
                1.0 - elastic_in(1.0 - t, amplitude, period)
            }
        }
    }
}

fn expo_in(t: f64) -> f64 {
    if t == 0.0 { 0.0 } else { 2f64.powf(10.0 * t - 10.0) }
}

fn elastic_in(t: f64, amplitude: f64, period: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let a = amplitude.clamp(1.0, 10.0);
    let p = period.clamp(0.1, 2.0);
    let s = p / (2.0 * PI) * (1.0 / a).asin();
    -a * 2f64.powf(10.0 * (t - 1.0)) * (((t - 1.0) - s) * (2.0 * PI) / p).sin()
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::EaseOutExpo => write!(f, "easeOutExpo"),
            Easing::EaseInOutQuad => write!(f, "easeInOutQuad"),
            Easing::EaseOutElastic { amplitude, period } => {
                write!(f, "easeOutElastic({amplitude}, {period})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseOutExpo,
        Easing::EaseInOutQuad,
        Easing::ELASTIC,
    ];

    #[test]
    fn test_curves_hit_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing} at 1");
        }
    }

    #[test]
    fn test_out_expo_is_front_loaded() {
        assert!(Easing::EaseOutExpo.apply(0.2) > 0.7);
    }

    #[test]
    fn test_in_out_quad_is_symmetric() {
        let a = Easing::EaseInOutQuad.apply(0.25);
        let b = Easing::EaseInOutQuad.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-9);
        assert!((Easing::EaseInOutQuad.apply(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_elastic_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::ELASTIC.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_anime_names() {
        assert_eq!(Easing::EaseOutExpo.to_string(), "easeOutExpo");
        assert_eq!(Easing::ELASTIC.to_string(), "easeOutElastic(1, 0.5)");
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }
}
