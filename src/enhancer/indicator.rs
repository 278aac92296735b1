//! Password strength indicator bar.

use crate::config::IndicatorConfig;
use crate::dom::{Dom, DomError};
use crate::evaluator::StrengthScore;

pub const INDICATOR_CLASS: &str = "password-strength-indicator";

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Builds an empty, detached indicator bar.
pub fn create<D: Dom>(dom: &D, config: &IndicatorConfig) -> Result<D::Node, DomError> {
    let bar = dom.create_element("div")?;
    dom.add_class(&bar, INDICATOR_CLASS);
    dom.set_style(&bar, "height", &px(config.height_px));
    dom.set_style(&bar, "width", "0%");
    dom.set_style(&bar, "background-color", &config.idle_color);
    dom.set_style(&bar, "transition", &config.transition);
    dom.set_style(&bar, "margin-top", &px(config.margin_top_px));
    dom.set_style(&bar, "border-radius", &px(config.radius_px));
    Ok(bar)
}

/// Resizes and recolours the bar for `score`.
pub fn render<D: Dom>(dom: &D, bar: &D::Node, score: StrengthScore) {
    dom.set_style(bar, "width", &score.as_css_width());
    dom.set_style(bar, "background-color", score.band().color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn test_create_indicator_styles() {
        let dom = MemoryDom::new();
        let bar = create(&dom, &IndicatorConfig::default()).unwrap();

        assert!(dom.has_class(&bar, INDICATOR_CLASS));
        assert_eq!(dom.style(&bar, "height").as_deref(), Some("3px"));
        assert_eq!(dom.style(&bar, "width").as_deref(), Some("0%"));
        assert_eq!(dom.style(&bar, "background-color").as_deref(), Some("#94B4C1"));
        assert_eq!(dom.style(&bar, "margin-top").as_deref(), Some("5px"));
        assert_eq!(dom.style(&bar, "border-radius").as_deref(), Some("3px"));
        assert_eq!(dom.parent(&bar), None);
    }

    #[test]
    fn test_render_bands() {
        let dom = MemoryDom::new();
        let bar = create(&dom, &IndicatorConfig::default()).unwrap();

        let cases = [
            (0, "0%", "#ff4d4d"),
            (1, "25%", "#ffa64d"),
            (2, "50%", "#ffff4d"),
            (3, "75%", "#4dff4d"),
            (4, "100%", "#4dff4d"),
        ];
        for (met, width, color) in cases {
            render(&dom, &bar, StrengthScore::from_sections(met));
            assert_eq!(dom.style(&bar, "width").as_deref(), Some(width));
            assert_eq!(dom.style(&bar, "background-color").as_deref(), Some(color));
        }
    }
}
