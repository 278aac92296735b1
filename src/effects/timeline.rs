//! Deterministic effects player advanced by explicit time steps.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::{Animation, Completion, EffectsPlayer, Property};
use crate::dom::Dom;

struct Playback<N> {
    target: N,
    animation: Animation,
    elapsed: Duration,
    on_complete: Option<Completion>,
}

impl<N> Playback<N> {
    fn progress(&self) -> f64 {
        if self.animation.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.animation.duration.as_secs_f64()).min(1.0)
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.animation.duration
    }

    /// Sampled `(property, value)` pairs; finished playbacks yield their last keyframes.
    fn frame(&self) -> Vec<(Property, f64)> {
        let finished = self.is_finished();
        let progress = self.progress();
        self.animation
            .tracks
            .iter()
            .filter_map(|track| {
                let value = if finished {
                    track.last()
                } else {
                    track.sample(progress, self.animation.easing)
                };
                value.map(|v| (track.property, v))
            })
            .collect()
    }
}

/// Plays animations by writing inline `transform` and `opacity` styles
/// through a [`Dom`].
///
/// Nothing moves until [`TimelinePlayer::advance`] is called.
pub struct TimelinePlayer<D: Dom> {
    dom: Rc<D>,
    playbacks: RefCell<Vec<Playback<D::Node>>>,
}

impl<D: Dom> TimelinePlayer<D> {
    pub fn new(dom: Rc<D>) -> Self {
        Self {
            dom,
            playbacks: RefCell::new(Vec::new()),
        }
    }

    /// Number of playbacks still running.
    pub fn active(&self) -> usize {
        self.playbacks.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.active() == 0
    }

    /// Moves every playback forward by `dt`, writes the sampled styles and
    /// runs the completions of playbacks that finished.
    ///
    /// Completions run after the player is released, so they may start new
    /// playbacks; those begin at zero elapsed time.
    pub fn advance(&self, dt: Duration) {
        let mut frames = Vec::new();
        let mut completions = Vec::new();
        {
            let mut playbacks = self.playbacks.borrow_mut();
            for playback in playbacks.iter_mut() {
                playback.elapsed += dt;
                frames.push((playback.target.clone(), playback.frame()));
            }
            let (finished, running): (Vec<_>, Vec<_>) =
                playbacks.drain(..).partition(Playback::is_finished);
            *playbacks = running;
            completions.extend(finished.into_iter().filter_map(|p| p.on_complete));
        }

        for (target, frame) in frames {
            self.write_frame(&target, &frame);
        }
        for complete in completions {
            complete();
        }
    }

    /// Advances until idle, in `step` increments, giving up after `max_steps`.
    pub fn run_until_idle(&self, step: Duration, max_steps: usize) {
        for _ in 0..max_steps {
            if self.is_idle() {
                return;
            }
            self.advance(step);
        }
    }

    fn write_frame(&self, target: &D::Node, frame: &[(Property, f64)]) {
        let mut transform = Vec::new();
        for (property, value) in frame {
            match property {
                Property::TranslateX => transform.push(format!("translateX({value}px)")),
                Property::TranslateY => transform.push(format!("translateY({value}px)")),
                Property::Scale => transform.push(format!("scale({value})")),
                Property::Opacity => self.dom.set_style(target, "opacity", &value.to_string()),
            }
        }
        if !transform.is_empty() {
            self.dom.set_style(target, "transform", &transform.join(" "));
        }
    }
}

impl<D: Dom> EffectsPlayer<D::Node> for TimelinePlayer<D> {
    fn play(&self, target: &D::Node, animation: Animation, on_complete: Option<Completion>) {
        self.playbacks.borrow_mut().push(Playback {
            target: target.clone(),
            animation,
            elapsed: Duration::ZERO,
            on_complete,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::effects::Easing;
    use std::cell::Cell;

    fn setup() -> (Rc<MemoryDom>, TimelinePlayer<MemoryDom>) {
        let dom = Rc::new(MemoryDom::new());
        let player = TimelinePlayer::new(Rc::clone(&dom));
        (dom, player)
    }

    #[test]
    fn test_playback_writes_intermediate_and_final_frames() {
        let (dom, player) = setup();
        let label = dom.element(dom.root(), "label");
        let animation = Animation::new(Duration::from_millis(400), Easing::Linear)
            .track(Property::Scale, [1.0, 2.0]);

        player.play(&label, animation, None);
        player.advance(Duration::from_millis(200));
        assert_eq!(dom.style(&label, "transform").as_deref(), Some("scale(1.5)"));
        assert_eq!(player.active(), 1);

        player.advance(Duration::from_millis(200));
        assert_eq!(dom.style(&label, "transform").as_deref(), Some("scale(2)"));
        assert!(player.is_idle());
    }

    #[test]
    fn test_completion_runs_once() {
        let (dom, player) = setup();
        let div = dom.element(dom.root(), "div");
        let done = Rc::new(Cell::new(0));
        let counter = Rc::clone(&done);

        player.play(
            &div,
            Animation::new(Duration::from_millis(100), Easing::EaseInOutQuad)
                .track(Property::Opacity, [1.0, 0.0]),
            Some(Box::new(move || counter.set(counter.get() + 1))),
        );

        player.advance(Duration::from_millis(50));
        assert_eq!(done.get(), 0);
        player.advance(Duration::from_millis(60));
        assert_eq!(done.get(), 1);
        player.advance(Duration::from_millis(100));
        assert_eq!(done.get(), 1);
        assert_eq!(dom.style(&div, "opacity").as_deref(), Some("0"));
    }

    #[test]
    fn test_completion_can_chain_playbacks() {
        let dom = Rc::new(MemoryDom::new());
        let player = Rc::new(TimelinePlayer::new(Rc::clone(&dom)));
        let button = dom.element(dom.root(), "button");

        let chained = Rc::clone(&player);
        player.play(
            &button,
            Animation::new(Duration::from_millis(100), Easing::Linear)
                .track(Property::Scale, [1.0, 0.95]),
            Some(Box::new(move || {
                chained.play(
                    &button,
                    Animation::new(Duration::from_millis(300), Easing::ELASTIC)
                        .track(Property::Scale, [0.95, 1.0]),
                    None,
                );
            })),
        );

        player.advance(Duration::from_millis(100));
        assert_eq!(player.active(), 1);
        assert_eq!(dom.style(&button, "transform").as_deref(), Some("scale(0.95)"));

        player.run_until_idle(Duration::from_millis(16), 100);
        assert!(player.is_idle());
        assert_eq!(dom.style(&button, "transform").as_deref(), Some("scale(1)"));
    }

    #[test]
    fn test_translate_and_scale_share_transform() {
        let (dom, player) = setup();
        let div = dom.element(dom.root(), "div");
        player.play(
            &div,
            Animation::new(Duration::from_millis(10), Easing::Linear)
                .track(Property::TranslateX, [0.0, 5.0])
                .track(Property::Scale, [1.0, 1.05]),
            None,
        );
        player.advance(Duration::from_millis(10));
        assert_eq!(
            dom.style(&div, "transform").as_deref(),
            Some("translateX(5px) scale(1.05)")
        );
    }

    #[test]
    fn test_zero_duration_finishes_on_next_tick() {
        let (dom, player) = setup();
        let div = dom.element(dom.root(), "div");
        player.play(
            &div,
            Animation::new(Duration::ZERO, Easing::Linear).track(Property::Opacity, [0.2, 0.9]),
            None,
        );
        player.advance(Duration::ZERO);
        assert!(player.is_idle());
        assert_eq!(dom.style(&div, "opacity").as_deref(), Some("0.9"));
    }
}
