//! Frame loop for [`TimelinePlayer`] on a tokio runtime.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::TimelinePlayer;
use crate::dom::Dom;

/// Advances `player` by `frame` on every tick until `token` is cancelled.
///
/// The player is not `Send`; await this on a current-thread runtime or
/// inside a `LocalSet`.
pub async fn drive<D: Dom>(player: &TimelinePlayer<D>, frame: Duration, token: CancellationToken) {
    let mut interval = time::interval(frame);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::debug!("effects driver stopped with {} active playbacks", player.active());
                break;
            }
            _ = interval.tick() => player.advance(frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::effects::{Animation, Easing, EffectsPlayer, Property};
    use std::rc::Rc;

    #[tokio::test(start_paused = true)]
    async fn test_drive_completes_playbacks_until_cancelled() {
        let dom = Rc::new(MemoryDom::new());
        let player = TimelinePlayer::new(Rc::clone(&dom));
        let div = dom.element(dom.root(), "div");
        player.play(
            &div,
            Animation::new(Duration::from_millis(300), Easing::Linear)
                .track(Property::TranslateX, [0.0, 5.0, 0.0]),
            None,
        );

        let token = CancellationToken::new();
        let stopper = token.clone();
        tokio::join!(
            drive(&player, Duration::from_millis(16), token),
            async move {
                time::sleep(Duration::from_secs(1)).await;
                stopper.cancel();
            }
        );

        assert!(player.is_idle());
        assert_eq!(dom.style(&div, "transform").as_deref(), Some("translateX(0px)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_stops_immediately_when_cancelled() {
        let dom = Rc::new(MemoryDom::new());
        let player = TimelinePlayer::new(Rc::clone(&dom));
        let token = CancellationToken::new();
        token.cancel();

        drive(&player, Duration::from_millis(16), token).await;
        assert!(player.is_idle());
    }
}
