//! Password strength evaluator - additive scoring over independent sections.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::sections::{
    SECTION_POINTS, digit_or_symbol_section, length_section, lowercase_section,
    uppercase_section,
};

/// Debounce applied by [`score_password_tx`] before scoring.
#[cfg(feature = "async")]
pub const SCORE_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

/// Password strength as a percentage, always one of 0, 25, 50, 75 or 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const ZERO: StrengthScore = StrengthScore(0);
    pub const MAX: StrengthScore = StrengthScore(100);

    /// Builds the score for a number of met sections (clamped to four).
    pub fn from_sections(met: usize) -> Self {
        let met = met.min(4) as u8;
        StrengthScore(met * SECTION_POINTS)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Colour band for this score.
    pub fn band(self) -> StrengthBand {
        StrengthBand::from_score(self)
    }

    /// CSS width for the strength indicator fill, e.g. `"75%"`.
    pub fn as_css_width(self) -> String {
        format!("{}%", self.0)
    }
}

impl fmt::Display for StrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StrengthScore> for u8 {
    fn from(score: StrengthScore) -> u8 {
        score.0
    }
}

impl TryFrom<u8> for StrengthScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 100 && value % SECTION_POINTS == 0 {
            Ok(StrengthScore(value))
        } else {
            Err(format!("{value} is not a valid strength score"))
        }
    }
}

/// Colour band rendered by the strength indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthBand {
    /// Below 25, red.
    Weak,
    /// Below 50, orange.
    Fair,
    /// Below 75, yellow.
    Good,
    /// 75 and above, green.
    Strong,
}

impl StrengthBand {
    pub fn from_score(score: StrengthScore) -> Self {
        match score.value() {
            s if s < 25 => StrengthBand::Weak,
            s if s < 50 => StrengthBand::Fair,
            s if s < 75 => StrengthBand::Good,
            _ => StrengthBand::Strong,
        }
    }

    /// Indicator background colour.
    pub fn color(self) -> &'static str {
        match self {
            StrengthBand::Weak => "#ff4d4d",
            StrengthBand::Fair => "#ffa64d",
            StrengthBand::Good => "#ffff4d",
            StrengthBand::Strong => "#4dff4d",
        }
    }
}

/// Scores a password.
///
/// One point block per met section: minimum length, lowercase letter,
/// uppercase letter, digit or symbol. Empty input scores zero.
pub fn score_password(password: &SecretString) -> StrengthScore {
    let pwd = password.expose_secret();
    if pwd.is_empty() {
        return StrengthScore::ZERO;
    }

    // Orchestrator: execute sections in sequence
    let sections: [(&str, fn(&str) -> bool); 4] = [
        ("length", length_section),
        ("lowercase", lowercase_section),
        ("uppercase", uppercase_section),
        ("digit_or_symbol", digit_or_symbol_section),
    ];

    let mut met = 0;
    for (_section_name, section_fn) in sections {
        if section_fn(pwd) {
            met += 1;
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!("strength section not met: {}", _section_name);
        }
    }

    StrengthScore::from_sections(met)
}

/// Scores an optional control value; an absent value scores zero.
pub fn score_value(value: Option<&SecretString>) -> StrengthScore {
    value.map_or(StrengthScore::ZERO, score_password)
}

/// Async version that debounces, then sends the score via channel.
///
/// Nothing is sent when `token` is cancelled before the debounce elapses.
#[cfg(feature = "async")]
pub async fn score_password_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<StrengthScore>,
) {
    #[cfg(feature = "tracing")]
    tracing::debug!("strength scoring is about to start...");

    tokio::select! {
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::debug!("strength scoring cancelled");
            return;
        }
        _ = tokio::time::sleep(SCORE_DEBOUNCE) => {}
    }

    let score = score_password(password);

    if let Err(e) = tx.send(score).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password strength score: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_score_password_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        let pwd = SecretString::new("TestPass123!".to_string().into());

        score_password_tx(&pwd, token, tx).await;

        let score = rx.recv().await.expect("Should receive score");
        assert_eq!(score, StrengthScore::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_score_password_tx_cancelled() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();

        let pwd = SecretString::new("TestPass123!".to_string().into());

        score_password_tx(&pwd, token, tx).await;

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_score_password_tx_waits_for_debounce() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        let pwd = SecretString::new("abc".to_string().into());

        let start = tokio::time::Instant::now();
        score_password_tx(&pwd, token, tx).await;

        assert!(start.elapsed() >= SCORE_DEBOUNCE);
        assert_eq!(rx.recv().await, Some(StrengthScore::from_sections(1)));
    }
}
