//! Reveal protocol — shows each digit in turn, one tokio task per reveal.
//!
//! For every digit: `Show(d)`, wait `digit_on`, `Blank`, wait `digit_off`.
//! Strictly sequential; the task never overlaps with another reveal because
//! the controller refuses to start one while presenting. There is no
//! cancellation: a reveal always runs to `Finished` unless the receiving
//! side has gone away (shutdown).

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use super::controller::{RevealId, RevealKind, RevealPlan};

/// Durations that drive the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    pub digit_on: Duration,
    pub digit_off: Duration,
    /// Pause after a correct guess, before the next round's first digit.
    pub advance_delay: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            digit_on: Duration::from_millis(700),
            digit_off: Duration::from_millis(300),
            advance_delay: Duration::from_millis(2000),
        }
    }
}

impl RevealTiming {
    /// Wall time a full reveal of `len` digits takes, lead-in included.
    pub fn total(&self, kind: RevealKind, len: usize) -> Duration {
        let lead_in = match kind {
            RevealKind::Opening => Duration::ZERO,
            RevealKind::NextRound => self.advance_delay,
        };
        lead_in + (self.digit_on + self.digit_off) * len as u32
    }
}

/// Display updates emitted by a running reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// The lead-in is over; digits follow.
    Started(RevealId),
    /// Show this digit.
    Show(RevealId, u8),
    /// Show nothing.
    Blank(RevealId),
    /// Every digit has been shown.
    Finished(RevealId),
}

/// Run one reveal to completion, sending display updates to `tx`.
pub async fn run_reveal(plan: RevealPlan, timing: RevealTiming, tx: UnboundedSender<RevealEvent>) {
    let id = plan.id;
    if plan.kind == RevealKind::NextRound {
        sleep(timing.advance_delay).await;
    }
    if tx.send(RevealEvent::Started(id)).is_err() {
        return;
    }

    for &digit in plan.sequence.digits() {
        if tx.send(RevealEvent::Show(id, digit)).is_err() {
            return;
        }
        sleep(timing.digit_on).await;
        if tx.send(RevealEvent::Blank(id)).is_err() {
            return;
        }
        sleep(timing.digit_off).await;
    }

    debug!(id = id.0, len = plan.sequence.len(), "reveal complete");
    let _ = tx.send(RevealEvent::Finished(id));
}

/// Spawn [`run_reveal`] on the current runtime.
pub fn spawn_reveal(
    plan: RevealPlan,
    timing: RevealTiming,
    tx: UnboundedSender<RevealEvent>,
) -> JoinHandle<()> {
    tokio::spawn(run_reveal(plan, timing, tx))
}
