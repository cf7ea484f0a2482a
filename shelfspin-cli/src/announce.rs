//! Terminal announcers for a finished pick.

use std::io::{self, Write};
use std::time::Duration;

use shelfspin_core::{Announcer, Pick};

use crate::output::TextFormatter;

/// Reel frames shown before the winner at most.
const MAX_FRAMES: usize = 40;

/// Delay of the first (fastest) frame.
const FASTEST_FRAME: Duration = Duration::from_millis(25);

/// Delay of the last (slowest) frame.
const SLOWEST_FRAME: Duration = Duration::from_millis(350);

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Runs `announcer` on tokio's blocking pool and hands it back when done.
///
/// Reel frames are paced with `std::thread::sleep`, which must not run on
/// a runtime worker.
pub async fn announce_in_background<A>(mut announcer: A, pick: Pick) -> io::Result<A>
where
    A: Announcer + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        announcer.announce(&pick)?;
        Ok(announcer)
    })
    .await
    .map_err(io::Error::other)?
}

// ============================================================================
// Reel
// ============================================================================

/// Scrolls the reel on one terminal line, slowing down until it stops on
/// the winner.
pub struct ReelAnnouncer<W> {
    out: W,
    formatter: TextFormatter,
    fastest: Duration,
    slowest: Duration,
}

impl<W: Write> ReelAnnouncer<W> {
    /// Creates a reel announcer writing to `out`.
    pub fn new(out: W, formatter: TextFormatter) -> Self {
        Self {
            out,
            formatter,
            fastest: FASTEST_FRAME,
            slowest: SLOWEST_FRAME,
        }
    }

    /// Overrides the frame timing.
    #[must_use]
    pub fn with_timing(mut self, fastest: Duration, slowest: Duration) -> Self {
        self.fastest = fastest;
        self.slowest = slowest.max(fastest);
        self
    }

    /// The output sink.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Delay before showing frame `step` of `steps`, easing out cubically.
    fn frame_delay(&self, step: usize, steps: usize) -> Duration {
        if steps <= 1 {
            return self.slowest;
        }
        #[allow(clippy::cast_precision_loss)]
        let t = step as f64 / (steps - 1) as f64;
        self.fastest + (self.slowest - self.fastest).mul_f64(t.powi(3))
    }
}

impl<W: Write> Announcer for ReelAnnouncer<W> {
    fn announce(&mut self, pick: &Pick) -> io::Result<()> {
        let reel = &pick.reel;
        let end = reel.winner_index.min(reel.items.len().saturating_sub(1));
        let start = end.saturating_sub(MAX_FRAMES - 1);
        let frames = &reel.items[start..=end];

        for (step, item) in frames.iter().enumerate() {
            let settled = step + 1 == frames.len();
            let frame = self.formatter.format_reel_frame(&item.name, settled);
            write!(self.out, "{CLEAR_LINE}{frame}")?;
            self.out.flush()?;
            std::thread::sleep(self.frame_delay(step, frames.len()));
        }

        writeln!(self.out)?;
        writeln!(self.out, "{}", self.formatter.format_winner(&pick.winner))?;
        self.out.flush()
    }
}

// ============================================================================
// Plain
// ============================================================================

/// Prints the winner without animation.
pub struct PlainAnnouncer<W> {
    out: W,
    formatter: TextFormatter,
}

impl<W: Write> PlainAnnouncer<W> {
    /// Creates a plain announcer writing to `out`.
    pub fn new(out: W, formatter: TextFormatter) -> Self {
        Self { out, formatter }
    }

    /// The output sink.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Announcer for PlainAnnouncer<W> {
    fn announce(&mut self, pick: &Pick) -> io::Result<()> {
        writeln!(self.out, "{}", self.formatter.format_winner(&pick.winner))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfspin_core::{pick_with_rng, CollectionItem, FetchSession, GameDetail, PickOutcome};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sample_pick(count: usize) -> Pick {
        let games: Vec<CollectionItem> = (1..=count)
            .map(|i| CollectionItem::new(i.to_string(), format!("Game {i}"), None))
            .collect();
        let details: HashMap<String, GameDetail> = games
            .iter()
            .map(|g| (g.id.clone(), GameDetail::new(1, 4)))
            .collect();
        let session = FetchSession::new("alice", games, Vec::new(), details);
        match pick_with_rng(&session, 2, &mut StdRng::seed_from_u64(7)).unwrap() {
            PickOutcome::Picked(pick) => pick,
            other => panic!("expected a pick, got {other:?}"),
        }
    }

    #[test]
    fn test_reel_stops_on_winner() {
        let pick = sample_pick(6);
        let mut announcer = ReelAnnouncer::new(Vec::new(), TextFormatter::new(false))
            .with_timing(Duration::ZERO, Duration::ZERO);

        announcer.announce(&pick).unwrap();

        let output = String::from_utf8(announcer.into_inner()).unwrap();
        let settled = format!("> {} <", pick.winner.name);
        assert!(output.contains(&settled));
        assert!(output.contains(&format!("It's time for: {}!", pick.winner.name)));
        assert!(output.contains(&pick.winner.bgg_url()));
    }

    #[test]
    fn test_reel_frames_are_capped() {
        let pick = sample_pick(30);
        let mut announcer = ReelAnnouncer::new(Vec::new(), TextFormatter::new(false))
            .with_timing(Duration::ZERO, Duration::ZERO);

        announcer.announce(&pick).unwrap();

        let output = String::from_utf8(announcer.into_inner()).unwrap();
        assert_eq!(output.matches(CLEAR_LINE).count(), MAX_FRAMES);
    }

    #[test]
    fn test_frame_delay_slows_down() {
        let announcer = ReelAnnouncer::new(Vec::new(), TextFormatter::new(false));
        assert_eq!(announcer.frame_delay(0, 10), FASTEST_FRAME);
        assert_eq!(announcer.frame_delay(9, 10), SLOWEST_FRAME);
        assert!(announcer.frame_delay(4, 10) < announcer.frame_delay(5, 10));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_background_reel_leaves_runtime_free() {
        let pick = sample_pick(10);
        let announcer = ReelAnnouncer::new(Vec::new(), TextFormatter::new(false))
            .with_timing(Duration::from_millis(10), Duration::from_millis(10));

        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = {
            let ticks = Arc::clone(&ticks);
            tokio::spawn(async move {
                loop {
                    ticks.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            })
        };

        let announcer = announce_in_background(announcer, pick.clone()).await.unwrap();
        ticker.abort();

        assert!(ticks.load(Ordering::SeqCst) > 1);
        let output = String::from_utf8(announcer.into_inner()).unwrap();
        assert!(output.contains(&format!("It's time for: {}!", pick.winner.name)));
    }

    #[test]
    fn test_plain_announcer() {
        let pick = sample_pick(3);
        let mut announcer = PlainAnnouncer::new(Vec::new(), TextFormatter::new(false));

        announcer.announce(&pick).unwrap();

        let output = String::from_utf8(announcer.into_inner()).unwrap();
        assert_eq!(
            output,
            format!("It's time for: {}!\n{}\n", pick.winner.name, pick.winner.bgg_url())
        );
    }
}
