/// A watched entry crossing the visibility threshold for the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealEvent {
    pub index: usize,
    /// Transition delay staggered by the entry's index.
    pub delay_ms: u64,
}

/// One-shot visibility observer over an indexed collection of entries.
///
/// An entry is revealed the first time its visible fraction reaches the
/// threshold; after that it is no longer watched, so later scrolling can
/// never hide it again.
#[derive(Debug)]
pub struct RevealObserver {
    threshold: f32,
    stagger_ms: u64,
    revealed: Vec<bool>,
}

impl RevealObserver {
    pub fn new(count: usize, threshold: f32, stagger_ms: u64) -> Self {
        Self {
            threshold,
            stagger_ms,
            revealed: vec![false; count],
        }
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Number of entries still being watched.
    pub fn watching(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }

    /// Feed the current visible fraction of every entry; returns the entries
    /// newly revealed by this update, each with its staggered delay.
    pub fn update(&mut self, fractions: &[f32]) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        for (index, revealed) in self.revealed.iter_mut().enumerate() {
            if *revealed {
                continue;
            }
            let fraction = fractions.get(index).copied().unwrap_or(0.0);
            if fraction >= self.threshold {
                *revealed = true;
                events.push(RevealEvent {
                    index,
                    delay_ms: index as u64 * self.stagger_ms,
                });
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> RevealObserver {
        RevealObserver::new(4, 0.18, 70)
    }

    #[test]
    fn below_threshold_stays_hidden() {
        let mut obs = observer();
        let events = obs.update(&[0.0, 0.1, 0.17, 0.0]);
        assert!(events.is_empty());
        assert_eq!(obs.watching(), 4);
    }

    #[test]
    fn crossing_threshold_reveals_with_stagger() {
        let mut obs = observer();
        let events = obs.update(&[0.5, 0.0, 0.18, 0.0]);
        assert_eq!(
            events,
            vec![
                RevealEvent {
                    index: 0,
                    delay_ms: 0
                },
                RevealEvent {
                    index: 2,
                    delay_ms: 140
                },
            ]
        );
        assert!(obs.is_revealed(0));
        assert!(!obs.is_revealed(1));
        assert!(obs.is_revealed(2));
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut obs = observer();
        obs.update(&[1.0, 0.0, 0.0, 0.0]);
        // Entry 0 scrolls out and back in; no second event.
        let events = obs.update(&[0.0, 0.0, 0.0, 0.0]);
        assert!(events.is_empty());
        let events = obs.update(&[1.0, 0.0, 0.0, 0.0]);
        assert!(events.is_empty());
        assert!(obs.is_revealed(0));
    }

    #[test]
    fn all_entries_eventually_revealed() {
        let mut obs = observer();
        obs.update(&[1.0, 1.0, 0.0, 0.0]);
        obs.update(&[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(obs.watching(), 0);
        for i in 0..4 {
            assert!(obs.is_revealed(i));
        }
    }

    #[test]
    fn missing_fractions_treated_hidden() {
        let mut obs = observer();
        let events = obs.update(&[1.0]);
        assert_eq!(events.len(), 1);
        assert_eq!(obs.watching(), 3);
    }
}
