//! Staggered initial population of a layer.

use rand::Rng;

/// A cancellable sequence of delay-then-spawn steps.
///
/// Each step waits a random delay before the next particle appears, so a
/// layer fades in instead of appearing all at once. The owning controller
/// polls it from its event loop and drops it to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Population {
    /// Slot the next spawn fills.
    next_index: usize,
    /// Time the pending delay ends.
    due_ms: u64,
    max_delay_ms: u64,
}

impl Population {
    /// Begin filling from `start_index`, with the first delay starting now.
    pub fn begin<R: Rng + ?Sized>(
        start_index: usize,
        now_ms: u64,
        max_delay_ms: u64,
        rng: &mut R,
    ) -> Self {
        Self {
            next_index: start_index,
            due_ms: now_ms.saturating_add(rng.gen_range(0..=max_delay_ms)),
            max_delay_ms,
        }
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }

    /// Whether the pending delay has ended.
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.due_ms <= now_ms
    }

    /// Record a completed step and schedule the next delay after it.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.next_index += 1;
        self.due_ms = self
            .due_ms
            .saturating_add(rng.gen_range(0..=self.max_delay_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_delays_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut population = Population::begin(0, 1_000, 400, &mut rng);
        assert!((1_000..=1_400).contains(&population.due_ms()));
        for step in 1..50 {
            let previous = population.due_ms();
            population.advance(&mut rng);
            assert_eq!(population.next_index(), step);
            assert!((previous..=previous + 400).contains(&population.due_ms()));
        }
    }

    #[test]
    fn test_zero_delay_is_immediately_due() {
        let mut rng = StdRng::seed_from_u64(1);
        let population = Population::begin(3, 50, 0, &mut rng);
        assert!(population.is_due(50));
        assert_eq!(population.next_index(), 3);
    }
}
