//! Injectable uniform selection over finite candidate lists.
//!
//! Both carving algorithms and the enemy scatter only ever need "pick one of these `len` things".
//! Routing every random decision through [`Chooser`] lets callers swap a seeded generator for a
//! scripted sequence when they need a maze that is reproducible down to each choice.

use rand::{rngs::StdRng, Rng, SeedableRng as _};

/// Source of uniform choices among a finite number of candidates.
pub trait Chooser {
    /// Returns an index in `0..len`.
    ///
    /// Callers never pass a `len` of zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Chooser backed by a [`rand`] generator.
#[derive(Clone, Debug)]
pub struct RandomChooser<R> {
    /// Generator drawing the indices.
    rng: R,
}

impl<R: Rng> RandomChooser<R> {
    /// Wraps an existing generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomChooser<StdRng> {
    /// Builds a chooser whose sequence of choices is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Builds a chooser seeded from process entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Chooser that replays a fixed list of indices.
///
/// Each scripted value is reduced modulo the candidate count it is asked for, and the script
/// starts over once it runs out. An empty script always picks the first candidate.
#[derive(Clone, Debug, Default)]
pub struct ScriptedChooser {
    /// Indices to hand out, in order.
    script: Vec<usize>,
    /// Number of picks served so far.
    cursor: usize,
}

impl ScriptedChooser {
    /// Builds a chooser replaying `script`.
    pub const fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl Chooser for ScriptedChooser {
    fn pick(&mut self, len: usize) -> usize {
        let value = self
            .script
            .get(self.cursor.checked_rem(self.script.len()).unwrap_or(0))
            .copied()
            .unwrap_or(0);
        self.cursor = self.cursor.wrapping_add(1);

        value.checked_rem(len).unwrap_or(0)
    }
}

/// Picks one element of `items` uniformly, or [`None`] when `items` is empty.
pub(crate) fn choose<'items, T>(
    chooser: &mut dyn Chooser,
    items: &'items [T],
) -> Option<&'items T> {
    if items.is_empty() {
        return None;
    }

    items.get(chooser.pick(items.len()))
}

/// Draws up to `amount` distinct elements of `items` uniformly without replacement.
///
/// This is a partial Fisher-Yates shuffle: the sample ends up in the front of `items`, which is
/// then truncated to it. Requests larger than `items` return all of it.
pub(crate) fn sample<T>(chooser: &mut dyn Chooser, items: &mut Vec<T>, amount: usize) {
    let amount = amount.min(items.len());

    for idx in 0..amount {
        let remaining = items.len() - idx;
        let offset = chooser.pick(remaining).min(remaining - 1);
        items.swap(idx, idx + offset);
    }

    items.truncate(amount);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_chooser_stays_in_range() {
        let mut chooser = RandomChooser::seeded(7);

        for len in 1..50 {
            assert!(chooser.pick(len) < len);
        }
    }

    #[test]
    fn test_seeded_choosers_agree() {
        let mut first = RandomChooser::seeded(42);
        let mut second = RandomChooser::seeded(42);

        let left: Vec<usize> = (0..32).map(|_| first.pick(1000)).collect();
        let right: Vec<usize> = (0..32).map(|_| second.pick(1000)).collect();

        assert_eq!(left, right);
    }

    #[test]
    fn test_scripted_chooser_wraps_and_reduces() {
        let mut chooser = ScriptedChooser::new(vec![0, 5, 2]);

        assert_eq!(chooser.pick(4), 0);
        assert_eq!(chooser.pick(4), 1);
        assert_eq!(chooser.pick(4), 2);
        assert_eq!(chooser.pick(4), 0);
        assert_eq!(chooser.pick(3), 2);
    }

    #[test]
    fn test_empty_script_picks_first() {
        let mut chooser = ScriptedChooser::default();

        assert_eq!(chooser.pick(9), 0);
        assert_eq!(chooser.pick(1), 0);
    }

    #[test]
    fn test_choose_empty_is_none() {
        let mut chooser = ScriptedChooser::default();
        let items: [u8; 0] = [];

        assert_eq!(choose(&mut chooser, &items), None);
        assert_eq!(choose(&mut chooser, &[4, 5, 6]), Some(&4));
    }

    #[test]
    fn test_sample_is_distinct_and_clamped() {
        let mut chooser = RandomChooser::seeded(3);
        let mut items: Vec<u32> = (0..10).collect();

        sample(&mut chooser, &mut items, 25);
        items.sort_unstable();

        assert_eq!(items, (0..10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_sample_follows_script() {
        let mut chooser = ScriptedChooser::new(vec![2, 0]);
        let mut items = vec!['a', 'b', 'c', 'd'];

        sample(&mut chooser, &mut items, 2);

        assert_eq!(items, vec!['c', 'b']);
    }
}
