/// Default number of accepted names remembered per kind.
pub const DEFAULT_HISTORY_CAP: usize = 30;

/// Bounded, duplicate-free list of accepted suggestion names, oldest
/// first. Only used to steer away from repeats.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationHistory {
    names: Vec<String>,
    cap: usize,
}

impl GenerationHistory {
    pub fn empty(cap: usize) -> Self {
        Self {
            names: Vec::new(),
            cap,
        }
    }

    /// Rebuilds the history from persisted names, normalising it in case
    /// the stored list predates a smaller cap or contains repeats.
    pub fn from_names(names: Vec<String>, cap: usize) -> Self {
        let mut history = Self::empty(cap);
        history.reconcile(names);
        history
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Appends accepted names. A name already present moves to the most
    /// recent position; the oldest entries drop off beyond the cap.
    pub fn reconcile<I>(&mut self, accepted: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for name in accepted {
            let name = name.into();
            self.names.retain(|n| *n != name);
            self.names.push(name);
        }

        if self.names.len() > self.cap {
            let overflow = self.names.len() - self.cap;
            self.names.drain(..overflow);
        }
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn should_append_names_most_recent_last() {
        let mut history = GenerationHistory::empty(30);
        history.reconcile(["2 eggs + 1 toast", "1 bowl + 2 dates"]);
        history.reconcile(["3 figs + 1 yogurt"]);

        assert_eq!(
            history.names(),
            &["2 eggs + 1 toast", "1 bowl + 2 dates", "3 figs + 1 yogurt"]
        );
    }

    #[test]
    fn should_truncate_to_cap_when_overflowing() {
        let mut history = GenerationHistory::empty(3);
        history.reconcile(["a", "b", "c"]);
        history.reconcile(["d", "e"]);

        assert_eq!(history.names(), &["c", "d", "e"]);
    }

    #[test]
    fn should_move_repeated_name_to_the_end() {
        let mut history = GenerationHistory::empty(10);
        history.reconcile(["a", "b", "c"]);
        history.reconcile(["a"]);

        assert_eq!(history.names(), &["b", "c", "a"]);
    }

    #[test]
    fn should_normalise_persisted_names_on_load() {
        let stored = vec!["x", "y", "x", "z"]
            .into_iter()
            .map(String::from)
            .collect();

        let history = GenerationHistory::from_names(stored, 2);

        assert_eq!(history.names(), &["x", "z"]);
        assert!(history.contains("z"));
        assert!(!history.contains("y"));
    }

    proptest! {
        #[test]
        fn should_stay_bounded_and_unique(
            batches in prop::collection::vec(prop::collection::vec("[a-e]{1,2}", 3), 0..20),
            cap in 1usize..40,
        ) {
            let mut history = GenerationHistory::empty(cap);
            for batch in &batches {
                history.reconcile(batch.iter().cloned());
            }

            prop_assert!(history.names().len() <= cap);
            let unique: HashSet<_> = history.names().iter().collect();
            prop_assert_eq!(unique.len(), history.names().len());

            if let Some(last_batch) = batches.last() {
                for name in last_batch {
                    if cap >= last_batch.len() {
                        prop_assert!(history.contains(name));
                    }
                }
                prop_assert_eq!(history.names().last(), last_batch.last());
            }
        }
    }
}
