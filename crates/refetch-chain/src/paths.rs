//! Public-path rotation for chunk fetch retries.

/// Ordered base paths a chunk fetch rotates through: the origin path at
/// index 0 followed by the configured fallback paths.
///
/// Indexing clamps at the last entry once the list is exhausted. A bounded
/// configuration list must not fail on attempt counts beyond its length;
/// later attempts keep using the last-resort path and termination is owned
/// entirely by the retry budget.
#[derive(Debug, Clone)]
pub struct PublicPaths {
    /// Origin path followed by fallback base paths, in rotation order.
    entries: Vec<String>,
}

impl PublicPaths {
    /// Build the rotation from the origin path plus configured fallbacks.
    pub fn new(origin: impl Into<String>, fallbacks: Vec<String>) -> Self {
        let mut entries = vec![origin.into()];
        entries.extend(fallbacks);
        Self { entries }
    }

    /// Base path for the given attempt, clamped to the last entry.
    pub fn base_for(&self, attempt: u32) -> &str {
        let idx = (attempt as usize).min(self.entries.len() - 1);
        &self.entries[idx]
    }

    /// Number of configured fallback paths (excludes the origin).
    pub fn fallback_count(&self) -> usize {
        self.entries.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_for_clamps_at_last_entry() {
        let paths = PublicPaths::new("/", vec!["https://cdn.b.com/".into()]);
        assert_eq!(paths.base_for(0), "/");
        assert_eq!(paths.base_for(1), "https://cdn.b.com/");
        assert_eq!(paths.base_for(7), "https://cdn.b.com/");
        assert_eq!(paths.fallback_count(), 1);
    }

    #[test]
    fn origin_only_rotation_always_uses_origin() {
        let paths = PublicPaths::new("/assets/", vec![]);
        assert_eq!(paths.base_for(0), "/assets/");
        assert_eq!(paths.base_for(3), "/assets/");
    }
}
