//! Shared test utilities used across akami crates.

pub mod tracing {
    //! Tracing bootstrap for tests.
    //!
    //! The library itself never installs a subscriber; tests that want to see
    //! span output opt in through [`init_tracing`].

    use std::sync::OnceLock;

    static INITIALISED: OnceLock<()> = OnceLock::new();

    /// Installs a formatting subscriber writing to stderr, once per process.
    ///
    /// Subsequent calls are no-ops, so every test can call this without
    /// coordinating with its neighbours. Installation failures are ignored:
    /// another harness may already own the global subscriber slot.
    ///
    /// # Examples
    /// ```
    /// akami_test_support::tracing::init_tracing();
    /// akami_test_support::tracing::init_tracing();
    /// ```
    pub fn init_tracing() {
        INITIALISED.get_or_init(|| {
            let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        });
    }
}

pub mod fixtures {
    //! Small deterministic item collections for distance tests.

    /// Equal-length words, safe for fixed-length metrics.
    ///
    /// # Examples
    /// ```
    /// let words = akami_test_support::fixtures::equal_length_words();
    /// assert!(words.iter().all(|w| w.chars().count() == 4));
    /// ```
    #[must_use]
    pub fn equal_length_words() -> Vec<String> {
        ["tuna", "toro", "saba", "kani", "ikra"]
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Words of varying lengths, including repeats and an empty item.
    #[must_use]
    pub fn mixed_length_words() -> Vec<String> {
        ["", "a", "ab", "abc", "abcd", "ab", "xyzzy"]
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}
