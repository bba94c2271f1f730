use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

static SEPARATORS: OnceLock<Regex> = OnceLock::new();

/// Heading IDs in use within one document.
#[derive(Debug, Clone, Default)]
pub struct HeadingIds {
    used: HashSet<String>,
}

impl HeadingIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a unique ID from heading text.
    ///
    /// The text is lowercased and every run of non-alphanumeric characters
    /// becomes one `-`. Empty results fall back to `heading`. Taken values get
    /// the first free numeric suffix: `title`, `title-1`, `title-2`, ...
    pub fn generate(&mut self, text: &str) -> String {
        let separators = SEPARATORS.get_or_init(|| {
            Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").expect("Invalid heading separator regex")
        });
        let lowered = text.to_lowercase();
        let slug = separators.replace_all(&lowered, "-");
        let slug = slug.trim_matches('-');
        let base = if slug.is_empty() { "heading" } else { slug };

        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| self.used.insert(candidate.clone()))
            .unwrap_or_else(|| unreachable!("suffix space is unbounded"))
    }

    /// Reserves an explicitly assigned ID so generated ones avoid it.
    pub fn put(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }
}
