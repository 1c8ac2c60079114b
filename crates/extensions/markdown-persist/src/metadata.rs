//! Auxiliary key/value lines written above the content.

/// Insertion-ordered string metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Metadata::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a bold-key bullet list, one line per entry.
    pub fn to_markdown(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("- **{}**: {}", key, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Metadata {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let metadata = Metadata::new()
            .with("Model", "phi-4")
            .with("Endpoint", "https://models.github.ai/inference")
            .with("Question", "why?");

        let keys: Vec<_> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Model", "Endpoint", "Question"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut metadata: Metadata = [("a", "1"), ("b", "2")].into_iter().collect();
        metadata.insert("a", "3");

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("a"), Some("3"));
        assert_eq!(metadata.iter().next(), Some(("a", "3")));
    }

    #[test]
    fn test_to_markdown() {
        let metadata = Metadata::new().with("Model", "llama").with("Temperature", "1.0");
        assert_eq!(
            metadata.to_markdown(),
            "- **Model**: llama\n- **Temperature**: 1.0"
        );
    }

    #[test]
    fn test_empty() {
        let metadata = Metadata::new();
        assert!(metadata.is_empty());
        assert_eq!(metadata.to_markdown(), "");
        assert_eq!(metadata.get("missing"), None);
    }
}
