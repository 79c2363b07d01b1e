//! Localized text table

use ahash::AHashMap;

#[derive(Debug, Clone, Default)]
pub struct Localization {
    texts: AHashMap<String, String>,
}

impl Localization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text for a key, returning the previous text if any
    pub fn set_text(&mut self, key: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.texts.insert(key.into(), text.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.texts.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut texts = Localization::new();
        assert_eq!(texts.set_text("k", "one"), None);
        assert_eq!(texts.set_text("k", "two"), Some("one".to_string()));
        assert_eq!(texts.get("k"), Some("two"));
        assert_eq!(texts.get("missing"), None);
    }
}
