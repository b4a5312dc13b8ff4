use std::collections::{BTreeSet, HashMap};

/// Canonical location names known to the dataset
///
/// Resolution is exact equality after trimming and lowercasing; there is no
/// fuzzy matching.
#[derive(Debug, Clone, Default)]
pub struct LocationVocabulary {
    /// Encoder classes in order (index = label code), duplicates included
    classes: Vec<String>,
    /// Normalized name to the index of its first spelling
    by_key: HashMap<String, usize>,
}

impl LocationVocabulary {
    /// Builds a vocabulary from canonical names. The position of each name
    /// is its label-encoded code. Case-insensitive duplicates keep their code
    /// but resolve to the first spelling.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = Self::default();
        for name in names {
            vocabulary.insert(name.into());
        }
        vocabulary
    }

    fn insert(&mut self, name: String) {
        let key = normalize(&name);
        if !key.is_empty() {
            self.by_key.entry(key).or_insert(self.classes.len());
        }
        self.classes.push(name);
    }

    /// Resolves free-text input to its canonical spelling, `None` when unknown
    pub fn resolve(&self, input: &str) -> Option<&str> {
        self.by_key
            .get(&normalize(input))
            .map(|&idx| self.classes[idx].as_str())
    }

    /// Decodes a label-encoded location code to its canonical spelling
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes
            .get(code)
            .map(|name| self.resolve(name).unwrap_or(name.as_str()))
    }

    /// Registers a name seen in the dataset and returns its canonical form
    pub fn canonicalize(&mut self, name: &str) -> String {
        if let Some(canonical) = self.resolve(name) {
            return canonical.to_string();
        }
        let trimmed = name.trim().to_string();
        self.insert(trimmed.clone());
        trimmed
    }

    /// All canonical names, sorted alphabetically
    pub fn sorted(&self) -> Vec<String> {
        self.by_key
            .values()
            .map(|&idx| self.classes[idx].clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of distinct locations
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}
