use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VocabRowError {
    #[error("term cannot be empty")]
    EmptyTerm,

    #[error("translation cannot be empty")]
    EmptyTranslation,
}

//
// ─── VOCAB ROW ─────────────────────────────────────────────────────────────────
//

/// One dictionary entry: the prompted term and its expected translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabRow {
    term: String,
    translation: String,
    phonetic: String,
    example: String,
}

impl VocabRow {
    /// Build a row from its required fields. Optional fields start empty.
    ///
    /// # Errors
    ///
    /// Returns `VocabRowError` if `term` or `translation` is blank.
    pub fn new(
        term: impl Into<String>,
        translation: impl Into<String>,
    ) -> Result<Self, VocabRowError> {
        let term = term.into().trim().to_string();
        let translation = translation.into().trim().to_string();
        if term.is_empty() {
            return Err(VocabRowError::EmptyTerm);
        }
        if translation.is_empty() {
            return Err(VocabRowError::EmptyTranslation);
        }

        Ok(Self {
            term,
            translation,
            phonetic: String::new(),
            example: String::new(),
        })
    }

    #[must_use]
    pub fn with_phonetic(mut self, phonetic: impl Into<String>) -> Self {
        self.phonetic = phonetic.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// Pronunciation hint, empty when the source has none.
    #[must_use]
    pub fn phonetic(&self) -> &str {
        &self.phonetic
    }

    /// Usage example, empty when the source has none.
    #[must_use]
    pub fn example(&self) -> &str {
        &self.example
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_to_empty() {
        let row = VocabRow::new("ubiquitous", "無所不在").unwrap();
        assert_eq!(row.term(), "ubiquitous");
        assert_eq!(row.translation(), "無所不在");
        assert_eq!(row.phonetic(), "");
        assert_eq!(row.example(), "");
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        assert_eq!(VocabRow::new("  ", "x"), Err(VocabRowError::EmptyTerm));
        assert_eq!(
            VocabRow::new("ephemeral", ""),
            Err(VocabRowError::EmptyTranslation)
        );
    }

    #[test]
    fn builders_trim_optional_fields() {
        let row = VocabRow::new(" ephemeral ", "短暫的")
            .unwrap()
            .with_phonetic(" /ɪˈfem(ə)rəl/ ")
            .with_example("Fame is ephemeral.");
        assert_eq!(row.term(), "ephemeral");
        assert_eq!(row.phonetic(), "/ɪˈfem(ə)rəl/");
        assert_eq!(row.example(), "Fame is ephemeral.");
    }
}
