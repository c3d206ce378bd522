use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::AlignmentError;
use crate::types::Verse;

/// One verse row as the canonical-text store holds it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerseRecord {
    pub number: u32,
    pub text: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub footnotes: Vec<String>,
    /// Invocation line recited before this verse, if any.
    #[serde(default)]
    pub invocation: Option<String>,
}

impl VerseRecord {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            translation: String::new(),
            footnotes: Vec::new(),
            invocation: None,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn with_footnotes(mut self, footnotes: Vec<String>) -> Self {
        self.footnotes = footnotes;
        self
    }

    pub fn with_invocation(mut self, invocation: impl Into<String>) -> Self {
        self.invocation = Some(invocation.into());
        self
    }
}

/// Read-only access to the canonical corpus.
pub trait CanonicalStore: Send + Sync {
    fn section_ids(&self) -> Result<Vec<u32>, AlignmentError>;

    fn section_name(&self, section_id: u32) -> Result<Option<String>, AlignmentError>;

    /// Verses of `section_id` numbered `>= from_verse`, ascending.
    fn verse_records(
        &self,
        section_id: u32,
        from_verse: u32,
    ) -> Result<Vec<VerseRecord>, AlignmentError>;
}

/// Eagerly loads a section into immutable verses, inserting each non-blank
/// invocation line as verse `0` ahead of the verse that carries it.
pub fn load_verses(
    store: &dyn CanonicalStore,
    section_id: u32,
    from_verse: u32,
) -> Result<Vec<Verse>, AlignmentError> {
    let section_name = store.section_name(section_id)?.unwrap_or_default();
    let records = store.verse_records(section_id, from_verse)?;

    let mut verses = Vec::with_capacity(records.len() + 1);
    for record in records {
        if let Some(invocation) = record.invocation.as_deref() {
            if !invocation.trim().is_empty() {
                verses.push(Verse::new(
                    section_id,
                    0,
                    section_name.as_str(),
                    invocation,
                    "",
                    Vec::new(),
                ));
            }
        }
        verses.push(Verse::new(
            section_id,
            record.number,
            section_name.as_str(),
            record.text,
            record.translation,
            record.footnotes,
        ));
    }
    tracing::debug!(
        section_id,
        from_verse,
        verse_count = verses.len(),
        "store: loaded section verses"
    );
    Ok(verses)
}

#[derive(Debug, Clone, Default)]
struct StoredSection {
    name: String,
    verses: Vec<VerseRecord>,
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    sections: Vec<SectionFile>,
}

#[derive(Debug, Deserialize)]
struct SectionFile {
    id: u32,
    #[serde(default)]
    name: String,
    verses: Vec<VerseRecord>,
}

/// Corpus held in memory, ordered by section id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    sections: BTreeMap<u32, StoredSection>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(
        mut self,
        section_id: u32,
        name: impl Into<String>,
        mut verses: Vec<VerseRecord>,
    ) -> Self {
        verses.sort_by_key(|v| v.number);
        self.sections.insert(
            section_id,
            StoredSection {
                name: name.into(),
                verses,
            },
        );
        self
    }

    pub fn from_json_str(data: &str) -> Result<Self, AlignmentError> {
        let corpus: CorpusFile = serde_json::from_str(data)
            .map_err(|e| AlignmentError::json("parse canonical corpus", e))?;
        Ok(corpus
            .sections
            .into_iter()
            .fold(Self::new(), |store, section| {
                store.with_section(section.id, section.name, section.verses)
            }))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AlignmentError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AlignmentError::io("read canonical corpus", e))?;
        Self::from_json_str(&data)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl CanonicalStore for InMemoryStore {
    fn section_ids(&self) -> Result<Vec<u32>, AlignmentError> {
        Ok(self.sections.keys().copied().collect())
    }

    fn section_name(&self, section_id: u32) -> Result<Option<String>, AlignmentError> {
        Ok(self.sections.get(&section_id).map(|s| s.name.clone()))
    }

    fn verse_records(
        &self,
        section_id: u32,
        from_verse: u32,
    ) -> Result<Vec<VerseRecord>, AlignmentError> {
        Ok(self
            .sections
            .get(&section_id)
            .map(|s| {
                s.verses
                    .iter()
                    .filter(|v| v.number >= from_verse)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
