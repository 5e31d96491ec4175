//! Per-category snippet metadata.
//!
//! A category directory holds one `metadata.json` document with the file type
//! and the ordered snippet records. Code, test and notes bodies never enter
//! that document; each snippet gets its own subdirectory:
//!
//! ```text
//! <category>/metadata.json
//! <category>/<snippet>/code.<filetype>
//! <category>/<snippet>/tests.<filetype>
//! <category>/<snippet>/notes.md
//! ```

use crate::models::error::StoreError;
use crate::models::fs::ensure_dir;
use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

pub const DOCUMENT_NAME: &str = "metadata.json";
const DATE_FORMAT: &str = "%d-%m-%Y";

/// The three bodies stored next to a snippet record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Code,
    Tests,
    Notes,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Code, Artifact::Tests, Artifact::Notes];

    pub fn file_name(self, filetype: &str) -> String {
        match self {
            Artifact::Code => format!("code.{}", filetype),
            Artifact::Tests => format!("tests.{}", filetype),
            Artifact::Notes => String::from("notes.md"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Artifact::Code => "Code",
            Artifact::Tests => "Tests",
            Artifact::Notes => "Notes",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetRecord {
    name: String,
    description: String,
    #[serde(rename = "date")]
    creation_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    tags: Vec<String>,
    // Kept for document compatibility; nothing increments it yet.
    #[serde(rename = "uses", default)]
    usage_count: u32,

    #[serde(skip)]
    code: Option<String>,
    #[serde(skip)]
    test_body: Option<String>,
    #[serde(skip)]
    notes: Option<String>,
}

impl SnippetRecord {
    fn new(name: String, description: String) -> Self {
        Self {
            name,
            description,
            creation_date: Local::now().format(DATE_FORMAT).to_string(),
            tags: Vec::new(),
            usage_count: 0,
            code: None,
            test_body: None,
            notes: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    /// Body cached by a `set_*` call during this session, if any
    pub fn body(&self, kind: Artifact) -> Option<&str> {
        match kind {
            Artifact::Code => self.code.as_deref(),
            Artifact::Tests => self.test_body.as_deref(),
            Artifact::Notes => self.notes.as_deref(),
        }
    }

    fn set_body(&mut self, kind: Artifact, body: String) {
        match kind {
            Artifact::Code => self.code = Some(body),
            Artifact::Tests => self.test_body = Some(body),
            Artifact::Notes => self.notes = Some(body),
        }
    }
}

// Older documents store cleared tags as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// True when `name` can be used as the snippet's artifact directory, i.e. it
/// is exactly one normal path component.
pub fn is_valid_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

/// Structured record set of one category, bound to its directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    filetype: String,
    snippets: Vec<SnippetRecord>,
    #[serde(skip)]
    storage_root: PathBuf,
}

impl Metadata {
    /// Opens the category at `path`, creating the directory and an empty
    /// document (with `default_filetype`) when none exists yet.
    pub fn load(path: impl AsRef<Path>, default_filetype: &str) -> Result<Self, StoreError> {
        let path = path.as_ref();
        ensure_dir(path).map_err(|e| StoreError::unavailable(path, e))?;

        let document = path.join(DOCUMENT_NAME);
        if document.is_file() {
            let content =
                fs::read_to_string(&document).map_err(|e| StoreError::unavailable(&document, e))?;
            let mut metadata: Metadata =
                serde_json::from_str(&content).map_err(|source| StoreError::CorruptDocument {
                    path: document.clone(),
                    source,
                })?;
            metadata.storage_root = path.to_path_buf();

            debug!(
                path = %path.display(),
                snippets = metadata.snippets.len(),
                "loaded category metadata"
            );
            return Ok(metadata);
        }

        let metadata = Metadata {
            filetype: default_filetype.to_string(),
            snippets: Vec::new(),
            storage_root: path.to_path_buf(),
        };
        metadata.save()?;

        info!(path = %path.display(), filetype = default_filetype, "created category metadata");
        Ok(metadata)
    }

    /// Rewrites the whole document. The bytes go to a temporary sibling first
    /// and are renamed over the document, so readers never see a partial file.
    pub fn save(&self) -> Result<(), StoreError> {
        let document = self.document_path();
        let bytes =
            serde_json::to_vec_pretty(self).map_err(|source| StoreError::EncodeFailed {
                path: document.clone(),
                source,
            })?;

        let tmp = self
            .storage_root
            .join(format!("{}.tmp.{}", DOCUMENT_NAME, std::process::id()));
        fs::write(&tmp, &bytes).map_err(|e| StoreError::unavailable(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &document) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::unavailable(&document, e));
        }

        debug!(path = %document.display(), snippets = self.snippets.len(), "saved metadata");
        Ok(())
    }

    pub fn filetype(&self) -> &str {
        &self.filetype
    }

    pub fn snippets(&self) -> &[SnippetRecord] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    pub fn document_path(&self) -> PathBuf {
        self.storage_root.join(DOCUMENT_NAME)
    }

    pub fn artifact_path(&self, name: &str, kind: Artifact) -> PathBuf {
        self.storage_root
            .join(name)
            .join(kind.file_name(&self.filetype))
    }

    /// Appends a record. Names are not required to be unique.
    pub fn add_snippet(&mut self, name: &str, description: &str) {
        self.snippets
            .push(SnippetRecord::new(name.to_string(), description.to_string()));
    }

    /// Drops the first record named `name`, if there is one.
    pub fn remove_snippet(&mut self, name: &str) {
        if let Some(index) = self.position(name) {
            self.snippets.remove(index);
        }
    }

    pub fn get_snippet(&self, name: &str) -> Option<&SnippetRecord> {
        self.snippets.iter().find(|snippet| snippet.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.snippets.iter().position(|snippet| snippet.name == name)
    }

    pub fn add_tag(&mut self, name: &str, tag: &str) -> Result<(), StoreError> {
        let Some(index) = self.position(name) else {
            return Ok(());
        };
        self.snippets[index].tags.push(tag.to_string());
        self.save()
    }

    /// Removes the first occurrence of `tag`; saves only when one was removed.
    pub fn remove_tag(&mut self, name: &str, tag: &str) -> Result<(), StoreError> {
        let Some(index) = self.position(name) else {
            return Ok(());
        };
        let tags = &mut self.snippets[index].tags;
        let Some(at) = tags.iter().position(|t| t == tag) else {
            return Ok(());
        };
        tags.remove(at);
        self.save()
    }

    pub fn set_tags(&mut self, name: &str, tags: Vec<String>) -> Result<(), StoreError> {
        let Some(index) = self.position(name) else {
            return Ok(());
        };
        self.snippets[index].tags = tags;
        self.save()
    }

    pub fn set_code(&mut self, name: &str, body: &str) -> Result<(), StoreError> {
        self.write_artifact(name, Artifact::Code, body)
    }

    pub fn set_test(&mut self, name: &str, body: &str) -> Result<(), StoreError> {
        self.write_artifact(name, Artifact::Tests, body)
    }

    pub fn set_notes(&mut self, name: &str, body: &str) -> Result<(), StoreError> {
        self.write_artifact(name, Artifact::Notes, body)
    }

    fn write_artifact(&mut self, name: &str, kind: Artifact, body: &str) -> Result<(), StoreError> {
        let Some(index) = self.position(name) else {
            return Ok(());
        };

        let dir = self.storage_root.join(name);
        if !is_valid_name(name) {
            return Err(StoreError::ArtifactWriteFailed {
                path: dir,
                source: invalid_name(name),
            });
        }
        ensure_dir(&dir).map_err(|source| StoreError::ArtifactWriteFailed {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(kind.file_name(&self.filetype));
        fs::write(&path, body).map_err(|source| StoreError::ArtifactWriteFailed {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = body.len(), "wrote artifact");

        self.snippets[index].set_body(kind, body.to_string());
        self.save()
    }

    /// Body of one artifact for display.
    ///
    /// `None` when no record is named `name`. A body set in this session wins
    /// over the file on disk; a missing file reads as empty.
    pub fn artifact(&self, name: &str, kind: Artifact) -> Result<Option<String>, StoreError> {
        let Some(record) = self.get_snippet(name) else {
            return Ok(None);
        };
        if let Some(body) = record.body(kind) {
            return Ok(Some(body.to_string()));
        }

        let path = self.artifact_path(name, kind);
        if !is_valid_name(name) {
            return Err(StoreError::unavailable(path, invalid_name(name)));
        }
        match fs::read_to_string(&path) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Some(String::new())),
            Err(e) => Err(StoreError::unavailable(path, e)),
        }
    }
}

fn invalid_name(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("snippet name '{}' is not a single path component", name),
    )
}
