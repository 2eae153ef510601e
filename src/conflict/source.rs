use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::ConflictModel;
use super::normalize::normalize_conflict;
use super::parse::parse_conflict_document;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictSource {
    pub name: String,
    pub path: PathBuf,
}

impl ConflictSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or("Conflict")
            .to_owned();
        Self { name, path }
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read conflict document {}", path.display()))
}

pub fn load_conflict(source: &ConflictSource) -> Result<ConflictModel> {
    let raw = read_document(&source.path)?;
    let document = parse_conflict_document(&raw)
        .with_context(|| format!("failed to parse {}", source.path.display()))?;
    normalize_conflict(&source.name, document)
        .with_context(|| format!("conflict {} is malformed", source.name))
}
