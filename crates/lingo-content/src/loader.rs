//! Corpus loading from a content directory.
//!
//! Each language lives in its own file (`cpp.yaml`, `python.json`, ...)
//! holding one [`LanguageCorpus`]. Files with other extensions and hidden
//! files are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ContentError;
use crate::model::{LanguageCorpus, Library};

/// Load one corpus file, picking the parser from its extension.
pub fn load_corpus(path: &Path) -> Result<LanguageCorpus, ContentError> {
    let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut corpus: LanguageCorpus = if has_extension(path, &["json"]) {
        serde_json::from_str(&content).map_err(|source| ContentError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|source| ContentError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };

    if corpus.label.is_empty() {
        corpus.label.clone_from(&corpus.id);
    }

    tracing::debug!(
        language = %corpus.id,
        entries = corpus.entry_count(),
        "loaded corpus from {}",
        path.display()
    );
    Ok(corpus)
}

/// Load every corpus file in `dir` into a [`Library`].
///
/// Languages named in `order` come first, in that order; the remaining ones
/// follow sorted by file name. Names in `order` without a corpus file are
/// logged and skipped.
pub fn load_library(dir: &Path, order: &[String]) -> Result<Library, ContentError> {
    if !dir.is_dir() {
        return Err(ContentError::NotFound(dir.to_path_buf()));
    }

    let mut corpora = corpus_files(dir)?
        .iter()
        .map(|path| load_corpus(path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ordered = Vec::with_capacity(corpora.len());
    for id in order {
        match corpora.iter().position(|c| &c.id == id) {
            Some(pos) => ordered.push(corpora.remove(pos)),
            None => tracing::warn!("language {id} listed in config has no corpus file"),
        }
    }
    ordered.extend(corpora);

    Library::new(ordered)
}

/// Corpus files in `dir`, sorted by file name.
fn corpus_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let io_err = |source| ContentError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for dir_entry in fs::read_dir(dir).map_err(io_err)? {
        let path = dir_entry.map_err(io_err)?.path();
        let hidden = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'));
        if path.is_file() && !hidden && has_extension(&path, &["yaml", "yml", "json"]) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const CPP_YAML: &str = r"
id: cpp
label: C++
categories:
  - id: basics
    label: Basics
    icon: book
    entries:
      - id: hello-world
        title: Hello World
        sections:
          - heading: Your First Program
            content: |
              Every program starts in main.

              It returns an int.
            code: |
              int main() { return 0; }
";

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_corpus_yaml() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "cpp.yaml", CPP_YAML);

        let corpus = load_corpus(&tmp.path().join("cpp.yaml")).unwrap();
        assert_eq!(corpus.id, "cpp");
        assert_eq!(corpus.entry_count(), 1);
        let section = &corpus.categories[0].entries[0].sections[0];
        assert_eq!(section.paragraphs().count(), 2);
        assert!(section.code.as_deref().unwrap().contains("main"));
    }

    #[test]
    fn test_load_corpus_json_label_defaults_to_id() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "go.json", r#"{"id": "go", "categories": []}"#);

        let corpus = load_corpus(&tmp.path().join("go.json")).unwrap();
        assert_eq!(corpus.label, "go");
    }

    #[test]
    fn test_load_corpus_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "bad.yaml", "id: [unterminated");

        let err = load_corpus(&tmp.path().join("bad.yaml")).unwrap_err();
        assert!(matches!(err, ContentError::Yaml { .. }));
    }

    #[test]
    fn test_load_library_orders_languages() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "cpp.yaml", CPP_YAML);
        write(tmp.path(), "go.json", r#"{"id": "go"}"#);
        write(tmp.path(), "python.yml", "id: python\nlabel: Python\n");
        write(tmp.path(), "README.md", "# not a corpus");
        write(tmp.path(), ".hidden.yaml", "id: hidden\n");

        let order = vec!["python".to_owned(), "rust".to_owned()];
        let library = load_library(tmp.path(), &order).unwrap();
        let ids: Vec<&str> = library.languages().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["python", "cpp", "go"]);
    }

    #[test]
    fn test_load_library_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let err = load_library(&tmp.path().join("nope"), &[]).unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_load_library_duplicate_language() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.yaml", "id: cpp\n");
        write(tmp.path(), "b.yaml", "id: cpp\n");

        let err = load_library(tmp.path(), &[]).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateLanguage(_)));
    }
}
