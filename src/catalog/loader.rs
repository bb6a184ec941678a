use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use tracing::{debug, error, info};

use super::{Catalog, CatalogError};
use crate::models::Course;

/// Outcome delivered by [`spawn_loader`].
pub type LoadResult = Result<Catalog, CatalogError>;

/// Read and validate the catalog file. `id`, `title` and `description` are
/// required on every entry; `materials` may be absent.
pub fn load_catalog(path: &Path) -> LoadResult {
    debug!(path = %path.display(), "reading course catalog");
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&raw, path)
}

/// Parse catalog JSON. `origin` is only used for error messages.
pub fn parse_catalog(raw: &str, origin: &Path) -> LoadResult {
    let courses: Vec<Course> =
        serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
    Catalog::new(courses)
}

/// Load the catalog on a worker thread. The receiver yields exactly one
/// result; if the worker dies first the channel disconnects and callers
/// should treat that as [`CatalogError::LoaderGone`].
pub fn spawn_loader(path: PathBuf) -> Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("catalog-loader".to_string())
        .spawn(move || {
            let result = load_catalog(&path);
            match &result {
                Ok(catalog) => {
                    info!(path = %path.display(), courses = catalog.len(), "course catalog loaded")
                }
                Err(err) => error!(path = %path.display(), error = %err, "could not load course data"),
            }
            // The UI may already be gone.
            let _ = tx.send(result);
        });

    if let Err(err) = spawned {
        error!(error = %err, "failed to start catalog loader thread");
    }
    rx
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": 1,
            "title": "Algorithms",
            "description": "CS core",
            "materials": { "lab": "https://example.com/algo/lab", "slides": "https://example.com/algo/slides" }
        },
        { "id": 2, "title": "Biology", "description": "Life science" }
    ]"#;

    fn write_catalog(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_courses_in_file_order() {
        let file = write_catalog(SAMPLE);
        let catalog = load_catalog(file.path()).unwrap();
        let titles: Vec<&str> = catalog.courses().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Algorithms", "Biology"]);
        assert_eq!(catalog.courses()[0].materials.len(), 2);
        assert!(catalog.courses()[1].materials.is_empty());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("data.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let err = parse_catalog(r#"[{"id": 3, "title": "Chemistry"}]"#, Path::new("inline"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_catalog("{ not json", Path::new("inline")).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn worker_delivers_one_result() {
        let file = write_catalog(SAMPLE);
        let rx = spawn_loader(file.path().to_path_buf());
        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.unwrap().len(), 2);
    }
}
