//! Per-file validation, fanned out over a rayon pool

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use typedjs_check::{check_source, CheckOptions, Diagnostic, Severity};

use crate::error::DriverError;

/// Outcome of validating one document
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// Document text, kept for rendering diagnostics
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

pub fn check_file(path: &Path, options: &CheckOptions) -> Result<FileReport, DriverError> {
    let source = fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let diagnostics = check_source(&source, options);
    tracing::debug!(path = %path.display(), count = diagnostics.len(), "checked file");

    Ok(FileReport {
        path: path.to_path_buf(),
        source,
        diagnostics,
    })
}

/// Checks every file on its own pass; results come back in input order
pub fn check_files(paths: &[PathBuf], options: &CheckOptions) -> Vec<Result<FileReport, DriverError>> {
    paths
        .par_iter()
        .map(|path| check_file(path, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use typedjs_check::DiagnosticKind;

    fn temp_file(contents: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("typedjs_pipeline_{}_{}", std::process::id(), id));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("input.tjs");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_check_file() {
        let path = temp_file("let n: number = 'x';");
        let report = check_file(&path, &CheckOptions::default()).unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::TypeMismatch);
        assert!(report.has_errors());
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let path = temp_file("let n: number = 'x';");
        let options = CheckOptions {
            severity: Severity::Warning,
            ..CheckOptions::default()
        };
        let report = check_file(&path, &options).unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("typedjs_definitely_missing.tjs");
        let err = check_file(&path, &CheckOptions::default()).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn test_results_keep_input_order() {
        let paths: Vec<PathBuf> = (0..8)
            .map(|i| {
                if i % 2 == 0 {
                    temp_file("let ok: string = 'fine';")
                } else {
                    temp_file("let bad: string = 0;")
                }
            })
            .collect();

        let results = check_files(&paths, &CheckOptions::default());
        assert_eq!(results.len(), paths.len());
        for (i, (result, path)) in results.iter().zip(&paths).enumerate() {
            let report = result.as_ref().unwrap();
            assert_eq!(&report.path, path);
            assert_eq!(report.has_errors(), i % 2 == 1);
        }
    }
}
