//! Staged writing of run artifacts.
//!
//! Reports are written into a hidden staging directory inside the output
//! directory and the table into a temporary file beside its final name. Only
//! [`StagedOutput::publish`] moves them into place, table last, so an
//! interrupted or failed run never leaves a table under its final name.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, warn};

use crate::annotation::aggregator::AnnotationError;
use crate::core::hit::AnnotationTable;

/// Files moved into the output directory by a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedFiles {
    pub reports: Vec<PathBuf>,
    pub table: PathBuf,
}

/// Run artifacts waiting to be published
#[derive(Debug)]
pub struct StagedOutput {
    output_dir: PathBuf,
    staging: TempDir,
    reports: Vec<String>,
}

impl StagedOutput {
    /// Create the output directory if needed and a staging directory inside it
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::OutputDir` if either directory cannot be created.
    pub fn create(output_dir: &Path) -> Result<Self, AnnotationError> {
        let dir_error = |source| AnnotationError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        };
        fs::create_dir_all(output_dir).map_err(dir_error)?;
        let staging = tempfile::Builder::new()
            .prefix(".motif-scan-")
            .tempdir_in(output_dir)
            .map_err(dir_error)?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            staging,
            reports: Vec::new(),
        })
    }

    /// Stage one report file
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::Write` if the file cannot be written.
    pub fn write_report(&mut self, file_name: &str, contents: &str) -> Result<(), AnnotationError> {
        let path = self.staging_dir().join(file_name);
        fs::write(&path, contents).map_err(|source| AnnotationError::Write { path, source })?;
        self.reports.push(file_name.to_string());
        Ok(())
    }

    fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    /// Move staged reports into the output directory, recording each one moved
    fn move_reports(&self, moved: &mut Vec<PathBuf>) -> Result<(), AnnotationError> {
        for name in &self.reports {
            let from = self.staging_dir().join(name);
            let to = self.output_dir.join(name);
            fs::rename(&from, &to).map_err(|source| AnnotationError::Write {
                path: to.clone(),
                source,
            })?;
            moved.push(to);
        }
        Ok(())
    }

    /// Write the table, move reports into place, then publish the table.
    ///
    /// If a report cannot be moved or the table cannot be published, reports
    /// already moved are removed again.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::Write` if the table cannot be written or a
    /// report cannot be moved, or `AnnotationError::Publish` if the table
    /// cannot be renamed to its final name.
    pub fn publish(
        self,
        table: &AnnotationTable,
        table_name: &str,
    ) -> Result<PublishedFiles, AnnotationError> {
        let table_path = self.output_dir.join(table_name);

        let staged_table = NamedTempFile::new_in(&self.output_dir).map_err(|source| {
            AnnotationError::Write {
                path: table_path.clone(),
                source,
            }
        })?;
        {
            let mut writer = BufWriter::new(staged_table.as_file());
            table
                .write_tsv(&mut writer)
                .and_then(|()| writer.flush())
                .map_err(|source| AnnotationError::Write {
                    path: table_path.clone(),
                    source,
                })?;
        }

        let mut reports = Vec::with_capacity(self.reports.len());
        let moved = self.move_reports(&mut reports).and_then(|()| {
            staged_table
                .persist(&table_path)
                .map(|_| ())
                .map_err(|e| AnnotationError::Publish {
                    path: table_path.clone(),
                    source: e.error,
                })
        });
        if let Err(err) = moved {
            for path in &reports {
                if let Err(e) = fs::remove_file(path) {
                    warn!(report = %path.display(), "Failed to remove report: {e}");
                }
            }
            return Err(err);
        }
        debug!(table = %table_path.display(), reports = reports.len(), "Published run output");

        Ok(PublishedFiles {
            reports,
            table: table_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_visible_before_publish() {
        let dir = tempfile::tempdir().unwrap();
        let mut staged = StagedOutput::create(dir.path()).unwrap();
        staged.write_report("s1_dominfo.txt", "0 domains found.\n\n\n").unwrap();

        assert!(!dir.path().join("s1_dominfo.txt").exists());
        assert!(!dir.path().join("_domains.tsv").exists());

        let published = staged.publish(&AnnotationTable::new(), "_domains.tsv").unwrap();
        assert_eq!(published.reports, vec![dir.path().join("s1_dominfo.txt")]);
        assert!(published.table.exists());
        assert_eq!(
            fs::read_to_string(&published.table).unwrap(),
            "id\tname\taccession\tdescription\tpattern\tstart\tend\tmidpoint\n"
        );
    }

    #[test]
    fn test_staging_removed() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedOutput::create(dir.path()).unwrap();
        let staging = staged.staging_dir().to_path_buf();
        assert!(staging.exists());

        staged.publish(&AnnotationTable::new(), "_domains.tsv").unwrap();
        assert!(!staging.exists());

        // Dropping without publishing also cleans up
        let staged = StagedOutput::create(dir.path()).unwrap();
        let staging = staged.staging_dir().to_path_buf();
        drop(staged);
        assert!(!staging.exists());
    }

    #[test]
    fn test_creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Q1").join("domains");
        let staged = StagedOutput::create(&nested).unwrap();
        staged.publish(&AnnotationTable::new(), "_domains.tsv").unwrap();
        assert!(nested.join("_domains.tsv").exists());
    }

    #[test]
    fn test_failed_report_write_leaves_no_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut staged = StagedOutput::create(dir.path()).unwrap();
        let result = staged.write_report("missing/sub/dir.txt", "x");
        assert!(matches!(result, Err(AnnotationError::Write { .. })));
        drop(staged);
        assert!(!dir.path().join("_domains.tsv").exists());
    }

    #[test]
    fn test_failed_table_publish_removes_reports() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory under the table's name cannot be replaced
        fs::create_dir(dir.path().join("_domains.tsv")).unwrap();
        fs::write(dir.path().join("_domains.tsv").join("keep"), "x").unwrap();

        let mut staged = StagedOutput::create(dir.path()).unwrap();
        staged.write_report("s1_dominfo.txt", "0 domains found.\n\n\n").unwrap();
        staged.write_report("s2_dominfo.txt", "0 domains found.\n\n\n").unwrap();

        let result = staged.publish(&AnnotationTable::new(), "_domains.tsv");
        assert!(matches!(result, Err(AnnotationError::Publish { .. })));
        assert!(!dir.path().join("s1_dominfo.txt").exists());
        assert!(!dir.path().join("s2_dominfo.txt").exists());
        assert!(dir.path().join("_domains.tsv").join("keep").exists());
    }
}
