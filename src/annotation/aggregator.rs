use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::annotation::output::StagedOutput;
use crate::annotation::report::render_report;
use crate::catalog::index::DocLookupError;
use crate::catalog::store::DomainCatalog;
use crate::core::hit::AnnotationTable;
use crate::core::sequence::SequenceRecord;
use crate::core::types::{AnnotationIssue, IssueKind};
use crate::matching::engine::{PatternHits, ScanEngine};
use crate::utils::validation::sanitize_file_stem;

/// Suffix appended to a sequence's file stem to name its report
pub const DEFAULT_REPORT_SUFFIX: &str = "_dominfo.txt";

/// File name of the consolidated table
pub const DEFAULT_TABLE_NAME: &str = "_domains.tsv";

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Failed to prepare output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to publish {}: {source}", .path.display())]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Settings for an annotation run
#[derive(Debug, Clone)]
pub struct AnnotateConfig {
    /// Worker threads used for scanning
    pub threads: usize,

    pub report_suffix: String,
    pub table_name: String,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            report_suffix: DEFAULT_REPORT_SUFFIX.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

/// Result of scanning one sequence, tagged with its input position
#[derive(Debug, Clone)]
struct SequenceOutcome<'a> {
    index: usize,
    groups: Vec<PatternHits<'a>>,
    issue: Option<AnnotationIssue>,
}

/// Everything a completed run produced
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationRun {
    #[serde(skip)]
    pub table: AnnotationTable,

    /// Recoverable problems: catalog compile failures first, then per sequence
    pub issues: Vec<AnnotationIssue>,

    /// Published report paths, in input order
    pub reports: Vec<PathBuf>,

    pub table_path: PathBuf,

    /// Number of sequences scanned
    pub sequences: usize,

    /// Number of hits in the table
    pub hits: usize,
}

/// Scans sequences against a catalog and publishes reports and the table
pub struct Annotator<'a> {
    catalog: &'a DomainCatalog,
    config: AnnotateConfig,
}

impl<'a> Annotator<'a> {
    pub fn new(catalog: &'a DomainCatalog) -> Self {
        Self::with_config(catalog, AnnotateConfig::default())
    }

    pub fn with_config(catalog: &'a DomainCatalog, config: AnnotateConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &AnnotateConfig {
        &self.config
    }

    /// Scan one sequence; empty or unreadable sequences yield no hits and an issue
    fn scan_one(
        &self,
        engine: &ScanEngine<'a>,
        index: usize,
        sequence: &SequenceRecord,
    ) -> SequenceOutcome<'a> {
        let issue = if sequence.is_empty() {
            Some(AnnotationIssue::new(
                sequence.id.as_str(),
                IssueKind::EmptySequence,
                "sequence has no residues",
            ))
        } else {
            sequence.first_invalid_residue().map(|(pos, c)| {
                AnnotationIssue::new(
                    sequence.id.as_str(),
                    IssueKind::UnreadableSequence,
                    format!("invalid residue {c:?} at position {pos}"),
                )
            })
        };

        let groups = if let Some(issue) = &issue {
            warn!(sequence = %sequence.id, "Skipping sequence: {}", issue.message);
            Vec::new()
        } else {
            engine.scan_by_pattern(sequence)
        };
        debug!(
            sequence = %sequence.id,
            hits = groups.iter().map(|g| g.hits.len()).sum::<usize>(),
            "Scanned sequence"
        );

        SequenceOutcome {
            index,
            groups,
            issue,
        }
    }

    /// Scan all sequences on a dedicated pool, returning outcomes in input order
    fn scan_all(
        &self,
        sequences: &[SequenceRecord],
    ) -> Result<Vec<SequenceOutcome<'a>>, AnnotationError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads.max(1))
            .build()?;
        let engine = ScanEngine::new(self.catalog);

        let mut outcomes: Vec<SequenceOutcome<'a>> = pool.install(|| {
            sequences
                .par_iter()
                .enumerate()
                .map(|(index, sequence)| self.scan_one(&engine, index, sequence))
                .collect()
        });
        outcomes.sort_by_key(|o| o.index);
        Ok(outcomes)
    }

    /// Scan every sequence and publish one report per sequence plus the table.
    ///
    /// Nothing appears in `output_dir` under a final name unless the whole run
    /// succeeds; the table is published last.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError` if the pool cannot be built or any output
    /// cannot be written or published.
    pub fn annotate(
        &self,
        sequences: &[SequenceRecord],
        output_dir: &Path,
    ) -> Result<AnnotationRun, AnnotationError> {
        info!(
            sequences = sequences.len(),
            patterns = self.catalog.usable_count(),
            threads = self.config.threads,
            "Starting annotation run"
        );

        let outcomes = self.scan_all(sequences)?;

        let mut staged = StagedOutput::create(output_dir)?;
        let mut issues = self.catalog.compile_issues();
        let mut table = AnnotationTable::new();
        let mut used_names = HashSet::new();
        let mut reported_missing: HashSet<String> = HashSet::new();

        for outcome in outcomes {
            let sequence = &sequences[outcome.index];
            if let Some(issue) = outcome.issue {
                issues.push(issue);
            }

            let report = render_report(self.catalog, &outcome.groups);
            for err in &report.missing_docs {
                let DocLookupError::NotFound { accession, .. } = err;
                if reported_missing.insert(accession.clone()) {
                    warn!(pattern = %accession, "No documentation found");
                    issues.push(AnnotationIssue::new(
                        accession.as_str(),
                        IssueKind::DocumentationNotFound,
                        err.to_string(),
                    ));
                }
            }

            let file_name = unique_report_name(
                &sequence.id,
                outcome.index,
                &self.config.report_suffix,
                &mut used_names,
            );
            staged.write_report(&file_name, &report.text)?;
            table.extend_sequence(outcome.groups.into_iter().flat_map(|group| group.hits));
        }

        let published = staged.publish(&table, &self.config.table_name)?;
        info!(
            sequences = sequences.len(),
            hits = table.len(),
            issues = issues.len(),
            table = %published.table.display(),
            "Annotation run complete"
        );

        Ok(AnnotationRun {
            hits: table.len(),
            table,
            issues,
            reports: published.reports,
            table_path: published.table,
            sequences: sequences.len(),
        })
    }
}

/// Derive a report file name that no earlier sequence in the run has used
fn unique_report_name(
    sequence_id: &str,
    index: usize,
    suffix: &str,
    used: &mut HashSet<String>,
) -> String {
    let stem = sanitize_file_stem(sequence_id).unwrap_or_else(|e| {
        debug!(sequence = %sequence_id, "Using positional report name: {e}");
        format!("sequence_{}", index + 1)
    });

    let mut name = format!("{stem}{suffix}");
    let mut n = 2;
    while !used.insert(name.to_ascii_lowercase()) {
        name = format!("{stem}_{n}{suffix}");
        n += 1;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::definition::{DocumentationRecord, PatternDefinition};
    use std::fs;

    fn make_test_catalog() -> DomainCatalog {
        DomainCatalog::from_parts(
            vec![
                PatternDefinition::new("P1", "PS90001", "First.", "R-G-D."),
                PatternDefinition::new("P2", "PS90002", "Second.", "K-K."),
                PatternDefinition::new("BROKEN", "PS90003", "Broken.", "K-[RG."),
            ],
            vec![DocumentationRecord::new("PDOC90001", "P1 docs.")],
        )
    }

    fn single_thread() -> AnnotateConfig {
        AnnotateConfig {
            threads: 1,
            ..AnnotateConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AnnotateConfig::default();
        assert!(config.threads >= 1);
        assert_eq!(config.report_suffix, "_dominfo.txt");
        assert_eq!(config.table_name, "_domains.tsv");
    }

    #[test]
    fn test_sequence_then_catalog_order() {
        let catalog = make_test_catalog();
        let dir = tempfile::tempdir().unwrap();
        let sequences = vec![
            SequenceRecord::new("S1", "KKRGD"),
            SequenceRecord::new("S2", "RGDKK"),
        ];

        let run = Annotator::with_config(&catalog, single_thread())
            .annotate(&sequences, dir.path())
            .unwrap();

        let rows: Vec<(&str, &str)> = run
            .table
            .iter()
            .map(|h| (h.sequence_id.as_str(), h.pattern_name.as_str()))
            .collect();
        assert_eq!(rows, vec![("S1", "P1"), ("S1", "P2"), ("S2", "P1"), ("S2", "P2")]);
        assert_eq!(run.hits, 4);
        assert_eq!(run.sequences, 2);
    }

    #[test]
    fn test_reports_and_table_written() {
        let catalog = make_test_catalog();
        let dir = tempfile::tempdir().unwrap();
        let sequences = vec![SequenceRecord::new("sp|P1|TEST", "ARGDA")];

        let run = Annotator::with_config(&catalog, single_thread())
            .annotate(&sequences, dir.path())
            .unwrap();

        let report_path = dir.path().join("sp_P1_TEST_dominfo.txt");
        assert_eq!(run.reports, vec![report_path.clone()]);
        let report = fs::read_to_string(report_path).unwrap();
        assert!(report.starts_with("1 domains found.\n"));
        assert!(report.contains("P1 docs."));

        let table = fs::read_to_string(dir.path().join("_domains.tsv")).unwrap();
        assert_eq!(
            table,
            "id\tname\taccession\tdescription\tpattern\tstart\tend\tmidpoint\n\
             sp|P1|TEST\tP1\tPS90001\tFirst.\tR-G-D.\t1\t4\t2.5\n"
        );
    }

    #[test]
    fn test_issues_recorded() {
        let catalog = make_test_catalog();
        let dir = tempfile::tempdir().unwrap();
        let sequences = vec![
            SequenceRecord::new("empty", ""),
            SequenceRecord::new("bad", "KK1KK"),
            SequenceRecord::new("kk", "KKAKK"),
            SequenceRecord::new("kk2", "KK"),
        ];

        let run = Annotator::with_config(&catalog, single_thread())
            .annotate(&sequences, dir.path())
            .unwrap();

        let kinds: Vec<(&str, IssueKind)> = run
            .issues
            .iter()
            .map(|i| (i.subject.as_str(), i.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("PS90003", IssueKind::PatternCompile),
                ("empty", IssueKind::EmptySequence),
                ("bad", IssueKind::UnreadableSequence),
                ("PS90002", IssueKind::DocumentationNotFound),
            ]
        );
        // Sequences with issues still get a report
        assert_eq!(run.reports.len(), 4);
        let report = fs::read_to_string(dir.path().join("bad_dominfo.txt")).unwrap();
        assert_eq!(report, "0 domains found.\n\n\n");
    }

    #[test]
    fn test_report_name_collisions() {
        let mut used = HashSet::new();
        assert_eq!(unique_report_name("a|b", 0, "_dominfo.txt", &mut used), "a_b_dominfo.txt");
        assert_eq!(unique_report_name("a/b", 1, "_dominfo.txt", &mut used), "a_b_2_dominfo.txt");
        assert_eq!(unique_report_name("A_B", 2, "_dominfo.txt", &mut used), "A_B_3_dominfo.txt");
        assert_eq!(unique_report_name("..", 3, "_dominfo.txt", &mut used), "sequence_4_dominfo.txt");
    }

    #[test]
    fn test_thread_count_does_not_change_table() {
        let catalog = make_test_catalog();
        let sequences: Vec<SequenceRecord> = (0..50)
            .map(|i| SequenceRecord::new(format!("s{i}"), "RGDKK".repeat(i % 5 + 1)))
            .collect();

        let one = tempfile::tempdir().unwrap();
        let many = tempfile::tempdir().unwrap();
        Annotator::with_config(&catalog, single_thread())
            .annotate(&sequences, one.path())
            .unwrap();
        Annotator::with_config(
            &catalog,
            AnnotateConfig {
                threads: 8,
                ..AnnotateConfig::default()
            },
        )
        .annotate(&sequences, many.path())
        .unwrap();

        assert_eq!(
            fs::read(one.path().join("_domains.tsv")).unwrap(),
            fs::read(many.path().join("_domains.tsv")).unwrap()
        );
    }
}
