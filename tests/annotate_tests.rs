//! End-to-end annotation runs against the fixture stores in `tests/data`.

use std::fs;
use std::path::{Path, PathBuf};

use motif_scan::annotation::{AnnotateConfig, Annotator};
use motif_scan::catalog::store::{CatalogError, DomainCatalog};
use motif_scan::parsing::fasta::parse_fasta_file;
use motif_scan::{IssueKind, SequenceRecord};

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn load_catalog() -> DomainCatalog {
    DomainCatalog::load(&data_path("prosite.dat"), &data_path("prosite.doc"))
        .expect("fixture stores should load")
}

fn config(threads: usize) -> AnnotateConfig {
    AnnotateConfig {
        threads,
        ..AnnotateConfig::default()
    }
}

#[test]
fn test_fixture_catalog() {
    let catalog = load_catalog();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.usable_count(), 4);
    assert_eq!(catalog.doc_count(), 3);

    // Multi-line PA entries are concatenated
    let asn = catalog.get("PS00001").unwrap();
    assert_eq!(asn.definition.raw_pattern, "N-{P}-[ST]-{P}.");
    assert_eq!(asn.matcher().unwrap().expression(), "N[^P][ST][^P]");

    let issues = catalog.compile_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].subject, "PS99998");
}

#[test]
fn test_annotate_fixture_sequences() {
    let catalog = load_catalog();
    let sequences = parse_fasta_file(&data_path("sequences.fasta")).unwrap();
    let out = tempfile::tempdir().unwrap();

    let run = Annotator::with_config(&catalog, config(2))
        .annotate(&sequences, out.path())
        .unwrap();

    let table = fs::read_to_string(out.path().join("_domains.tsv")).unwrap();
    assert_eq!(
        table,
        "id\tname\taccession\tdescription\tpattern\tstart\tend\tmidpoint\n\
         S1\tASN_GLYCOSYLATION\tPS00001\tN-glycosylation site.\tN-{P}-[ST]-{P}.\t2\t6\t4.0\n\
         S1\tRGD\tPS00016\tCell attachment sequence.\tR-G-D.\t7\t10\t8.5\n\
         S1\tNGS_MOTIF\tPS90001\tTest motif without an explicit documentation reference.\tN-[GA]-S.\t2\t5\t3.5\n\
         S2\tRGD\tPS00016\tCell attachment sequence.\tR-G-D.\t4\t7\t5.5\n\
         S2\tLYSINE_PAIR\tPS90002\tTest motif with no documentation record.\tK-K.\t0\t2\t1.0\n"
    );
    assert_eq!(run.hits, 5);
    assert_eq!(
        run.reports,
        vec![out.path().join("S1_dominfo.txt"), out.path().join("S2_dominfo.txt")]
    );

    let s1 = fs::read_to_string(out.path().join("S1_dominfo.txt")).unwrap();
    assert!(s1.starts_with("3 domains found.\n\n\nASN_GLYCOSYLATION\nPS00001\n"));
    assert!(s1.contains("N-glycosylation sites are found in the sequence N-x-S/T."));
    assert!(s1.contains("Documentation found through the accession prefix."));

    let s2 = fs::read_to_string(out.path().join("S2_dominfo.txt")).unwrap();
    assert!(s2.starts_with("2 domains found.\n"));
    assert!(s2.contains("documentation not found for PS90002\n"));

    let kinds: Vec<IssueKind> = run.issues.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![IssueKind::PatternCompile, IssueKind::DocumentationNotFound]
    );
}

#[test]
fn test_sequence_order_precedes_catalog_order() {
    let catalog = load_catalog();
    let sequences = vec![
        SequenceRecord::new("S1", "KKRGD"),
        SequenceRecord::new("S2", "RGDKK"),
    ];
    let out = tempfile::tempdir().unwrap();

    let run = Annotator::with_config(&catalog, config(4))
        .annotate(&sequences, out.path())
        .unwrap();

    let rows: Vec<(&str, &str)> = run
        .table
        .iter()
        .map(|h| (h.sequence_id.as_str(), h.pattern_accession.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("S1", "PS00016"),
            ("S1", "PS90002"),
            ("S2", "PS00016"),
            ("S2", "PS90002"),
        ]
    );
}

#[test]
fn test_runs_are_deterministic_across_thread_counts() {
    let catalog = load_catalog();
    let sequences: Vec<SequenceRecord> = (0..200)
        .map(|i| {
            let body = ["MKNGSTKRGDAA", "KKWWRGD", "AAAA", "NASKKNGSRGD"][i % 4];
            SequenceRecord::new(format!("seq{i}"), body.repeat(i % 7 + 1))
        })
        .collect();

    let mut tables = Vec::new();
    for threads in [1, 3, 8, 1] {
        let out = tempfile::tempdir().unwrap();
        Annotator::with_config(&catalog, config(threads))
            .annotate(&sequences, out.path())
            .unwrap();
        tables.push(fs::read(out.path().join("_domains.tsv")).unwrap());
    }

    assert!(tables.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_unreadable_pattern_store_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results");
    let sequences = parse_fasta_file(&data_path("sequences.fasta")).unwrap();

    let result = DomainCatalog::load(&data_path("missing.dat"), &data_path("prosite.doc"))
        .map(|catalog| Annotator::with_config(&catalog, config(1)).annotate(&sequences, &out));

    assert!(matches!(
        result,
        Err(CatalogError::ReadError { store: "pattern", .. })
    ));
    assert!(!out.exists());
}

#[test]
fn test_ngstk_single_hit() {
    let catalog = load_catalog();
    let out = tempfile::tempdir().unwrap();

    let run = Annotator::with_config(&catalog, config(1))
        .annotate(&[SequenceRecord::new("q", "NGSTK")], out.path())
        .unwrap();

    let ngs: Vec<_> = run
        .table
        .iter()
        .filter(|h| h.pattern_accession == "PS90001")
        .collect();
    assert_eq!(ngs.len(), 1);
    assert_eq!((ngs[0].start, ngs[0].end), (0, 3));
    assert!((ngs[0].midpoint - 1.5).abs() < f64::EPSILON);
}
