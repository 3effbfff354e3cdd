use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

/// Command with the fixture stores selected
fn motif_scan(subcommand: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("motif-scan").unwrap();
    cmd.args(subcommand)
        .arg("--patterns")
        .arg(data_path("prosite.dat"))
        .arg("--docs")
        .arg(data_path("prosite.doc"));
    cmd
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("motif-scan")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("annotate"))
        .stdout(predicate::str::contains("blast"))
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("compile"));
}

#[test]
fn test_compile_pattern() {
    Command::cargo_bin("motif-scan")
        .unwrap()
        .args(["compile", "[AC]-x-V-x(2)-{ED}."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expression: [AC].V.{2}[^ED]"));
}

#[test]
fn test_compile_json() {
    let output = Command::cargo_bin("motif-scan")
        .unwrap()
        .args(["compile", "<M-x-K>.", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["expression"], "^M.K$");
}

#[test]
fn test_compile_rejects_bad_pattern() {
    Command::cargo_bin("motif-scan")
        .unwrap()
        .args(["compile", "N-[ST."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to compile"));
}

#[test]
fn test_annotate_writes_reports_and_table() {
    let out = tempfile::tempdir().unwrap();
    let sequences = data_path("sequences.fasta");

    motif_scan(&["annotate"])
        .arg(&sequences)
        .arg("-o")
        .arg(out.path())
        .args(["--threads", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Annotated 2 sequences: 5 domains found"))
        .stdout(predicate::str::contains("PS99998 (pattern compile)"));

    assert!(out.path().join("S1_dominfo.txt").exists());
    assert!(out.path().join("S2_dominfo.txt").exists());
    let table = fs::read_to_string(out.path().join("_domains.tsv")).unwrap();
    assert_eq!(table.lines().count(), 6);
}

#[test]
fn test_annotate_tsv_prints_table() {
    let out = tempfile::tempdir().unwrap();

    motif_scan(&["annotate"])
        .arg(data_path("sequences.fasta"))
        .arg("-o")
        .arg(out.path())
        .args(["--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id\tname\taccession\tdescription\tpattern\tstart\tend\tmidpoint\n",
        ))
        .stdout(predicate::str::contains("S2\tLYSINE_PAIR\tPS90002"));
}

#[test]
fn test_missing_pattern_store_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results");

    Command::cargo_bin("motif-scan")
        .unwrap()
        .arg("annotate")
        .arg(data_path("sequences.fasta"))
        .arg("--patterns")
        .arg(data_path("missing.dat"))
        .arg("--docs")
        .arg(data_path("prosite.doc"))
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pattern store"));

    assert!(!out.exists());
}

#[test]
fn test_annotate_rejects_non_fasta_input() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results");

    motif_scan(&["annotate"])
        .arg(data_path("blast.tsv"))
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a FASTA file"));

    assert!(!out.exists());
}

#[test]
fn test_blast_groups_by_query() {
    let out = tempfile::tempdir().unwrap();

    motif_scan(&["blast"])
        .arg(data_path("blast.tsv"))
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Annotated 2 queries"));

    let fasta = fs::read_to_string(out.path().join("Q1/unaligned.fasta")).unwrap();
    assert_eq!(fasta, ">subjA\nKKWWRGD\n>subjB\nMKNGSTK\n");

    let q1 = fs::read_to_string(out.path().join("Q1/domains/_domains.tsv")).unwrap();
    assert!(q1.contains("subjA\tRGD\tPS00016"));
    assert!(q1.contains("subjB\tASN_GLYCOSYLATION\tPS00001"));
    assert!(out.path().join("Q1/domains/subjA_dominfo.txt").exists());
    assert!(out.path().join("Q2/domains/subjC_dominfo.txt").exists());
}

#[test]
fn test_catalog_list_failed_only() {
    motif_scan(&["catalog", "list", "--failed-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PS99998"))
        .stdout(predicate::str::contains("RGD").not());
}

#[test]
fn test_catalog_show() {
    motif_scan(&["catalog", "show", "RGD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Accession:   PS00016"))
        .stdout(predicate::str::contains("Expression:  RGD"))
        .stdout(predicate::str::contains("Documentation (PDOC00016)"));

    motif_scan(&["catalog", "show", "PS12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pattern not found"));
}

#[test]
fn test_catalog_export() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("catalog.json");

    motif_scan(&["catalog", "export"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 5 patterns"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["patterns"].as_array().unwrap().len(), 5);
    assert!(json["created_at"].is_string());
}
