//! Tests for configuration files and batch input handling.

use ferro_describe::cli::{describe_reader, DescribeSummary, OutputFormat};
use ferro_describe::config::{DescribeConfig, DEFAULT_GENETIC_CODE};
use ferro_describe::extractor::{Describer, DescriberConfig, Molecule};
use ferro_describe::ErrorCode;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use tempfile::{tempdir, NamedTempFile};

#[test]
fn test_load_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "# ferro-describe settings\n[describe]\nmax-length = 12\nlog-level = \"info\"\n\n[other]\nmax-length = 99"
    )
    .unwrap();

    let config = DescribeConfig::load_from_path(file.path()).unwrap();
    assert_eq!(config.max_length, 12);
    assert_eq!(config.genetic_code, DEFAULT_GENETIC_CODE);
    assert_eq!(config.log_level.as_deref(), Some("info"));
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempdir().unwrap();
    let err = DescribeConfig::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IoError);
}

#[test]
fn test_load_config_malformed_value() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[describe]\ngenetic-code = standard").unwrap();

    let err = DescribeConfig::load_from_path(file.path()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);
    assert!(err.to_string().contains("genetic-code"));
}

#[test]
fn test_cli_flags_override_config() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[describe]\nmax-length = 12\ngenetic-code = 2").unwrap();

    let config = DescribeConfig::load_from_path(file.path())
        .unwrap()
        .merge_with_cli(Some(4), None, Some("debug"));
    assert_eq!(config.max_length, 4);
    assert_eq!(config.genetic_code, 2);
    assert_eq!(config.log_level.as_deref(), Some("debug"));

    let describer = Describer::new(DescriberConfig::from(&config));
    assert!(describer.describe("ATGCA", "ATGC", Molecule::Dna).is_err());
    assert!(describer.describe("ATGC", "ATAC", Molecule::Dna).is_ok());
}

#[test]
fn test_describe_file_of_pairs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pairs.tsv");
    fs::write(
        &path,
        "# label\treference\tobserved\n\
         sub\tATGC\tATAC\n\
         del\tATGCAT\tATCAT   # one base lost\n\
         \n\
         ATGC\tATGGC\n\
         only-one-column\n",
    )
    .unwrap();

    let describer: Describer = Describer::default();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = describe_reader(
        BufReader::new(File::open(&path).unwrap()),
        &mut out,
        &mut err,
        &describer,
        Molecule::Dna,
        OutputFormat::Text,
    )
    .unwrap();

    assert_eq!(
        summary,
        DescribeSummary {
            described: 3,
            errors: 1
        }
    );
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "sub\t3G>A\t4\ndel\t3del\t4\n3dup\t4\n"
    );
    assert!(String::from_utf8(err).unwrap().contains("line 6"));
}

#[test]
fn test_describe_file_json_lines() {
    let describer: Describer = Describer::default();
    let mut out = Vec::new();
    let mut err = Vec::new();
    describe_reader(
        "MKPLVW\tMKPLVW\n".as_bytes(),
        &mut out,
        &mut err,
        &describer,
        Molecule::Protein,
        OutputFormat::Json,
    )
    .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(String::from_utf8(out).unwrap().trim()).unwrap();
    assert_eq!(value["description"], "=");
    assert_eq!(value["length"], 1);
    assert_eq!(value["observed_length"], 6);
    assert!(err.is_empty());
}
