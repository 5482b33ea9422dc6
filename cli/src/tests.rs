use super::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["yurimerge"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("parse cli")
}

#[test]
fn no_arguments_reproduce_libyuri_defaults() {
    let cli = parse(&[]);
    let config = build_config(&cli);

    assert_eq!(config, MergeConfig::default());
    assert!(!cli.check && !cli.stdout && !cli.json && !cli.ndjson);
}

#[test]
fn flags_flow_into_config() {
    let cli = parse(&[
        "-C",
        "include",
        "-o",
        "single.h",
        "-g",
        "MY_SINGLE_H",
        "--drop-prefix",
        "#pragma once",
        "one.h",
        "two.h",
    ]);
    let config = build_config(&cli);

    assert_eq!(
        config.source_paths(),
        vec![
            Path::new("include").join("one.h"),
            Path::new("include").join("two.h"),
        ]
    );
    assert_eq!(config.output_path(), Path::new("include").join("single.h"));
    assert_eq!(config.guard(), "MY_SINGLE_H");
    assert!(config.filter().is_dropped(b"#pragma once\n"));
    assert!(config.filter().is_dropped(b"#endif\n"));
}

#[test]
fn json_and_ndjson_conflict() {
    let parse = Cli::try_parse_from(["yurimerge", "--json", "--ndjson"]);
    assert!(parse.is_err());
}

#[test]
fn stdout_and_check_conflict() {
    let parse = Cli::try_parse_from(["yurimerge", "--stdout", "--check"]);
    assert!(parse.is_err());

    let parse = Cli::try_parse_from(["yurimerge", "--check", "--json"]);
    assert!(parse.is_err());
}

#[test]
fn check_reports_missing_then_passes_after_merge() {
    let tmp = tempdir().expect("tempdir");
    fs::write(tmp.path().join("a.h"), "#ifndef LIBA_H_\nint a;\n#endif\n").expect("write a");
    let dir = tmp.path().to_str().expect("utf8 path");

    let check_cli = parse(&["--check", "-C", dir, "-o", "out.h", "a.h"]);
    let err = execute(&check_cli).expect_err("output missing");
    assert!(err.to_string().contains("does not exist"));

    let merge_cli = parse(&["-C", dir, "-o", "out.h", "a.h"]);
    execute(&merge_cli).expect("merge");
    execute(&check_cli).expect("up to date");

    fs::write(tmp.path().join("a.h"), "int b;\n").expect("rewrite a");
    let err = execute(&check_cli).expect_err("stale");
    assert!(err.to_string().contains("out of date"));
}

#[test]
fn missing_source_error_names_the_file() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path().to_str().expect("utf8 path");

    let cli = parse(&["-C", dir, "-o", "out.h", "nowhere.h"]);
    let err = execute(&cli).expect_err("missing source");

    assert!(format!("{err:#}").contains("nowhere.h"));
    assert!(!tmp.path().join("out.h").exists());
}
