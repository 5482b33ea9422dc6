use std::fs;

use proptest::prelude::*;

use yurimerge_core::config::MergeConfig;
use yurimerge_core::merge::render;

/// Directives that must never reach the merged body.
const STRIPPED: [&str; 4] = ["#ifndef LIB", "#define LIB", "#include \"reflect.h\"", "#endif"];

fn stripped(line: &str) -> bool {
    STRIPPED.iter().any(|p| line.starts_with(p))
}

/// Mix of body lines and the directives the merge is supposed to strip.
fn header_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ;{}()]{0,16}",
        "#include <[a-z_]{1,8}>",
        "#define [A-Z_]{1,8} 1",
        "#ifndef LIB[A-Z_]{0,10}",
        "#define LIB[A-Z_]{0,10}",
        Just("#include \"reflect.h\"".to_string()),
        "#endif[ /A-Z_]{0,10}",
        "  #endif",
    ]
}

proptest! {
    #[test]
    fn body_is_filtered_concatenation(
        files in prop::collection::vec(prop::collection::vec(header_line(), 0..12), 1..4)
    ) {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut names = Vec::new();
        let mut expected = Vec::new();

        for (idx, lines) in files.iter().enumerate() {
            let name = format!("h{idx}.h");
            let mut text = String::new();
            for line in lines {
                text.push_str(line);
                text.push('\n');
                if !stripped(line) {
                    expected.push(line.clone());
                }
            }
            fs::write(temp.path().join(&name), text).expect("write header");
            names.push(name);
        }

        let cfg = MergeConfig::new().with_base_dir(temp.path()).with_sources(names);
        let mut buf = Vec::new();
        render(&cfg, &mut buf).expect("render");
        let merged = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = merged.lines().collect();

        prop_assert_eq!(lines[0], "#ifndef LIBYURI_YURI_H_");
        prop_assert_eq!(lines[1], "#define LIBYURI_YURI_H_");
        prop_assert_eq!(*lines.last().unwrap(), "#endif");

        let body = &lines[2..lines.len() - 1];
        prop_assert_eq!(body.to_vec(), expected.iter().map(String::as_str).collect::<Vec<_>>());
        for line in body {
            prop_assert!(!stripped(line));
        }
    }
}
