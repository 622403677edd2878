use std::fs;
use std::path::{Path, PathBuf};

use hdec_core::InputEncoding;
use hdec_core::decode::{RunError, decode_files};
use hdec_core::render::{TextOutput, render_fatal};

fn golden_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
}

fn find_input(dir: &Path) -> (PathBuf, InputEncoding) {
    for (name, encoding) in [
        ("input.hex", InputEncoding::Hex),
        ("input.bin", InputEncoding::Bin),
        ("input.raw", InputEncoding::Raw),
    ] {
        let path = dir.join(name);
        if path.exists() {
            return (path, encoding);
        }
    }
    panic!("no input file in {}", dir.display());
}

fn schema_files(dir: &Path) -> Vec<PathBuf> {
    let mut schemas: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read case dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "def"))
        .collect();
    schemas.sort();
    schemas
}

fn run_golden(case: &str) {
    let dir = golden_root().join(case);
    let (input, encoding) = find_input(&dir);
    let schemas = schema_files(&dir);
    let expected = fs::read_to_string(dir.join("expected.txt")).expect("read expected.txt");

    let mut out = TextOutput::new(Vec::new());
    let result = decode_files(&input, encoding, &schemas, &mut out);
    let mut actual = String::from_utf8(out.finish().expect("flush")).expect("utf8 output");
    match result {
        Ok(_) => {}
        Err(RunError::Decode(err)) => {
            actual.push_str(&format!("error: {}\n", render_fatal(&err)));
        }
        Err(err) => panic!("golden case {case} failed to load: {err}"),
    }

    assert_eq!(actual, expected, "golden mismatch in {case}");
}

#[test]
fn golden_condition_true() {
    run_golden("condition_true");
}

#[test]
fn golden_variable_length() {
    run_golden("variable_length");
}

#[test]
fn golden_false_condition() {
    run_golden("false_condition");
}

#[test]
fn golden_multi_source() {
    run_golden("multi_source");
}

#[test]
fn golden_short_input() {
    run_golden("short_input");
}

#[test]
fn golden_binary_text() {
    run_golden("binary_text");
}

#[test]
fn golden_raw_bytes() {
    run_golden("raw_bytes");
}
