use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn zipingest(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_zipingest"))
        .args(args)
        .env_remove("ZIPINGEST_LOG")
        .output()
        .unwrap()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn cli_directory_digest_has_all_sections() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("src/main.rs"), "fn main() {}\n");
    write_file(&dir.path().join("README.md"), "# Demo\n");
    write_file(&dir.path().join("node_modules/pkg/index.js"), "module.exports = 1;\n");

    let output = zipingest(&[dir.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Type: directory"));
    assert!(stdout.contains("Files analyzed: 2"));
    assert!(stdout.contains("Directory structure:"));
    assert!(stdout.contains("├── src/"));
    assert!(stdout.contains("FILE: src/main.rs"));
    assert!(stdout.contains("FILE: README.md"));
    assert!(!stdout.contains("node_modules"));
}

#[test]
fn cli_include_and_exclude_patterns() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.md"), "# a\n");
    write_file(&dir.path().join("b.txt"), "b\n");
    write_file(&dir.path().join("docs/c.md"), "# c\n");
    write_file(&dir.path().join("drafts/d.md"), "# d\n");

    let output = zipingest(&[
        dir.path().to_str().unwrap(),
        "--include",
        "*.md,*.rs",
        "-e",
        "drafts/**",
    ]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("FILE: a.md"));
    assert!(stdout.contains("FILE: docs/c.md"));
    assert!(!stdout.contains("FILE: b.txt"));
    assert!(!stdout.contains("d.md"));
}

#[test]
fn cli_patterns_take_several_values() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.md"), "# a\n");
    write_file(&dir.path().join("b.rs"), "fn b() {}\n");
    write_file(&dir.path().join("c.txt"), "c\n");
    write_file(&dir.path().join("d.md"), "# d\n");

    let output = zipingest(&[
        dir.path().to_str().unwrap(),
        "-i",
        "*.md",
        "*.rs",
        "-e",
        "d.md",
        "c.txt",
    ]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("FILE: a.md"));
    assert!(stdout.contains("FILE: b.rs"));
    assert!(!stdout.contains("FILE: c.txt"));
    assert!(!stdout.contains("FILE: d.md"));
}

#[test]
fn cli_no_stats_no_tree() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("only.txt"), "hello\n");

    let output = zipingest(&[dir.path().to_str().unwrap(), "--no-stats", "--no-tree"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("================================================\nFILE: only.txt\n"));
    assert!(!stdout.contains("Source:"));
    assert!(!stdout.contains("Directory structure:"));
}

#[test]
fn cli_max_size_marks_large_files_binary() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("big.txt"), &"x".repeat(4096));

    let output = zipingest(&[dir.path().to_str().unwrap(), "-s", "1024"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("[Binary file - 4.0 KB]"));
    assert!(!stdout.contains("xxxx"));
}

#[test]
fn cli_writes_output_file() {
    let dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    write_file(&dir.path().join("main.py"), "print('hi')\n");
    let out_path = out_dir.path().join("digest.txt");

    let output = zipingest(&[
        dir.path().to_str().unwrap(),
        "-o",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(stdout_of(&output).is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Output saved to:"));

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("FILE: main.py"));
    assert!(written.contains("print('hi')"));
}

#[test]
fn cli_zip_source() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("bundle.zip");

    let mut zip = ZipWriter::new(fs::File::create(&archive).unwrap());
    zip.add_directory("bundle", SimpleFileOptions::default()).unwrap();
    zip.start_file("bundle/lib.rs", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"pub fn lib() {}\n").unwrap();
    zip.finish().unwrap();

    let output = zipingest(&[archive.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Source: bundle"));
    assert!(stdout.contains("Type: zip"));
    assert!(stdout.contains("FILE: lib.rs"));
    assert!(stdout.contains("pub fn lib() {}"));
}

#[test]
fn cli_notebook_is_transcoded() {
    let dir = tempdir().unwrap();
    write_file(
        &dir.path().join("nb.ipynb"),
        r##"{"cells": [
            {"cell_type": "markdown", "source": "# Title"},
            {"cell_type": "code", "source": ["print(1)"], "outputs": []}
        ]}"##,
    );

    let output = zipingest(&[dir.path().to_str().unwrap(), "--no-stats", "--no-tree"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("# Title"));
    assert!(stdout.contains("```python\nprint(1)\n```"));
    assert!(!stdout.contains("**Output:**"));
    assert!(!stdout.contains("cell_type"));
}

#[test]
fn cli_unknown_source_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let output = zipingest(&[missing.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: unknown source type"));
}

#[test]
fn cli_invalid_pattern_fails() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.txt"), "a\n");

    let output = zipingest(&[dir.path().to_str().unwrap(), "-e", "[oops"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("[oops"));
}

#[test]
fn cli_completions() {
    let output = zipingest(&["--completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("zipingest"));
}
