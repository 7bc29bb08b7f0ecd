//! Integration tests for the aslink CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_aslink"))
}

fn create_temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

const PROGRAM: &str = "\
start:
  LDA #$01
  STA $0200
  JMP start
";

#[test]
fn build_with_explicit_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.asm", PROGRAM);
    let output = temp_dir.path().join("out.bin");

    let status = Command::new(binary_path())
        .args([source.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .status()
        .expect("failed to run aslink");

    assert!(status.success());
    assert_eq!(
        fs::read(&output).unwrap(),
        vec![0xA9, 0x01, 0x8D, 0x00, 0x02, 0x4C, 0x00, 0x06]
    );
}

#[test]
fn build_with_default_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.asm", PROGRAM);

    let status = Command::new(binary_path())
        .arg(source.to_str().unwrap())
        .status()
        .expect("failed to run aslink");

    assert!(status.success());
    assert!(temp_dir.path().join("prog.bin").exists());
}

#[test]
fn origin_relocates_labels() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.asm", PROGRAM);
    let output = temp_dir.path().join("prog.bin");

    let status = Command::new(binary_path())
        .args([source.to_str().unwrap(), "--origin", "$C000"])
        .status()
        .expect("failed to run aslink");

    assert!(status.success());
    let binary = fs::read(&output).unwrap();
    assert_eq!(&binary[5..8], &[0x4C, 0x00, 0xC0]);
}

#[test]
fn bad_origin_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.asm", PROGRAM);

    let output = Command::new(binary_path())
        .args([source.to_str().unwrap(), "--origin", "$10000"])
        .output()
        .expect("failed to run aslink");

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("prog.bin").exists());
}

#[test]
fn trace_goes_to_stdout() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.asm", PROGRAM);

    let output = Command::new(binary_path())
        .args([source.to_str().unwrap(), "--trace"])
        .output()
        .expect("failed to run aslink");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("start:"));
    assert!(stdout.contains("$0605: $4C  JMP $0600 (absolute)"));
}

#[test]
fn listing_is_written() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "prog.asm", PROGRAM);
    let listing = temp_dir.path().join("prog.lst");

    let status = Command::new(binary_path())
        .args([
            source.to_str().unwrap(),
            "--listing",
            listing.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run aslink");

    assert!(status.success());
    let text = fs::read_to_string(&listing).unwrap();
    assert!(text.starts_with("Assembly Listing:"));
    assert!(text.contains("LDA $01 (immediate)"));
}

#[test]
fn assembly_error_fails_without_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "bad.asm", "LDA #$01\nJMP nowhere\n");

    let output = Command::new(binary_path())
        .arg(source.to_str().unwrap())
        .output()
        .expect("failed to run aslink");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("undefined label `nowhere`"));
    assert!(!temp_dir.path().join("bad.bin").exists());
}

#[test]
fn missing_source_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    let status = Command::new(binary_path())
        .arg(temp_dir.path().join("absent.asm").to_str().unwrap())
        .status()
        .expect("failed to run aslink");

    assert!(!status.success());
}
