//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with an Mkfile
pub fn create_test_mkfile(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let mkfile_path = temp_dir.path().join("Mkfile");
    fs::write(&mkfile_path, content).unwrap();
    (temp_dir, mkfile_path)
}

/// Create an Mkfile with a subdirectory next to it
pub fn create_test_mkfile_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let (temp_dir, mkfile_path) = create_test_mkfile(content);
    let sub_dir = temp_dir.path().join("subdir");
    fs::create_dir(&sub_dir).unwrap();
    (temp_dir, mkfile_path, sub_dir)
}

/// Lines appended to `log` in the given directory
pub fn read_log(dir: &TempDir) -> Vec<String> {
    fs::read_to_string(dir.path().join("log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
