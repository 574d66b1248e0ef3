//! Common test utilities

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory to hold NC files
pub fn create_test_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().to_path_buf();
    (temp_dir, root)
}

/// Write an NC file with the given raw content
pub fn create_nc_file(root: &PathBuf, name: &str, content: &str) -> PathBuf {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create NC file parent dir");
    }
    fs::write(&path, content).expect("Failed to write NC file");
    path
}

/// Write an NC file from lines, each terminated by `ending`
pub fn create_nc_file_from_lines(root: &PathBuf, name: &str, lines: &[&str], ending: &str) -> PathBuf {
    let content: String = lines.iter().map(|l| format!("{}{}", l, ending)).collect();
    create_nc_file(root, name, &content)
}

/// Split raw content into (line, terminator) pairs
pub fn terminators(content: &str) -> Vec<&str> {
    content
        .split_inclusive('\n')
        .map(|l| {
            if l.ends_with("\r\n") {
                "\r\n"
            } else if l.ends_with('\n') {
                "\n"
            } else {
                ""
            }
        })
        .collect()
}
