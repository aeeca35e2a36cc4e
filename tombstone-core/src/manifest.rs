// Harvested review URLs, one per line under a fixed title line

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

pub const MANIFEST_HEADER: &str = "Pitchfork URLS";

/// Truncate the manifest and write the header line.
pub fn init_manifest(path: &Path) -> std::io::Result<()> {
    fs::write(path, format!("{}\n", MANIFEST_HEADER))
}

pub fn append_urls(path: &Path, urls: &[String]) -> std::io::Result<()> {
    if urls.is_empty() {
        return Ok(());
    }

    let mut buf = String::new();
    for url in urls {
        buf.push_str(url);
        buf.push('\n');
    }

    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(buf.as_bytes())
}

pub fn read_manifest(path: &Path) -> std::io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_manifest(&content))
}

/// Every line after the header, blank lines included.
pub fn parse_manifest(content: &str) -> Vec<String> {
    content.lines().skip(1).map(str::to_string).collect()
}
