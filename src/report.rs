// src/report.rs
// =============================================================================
// Writes the crawl result out for humans and for other tools.
//
// Two outputs:
// 1. A pretty-printed JSON file: { "<page>": ["<link>", ...], ... }
// 2. A plain listing on the terminal:
//
//      Links found on 'https://example.com/':
//          - https://example.com/about
// =============================================================================

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::crawl::LinkMap;

/// Serializes `pages` as pretty JSON into `path`, replacing any old file.
pub fn write_results_file(path: &Path, pages: &LinkMap) -> Result<()> {
    let mut json = serde_json::to_string_pretty(pages).context("failed to serialize results")?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Prints the "Links found on ..." listing to `out`.
pub fn print_results<W: Write>(out: &mut W, pages: &LinkMap) -> io::Result<()> {
    for (page, links) in pages {
        writeln!(out, "Links found on '{page}':")?;
        for link in links {
            writeln!(out, "\t- {link}")?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn sample() -> LinkMap {
        let mut pages = LinkMap::new();
        pages.insert(
            "https://a.test/".to_string(),
            BTreeSet::from(["https://a.test/c".to_string(), "https://a.test/b".to_string()]),
        );
        pages.insert("https://a.test/b".to_string(), BTreeSet::new());
        pages
    }

    #[test]
    fn test_print_results_format() {
        let mut out = Vec::new();
        print_results(&mut out, &sample()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Links found on 'https://a.test/':\n\
             \t- https://a.test/b\n\
             \t- https://a.test/c\n\
             Links found on 'https://a.test/b':\n"
        );
    }

    #[test]
    fn test_results_file_is_readable_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("endpoints.txt");

        write_results_file(&path, &sample()).unwrap();

        let written: LinkMap = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, sample());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("endpoints.txt");

        let err = write_results_file(&path, &sample()).unwrap_err();
        assert!(err.to_string().contains("failed to write"));
    }
}
