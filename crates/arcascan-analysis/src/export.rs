//! Export — write a rendered report to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// File name for a client's report: `arca-scan-<slug>.html`.
///
/// The slug is the client name with each whitespace run replaced by `-`,
/// lower-cased. Any other character that is not alphanumeric, `-`, `_` or `.`
/// (path separators included) becomes `_`, so the name is always a single
/// path component.
pub fn export_file_name(client_name: &str) -> String {
    let mut slug = String::with_capacity(client_name.len());
    let mut in_space = false;
    for ch in client_name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else if ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.') {
            slug.extend(ch.to_lowercase());
            in_space = false;
        } else {
            slug.push('_');
            in_space = false;
        }
    }
    format!("arca-scan-{slug}.html")
}

/// Write `html` into `dir` (created if missing) and return the file path.
pub fn write_report(html: &str, client_name: &str, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(client_name));
    fs::write(&path, html)?;
    info!(path = %path.display(), bytes = html.len(), "report exported");
    Ok(path)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_simple() {
        assert_eq!(export_file_name("Loja X"), "arca-scan-loja-x.html");
    }

    #[test]
    fn test_file_name_collapses_whitespace_runs() {
        assert_eq!(
            export_file_name("Padaria  do\tJoão\n Centro"),
            "arca-scan-padaria-do-joão-centro.html"
        );
    }

    #[test]
    fn test_file_name_keeps_edges() {
        assert_eq!(export_file_name(" A-B "), "arca-scan--a-b-.html");
    }

    #[test]
    fn test_file_name_replaces_unsafe_characters() {
        assert_eq!(export_file_name("Loja A/B"), "arca-scan-loja-a_b.html");
        assert_eq!(export_file_name(r"C:\Loja"), "arca-scan-c__loja.html");
        assert_eq!(export_file_name("A&B: \"X\"?"), "arca-scan-a_b_-_x__.html");
        assert_eq!(export_file_name("v1.2_final"), "arca-scan-v1.2_final.html");
    }

    #[test]
    fn test_write_report_with_separator_in_name() {
        let tmp = tempfile::tempdir().unwrap();

        let path = write_report("<html></html>", "Loja A/B", tmp.path()).unwrap();

        assert_eq!(path, tmp.path().join("arca-scan-loja-a_b.html"));
        assert_eq!(path.parent(), Some(tmp.path()));
        assert!(path.exists());
    }

    #[test]
    fn test_write_report_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports").join("2026");

        let path = write_report("<html></html>", "Loja X", &dir).unwrap();

        assert_eq!(path, dir.join("arca-scan-loja-x.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_report_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        write_report("first", "Loja X", tmp.path()).unwrap();
        let path = write_report("second", "Loja X", tmp.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }
}
