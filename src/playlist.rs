use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;

/// Reads the links from a playlist file, one per line.
pub fn read_entries(path: &Path) -> Result<Vec<String>, Error> {
    let file = File::open(path).map_err(|e| Error::io("failed to open playlist", path, e))?;
    parse_entries(BufReader::new(file)).map_err(|e| Error::io("failed to read playlist", path, e))
}

/// Trims every line and drops blank lines and `#` comments.
pub fn parse_entries(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let link = line.trim();
        if link.is_empty() || link.starts_with('#') {
            continue;
        }
        entries.push(link.to_string());
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn skips_blank_lines_and_comments() {
        let input = "https://a.example/1\n\n# later\n  https://a.example/2  \r\n\t\n";
        let entries = parse_entries(Cursor::new(input)).unwrap();
        assert_eq!(entries, vec!["https://a.example/1", "https://a.example/2"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let entries = parse_entries(Cursor::new("b\na\nb")).unwrap();
        assert_eq!(entries, vec!["b", "a", "b"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_entries(Path::new("/no/such/playlist.txt")).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("failed to open playlist /no/such/playlist.txt"));
    }
}
