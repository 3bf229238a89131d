//! Reading the file to lint.

use crate::error::Error;
use crate::parse::Line;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read numbered lines from any reader.
pub fn read_from<R: Read>(reader: R, path: &Path) -> Result<VecDeque<Line>, Error> {
    let lines = BufReader::new(reader)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| Error::Io {
            path: path.to_path_buf(),
            error,
        })?;
    Ok(Line::numbered(lines))
}

/// Read numbered lines from `path`; `-` reads standard input.
pub fn read_lines(path: &Path) -> Result<VecDeque<Line>, Error> {
    if path == Path::new("-") && !path.exists() {
        log::debug!("Reading from standard input");
        return read_from(std::io::stdin().lock(), path);
    }
    if !path.is_file() {
        return Err(Error::InvalidTarget(path.to_path_buf()));
    }
    log::debug!("Reading {}", path.display());
    let file = std::fs::File::open(path).map_err(|error| Error::Io {
        path: path.to_path_buf(),
        error,
    })?;
    read_from(file, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Source: foo\r\nMaintainer: A <a@b.com>\n\nPackage: foo\n").unwrap();
        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, "Source: foo");
        assert_eq!(lines[3].number, 4);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("control");
        assert!(matches!(read_lines(&path), Err(Error::InvalidTarget(p)) if p == path));
    }

    #[test]
    fn test_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read_lines(dir.path()), Err(Error::InvalidTarget(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes: &[u8] = b"Source: \xff\n";
        assert!(matches!(
            read_from(bytes, Path::new("x")),
            Err(Error::Io { .. })
        ));
    }
}
