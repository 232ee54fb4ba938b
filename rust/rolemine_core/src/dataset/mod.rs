//! Matrix sources: one-to-one pair files and synthetic generation.
//!
//! A pair file lists one `<user> <permission>` assignment per line, both
//! 1-based. The matrix is sized by the largest user and permission seen.

pub mod generate;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::DatasetError;
use crate::types::UpaMatrix;

/// Load a UPA from a pair file. A file with no pairs yields a 0x0 matrix.
pub fn load_one2one(path: impl AsRef<Path>) -> Result<UpaMatrix, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let upa = parse_one2one(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        users = upa.users(),
        permissions = upa.permissions(),
        "loaded pair file"
    );
    Ok(upa)
}

/// Parse pair lines from any reader. Blank lines are skipped.
pub fn parse_one2one<R: BufRead>(reader: R) -> Result<UpaMatrix, DatasetError> {
    let mut pairs = Vec::new();
    let (mut users, mut permissions) = (0usize, 0usize);

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = trimmed.split_whitespace().map(str::parse::<usize>);
        let (user, permission) = match (fields.next(), fields.next(), fields.next()) {
            (Some(Ok(u)), Some(Ok(p)), None) => (u, p),
            _ => {
                return Err(DatasetError::Parse {
                    line: number,
                    content: line.clone(),
                })
            }
        };
        if user == 0 || permission == 0 {
            return Err(DatasetError::ZeroIndex { line: number });
        }

        users = users.max(user);
        permissions = permissions.max(permission);
        pairs.push((user - 1, permission - 1));
    }

    let mut upa = UpaMatrix::zeros(users, permissions);
    for (user, permission) in pairs {
        upa.grant(user, permission);
    }
    Ok(upa)
}

/// Render a UPA back into pair lines, users then permissions ascending.
pub fn to_one2one(upa: &UpaMatrix) -> String {
    let mut out = String::new();
    for (user, row) in upa.rows().iter().enumerate() {
        for permission in row.iter_ones() {
            out.push_str(&format!("{} {}\n", user + 1, permission + 1));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_whitespace_separated_pairs() {
        let input = "1 1\n1\t2\n  2   2  \n\n3 4\n";
        let upa = parse_one2one(input.as_bytes()).unwrap();
        assert_eq!(upa.users(), 3);
        assert_eq!(upa.permissions(), 4);
        assert_eq!(upa.row(0).unwrap().to_cells(), vec![1, 1, 0, 0]);
        assert_eq!(upa.row(1).unwrap().to_cells(), vec![0, 1, 0, 0]);
        assert_eq!(upa.row(2).unwrap().to_cells(), vec![0, 0, 0, 1]);
    }

    #[test]
    fn duplicate_pairs_are_idempotent() {
        let upa = parse_one2one("1 1\n1 1\n".as_bytes()).unwrap();
        assert_eq!(upa.count_ones(), 1);
    }

    #[test]
    fn users_without_pairs_are_zero_rows() {
        let upa = parse_one2one("3 1\n".as_bytes()).unwrap();
        assert_eq!(upa.users(), 3);
        assert!(upa.row(0).unwrap().is_zero());
    }

    #[test]
    fn empty_input_is_zero_by_zero() {
        let upa = parse_one2one("".as_bytes()).unwrap();
        assert_eq!((upa.users(), upa.permissions()), (0, 0));
    }

    #[test]
    fn malformed_lines_report_line_number() {
        let err = parse_one2one("1 1\n2 x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { line: 2, .. }));

        let err = parse_one2one("1 2 3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { line: 1, .. }));

        let err = parse_one2one("1 1\n\n0 1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::ZeroIndex { line: 3 }));
    }

    #[test]
    fn load_from_file_and_render_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "2 1\n1 2\n1 3\n").unwrap();
        let upa = load_one2one(file.path()).unwrap();
        assert_eq!(to_one2one(&upa), "1 2\n1 3\n2 1\n");
    }

    #[test]
    fn missing_file_is_io_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_exist.txt");
        match load_one2one(&path) {
            Err(DatasetError::Io { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
