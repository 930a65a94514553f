//! Reading and writing blocks of node records.
//!
//! A mesh reader owns the file and its header; these helpers drive
//! [`MeshNode::parse_record`] and [`MeshNode::format_record`] over the node
//! section, one record per line:
//!
//! ```text
//!           1   -75.5000000000    35.2500000000    2.0000000000
//!           2   -75.4000000000    35.2500000000    3.5000000000
//!           3   -75.4500000000    35.3000000000    1.2500000000
//! ```
//!
//! They are not part of the node record contract, which lives entirely in
//! [`MeshNode`].
//!
//! Blank lines are skipped. Errors carry the 1-based line number within the
//! parsed block.
//!
//! # Example
//!
//! ```
//! use adc_node::io::{parse_node_records, write_node_records};
//!
//! let nodes = parse_node_records("1 0.0 0.0 -1.0\n2 10.0 0.0 -2.0\n").unwrap();
//! assert_eq!(nodes.len(), 2);
//!
//! let mut out = Vec::new();
//! write_node_records(&mut out, &nodes, false).unwrap();
//! assert_eq!(parse_node_records(std::str::from_utf8(&out).unwrap()).unwrap(), nodes);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::NodeError;
use crate::node::{MeshNode, RecordFormat};

/// Parse every non-blank line of `content` as a node record.
pub fn parse_node_records(content: &str) -> Result<Vec<MeshNode>, NodeError> {
    let nodes = collect_records(content.lines().map(Ok::<_, std::io::Error>), None)?;
    log::debug!("Parsed {} node records", nodes.len());
    Ok(nodes)
}

/// Parse node records in parallel.
///
/// Lines are split across rayon workers, each building its own nodes. The
/// result keeps input order. If several lines are malformed, which one is
/// reported is unspecified.
#[cfg(feature = "parallel")]
pub fn parse_node_records_parallel(content: &str) -> Result<Vec<MeshNode>, NodeError> {
    use rayon::prelude::*;

    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let nodes = lines
        .into_par_iter()
        .map(|(line_num, line)| {
            MeshNode::from_record(line).map_err(|e| e.at_line(line_num + 1))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Parsed {} node records in parallel", nodes.len());
    Ok(nodes)
}

/// Read exactly `count` node records from `reader`.
///
/// Stops after the last record, leaving anything that follows (element
/// connectivity, boundary sections) unread.
///
/// # Errors
/// * [`NodeError::AtLine`] wrapping the record error for a malformed line
/// * [`NodeError::UnexpectedEof`] if input ends before `count` records
pub fn read_node_records<R: BufRead>(reader: R, count: usize) -> Result<Vec<MeshNode>, NodeError> {
    collect_records(reader.lines(), Some(count))
}

/// Parse record lines, skipping blanks, until input ends or `limit` nodes
/// have been read. With a limit, running out of input is an error.
fn collect_records<I, L>(lines: I, limit: Option<usize>) -> Result<Vec<MeshNode>, NodeError>
where
    I: Iterator<Item = std::io::Result<L>>,
    L: AsRef<str>,
{
    let mut nodes = Vec::with_capacity(limit.unwrap_or(0));
    if limit == Some(0) {
        return Ok(nodes);
    }

    for (line_num, line_result) in lines.enumerate() {
        let owned = line_result?;
        let line = owned.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        let node = MeshNode::from_record(line).map_err(|e| e.at_line(line_num + 1))?;
        log::trace!("Read node {} at line {}", node.id, line_num + 1);
        nodes.push(node);

        if Some(nodes.len()) == limit {
            return Ok(nodes);
        }
    }

    match limit {
        Some(expected) => Err(NodeError::UnexpectedEof {
            expected,
            found: nodes.len(),
        }),
        None => Ok(nodes),
    }
}

/// Write nodes as record lines in the standard ADCIRC layout.
pub fn write_node_records<W: Write>(
    writer: &mut W,
    nodes: &[MeshNode],
    use_geographic: bool,
) -> Result<(), NodeError> {
    write_node_records_with(writer, nodes, &RecordFormat::default(), use_geographic)
}

/// Write nodes as record lines with a custom layout.
pub fn write_node_records_with<W: Write>(
    writer: &mut W,
    nodes: &[MeshNode],
    format: &RecordFormat,
    use_geographic: bool,
) -> Result<(), NodeError> {
    for node in nodes {
        writeln!(writer, "{}", node.format_record_with(format, use_geographic))?;
    }
    Ok(())
}

/// Read a file that contains only node records.
pub fn read_node_file(path: &Path) -> Result<Vec<MeshNode>, NodeError> {
    let file = File::open(path)?;
    let nodes = collect_records(BufReader::new(file).lines(), None)?;
    log::debug!("Read {} nodes from {}", nodes.len(), path.display());
    Ok(nodes)
}

/// Write nodes to a file, one record per line.
pub fn write_node_file(path: &Path, nodes: &[MeshNode], use_geographic: bool) -> Result<(), NodeError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_node_records(&mut writer, nodes, use_geographic)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    use crate::error::{RecordFault, RecordField};
    use crate::types::NodeId;

    #[test]
    fn test_parse_skips_blank_lines() {
        let nodes = parse_node_records("\n1 0.0 0.0 1.0\n   \n2 1.0 0.0 2.0\n").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].id, NodeId::new(2));
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse_node_records("1 0.0 0.0 1.0\n2 1.0 bad 2.0\n").unwrap_err();
        assert!(matches!(err, NodeError::AtLine { line: 2, .. }));
        assert_eq!(
            err.fault(),
            Some(&RecordFault::InvalidField {
                field: RecordField::Y,
                token: "bad".into()
            })
        );
    }

    #[test]
    fn test_read_exact_count_leaves_rest() {
        let input = "1 0.0 0.0 1.0\n2 1.0 0.0 2.0\n3 1.0 1.0 3.0\nELEMENTS\n";
        let mut reader = Cursor::new(input);
        let nodes = read_node_records(&mut reader, 2).unwrap();
        assert_eq!(nodes.len(), 2);

        let mut rest = String::new();
        std::io::Read::read_to_string(&mut reader, &mut rest).unwrap();
        assert!(rest.starts_with("3 1.0 1.0 3.0"));
    }

    #[test]
    fn test_read_zero_records() {
        let nodes = read_node_records(Cursor::new("garbage"), 0).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_read_short_block() {
        let err = read_node_records(Cursor::new("1 0.0 0.0 1.0\n"), 3).unwrap_err();
        assert!(matches!(
            err,
            NodeError::UnexpectedEof {
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn test_write_then_parse() {
        let nodes = vec![
            MeshNode::new(1, -75.123456789, 35.5, -2.0),
            MeshNode::new(2, -75.2, 35.987654321, -3.25),
        ];
        let mut out = Vec::new();
        write_node_records(&mut out, &nodes, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);

        let back = parse_node_records(&text).unwrap();
        for (a, b) in nodes.iter().zip(&back) {
            assert_eq!(a.id, b.id);
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
            assert!((a.z - b.z).abs() < 1e-9);
        }
    }

    #[test]
    fn test_write_with_compact_format() {
        let nodes = vec![MeshNode::new(7, 1.0, 2.0, 3.0)];
        let mut out = Vec::new();
        let format = RecordFormat::compact().with_projected_precision(2);
        write_node_records_with(&mut out, &nodes, &format, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7 1.00 2.00 3.00\n");
    }

    #[test]
    fn test_file_roundtrip() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"1 100.0 200.0 -5.0
2 150.5 200.0 -6.5

3 150.5 250.25 -7.0"#
        )
        .unwrap();

        let nodes = read_node_file(file.path()).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2].to_point(), (150.5, 250.25));

        let out = NamedTempFile::new().unwrap();
        write_node_file(out.path(), &nodes, false).unwrap();
        let back = read_node_file(out.path()).unwrap();
        assert_eq!(back, nodes);
    }

    #[test]
    fn test_file_and_string_readers_agree() {
        let content = "\n1 0.0 0.0 1.0\n  \n2 1.0 0.0 2.0\n3 1.0 x 3.0\n";
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();

        let from_file = read_node_file(file.path()).unwrap_err();
        let from_str = parse_node_records(content).unwrap_err();
        assert!(matches!(from_file, NodeError::AtLine { line: 5, .. }));
        assert!(matches!(from_str, NodeError::AtLine { line: 5, .. }));
        assert_eq!(from_file.fault(), from_str.fault());

        let valid = "\n1 0.0 0.0 1.0\n  \n2 1.0 0.0 2.0\n";
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", valid).unwrap();
        assert_eq!(
            read_node_file(file.path()).unwrap(),
            parse_node_records(valid).unwrap()
        );
    }

    #[test]
    fn test_missing_file() {
        let result = read_node_file(Path::new("/nonexistent/nodes.txt"));
        assert!(matches!(result, Err(NodeError::IoError(_))));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let content: String = (1..=500)
            .map(|i| format!("{} {}.5 {}.25 -{}.0\n", i, i, i * 2, i % 17))
            .collect();
        let serial = parse_node_records(&content).unwrap();
        let parallel = parse_node_records_parallel(&content).unwrap();
        assert_eq!(serial, parallel);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_reports_error() {
        let err = parse_node_records_parallel("1 0 0 0\n2 0 0\n").unwrap_err();
        assert!(matches!(err, NodeError::AtLine { line: 2, .. }));
    }
}
