//! CSV parsing for the backing dataset
//!
//! Comma-delimited, quote-aware, header row required. All cells are kept as
//! raw text here; typing happens in the record normalization pass.

use super::errors::{DataResult, DataSourceError};
use super::record::ProductRecord;

/// Parse full CSV content into normalized records.
///
/// The first line is the header; blank lines are skipped. Rows shorter than
/// the header are padded with nulls, longer rows have their extra cells
/// ignored.
pub fn parse_content(content: &str, path: &str) -> DataResult<Vec<ProductRecord>> {
    let mut lines = content.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| DataSourceError::malformed(path, "empty file"))?;
    let headers: Vec<String> = split_line(header_line)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataSourceError::malformed(path, "header row has no columns"));
    }

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_line(line);
        records.push(ProductRecord::from_row(&headers, &cells));
    }

    Ok(records)
}

/// Split a single CSV line on commas, honoring double-quoted fields.
///
/// A doubled quote inside a quoted field is an escaped quote.
fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    cells.push(current);

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_plain() {
        assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_line_empty_cells() {
        assert_eq!(split_line("a,,c,"), vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_split_line_quoted_comma() {
        assert_eq!(
            split_line(r#"a,"x, y",c"#),
            vec!["a", "x, y", "c"]
        );
    }

    #[test]
    fn test_split_line_escaped_quote() {
        assert_eq!(split_line(r#""say ""hi""",b"#), vec![r#"say "hi""#, "b"]);
    }

    #[test]
    fn test_parse_content() {
        let content = "\
id_tie_fecha_valor,desc_ga_marca_producto,fc_agregado_carrito_cant
20240129,STANLEY,1
20240130,DEWALT,nan
";
        let records = parse_content(content, "test.csv").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].desc_ga_marca_producto.as_deref(), Some("STANLEY"));
        assert_eq!(records[0].fc_agregado_carrito_cant, Some(1));
        assert_eq!(records[1].fc_agregado_carrito_cant, None);
    }

    #[test]
    fn test_parse_content_skips_blank_lines() {
        let content = "desc_ga_marca_producto\nSTANLEY\n\n\nDEWALT\n";
        let records = parse_content(content, "test.csv").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_empty_file_is_malformed() {
        let result = parse_content("", "test.csv");
        assert!(matches!(result, Err(DataSourceError::Malformed { .. })));
    }

    #[test]
    fn test_parse_header_only_yields_no_records() {
        let records = parse_content("desc_ga_marca_producto\n", "test.csv").unwrap();
        assert!(records.is_empty());
    }
}
