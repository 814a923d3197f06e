//! Quote-aware CSV tokenizer.
//!
//! Quote state alone decides whether a line feed ends a row or belongs to the
//! field. Input is never rejected: an unterminated quote closes at end of input.

use std::mem::take;

/// One tokenized line: trimmed raw fields in column order.
pub type RawRow = Vec<String>;

/// Split `text` into rows of trimmed fields, dropping rows that are entirely empty.
pub fn tokenize(text: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut row: RawRow = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            // A quote mid-field still opens a quoted section.
            '"' => in_quotes = true,
            ',' if !in_quotes => close_field(&mut row, &mut field),
            '\n' if !in_quotes => {
                close_field(&mut row, &mut field);
                close_row(&mut rows, &mut row);
            }
            '\r' if !in_quotes => {}
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        close_field(&mut row, &mut field);
        close_row(&mut rows, &mut row);
    }

    rows
}

fn close_field(row: &mut RawRow, field: &mut String) {
    row.push(field.trim().to_string());
    field.clear();
}

fn close_row(rows: &mut Vec<RawRow>, row: &mut RawRow) {
    let row = take(row);
    if row.iter().any(|f| !f.is_empty()) {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple_rows() {
        let rows = tokenize("a,b,c\n1,2,3\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_tokenize_trims_fields() {
        let rows = tokenize("  a , b  ,c\t\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_tokenize_escaped_quotes_and_newline() {
        let rows = tokenize("\"He said \"\"hi\"\"\nand left\"");
        assert_eq!(rows, vec![vec!["He said \"hi\"\nand left"]]);
    }

    #[test]
    fn test_tokenize_quoted_comma() {
        let rows = tokenize("\"a,b\",c");
        assert_eq!(rows, vec![vec!["a,b", "c"]]);
    }

    #[test]
    fn test_tokenize_crlf_line_endings() {
        let rows = tokenize("a,b\r\nc,d\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_tokenize_keeps_crlf_inside_quotes() {
        let rows = tokenize("\"x\r\ny\",z\r\n");
        assert_eq!(rows, vec![vec!["x\r\ny", "z"]]);
    }

    #[test]
    fn test_tokenize_drops_empty_rows() {
        let rows = tokenize("a,b\n\n,,\n  ,\t\nc,d");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\n\r\n").is_empty());
    }

    #[test]
    fn test_tokenize_unterminated_quote_closes_at_eof() {
        let rows = tokenize("a,\"open field\nstill open");
        assert_eq!(rows, vec![vec!["a", "open field\nstill open"]]);
    }

    #[test]
    fn test_tokenize_quote_mid_field_opens_quoted_section() {
        let rows = tokenize("ab\"c,d\"e,f\ng");
        assert_eq!(rows, vec![vec!["abc,de", "f"], vec!["g"]]);
    }

    #[test]
    fn test_tokenize_trailing_comma_keeps_empty_field() {
        let rows = tokenize("a,b,\n");
        assert_eq!(rows, vec![vec!["a", "b", ""]]);
    }

    #[test]
    fn test_tokenize_ragged_rows() {
        let rows = tokenize("a,b,c\nd\ne,f");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["d"]);
        assert_eq!(rows[2], vec!["e", "f"]);
    }

    #[test]
    fn test_tokenize_unicode_content() {
        let rows = tokenize("อัพเดจราคา,\"ราคา\n+ส่ง 20\"");
        assert_eq!(rows, vec![vec!["อัพเดจราคา", "ราคา\n+ส่ง 20"]]);
    }
}
