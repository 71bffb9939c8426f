//! Delimited table parsing.
//!
//! The first non-blank line is the header. Columns are located by name, so
//! their order does not matter; a missing column leaves that field empty on
//! every row instead of failing the parse.

use crate::types::Row;

/// Column positions located from the header row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub name: Option<usize>,
    pub results: Option<usize>,
    pub cpr: Option<usize>,
    pub link: Option<usize>,
}

impl Columns {
    /// First match wins for every column.
    pub fn locate(header: &[&str]) -> Self {
        let cells: Vec<String> = header.iter().map(|c| c.trim().to_lowercase()).collect();
        let exact = |want: &str| cells.iter().position(|c| c == want);
        Self {
            name: exact("name"),
            results: exact("results"),
            cpr: exact("cpr"),
            link: cells.iter().position(|c| c.contains("video") && c.contains("link")),
        }
    }
}

/// Tab if the header has one, otherwise comma.
pub fn detect_delimiter(header: &str) -> char {
    if header.contains('\t') { '\t' } else { ',' }
}

pub fn parse(text: &str) -> Vec<Row> {
    let mut lines = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.is_empty());

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let delim = detect_delimiter(header);
    let cols = Columns::locate(&header.split(delim).collect::<Vec<_>>());
    tracing::debug!(delimiter = ?delim, columns = ?cols, "parsed table header");

    lines
        .map(|line| {
            let parts: Vec<&str> = line.split(delim).collect();
            let cell = |idx: Option<usize>| idx.and_then(|i| parts.get(i).copied());
            Row {
                name: cell(cols.name).map(|s| s.trim().to_string()),
                results: cell(cols.results).map(js_number),
                cpr: cell(cols.cpr).map(js_number),
                link: cell(cols.link).map(|s| s.trim().to_string()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Numeric conversion with JavaScript `Number()` semantics: blank is zero,
/// anything unparseable is NaN.
pub(crate) fn js_number(cell: &str) -> f64 {
    let s = cell.trim();
    if s.is_empty() {
        return 0.0;
    }

    for (prefixes, radix) in [(["0x", "0X"], 16), (["0o", "0O"], 8), (["0b", "0B"], 2)] {
        if let Some(digits) = prefixes.iter().find_map(|p| s.strip_prefix(*p)) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix).map(|v| v as f64).unwrap_or(f64::NAN);
        }
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust also accepts `inf`/`nan` spellings
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Name\tResults\tCPR\tVideo Link\nAmerican Psycho\t2\t0.2\thttps://www.instagram.com/p/DMBhlKcJHK4/#advertiser\n";

    #[test]
    fn parses_sample_row() {
        let rows = parse(SAMPLE);
        assert_eq!(rows, vec![Row {
            name: Some("American Psycho".into()),
            results: Some(2.0),
            cpr: Some(0.2),
            link: "https://www.instagram.com/p/DMBhlKcJHK4/#advertiser".into(),
        }]);
    }

    #[test]
    fn column_order_does_not_matter() {
        let a = parse("name,results,cpr,video link\nA,1,0.5,https://x/p/1/");
        let b = parse("VIDEO LINK (reel),CPR,Name,Results\nhttps://x/p/1/,0.5,A,1");
        assert_eq!(a, b);
        assert_eq!(a[0].link, "https://x/p/1/");
    }

    #[test]
    fn comma_used_without_tab_in_header() {
        let rows = parse("Name,Results,CPR,Video Link\nJake,30,0.12,https://x/p/2/");
        assert_eq!(rows[0].name.as_deref(), Some("Jake"));
        assert_eq!(rows[0].results, Some(30.0));
    }

    #[test]
    fn tab_wins_even_when_body_has_commas() {
        let rows = parse("Name\tResults\tCPR\tVideo Link\nSmith, Jane\t1,5\t0.1\thttps://x/p/3/");
        assert_eq!(detect_delimiter("Name\tResults"), '\t');
        assert_eq!(rows[0].name.as_deref(), Some("Smith, Jane"));
        assert!(rows[0].results.unwrap().is_nan());
        assert_eq!(rows[0].link, "https://x/p/3/");
    }

    #[test]
    fn missing_columns_degrade_silently() {
        let rows = parse("Title,Link\nfoo,https://x/p/4/");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], Row::default());
    }

    #[test]
    fn empty_lines_and_crlf_are_dropped() {
        let rows = parse("Name,Video Link\r\n\r\nA,https://x/p/5/\r\nB,https://x/p/6/\r\n\n");
        let names: Vec<_> = rows.iter().map(|r| r.name.as_deref().unwrap()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(rows[1].link, "https://x/p/6/");
    }

    #[test]
    fn whitespace_only_line_is_kept_as_a_row() {
        let rows = parse("Name,Video Link\nA,l\n   \nB,m");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].name.as_deref(), Some(""));
        assert_eq!(rows[1].link, "");
        assert_eq!(rows[2].link, "m");
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
        assert!(parse("Name\tResults\tCPR\tVideo Link\n").is_empty());
    }

    #[test]
    fn short_lines_leave_fields_absent() {
        let rows = parse("Name,Results,CPR,Video Link\nOnly name");
        assert_eq!(rows[0].name.as_deref(), Some("Only name"));
        assert_eq!(rows[0].results, None);
        assert_eq!(rows[0].link, "");
    }

    #[test]
    fn numbers_follow_js_rules() {
        assert_eq!(js_number(" 42 "), 42.0);
        assert_eq!(js_number(""), 0.0);
        assert_eq!(js_number("1e3"), 1000.0);
        assert_eq!(js_number(".5"), 0.5);
        assert_eq!(js_number("0x1A"), 26.0);
        assert_eq!(js_number("-Infinity"), f64::NEG_INFINITY);
        assert!(js_number("inf").is_nan());
        assert!(js_number("NaN").is_nan());
        assert!(js_number("12abc").is_nan());
        assert!(js_number("0x").is_nan());
    }
}
