// lcstats/src/input.rs
//! Reading light-curve files.
//!
//! A file holds at least three columns, `t mag err`, separated by commas,
//! tabs or runs of spaces. Lines starting with `#` are comments. A first row
//! whose leading columns are not numbers is treated as a header; any later
//! non-numeric row is an error. Columns beyond the third are ignored.

use anyhow::{bail, Context, Result};
use log::debug;
use std::borrow::Cow;
use std::path::Path;

use lcstats_core::LightCurve;

/// Picks the field delimiter from the first non-comment line. Whitespace
/// separated text has its tabs folded into spaces.
fn normalise_delimiter(text: &str) -> (u8, Cow<'_, str>) {
    let first = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or("");

    if first.contains(',') {
        (b',', Cow::Borrowed(text))
    } else if text.contains('\t') {
        (b' ', Cow::Owned(text.replace('\t', " ")))
    } else {
        (b' ', Cow::Borrowed(text))
    }
}

fn parse_row(fields: &[&str]) -> Option<(f64, f64, f64)> {
    match fields {
        [t, mag, err, ..] => Some((t.parse().ok()?, mag.parse().ok()?, err.parse().ok()?)),
        _ => None,
    }
}

/// Parses light-curve text. `source` is only used in error messages.
pub fn parse_light_curve(text: &str, source: &str) -> Result<LightCurve> {
    let (delimiter, text) = normalise_delimiter(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let (mut t, mut mag, mut err) = (Vec::new(), Vec::new(), Vec::new());
    let mut first_row = true;

    for record in reader.records() {
        let record = record.with_context(|| format!("Malformed record in {}", source))?;
        // Runs of spaces produce empty fields.
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }
        let header_allowed = std::mem::replace(&mut first_row, false);

        match parse_row(&fields) {
            Some((ti, mi, ei)) => {
                t.push(ti);
                mag.push(mi);
                err.push(ei);
            }
            None if header_allowed => {
                debug!("Skipping header row in {}: {:?}", source, fields);
            }
            None => {
                let line = record
                    .position()
                    .map(|p| p.line().to_string())
                    .unwrap_or_else(|| "?".to_string());
                bail!(
                    "{}:{}: expected three numeric columns (t, mag, err), found {:?}",
                    source,
                    line,
                    fields
                );
            }
        }
    }

    debug!("Read {} observations from {}", t.len(), source);
    Ok(LightCurve::new(t, mag, err)?)
}

/// Reads and parses a light-curve file.
pub fn read_light_curve(path: &Path) -> Result<LightCurve> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read light curve file: {}", path.display()))?;
    parse_light_curve(&text, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated_with_header_and_comments() {
        let text = "# survey export\nt,mag,err\n2.0, 15.2, 0.02\n1.0,15.1,0.03\n";
        let lc = parse_light_curve(text, "test").unwrap();
        assert_eq!(lc.t(), &[1.0, 2.0]);
        assert_eq!(lc.mag(), &[15.1, 15.2]);
        assert_eq!(lc.err(), &[0.03, 0.02]);
    }

    #[test]
    fn test_whitespace_separated_with_extra_columns() {
        let text = "0.5    12.0   0.1  g\n1.5\t12.5  0.2 r\n\n2.5 13.0 0.1 g\n";
        let lc = parse_light_curve(text, "test").unwrap();
        assert_eq!(lc.len(), 3);
        assert_eq!(lc.mag(), &[12.0, 12.5, 13.0]);
    }

    #[test]
    fn test_non_numeric_row_after_data_is_an_error() {
        let text = "1.0 2.0 0.1\nnot a number\n";
        let err = parse_light_curve(text, "bad.txt").unwrap_err();
        assert!(err.to_string().contains("bad.txt:2"));
    }

    #[test]
    fn test_empty_input_gives_empty_light_curve() {
        let lc = parse_light_curve("# nothing here\n", "empty").unwrap();
        assert!(lc.is_empty());
    }
}
