use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::ChannelPair;

/// Free-text lines at the top of every paired file.
pub const HEADER_ROWS: usize = 2;

// ---------------------------------------------------------------------------
// Paired-file loader
// ---------------------------------------------------------------------------

/// Read one paired measurement file.
///
/// Layout:
/// ```text
/// <header line 1>
/// <header line 2>
/// 10.0, 20.0
/// 12.0, 22.0
/// ```
/// The first column becomes channel A, the second channel B. Blank lines and
/// lines starting with `#` are ignored after the header.
pub fn read_pair_file(path: &Path) -> Result<ChannelPair> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut line = String::new();
    for n in 0..HEADER_ROWS {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .with_context(|| format!("reading header line {}", n + 1))?;
        if read == 0 {
            bail!("file ends inside the {HEADER_ROWS}-line header");
        }
    }

    let mut rows = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut pair = ChannelPair::default();

    for result in rows.records() {
        let record = result.context("reading CSV row")?;
        let line_no = record
            .position()
            .map(|p| p.line() as usize + HEADER_ROWS)
            .unwrap_or(0);

        // Whitespace-only lines trim down to one empty field.
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != 2 {
            bail!(
                "line {line_no}: expected 2 fields, found {}",
                record.len()
            );
        }

        pair.a.push(parse_field(&record[0], line_no, 1)?);
        pair.b.push(parse_field(&record[1], line_no, 2)?);
    }

    if pair.is_empty() {
        bail!("no data rows after the {HEADER_ROWS}-line header");
    }

    Ok(pair)
}

fn parse_field(s: &str, line: usize, column: usize) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .with_context(|| format!("line {line}, column {column}: '{s}' is not a number"))?;
    if !value.is_finite() {
        bail!("line {line}, column {column}: '{s}' is not a finite number");
    }
    Ok(value)
}
