use crate::ingest::error::DataUnavailable;
use encoding_rs::{Encoding, GBK, UTF_8};
use std::path::Path;
use std::str::FromStr;

/// Byte encoding of an exported table. Marketplace exports are GBK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEncoding {
    Utf8,
    Gbk,
}

impl TableEncoding {
    fn encoding(self) -> &'static Encoding {
        match self {
            TableEncoding::Utf8 => UTF_8,
            TableEncoding::Gbk => GBK,
        }
    }
}

impl FromStr for TableEncoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TableEncoding::Utf8),
            "gbk" | "gb2312" | "gb18030" => Ok(TableEncoding::Gbk),
            other => anyhow::bail!("unsupported table encoding: {other}"),
        }
    }
}

/// A delimited table with a header row. Cells are kept as trimmed text.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn read(
        path: &Path,
        encoding: TableEncoding,
        dataset: &str,
    ) -> Result<Self, DataUnavailable> {
        let bytes = std::fs::read(path).map_err(|e| {
            DataUnavailable::new(dataset, format!("cannot read {}: {e}", path.display()))
        })?;
        Self::decode(&bytes, encoding, dataset)
    }

    pub fn decode(
        bytes: &[u8],
        encoding: TableEncoding,
        dataset: &str,
    ) -> Result<Self, DataUnavailable> {
        // `decode` sniffs a BOM and strips it.
        let (text, _, had_errors) = encoding.encoding().decode(bytes);
        if had_errors {
            return Err(DataUnavailable::new(
                dataset,
                format!("content is not valid {encoding:?}"),
            ));
        }
        Self::parse(&text, dataset)
    }

    pub fn parse(text: &str, dataset: &str) -> Result<Self, DataUnavailable> {
        let mut lines = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty());

        let header_line = lines
            .next()
            .ok_or_else(|| DataUnavailable::new(dataset, "table is empty"))?;
        let headers = split_record(header_line);

        let mut rows = Vec::new();
        for (idx, line) in lines.enumerate() {
            let cells = split_record(line);
            if cells.len() != headers.len() {
                return Err(DataUnavailable::new(
                    dataset,
                    format!(
                        "row {} has {} cells, expected {}",
                        idx + 1,
                        cells.len(),
                        headers.len()
                    ),
                ));
            }
            rows.push(cells);
        }

        Ok(Self { headers, rows })
    }

    /// Index of the first header matching any of `names`.
    pub fn column(&self, names: &[&str], dataset: &str) -> Result<usize, DataUnavailable> {
        self.headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
            .ok_or_else(|| {
                DataUnavailable::new(dataset, format!("missing column {}", names.join("/")))
            })
    }
}

/// Splits one line on commas, honoring double-quoted cells (`""` escapes a quote).
fn split_record(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cur.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => out.push(std::mem::take(&mut cur).trim().to_string()),
            _ => cur.push(c),
        }
    }
    out.push(cur.trim().to_string());
    out
}

fn clean_number(cell: &str) -> String {
    cell.chars()
        .filter(|c| !matches!(c, ',' | '¥' | '￥' | '%' | ' '))
        .collect()
}

/// True for cells the export leaves empty or fills with a dash.
pub fn is_blank(cell: &str) -> bool {
    let cleaned = clean_number(cell);
    cleaned.is_empty() || cleaned == "-"
}

/// Parses a numeric cell as exported: thousands separators, currency and
/// percent signs are tolerated. Blank and non-finite cells yield `None`.
pub fn parse_number(cell: &str) -> Option<f64> {
    clean_number(cell)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
