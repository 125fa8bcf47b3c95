//! Bulk company dataset, loaded once per process.
//!
//! The backing file is a large delimited export (company name, domain, year
//! founded, industry, size range, locality, country, employee estimates).
//! Loading is single-flight: the first caller reads the file off the async
//! runtime, concurrent callers await the same in-flight load. A missing or
//! unreadable file degrades to an empty dataset — downstream matchers treat
//! that as "no match", never as an error.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Datelike, Utc};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::models::company::{normalize_name, NOT_SPECIFIED};

const SIZE_RANGES: &[&str] = &[
    "1 - 10",
    "11 - 50",
    "51 - 200",
    "201 - 500",
    "501 - 1000",
    "1001 - 5000",
    "5001 - 10000",
    "10001+",
];

pub const SIZE_RANGE_UNAVAILABLE: &str = "Information not available";

#[derive(Debug, Clone)]
pub struct DatasetRecord {
    pub name: String,
    /// Precomputed `normalize_name(name)` — the matchers hit this on every
    /// lookup, so it is not recomputed per query.
    pub normalized_name: String,
    pub domain: String,
    pub year_founded: Option<i32>,
    pub industry: String,
    pub size_range: String,
    pub locality: String,
    pub country: String,
    pub employees_current: u64,
    pub employees_total: u64,
}

impl DatasetRecord {
    /// "locality, country" when either is known, else the sentinel.
    pub fn headquarters(&self) -> String {
        match (self.locality.is_empty(), self.country.is_empty()) {
            (false, false) => format!("{}, {}", self.locality, self.country),
            (false, true) => self.locality.clone(),
            (true, false) => self.country.clone(),
            (true, true) => NOT_SPECIFIED.to_string(),
        }
    }
}

/// Read-only handle over the in-memory dataset. Owned by the composition
/// root and shared behind `Arc`.
pub struct CompanyDataset {
    path: Option<PathBuf>,
    records: OnceCell<Arc<Vec<DatasetRecord>>>,
}

impl CompanyDataset {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            records: OnceCell::new(),
        }
    }

    /// Empty dataset, for composition without a configured file.
    #[allow(dead_code)]
    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Dataset preloaded from records already in memory; bypasses the file
    /// read entirely.
    #[allow(dead_code)]
    pub fn from_records(records: Vec<DatasetRecord>) -> Self {
        Self {
            path: None,
            records: OnceCell::new_with(Some(Arc::new(records))),
        }
    }

    pub async fn records(&self) -> Arc<Vec<DatasetRecord>> {
        self.records
            .get_or_init(|| async {
                let Some(path) = self.path.clone() else {
                    info!("no company dataset configured, matcher will see an empty dataset");
                    return Arc::new(Vec::new());
                };
                match tokio::task::spawn_blocking(move || load_records(&path)).await {
                    Ok(records) => Arc::new(records),
                    Err(e) => {
                        warn!("dataset load task failed: {e}");
                        Arc::new(Vec::new())
                    }
                }
            })
            .await
            .clone()
    }
}

fn load_records(path: &Path) -> Vec<DatasetRecord> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("cannot open company dataset {}: {e}", path.display());
            return Vec::new();
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            warn!("cannot read dataset headers: {e}");
            return Vec::new();
        }
    };

    let columns = Columns::from_headers(&headers);
    let current_year = Utc::now().year();
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in reader.records() {
        let row = match row {
            Ok(r) => r,
            Err(_) => {
                dropped += 1;
                continue;
            }
        };

        let name = columns
            .get(&row, columns.name)
            .trim()
            .to_string();
        if name.is_empty() {
            dropped += 1;
            continue;
        }

        let normalized_name = normalize_name(&name);
        let industry = {
            let raw = columns.get(&row, columns.industry).trim().to_string();
            if raw.is_empty() {
                "Technology".to_string()
            } else {
                raw
            }
        };

        records.push(DatasetRecord {
            normalized_name,
            domain: columns.get(&row, columns.domain).trim().to_string(),
            year_founded: parse_year_founded(columns.get(&row, columns.year_founded), current_year),
            industry,
            size_range: normalize_size_range(columns.get(&row, columns.size_range)),
            locality: columns.get(&row, columns.locality).trim().to_string(),
            country: columns.get(&row, columns.country).trim().to_string(),
            employees_current: parse_employee_count(
                columns.get(&row, columns.employees_current),
            ),
            employees_total: parse_employee_count(columns.get(&row, columns.employees_total)),
            name,
        });
    }

    info!(
        "loaded {} dataset records from {} ({dropped} rows dropped)",
        records.len(),
        path.display()
    );
    records
}

struct Columns {
    name: Option<usize>,
    domain: Option<usize>,
    year_founded: Option<usize>,
    industry: Option<usize>,
    size_range: Option<usize>,
    locality: Option<usize>,
    country: Option<usize>,
    employees_current: Option<usize>,
    employees_total: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |aliases: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase();
                aliases.iter().any(|a| h == *a)
            })
        };
        Self {
            name: find(&["name", "company name", "company"]),
            domain: find(&["domain", "website"]),
            year_founded: find(&["year founded", "founded"]),
            industry: find(&["industry"]),
            size_range: find(&["size range", "size"]),
            locality: find(&["locality", "city"]),
            country: find(&["country"]),
            employees_current: find(&["current employee estimate", "current employees"]),
            employees_total: find(&["total employee estimate", "total employees"]),
        }
    }

    fn get<'a>(&self, row: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
        idx.and_then(|i| row.get(i)).unwrap_or("")
    }
}

/// Founding years outside [1800, current year] — or non-numeric values — are
/// treated as absent rather than propagated.
pub fn parse_year_founded(raw: &str, current_year: i32) -> Option<i32> {
    let year = raw.trim().trim_end_matches(".0").parse::<i32>().ok()?;
    if (1800..=current_year).contains(&year) {
        Some(year)
    } else {
        None
    }
}

/// Employee estimates must parse as a positive integer, else 0.
pub fn parse_employee_count(raw: &str) -> u64 {
    raw.trim()
        .replace(',', "")
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(0)
}

/// Size ranges are validated against the fixed bucket set; anything else
/// collapses to the "not available" bucket.
pub fn normalize_size_range(raw: &str) -> String {
    let compact = raw.trim().replace(' ', "");
    SIZE_RANGES
        .iter()
        .find(|candidate| candidate.replace(' ', "") == compact)
        .map(|s| s.to_string())
        .unwrap_or_else(|| SIZE_RANGE_UNAVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "name,domain,year founded,industry,size range,locality,country,linkedin url,current employee estimate,total employee estimate";

    fn write_dataset(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn test_year_founded_validation() {
        assert_eq!(parse_year_founded("1998", 2026), Some(1998));
        assert_eq!(parse_year_founded("1998.0", 2026), Some(1998));
        assert_eq!(parse_year_founded("abcd", 2026), None);
        assert_eq!(parse_year_founded("1700", 2026), None);
        assert_eq!(parse_year_founded("2999", 2026), None);
        assert_eq!(parse_year_founded("", 2026), None);
    }

    #[test]
    fn test_employee_count_defaults_to_zero() {
        assert_eq!(parse_employee_count("1500"), 1500);
        assert_eq!(parse_employee_count("12,345"), 12345);
        assert_eq!(parse_employee_count("-3"), 0);
        assert_eq!(parse_employee_count("lots"), 0);
        assert_eq!(parse_employee_count("0"), 0);
    }

    #[test]
    fn test_size_range_must_match_fixed_buckets() {
        assert_eq!(normalize_size_range("51 - 200"), "51 - 200");
        assert_eq!(normalize_size_range("51-200"), "51 - 200");
        assert_eq!(normalize_size_range("10001+"), "10001+");
        assert_eq!(normalize_size_range("huge"), SIZE_RANGE_UNAVAILABLE);
        assert_eq!(normalize_size_range(""), SIZE_RANGE_UNAVAILABLE);
    }

    #[test]
    fn test_rows_without_name_are_dropped_silently() {
        let file = write_dataset(&[
            "Google,google.com,1998,internet,10001+,Mountain View,United States,,100000,150000",
            ",nameless.com,2001,software,1 - 10,Austin,United States,,5,9",
        ]);
        let records = load_records(file.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Google");
        assert_eq!(records[0].normalized_name, "google");
        assert_eq!(records[0].year_founded, Some(1998));
        assert_eq!(records[0].employees_current, 100000);
    }

    #[test]
    fn test_missing_file_yields_empty_dataset() {
        let records = load_records(Path::new("/nonexistent/companies.csv"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_garbage_fields_are_normalized_not_propagated() {
        let file = write_dataset(&[
            "Oldtown Forge,forge.example,1700,,weird size,,,,-10,none",
        ]);
        let records = load_records(file.path());
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.year_founded, None);
        assert_eq!(r.industry, "Technology");
        assert_eq!(r.size_range, SIZE_RANGE_UNAVAILABLE);
        assert_eq!(r.employees_current, 0);
        assert_eq!(r.employees_total, 0);
    }

    #[test]
    fn test_headquarters_projection() {
        let file = write_dataset(&[
            "Infosys,infosys.com,1981,it services,10001+,Bengaluru,India,,200000,250000",
            "Remote Co,remote.example,2015,software,1 - 10,,,,3,3",
        ]);
        let records = load_records(file.path());
        assert_eq!(records[0].headquarters(), "Bengaluru, India");
        assert_eq!(records[1].headquarters(), NOT_SPECIFIED);
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_read() {
        let file = write_dataset(&[
            "Acme,acme.com,1990,manufacturing,201 - 500,Toledo,United States,,300,400",
        ]);
        let dataset = std::sync::Arc::new(CompanyDataset::new(Some(file.path().to_path_buf())));

        let a = dataset.clone();
        let b = dataset.clone();
        let (ra, rb) = tokio::join!(a.records(), b.records());

        assert_eq!(ra.len(), 1);
        // both callers observe the same allocation, not a second file read
        assert!(Arc::ptr_eq(&ra, &rb));
    }

    #[tokio::test]
    async fn test_unconfigured_dataset_is_empty_not_fatal() {
        let dataset = CompanyDataset::empty();
        assert!(dataset.records().await.is_empty());
    }
}
