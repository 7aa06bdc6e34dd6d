//! County code resolution from the census lookup table.
//!
//! Each state directory carries a `county_codes.txt` in the census
//! national-county layout: `usps, state_fips, county_fips, name, class`,
//! no header row.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use polars::{io::SerReader, prelude::{CsvReadOptions, DataType}};

use crate::common::require_file_exists;
use crate::error::CountyLookupError;

/// A resolved (state, county) FIPS pair. Codes keep their leading zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyCode {
    pub state_fips: String,
    pub county_fips: String,
}

/// Trim user-typed state input down to a lowercase two-letter code.
pub fn normalize_state(state: &str) -> String {
    state.trim().chars().take(2).collect::<String>().to_ascii_lowercase()
}

/// Append the "County" suffix the lookup table uses, unless the caller
/// already typed one (any casing).
pub fn normalize_county(county: &str) -> String {
    let county = county.trim();
    if county.to_ascii_lowercase().ends_with(" county") {
        county.to_string()
    } else {
        format!("{county} County")
    }
}

/// Resolve a state/county pair against `<census_dir>/<state>/county_codes.txt`.
///
/// Matching is case-insensitive on the county name; when the table lists a
/// name twice the last row wins. Failure to find the table or the county
/// is fatal to the run.
pub fn resolve(census_dir: &Path, state: &str, county: &str) -> Result<CountyCode> {
    let state = normalize_state(state);
    let county = normalize_county(county);

    let table = census_dir.join(&state).join("county_codes.txt");
    require_file_exists(&table)
        .context("census directory is missing or not laid out as <dir>/<state>/county_codes.txt")?;

    let file = File::open(&table)
        .with_context(|| format!("[lookup] failed to open county table {}", table.display()))?;
    // All-string schema so FIPS codes keep their leading zeros.
    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[lookup] failed to read county table {}", table.display()))?;
    ensure!(
        df.width() >= 4,
        "[lookup] malformed county table {}: expected at least 4 columns, found {}",
        table.display(),
        df.width()
    );

    let columns = df.get_column_names();
    let state_codes = df.column(columns[1])?.cast(&DataType::String)?;
    let county_codes = df.column(columns[2])?.cast(&DataType::String)?;
    let county_names = df.column(columns[3])?.cast(&DataType::String)?;

    let mut found = None;
    for ((state_fips, county_fips), name) in state_codes
        .str()?
        .into_iter()
        .zip(county_codes.str()?.into_iter())
        .zip(county_names.str()?.into_iter())
    {
        let (Some(state_fips), Some(county_fips), Some(name)) = (state_fips, county_fips, name)
        else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case(&county) {
            found = Some(CountyCode {
                state_fips: state_fips.trim().to_string(),
                county_fips: county_fips.trim().to_string(),
            });
        }
    }

    found.ok_or_else(|| CountyLookupError { county, table }.into())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{normalize_county, normalize_state, resolve};

    #[test]
    fn state_input_is_trimmed_and_lowercased() {
        assert_eq!(normalize_state("WA"), "wa");
        assert_eq!(normalize_state("washington"), "wa");
        assert_eq!(normalize_state(" or "), "or");
    }

    #[test]
    fn county_suffix_is_appended_once() {
        assert_eq!(normalize_county("king"), "king County");
        assert_eq!(normalize_county("King County"), "King County");
        assert_eq!(normalize_county("king county"), "king county");
    }

    fn write_table(dir: &std::path::Path) {
        let state_dir = dir.join("wa");
        fs::create_dir_all(&state_dir).unwrap();
        fs::write(
            state_dir.join("county_codes.txt"),
            "WA,53,033,King County,H1\nWA,53,061,Snohomish County,H1\nWA,53,007,Chelan County,H1\n",
        )
        .unwrap();
    }

    #[test]
    fn resolve_finds_codes_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path());

        let code = resolve(dir.path(), "WA", "king").unwrap();
        assert_eq!(code.state_fips, "53");
        assert_eq!(code.county_fips, "033");
    }

    #[test]
    fn resolve_preserves_leading_zeros() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path());

        let code = resolve(dir.path(), "wa", "Chelan").unwrap();
        assert_eq!(code.county_fips, "007");
    }

    #[test]
    fn unknown_county_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path());

        let err = resolve(dir.path(), "wa", "Narnia").unwrap_err();
        assert!(err.to_string().contains("not found"), "got: {err}");
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve(dir.path(), "wa", "king").is_err());
    }
}
