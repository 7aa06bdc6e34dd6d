//! Census block loading from TIGER `tabblock` shapefiles.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, ensure};
use shapefile::Reader;
use shapefile::dbase::{FieldValue, Record};

use crate::common::{require_dir_exists, shape_to_multipolygon};
use crate::types::Block;

// TIGER vintages suffix their attribute names with the census year.
const COUNTY_FIELDS: [&str; 3] = ["COUNTYFP10", "COUNTYFP20", "COUNTYFP"];
const GEOID_FIELDS: [&str; 3] = ["GEOID10", "GEOID20", "GEOID"];

/// First matching character field from a DBF record, trimmed.
fn character_field(record: &Record, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match record.get(name) {
        Some(FieldValue::Character(Some(value))) => Some(value.trim().to_string()),
        _ => None,
    })
}

/// Locate the block shapefile for a state: the 2010 TIGER name first,
/// otherwise any `tl_*tabblock*.shp` in the state directory.
pub fn block_shapefile_path(census_dir: &Path, state: &str, state_fips: &str) -> Result<PathBuf> {
    let dir = census_dir.join(state);
    require_dir_exists(&dir).context("census directory has no subdirectory for this state")?;

    let fixed = dir.join(format!("tl_2015_{state_fips}_tabblock10.shp"));
    if fixed.exists() {
        return Ok(fixed);
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(&dir)
        .with_context(|| format!("[blocks] failed to scan {}", dir.display()))?
    {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name.starts_with("tl_") && name.contains("tabblock") && name.ends_with(".shp") {
            candidates.push(path);
        }
    }
    candidates.sort();
    candidates.into_iter().next().ok_or_else(|| {
        anyhow!(
            "no census block shapefile under {} (expected tl_2015_{state_fips}_tabblock10.shp)",
            dir.display()
        )
    })
}

/// Read every block feature for one county from a `tabblock` shapefile.
///
/// Features outside the county are ignored; features with missing fields
/// or non-polygon shapes are skipped with a diagnostic. An empty result
/// is fatal, since matching would be meaningless.
pub fn load_county_blocks(path: &Path, county_fips: &str, verbose: u8) -> Result<Vec<Block>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open block shapefile: {}", path.display()))?;
    let total = reader.shape_count()?;

    let mut blocks = Vec::new();
    let mut skipped = 0usize;
    for item in reader.iter_shapes_and_records() {
        let (shape, record) = item.context("[blocks] error reading shape+record")?;

        let Some(county) = character_field(&record, &COUNTY_FIELDS) else {
            skipped += 1;
            continue;
        };
        if county != county_fips {
            continue;
        }
        let Some(id) = character_field(&record, &GEOID_FIELDS) else {
            skipped += 1;
            continue;
        };
        let Some(geometry) = shape_to_multipolygon(&shape) else {
            skipped += 1;
            continue;
        };
        if geometry.0.is_empty() {
            skipped += 1;
            continue;
        }

        blocks.push(Block {
            id: Arc::from(id.as_str()),
            geometry,
        });
    }

    if skipped > 0 {
        eprintln!("[blocks] skipped {skipped} features with missing fields or unusable shapes");
    }
    if verbose > 0 {
        eprintln!(
            "[blocks] kept {} of {} features for county {}",
            blocks.len(),
            total,
            county_fips
        );
    }
    ensure!(
        !blocks.is_empty(),
        "no census blocks found for county code {} in {}",
        county_fips,
        path.display()
    );
    Ok(blocks)
}
