//! Precinct feature loading from a caller-supplied shapefile.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use shapefile::Reader;
use shapefile::dbase::{FieldValue, Record};

use crate::common::shape_to_multipolygon;
use crate::types::Precinct;

// Conventional name attributes, tried before falling back to whatever
// character field the record carries.
const NAME_FIELDS: [&str; 4] = ["Name", "NAME", "NAMELSAD20", "NAMELSAD10"];

fn feature_name(record: &Record) -> Option<String> {
    for field in NAME_FIELDS {
        if let Some(FieldValue::Character(Some(value))) = record.get(field) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    for (_, value) in record.clone() {
        if let FieldValue::Character(Some(value)) = value {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Read all precinct polygons from `path`, in file order.
///
/// A missing or unreadable file is fatal, as is a file with no usable
/// polygon features. Nameless features get a synthetic name so their
/// results are still reported.
pub fn load_precincts(path: &Path, verbose: u8) -> Result<Vec<Precinct>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open precinct file: {}", path.display()))?;

    let mut precincts = Vec::new();
    for (index, item) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = item.context("[precincts] error reading shape+record")?;

        let Some(geometry) = shape_to_multipolygon(&shape) else {
            eprintln!("[precincts] feature {index} is not a polygon, skipping");
            continue;
        };
        if geometry.0.is_empty() {
            eprintln!("[precincts] feature {index} has empty geometry, skipping");
            continue;
        }

        let name = feature_name(&record).unwrap_or_else(|| {
            eprintln!("[precincts] feature {index} has no name attribute");
            format!("precinct-{index}")
        });
        precincts.push(Precinct {
            name: Arc::from(name.as_str()),
            geometry,
        });
    }

    if verbose > 0 {
        eprintln!("[precincts] {} polygons from {}", precincts.len(), path.display());
    }
    ensure!(
        !precincts.is_empty(),
        "no precinct polygons found in {}",
        path.display()
    );
    Ok(precincts)
}
