//! Unit catalog loading.
//!
//! A catalog is a CSV file describing a fleet of generating units, one per
//! row, so the CLI can plan without writing a JSON payload by hand. Columns
//! are matched by name with a few accepted spellings each.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{Error, Result};
use crate::unit::{normalize_name, Unit, UnitKind};

/// Canonical field name -> accepted header spellings (normalized).
const COLUMN_SYNONYMS: &[(&str, &[&str])] = &[
    ("name", &["name", "unit", "unit_name", "plant", "powerplant"]),
    ("type", &["type", "kind", "technology"]),
    ("efficiency", &["efficiency", "eff"]),
    ("pmin", &["pmin", "p_min", "min", "min_mw"]),
    ("pmax", &["pmax", "p_max", "max", "max_mw", "capacity"]),
];

const REQUIRED_COLUMNS: &[&str] = &["name", "type", "efficiency", "pmin", "pmax"];

/// Fleet of generating units loaded from a CSV file.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: Vec<Unit>,
    source: Option<PathBuf>,
}

impl UnitCatalog {
    /// Load a unit catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a unit catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::UnitCatalog {
                message: format!("failed to read catalog headers: {err}"),
            })?
            .clone();

        let normalized_headers: Vec<String> = headers.iter().map(normalize_header).collect();

        let mut index_map: BTreeMap<&str, usize> = BTreeMap::new();
        for (canon, alts) in COLUMN_SYNONYMS {
            if let Some(i) = alts
                .iter()
                .find_map(|alt| normalized_headers.iter().position(|h| h == alt))
            {
                index_map.insert(*canon, i);
            }
        }

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !index_map.contains_key(c))
            .collect();

        if !missing.is_empty() {
            return Err(Error::UnitCatalog {
                message: format!(
                    "catalog missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }

        let mut units = Vec::new();
        let mut seen = HashSet::new();

        // header is line 1
        for (offset, result) in csv_reader.records().enumerate() {
            let row = offset + 2;
            let record = result.map_err(|e| Error::UnitCatalog {
                message: e.to_string(),
            })?;
            let fields = RowFields {
                record: &record,
                index_map: &index_map,
                row,
            };

            let name = fields.text("name").unwrap_or_default();
            let kind = fields
                .required("type", &name)?
                .parse::<UnitKind>()
                .map_err(|e: Error| Error::UnitCatalog {
                    message: format!("unit '{}' at row {}: {}", name, row, e),
                })?;

            let unit = Unit::new(
                name.clone(),
                kind,
                fields.number("efficiency", &name)?,
                fields.number("pmin", &name)?,
                fields.number("pmax", &name)?,
            );
            unit.validate()?;

            if !seen.insert(normalize_name(&unit.name)) {
                return Err(Error::DuplicateUnitName { name: unit.name });
            }
            units.push(unit);
        }

        Ok(Self {
            units,
            source: None,
        })
    }

    /// Units in file order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<Unit> {
        self.units
    }

    /// Get a unit by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Unit> {
        let key = normalize_name(name);
        self.units.iter().find(|u| normalize_name(&u.name) == key)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

struct RowFields<'a> {
    record: &'a StringRecord,
    index_map: &'a BTreeMap<&'static str, usize>,
    row: usize,
}

impl RowFields<'_> {
    fn text(&self, field: &str) -> Option<String> {
        self.index_map
            .get(field)
            .and_then(|&i| self.record.get(i))
            .map(|s| s.trim().to_string())
    }

    fn required(&self, field: &str, name: &str) -> Result<String> {
        self.text(field)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::UnitCatalog {
                message: format!("missing {} for unit '{}' at row {}", field, name, self.row),
            })
    }

    fn number(&self, field: &str, name: &str) -> Result<f64> {
        self.required(field, name)?
            .parse::<f64>()
            .map_err(|e| Error::UnitCatalog {
                message: format!(
                    "invalid {} for unit '{}' at row {}: {}",
                    field, name, self.row, e
                ),
            })
    }
}

fn normalize_header(s: &str) -> String {
    s.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
