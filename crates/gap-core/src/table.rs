//! Residue-indexed messiness tables.
//!
//! A table maps an anchor's residue class (mod 6, 30, or 210) to the
//! measured "failure rate" of that class, in percent. A residue with no
//! measurement — odd residues of an even anchor sum, or a class the census
//! never observed — is [`Messiness::Unknown`], which every consumer treats
//! as maximally messy. `Unknown` is the single sentinel here; the table
//! files historically mixed `100.0`, `Infinity`, and missing keys for the
//! same idea.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::load::LoadError;

/// A messiness score for one residue class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Messiness {
    /// Measured failure rate, in percent.
    Measured(f64),
    /// No measurement; treated as the maximum possible score.
    Unknown,
}

impl Messiness {
    /// The weight used by the scorer. `Unknown` propagates as infinite so
    /// an unmeasured residue can never win on score.
    pub fn weight(self) -> f64 {
        match self {
            Messiness::Measured(v) => v,
            Messiness::Unknown => f64::INFINITY,
        }
    }

    /// Whether this score lands in the messy bin for a given threshold.
    /// `Unknown` always does.
    pub fn exceeds(self, threshold: f64) -> bool {
        match self {
            Messiness::Measured(v) => v > threshold,
            Messiness::Unknown => true,
        }
    }
}

impl std::fmt::Display for Messiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Messiness::Measured(v) => write!(f, "{:.4}%", v),
            Messiness::Unknown => write!(f, "unknown"),
        }
    }
}

/// Residue → messiness map for a fixed modulus. Read-only after
/// construction; built once and passed into the engine.
#[derive(Debug, Clone)]
pub struct ResidueTable {
    modulus: u64,
    scores: HashMap<u64, Messiness>,
}

impl ResidueTable {
    /// Build a table from measured `(residue, rate)` pairs.
    pub fn from_measured(modulus: u64, pairs: &[(u64, f64)]) -> Self {
        assert!(modulus > 0, "modulus must be positive");
        let scores = pairs
            .iter()
            .map(|&(r, v)| (r % modulus, Messiness::Measured(v)))
            .collect();
        ResidueTable { modulus, scores }
    }

    /// The mod-6 reference table: Law I failure rates measured over the
    /// first 50 million prime pairs. Residue 0 is the clean bin; 2 and 4
    /// are the messy bins; odd residues cannot occur for an even anchor.
    pub fn mod6_reference() -> Self {
        ResidueTable::from_measured(6, &[(0, 2.7126), (2, 26.2627), (4, 26.2859)])
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Number of measured residue classes.
    pub fn measured_len(&self) -> usize {
        self.scores
            .values()
            .filter(|m| matches!(m, Messiness::Measured(_)))
            .count()
    }

    /// Look up the messiness of an anchor's residue class.
    pub fn lookup(&self, anchor: u64) -> Messiness {
        self.scores
            .get(&(anchor % self.modulus))
            .copied()
            .unwrap_or(Messiness::Unknown)
    }

    /// Load a table from a JSON map file.
    ///
    /// The measurement runs emit `{"0": 1.45, "2": Infinity, ...}` — the
    /// bare `Infinity` token is not valid JSON, so the content is
    /// pre-sanitized to `null` before parsing. Both `null` and `Infinity`
    /// entries become [`Messiness::Unknown`].
    pub fn load(path: &Path, modulus: u64) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        // Quoted form first so the bare-token pass can't corrupt it.
        let sanitized = content
            .replace("\"Infinity\"", "null")
            .replace("Infinity", "null");

        let raw: HashMap<String, Option<f64>> =
            serde_json::from_str(&sanitized).map_err(|e| LoadError::Json {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut scores = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let residue: u64 = key.parse().map_err(|_| LoadError::Parse {
                path: path.to_path_buf(),
                line: 0,
                text: key.clone(),
            })?;
            let messiness = match value {
                Some(v) => Messiness::Measured(v),
                None => Messiness::Unknown,
            };
            scores.insert(residue % modulus, messiness);
        }

        Ok(ResidueTable { modulus, scores })
    }

    /// Save the table as a JSON map, residues in numeric order.
    /// `Unknown` entries are written as `null`, the sanitized form
    /// [`ResidueTable::load`] reads back.
    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let map: BTreeMap<u64, Option<f64>> = self
            .scores
            .iter()
            .map(|(&r, &m)| {
                let v = match m {
                    Messiness::Measured(v) => Some(v),
                    Messiness::Unknown => None,
                };
                (r, v)
            })
            .collect();
        let json = serde_json::to_string_pretty(&map).map_err(|e| LoadError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup_measured_and_unknown() {
        let table = ResidueTable::mod6_reference();
        assert_eq!(table.lookup(19950), Messiness::Measured(2.7126)); // 0 mod 6
        assert_eq!(table.lookup(8), Messiness::Measured(26.2627)); // 2 mod 6
        assert_eq!(table.lookup(10), Messiness::Measured(26.2859)); // 4 mod 6
        assert_eq!(table.lookup(7), Messiness::Unknown); // 1 mod 6, unmeasured
    }

    #[test]
    fn test_unknown_weights_infinite() {
        assert_eq!(Messiness::Unknown.weight(), f64::INFINITY);
        assert_eq!(Messiness::Measured(2.5).weight(), 2.5);
    }

    #[test]
    fn test_unknown_is_always_messy() {
        assert!(Messiness::Unknown.exceeds(20.0));
        assert!(Messiness::Measured(26.2).exceeds(20.0));
        assert!(!Messiness::Measured(2.7).exceeds(20.0));
        // Threshold comparison is strict
        assert!(!Messiness::Measured(20.0).exceeds(20.0));
    }

    #[test]
    fn test_load_with_bare_infinity_token() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{\"0\": 1.45, \"2\": Infinity}").unwrap();
        let table = ResidueTable::load(f.path(), 6).unwrap();
        assert_eq!(table.lookup(0), Messiness::Measured(1.45));
        assert_eq!(table.lookup(2), Messiness::Unknown);
        assert_eq!(table.lookup(4), Messiness::Unknown); // absent key
    }

    #[test]
    fn test_load_with_quoted_infinity() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{\"0\": 0.002, \"30\": \"Infinity\"}").unwrap();
        let table = ResidueTable::load(f.path(), 210).unwrap();
        assert_eq!(table.lookup(210), Messiness::Measured(0.002));
        assert_eq!(table.lookup(240), Messiness::Unknown);
    }

    #[test]
    fn test_load_rejects_non_numeric_key() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{\"zero\": 1.0}").unwrap();
        let err = ResidueTable::load(f.path(), 6).unwrap_err();
        assert!(matches!(err, crate::load::LoadError::Parse { .. }));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");

        let mut table = ResidueTable::from_measured(30, &[(0, 0.95), (6, 14.2)]);
        table.scores.insert(12, Messiness::Unknown);
        table.save(&path).unwrap();

        let loaded = ResidueTable::load(&path, 30).unwrap();
        assert_eq!(loaded.lookup(30), Messiness::Measured(0.95));
        assert_eq!(loaded.lookup(36), Messiness::Measured(14.2));
        assert_eq!(loaded.lookup(42), Messiness::Unknown); // explicit null
        assert_eq!(loaded.lookup(31), Messiness::Unknown); // absent
    }
}
