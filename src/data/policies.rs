//! Policy space: sampled (CC1, CC2, CC3) charging configurations.
//!
//! Policies come from `policies_<name>.csv`: comma-delimited, at least three numeric
//! columns, extra columns ignored. Blank lines and `#` comments are skipped and a
//! non-numeric first row is taken as a header.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{DataError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub cc1: f64,
    pub cc2: f64,
    pub cc3: f64,
}

impl Policy {
    pub fn new(cc1: f64, cc2: f64, cc3: f64) -> Self {
        Self { cc1, cc2, cc3 }
    }
}

impl From<[f64; 3]> for Policy {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Ordered, immutable collection of policies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicySpace {
    policies: Vec<Policy>,
}

impl PolicySpace {
    pub fn new(policies: Vec<Policy>) -> Self {
        Self { policies }
    }

    /// `<dir>/policies_<name>.csv`
    pub fn csv_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("policies_{name}.csv"))
    }

    pub fn load_csv(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let space = Self::parse_csv(&text, path)?;
        debug!("loaded {} policies from {}", space.len(), path.display());
        Ok(space)
    }

    /// Parse delimited text; `origin` only labels errors.
    pub fn parse_csv(text: &str, origin: &Path) -> Result<Self> {
        let mut policies = Vec::new();
        let mut seen_row = false;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let first_row = !seen_row;
            seen_row = true;

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 3 {
                return Err(DataError::Parse {
                    path: origin.to_path_buf(),
                    line: idx + 1,
                    message: format!("expected at least 3 columns, found {}", fields.len()),
                });
            }

            let parsed: Vec<std::result::Result<f64, _>> =
                fields[..3].iter().map(|f| f.parse::<f64>()).collect();
            if first_row && parsed.iter().all(|p| p.is_err()) {
                continue;
            }

            let mut coords = [0.0f64; 3];
            for (col, p) in parsed.into_iter().enumerate() {
                coords[col] = p.map_err(|e| DataError::Parse {
                    path: origin.to_path_buf(),
                    line: idx + 1,
                    message: format!("column {}: {e} ({:?})", col + 1, fields[col]),
                })?;
            }
            policies.push(Policy::from(coords));
        }

        Ok(Self { policies })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Policy> {
        self.policies.iter()
    }

    pub fn as_slice(&self) -> &[Policy] {
        &self.policies
    }

    /// Row indices whose CC3 equals `cc3` exactly.
    pub fn indices_with_cc3(&self, cc3: f64) -> Vec<usize> {
        self.policies
            .iter()
            .enumerate()
            .filter(|(_, p)| p.cc3 == cc3)
            .map(|(i, _)| i)
            .collect()
    }

    /// Policies whose CC3 equals `cc3` exactly, in input order.
    pub fn with_cc3(&self, cc3: f64) -> Vec<Policy> {
        self.policies
            .iter()
            .filter(|p| p.cc3 == cc3)
            .copied()
            .collect()
    }
}

impl<'a> IntoIterator for &'a PolicySpace {
    type Item = &'a Policy;
    type IntoIter = std::slice::Iter<'a, Policy>;

    fn into_iter(self) -> Self::IntoIter {
        self.policies.iter()
    }
}
