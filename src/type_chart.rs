//! Type-effectiveness resolver.
//!
//! The chart is read once from a CSV table whose first row names the types and
//! whose remaining rows hold the multipliers: row `i` is the attacking type in
//! header position `i`, column `j` the defending type in header position `j`.
//! Every known type must be present, so lookups after construction cannot fail.

use crate::errors::{ConfigError, ConfigResult};
use schema::{EnumCount, IntoEnumIterator, PokeType};
use std::path::Path;
use std::str::FromStr;

const STANDARD_CHART: &str = include_str!("../data/type_effectiveness.csv");

/// Highest multiplier a chart may hold.
pub const MAX_EFFECTIVENESS: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TypeChart {
    // Dense COUNT x COUNT table indexed by `PokeType::index`.
    multipliers: Vec<f64>,
}

impl TypeChart {
    /// The chart shipped in `data/type_effectiveness.csv`.
    pub fn standard() -> ConfigResult<Self> {
        Self::from_csv_str(STANDARD_CHART)
    }

    /// Load a chart from a CSV file on disk.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_csv_str(&content)
    }

    /// Parse a chart from CSV text.
    pub fn from_csv_str(content: &str) -> ConfigResult<Self> {
        let mut lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let header = lines
            .next()
            .ok_or_else(|| ConfigError::MalformedTypeChart("table is empty".to_string()))?;

        let mut columns = Vec::with_capacity(PokeType::COUNT);
        for name in header.split(',').map(str::trim) {
            let poke_type =
                PokeType::from_str(name).map_err(|_| ConfigError::UnknownType(name.to_string()))?;
            if columns.contains(&poke_type) {
                return Err(ConfigError::MalformedTypeChart(format!(
                    "type {} appears twice in the header",
                    poke_type
                )));
            }
            columns.push(poke_type);
        }

        if let Some(missing) = PokeType::iter().find(|t| !columns.contains(t)) {
            return Err(ConfigError::MissingType(missing.to_string()));
        }

        let mut multipliers = vec![f64::NAN; PokeType::COUNT * PokeType::COUNT];
        let mut row_count = 0;

        for (row_index, line) in lines.enumerate() {
            let attacking = *columns.get(row_index).ok_or_else(|| {
                ConfigError::MalformedTypeChart(format!(
                    "expected {} rows of values, found more",
                    columns.len()
                ))
            })?;

            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.len() != columns.len() {
                return Err(ConfigError::MalformedTypeChart(format!(
                    "row for {} has {} values, expected {}",
                    attacking,
                    cells.len(),
                    columns.len()
                )));
            }

            for (defending, cell) in columns.iter().zip(cells) {
                let value: f64 = cell.parse().map_err(|_| {
                    ConfigError::MalformedTypeChart(format!(
                        "'{}' ({} vs {}) is not a number",
                        cell, attacking, defending
                    ))
                })?;
                if !(0.0..=MAX_EFFECTIVENESS).contains(&value) {
                    return Err(ConfigError::MalformedTypeChart(format!(
                        "{} vs {} is {}, outside 0..={}",
                        attacking, defending, value, MAX_EFFECTIVENESS
                    )));
                }
                multipliers[Self::slot(attacking, *defending)] = value;
            }
            row_count += 1;
        }

        if row_count != columns.len() {
            return Err(ConfigError::MalformedTypeChart(format!(
                "expected {} rows of values, found {}",
                columns.len(),
                row_count
            )));
        }

        tracing::debug!(types = columns.len(), "type chart loaded");
        Ok(TypeChart { multipliers })
    }

    /// Multiplier applied when `attack_type` hits `defend_type`, in `0.0..=4.0`.
    pub fn effectiveness(&self, attack_type: PokeType, defend_type: PokeType) -> f64 {
        self.multipliers[Self::slot(attack_type, defend_type)]
    }

    /// Number of types the chart covers.
    pub fn type_count(&self) -> usize {
        PokeType::COUNT
    }

    fn slot(attack_type: PokeType, defend_type: PokeType) -> usize {
        attack_type.index() * PokeType::COUNT + defend_type.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_chart_matchups() {
        let chart = TypeChart::standard().unwrap();
        assert_eq!(chart.effectiveness(PokeType::Fire, PokeType::Grass), 2.0);
        assert_eq!(chart.effectiveness(PokeType::Water, PokeType::Fire), 2.0);
        assert_eq!(chart.effectiveness(PokeType::Fire, PokeType::Water), 0.5);
        assert_eq!(chart.effectiveness(PokeType::Electric, PokeType::Ground), 0.0);
        assert_eq!(chart.effectiveness(PokeType::Normal, PokeType::Ghost), 0.0);
        assert_eq!(chart.effectiveness(PokeType::Dragon, PokeType::Dragon), 2.0);
        assert_eq!(chart.effectiveness(PokeType::Psychic, PokeType::Fire), 1.0);
    }

    #[test]
    fn test_all_standard_values_in_range() {
        let chart = TypeChart::standard().unwrap();
        for attacking in PokeType::iter() {
            for defending in PokeType::iter() {
                let value = chart.effectiveness(attacking, defending);
                assert!((0.0..=MAX_EFFECTIVENESS).contains(&value));
            }
        }
    }

    #[test]
    fn test_header_order_is_respected() {
        // Swap the first two columns and rows; lookups must not change.
        let mut lines: Vec<Vec<String>> = STANDARD_CHART
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.split(',').map(|c| c.trim().to_string()).collect())
            .collect();
        for row in lines.iter_mut() {
            row.swap(0, 1);
        }
        lines.swap(1, 2);
        let csv = lines
            .iter()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\n");

        let reordered = TypeChart::from_csv_str(&csv).unwrap();
        assert_eq!(reordered, TypeChart::standard().unwrap());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let csv = STANDARD_CHART.replacen("Rock", "Fairy", 1);
        assert!(matches!(
            TypeChart::from_csv_str(&csv),
            Err(ConfigError::UnknownType(name)) if name == "Fairy"
        ));
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let csv = "Fire,Water\n1,1\n1,1\n";
        assert!(matches!(
            TypeChart::from_csv_str(csv),
            Err(ConfigError::MissingType(_))
        ));
    }

    #[test]
    fn test_out_of_range_value_is_rejected() {
        let mut lines: Vec<String> = STANDARD_CHART.lines().map(str::to_string).collect();
        lines[1] = lines[1].replacen("0.5", "4.5", 1);
        assert!(matches!(
            TypeChart::from_csv_str(&lines.join("\n")),
            Err(ConfigError::MalformedTypeChart(_))
        ));
    }

    #[test]
    fn test_missing_row_is_rejected() {
        let truncated: Vec<&str> = STANDARD_CHART.lines().take(10).collect();
        assert!(matches!(
            TypeChart::from_csv_str(&truncated.join("\n")),
            Err(ConfigError::MalformedTypeChart(_))
        ));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(TypeChart::from_csv_str("").is_err());
    }
}
