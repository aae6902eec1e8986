//! The filter table: names mapped to filter definitions.
//!
//! [`FilterTable::builtin`] holds the seven stock filters. Additional tables
//! can be parsed from JSON and merged on top.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{FilterError, FilterResult};
use crate::grading::{ChannelAmounts, ChannelSet, TargetColor};
use crate::transform::evaluate::FilterPipeline;
use crate::transform::params::{FilterSpec, OperationSpec};

/// Names of the stock filters, in the order they are usually presented.
pub const BUILTIN_FILTERS: [&str; 7] = [
    "gameron", "charm", "javana", "sepiana", "vintage", "bright", "dawn",
];

/// Case-insensitive map from filter name to definition.
///
/// Keys are stored trimmed and lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterTable {
    filters: BTreeMap<String, FilterSpec>,
}

impl FilterTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock filters.
    pub fn builtin() -> Self {
        use OperationSpec as Op;

        let mut table = Self::new();
        table.insert("gameron", vec![Op::Gamma { adjust: 1.6 }]);
        table.insert(
            "charm",
            vec![Op::Channels(ChannelAmounts {
                red: Some(8.0),
                blue: Some(8.0),
                ..Default::default()
            })],
        );
        table.insert(
            "javana",
            vec![
                Op::Saturation { adjust: -35.0 },
                Op::curves(
                    ChannelSet::BLUE,
                    &[(20, 0.0), (90, 120.0), (186, 144.0), (255, 230.0)],
                ),
                Op::curves(
                    ChannelSet::RED,
                    &[(0, 0.0), (144, 90.0), (138, 120.0), (255, 255.0)],
                ),
                Op::curves(
                    ChannelSet::GREEN,
                    &[(10, 0.0), (115, 105.0), (148, 100.0), (255, 248.0)],
                ),
                Op::curves(
                    ChannelSet::RGB,
                    &[(0, 0.0), (120, 100.0), (128, 140.0), (255, 255.0)],
                ),
            ],
        );
        table.insert("sepiana", vec![Op::Sepia { adjust: 50.0 }]);
        table.insert(
            "vintage",
            vec![
                Op::GreyScale,
                Op::Sepia { adjust: 40.0 },
                Op::Channels(ChannelAmounts {
                    red: Some(8.0),
                    green: Some(4.0),
                    blue: Some(2.0),
                }),
                Op::Gamma { adjust: 0.87 },
            ],
        );
        table.insert("bright", vec![Op::Brightness { change: 0.25 }]);
        table.insert(
            "dawn",
            vec![
                Op::Colorize {
                    color: TargetColor {
                        r: 255.0,
                        g: 205.0,
                        b: 59.0,
                    },
                    level: 10.0,
                },
                Op::Gamma { adjust: 1.2 },
            ],
        );
        table
    }

    /// Parse a table from `{ "<name>": [ { "use": …, "params": … }, … ] }`.
    ///
    /// Names are normalized; the definitions are not compiled here, see
    /// [`FilterTable::validate`].
    pub fn from_json_str(json: &str) -> FilterResult<Self> {
        let raw: BTreeMap<String, FilterSpec> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (name, spec) in raw {
            table.insert(&name, spec);
        }
        Ok(table)
    }

    /// Register or replace a filter.
    pub fn insert(&mut self, name: &str, spec: impl Into<FilterSpec>) {
        self.filters.insert(normalize_name(name), spec.into());
    }

    /// Merge `other` into this table; its entries replace same-named ones.
    pub fn extend(&mut self, other: FilterTable) {
        self.filters.extend(other.filters);
    }

    /// Case-insensitive lookup, surrounding whitespace ignored.
    pub fn get(&self, name: &str) -> Option<&FilterSpec> {
        self.filters.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Compile every filter once, reporting the first one that fails.
    pub fn validate(&self) -> FilterResult<()> {
        for (name, spec) in &self.filters {
            FilterPipeline::compile(spec).map_err(|source| FilterError::InvalidFilter {
                name: name.clone(),
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}

/// Lookup form of a filter name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
