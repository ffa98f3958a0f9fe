//! JSON output format for cycle-count reports

use crate::report::Report;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Channel -> cycles in report column order; `null` when the file lacks a
/// report channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelCycles(Vec<(String, Option<u64>)>);

impl ChannelCycles {
    pub fn get(&self, channel: &str) -> Option<&Option<u64>> {
        self.0
            .iter()
            .find(|(name, _)| name == channel)
            .map(|(_, cycles)| cycles)
    }

    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, Option<u64>)> for ChannelCycles {
    fn from_iter<I: IntoIterator<Item = (String, Option<u64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for ChannelCycles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (channel, cycles) in &self.0 {
            map.serialize_entry(channel, cycles)?;
        }
        map.end()
    }
}

struct ChannelCyclesVisitor;

impl<'de> Visitor<'de> for ChannelCyclesVisitor {
    type Value = ChannelCycles;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of channel names to cycle counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut cells = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry()? {
            cells.push(entry);
        }
        Ok(ChannelCycles(cells))
    }
}

impl<'de> Deserialize<'de> for ChannelCycles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ChannelCyclesVisitor)
    }
}

/// A single file's counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRow {
    pub file: String,
    pub duration_s: f64,
    pub cycles: ChannelCycles,
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub version: String,
    pub threshold: f64,
    /// Header in output order (`File`, `Duration (s)`, channels...)
    pub columns: Vec<String>,
    pub rows: Vec<JsonRow>,
}

impl JsonOutput {
    pub fn from_report(report: &Report, threshold: f64) -> Self {
        let rows = report
            .records()
            .map(|record| JsonRow {
                file: record.file.to_string(),
                duration_s: record.duration_s,
                cycles: report
                    .channels()
                    .iter()
                    .cloned()
                    .zip(record.cycles)
                    .collect(),
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            threshold,
            columns: report.columns().into_iter().map(str::to_string).collect(),
            rows,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
