use crate::accountability::domain::AttendanceRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct AttendanceRow {
    pub(crate) leader_key: String,
    pub(crate) record: AttendanceRecord,
    pub(crate) adjusted_total: bool,
}

/// Parses a sitting register export (`Leader ID,Period,Present,Absent,Total`).
///
/// A missing total is taken as `present + absent`; a total smaller than that
/// is raised to it so every record keeps `present + absent <= total`.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<AttendanceRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RegisterRow>() {
        let row = record?;
        let leader_key = normalize_key(&row.leader_id);
        if leader_key.is_empty() {
            continue;
        }

        let present = row.present.unwrap_or(0);
        let absent = row.absent.unwrap_or(0);
        let recorded = present.saturating_add(absent);
        let total = row.total.unwrap_or(recorded);

        rows.push(AttendanceRow {
            leader_key,
            record: AttendanceRecord {
                period: row.period.unwrap_or_default(),
                present,
                absent,
                total: total.max(recorded),
            },
            adjusted_total: total < recorded,
        });
    }

    Ok(rows)
}

pub(crate) fn normalize_key(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}'], "")
        .trim()
        .to_ascii_lowercase()
}

#[derive(Debug, Deserialize)]
struct RegisterRow {
    #[serde(rename = "Leader ID")]
    leader_id: String,
    #[serde(rename = "Period", default, deserialize_with = "empty_string_as_none")]
    period: Option<String>,
    #[serde(rename = "Present", default)]
    present: Option<u32>,
    #[serde(rename = "Absent", default)]
    absent: Option<u32>,
    #[serde(rename = "Total", default)]
    total: Option<u32>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
