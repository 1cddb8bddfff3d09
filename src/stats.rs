use std::fmt;

use serde::Deserialize;

/// Loosely typed scalar the stats API uses for fields that may arrive as
/// a number or a pre-formatted string (`accuracy`, `timePlayed`,
/// `bestClass`). Variant order matters: integers must not parse as floats.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{v}"),
            StatValue::Float(v) => write!(f, "{v}"),
            StatValue::Text(v) => f.write_str(v),
        }
    }
}

/// Multiplayer stats payload for one player. Every field is optional;
/// the API omits anything it has no data for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    pub has_results: bool,
    pub kill_death: Option<f64>,
    pub kills: Option<i64>,
    pub deaths: Option<i64>,
    pub wins: Option<i64>,
    pub loses: Option<i64>,
    pub revives: Option<i64>,
    pub kill_assists: Option<i64>,
    pub accuracy: Option<StatValue>,
    pub time_played: Option<StatValue>,
    pub best_class: Option<StatValue>,
    pub classes: Vec<ClassStat>,
}

/// Per-class breakdown entry from the `classes` array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassStat {
    pub class_name: Option<String>,
    pub kill_death: Option<f64>,
    pub kills: Option<i64>,
    pub deaths: Option<i64>,
    pub image: Option<String>,
}

impl StatsRecord {
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// `bestClass` only acts as an index into `classes` when the API sent
    /// an actual non-negative integer; as a display value it can be
    /// anything.
    pub fn best_class_index(&self) -> Option<usize> {
        match &self.best_class {
            Some(StatValue::Int(idx)) if *idx >= 0 => Some(*idx as usize),
            _ => None,
        }
    }
}

/// Render an optional stat as its value or `N/A`.
pub fn display_or_na<T: fmt::Display>(value: Option<&T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{StatValue, StatsRecord, display_or_na};

    #[test]
    fn parses_camel_case_payload() {
        let raw = r#"{
            "hasResults": true,
            "killDeath": 1.42,
            "kills": 3120,
            "killAssists": 511,
            "accuracy": "21.4%",
            "timePlayed": "4d 11h",
            "bestClass": 1,
            "classes": [{"className": "Assault", "killDeath": 1.8, "kills": 50, "deaths": 28}]
        }"#;
        let record = StatsRecord::parse(raw).expect("payload parses");
        assert!(record.has_results);
        assert_eq!(record.kill_death, Some(1.42));
        assert_eq!(record.kill_assists, Some(511));
        assert_eq!(record.accuracy, Some(StatValue::Text("21.4%".to_string())));
        assert_eq!(record.best_class_index(), Some(1));
        assert_eq!(record.classes[0].class_name.as_deref(), Some("Assault"));
        // Fields the payload omitted stay None.
        assert_eq!(record.wins, None);
        assert_eq!(record.revives, None);
    }

    #[test]
    fn best_class_index_requires_integer() {
        let mut record = StatsRecord::default();
        record.best_class = Some(StatValue::Text("Assault".to_string()));
        assert_eq!(record.best_class_index(), None);
        record.best_class = Some(StatValue::Int(-1));
        assert_eq!(record.best_class_index(), None);
        record.best_class = Some(StatValue::Int(0));
        assert_eq!(record.best_class_index(), Some(0));
    }

    #[test]
    fn stat_values_format_like_the_source() {
        assert_eq!(StatValue::Int(42).to_string(), "42");
        assert_eq!(StatValue::Float(1.8).to_string(), "1.8");
        assert_eq!(StatValue::Text("4d 11h".into()).to_string(), "4d 11h");
        assert_eq!(display_or_na::<i64>(None), "N/A");
        assert_eq!(display_or_na(Some(&7i64)), "7");
    }

    #[test]
    fn null_fields_deserialize_as_absent() {
        let record = StatsRecord::parse(r#"{"hasResults": true, "kills": null}"#).unwrap();
        assert_eq!(record.kills, None);
    }
}
