use crate::stats::{StatsRecord, display_or_na};

/// Stat labels in banner order. `Time Played` is not here; it gets its
/// own bottom-right slot.
const STAT_LABELS: [&str; 9] = [
    "K/D",
    "Kills",
    "Deaths",
    "Wins",
    "Loses",
    "Accuracy",
    "BestClass",
    "Revives",
    "Kill Assists",
];

/// The stat panel content after the best-class override has (or has
/// not) been applied, plus the icon to fetch when it has.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStats {
    /// Exactly 9 `(label, value)` lines for the 3-column panel.
    pub lines: Vec<(&'static str, String)>,
    pub time_played: String,
    pub icon_url: Option<String>,
}

/// Apply the best-class override rule: headline K/D, Kills, Deaths, and
/// the displayed class name come from `classes[bestClass]` only when
/// that index is valid and the class's K/D is strictly positive. The
/// positivity guard keeps an unplayed class's zero/undefined K/D from
/// replacing real top-level numbers.
pub fn resolve_stats(record: &StatsRecord) -> ResolvedStats {
    let mut kd = display_or_na(record.kill_death.as_ref());
    let mut kills = display_or_na(record.kills.as_ref());
    let mut deaths = display_or_na(record.deaths.as_ref());
    let mut best_class = display_or_na(record.best_class.as_ref());
    let mut icon_url = None;

    if let Some(class) = record
        .best_class_index()
        .and_then(|idx| record.classes.get(idx))
    {
        if class.kill_death.is_some_and(|v| v > 0.0) {
            kd = display_or_na(class.kill_death.as_ref());
            kills = display_or_na(class.kills.as_ref());
            deaths = display_or_na(class.deaths.as_ref());
            best_class = display_or_na(class.class_name.as_ref());
            icon_url = class.image.clone();
        }
    }

    let values = [
        kd,
        kills,
        deaths,
        display_or_na(record.wins.as_ref()),
        display_or_na(record.loses.as_ref()),
        display_or_na(record.accuracy.as_ref()),
        best_class,
        display_or_na(record.revives.as_ref()),
        display_or_na(record.kill_assists.as_ref()),
    ];

    ResolvedStats {
        lines: STAT_LABELS.into_iter().zip(values).collect(),
        time_played: display_or_na(record.time_played.as_ref()),
        icon_url,
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_stats;
    use crate::stats::{ClassStat, StatValue, StatsRecord};

    fn record_with_classes(best: i64, second_kd: f64) -> StatsRecord {
        StatsRecord {
            has_results: true,
            kill_death: Some(1.1),
            kills: Some(300),
            deaths: Some(280),
            best_class: Some(StatValue::Int(best)),
            classes: vec![
                ClassStat {
                    class_name: Some("Recon".to_string()),
                    kill_death: Some(0.5),
                    kills: Some(12),
                    deaths: Some(24),
                    image: None,
                },
                ClassStat {
                    class_name: Some("Assault".to_string()),
                    kill_death: Some(second_kd),
                    kills: Some(50),
                    deaths: Some(28),
                    image: Some("https://cdn.example/assault.png".to_string()),
                },
            ],
            ..StatsRecord::default()
        }
    }

    fn line<'a>(resolved: &'a super::ResolvedStats, label: &str) -> &'a str {
        resolved
            .lines
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .expect("label present")
    }

    #[test]
    fn positive_best_class_overrides_headline_stats() {
        let resolved = resolve_stats(&record_with_classes(1, 1.8));
        assert_eq!(line(&resolved, "K/D"), "1.8");
        assert_eq!(line(&resolved, "Kills"), "50");
        assert_eq!(line(&resolved, "Deaths"), "28");
        assert_eq!(line(&resolved, "BestClass"), "Assault");
        assert_eq!(
            resolved.icon_url.as_deref(),
            Some("https://cdn.example/assault.png")
        );
    }

    #[test]
    fn zero_kd_best_class_is_ignored() {
        let resolved = resolve_stats(&record_with_classes(1, 0.0));
        assert_eq!(line(&resolved, "K/D"), "1.1");
        assert_eq!(line(&resolved, "Kills"), "300");
        assert_eq!(line(&resolved, "BestClass"), "1");
        assert_eq!(resolved.icon_url, None);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let resolved = resolve_stats(&record_with_classes(9, 1.8));
        assert_eq!(line(&resolved, "K/D"), "1.1");
        assert_eq!(resolved.icon_url, None);
    }

    #[test]
    fn non_integer_best_class_never_overrides() {
        let mut record = record_with_classes(1, 1.8);
        record.best_class = Some(StatValue::Text("Assault".to_string()));
        let resolved = resolve_stats(&record);
        assert_eq!(line(&resolved, "K/D"), "1.1");
        // The raw scalar still shows up as the display value.
        assert_eq!(line(&resolved, "BestClass"), "Assault");
    }

    #[test]
    fn empty_record_renders_na_everywhere() {
        let resolved = resolve_stats(&StatsRecord::default());
        assert_eq!(resolved.lines.len(), 9);
        assert!(resolved.lines.iter().all(|(_, v)| v == "N/A"));
        assert_eq!(resolved.time_played, "N/A");
    }
}
