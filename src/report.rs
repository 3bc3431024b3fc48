use agari::stats::{Row, Stats};
use agari::tile::Variant;
use std::fmt::Write;
use anyhow::Result;
use console::style;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    variant: Variant,
    records: u64,
    total_combinations: u64,
    pattern_combinations: u64,
    total_score: u64,
    average: Option<f64>,
    patterns: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    name: &'a str,
    #[serde(flatten)]
    row: Row,
    average: Option<f64>,
}

fn fmt_average(avg: Option<f64>) -> String {
    avg.map_or_else(|| "n/a".to_owned(), |a| format!("{a:.3}"))
}

/// Overall average, one line per pattern and the record count.
pub fn to_text(stats: &Stats) -> String {
    let mut s = String::new();
    writeln!(s, "average score: {}", fmt_average(stats.average())).ok();

    let header = format!(
        "{:<26} {:>12} {:>22} {:>10}",
        "pattern", "hands", "combinations", "average",
    );
    writeln!(s, "{}", style(header).bold()).ok();
    for (yaku, row) in stats.rows() {
        writeln!(
            s,
            "{:<26} {:>12} {:>22} {:>10}",
            yaku.name(),
            row.hands,
            row.combinations,
            fmt_average(row.average()),
        )
        .ok();
    }
    writeln!(s, "{}", stats.records()).ok();
    s
}

pub fn to_json(stats: &Stats) -> Result<String> {
    let report = JsonReport {
        variant: stats.variant(),
        records: stats.records(),
        total_combinations: stats.total_combinations(),
        pattern_combinations: stats.pattern_combinations(),
        total_score: stats.total_score(),
        average: stats.average(),
        patterns: stats
            .rows()
            .map(|(yaku, row)| JsonRow {
                name: yaku.name(),
                row,
                average: row.average(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use agari::algo::yaku::Yaku;
    use agari::hand::hand;

    fn stats() -> Stats {
        let v = Variant::Four;
        let mut stats = Stats::new(v);
        for s in ["99s 234s 345m 456p 678m", "EE 89s 1m 234m 567p 999p"] {
            stats.add_hand(&hand(v, s).unwrap());
        }
        stats
    }

    #[test]
    pub fn text_report() {
        let stats = stats();
        let text = to_text(&stats);
        let lines: Vec<_> = text.lines().collect();

        // header, one line per pattern, record count
        assert_eq!(lines.len(), 2 + Yaku::catalog(Variant::Four).len() + 1);
        assert_eq!(lines[0], format!("average score: {:.3}", stats.average().unwrap()));
        assert!(lines[1].contains("combinations"));
        assert!(lines[2].starts_with("No Pattern"));
        assert!(lines[3].starts_with("All Runs"));
        assert!(lines[3].ends_with("5.000"));
        assert!(lines[4].ends_with("n/a"));
        assert_eq!(lines.last(), Some(&"2"));
    }

    #[test]
    pub fn json_report() {
        let stats = stats();
        let v: serde_json::Value = serde_json::from_str(&to_json(&stats).unwrap()).unwrap();
        assert_eq!(v["variant"], "four");
        assert_eq!(v["records"], 2);
        assert_eq!(v["pattern_combinations"], stats.pattern_combinations());
        let patterns = v["patterns"].as_array().unwrap();
        assert_eq!(patterns.len(), Yaku::catalog(Variant::Four).len());
        assert_eq!(patterns[1]["name"], "All Runs");
        assert_eq!(patterns[1]["hands"], 1);
        assert_eq!(patterns[1]["average"], 5.0);
        assert!(patterns[2]["average"].is_null());
        assert_eq!(patterns[0]["score_sum"], 0);
    }
}
