//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

use super::config::{SimConfig, UpgradePolicy};
use super::runner::RunStats;
use crate::combat::types::Tier;
use crate::error::Result;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub tier: Tier,
    pub accuracy: f64,
    pub upgrade_policy: UpgradePolicy,
    pub battles_per_run: u32,

    pub total_battles: u64,
    pub win_rate: f64,
    pub defeat_rate: f64,
    pub timeout_rate: f64,
    pub avg_rounds_per_battle: f64,

    pub avg_final_level: f64,
    pub avg_final_gold: f64,
    pub avg_final_score: f64,
    pub avg_items_found: f64,
    pub avg_potions_used: f64,

    pub level_distribution: BTreeMap<u32, u32>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub runs: Vec<RunStats>,
}

fn average(runs: &[RunStats], value: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(value).sum::<f64>() / runs.len() as f64
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(config: &SimConfig, runs: Vec<RunStats>) -> Self {
        let total_battles: u64 = runs.iter().map(|r| r.battles as u64).sum();
        let victories: u64 = runs.iter().map(|r| r.victories as u64).sum();
        let defeats: u64 = runs.iter().map(|r| r.defeats as u64).sum();
        let timeouts: u64 = runs.iter().map(|r| r.timeouts as u64).sum();
        let rounds: u64 = runs.iter().map(|r| r.total_rounds).sum();

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        Self {
            num_runs: runs.len() as u32,
            tier: config.tier,
            accuracy: config.clamped_accuracy(),
            upgrade_policy: config.upgrade_policy,
            battles_per_run: config.battles_per_run,
            total_battles,
            win_rate: ratio(victories, total_battles),
            defeat_rate: ratio(defeats, total_battles),
            timeout_rate: ratio(timeouts, total_battles),
            avg_rounds_per_battle: ratio(rounds, total_battles),
            avg_final_level: average(&runs, |r| r.final_level as f64),
            avg_final_gold: average(&runs, |r| r.final_gold as f64),
            avg_final_score: average(&runs, |r| r.final_score as f64),
            avg_items_found: average(&runs, |r| r.items_found as f64),
            avg_potions_used: average(&runs, |r| r.potions_used as f64),
            level_distribution,
            runs,
        }
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 QUIZ BATTLE SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} x {} battles | Tier: {} | Accuracy: {:.0}% | Upgrades: {}\n\n",
            self.num_runs,
            self.battles_per_run,
            self.tier,
            self.accuracy * 100.0,
            self.upgrade_policy
        ));

        report.push_str("── BATTLES ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Total Battles:       {}\n", self.total_battles));
        report.push_str(&format!("  Win Rate:            {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Defeat Rate:         {:.1}%\n", self.defeat_rate * 100.0));
        report.push_str(&format!("  Timeout Rate:        {:.1}%\n", self.timeout_rate * 100.0));
        report.push_str(&format!(
            "  Avg Rounds/Battle:   {:.1}\n\n",
            self.avg_rounds_per_battle
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Final Gold:      {:.0}\n", self.avg_final_gold));
        report.push_str(&format!("  Avg Final Score:     {:.0}\n", self.avg_final_score));
        report.push_str(&format!("  Avg Items Found:     {:.1}\n", self.avg_items_found));
        report.push_str(&format!("  Avg Potions Used:    {:.1}\n\n", self.avg_potions_used));

        report.push_str("── FINAL LEVELS ─────────────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = ratio(*count as u64, self.num_runs as u64) * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Lv {:3}: {:>5.1}% {}\n", level, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.win_rate > 0.95 {
            "TOO EASY - Players almost never lose"
        } else if self.win_rate > 0.6 {
            "GOOD - Challenging but fair"
        } else if self.win_rate > 0.3 {
            "HARD - Frequent defeats"
        } else {
            "TOO HARD - Most battles are lost"
        };
        report.push_str(&format!("  Rating: {}\n", rating));
        if self.timeout_rate > 0.0 {
            report.push_str("  ⚠️  Some battles hit the round limit - enemy HP too high?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(victories: u32, defeats: u32, final_level: u32) -> RunStats {
        RunStats {
            battles: victories + defeats,
            victories,
            defeats,
            total_rounds: (victories + defeats) as u64 * 5,
            final_level,
            final_gold: 100,
            ..Default::default()
        }
    }

    #[test]
    fn test_report_generation() {
        let config = SimConfig::tier_test(Tier::Hard, 0.8);
        let report = SimReport::from_runs(&config, vec![run(8, 2, 3), run(6, 4, 2)]);
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.total_battles, 20);
        assert!((report.win_rate - 0.7).abs() < 1e-9);
        assert!((report.avg_rounds_per_battle - 5.0).abs() < 1e-9);
        assert!((report.avg_final_level - 2.5).abs() < 1e-9);
        assert_eq!(report.level_distribution.get(&3), Some(&1));

        let text = report.to_text();
        assert!(text.contains("Win Rate:            70.0%"));
        assert!(text.contains("Tier: hard"));
    }

    #[test]
    fn test_json_report() {
        let config = SimConfig::tier_test(Tier::Boss, 0.5);
        let report = SimReport::from_runs(&config, vec![run(1, 1, 1)]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["tier"], "boss");
        assert_eq!(value["upgrade_policy"], "balanced");
        assert_eq!(value["total_battles"], 2);
        assert!(value.get("runs").is_none());
    }

    #[test]
    fn test_empty_report_has_no_nan() {
        let report = SimReport::from_runs(&SimConfig::default(), Vec::new());
        assert_eq!(report.win_rate, 0.0);
        assert_eq!(report.avg_final_level, 0.0);
    }
}
