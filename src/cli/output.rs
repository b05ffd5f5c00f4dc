use std::collections::BTreeMap;

use serde::Serialize;

use crate::ops::stats::TaskStats;

#[derive(Serialize)]
pub struct ContextStatsJson {
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
    pub overdue: usize,
    pub priorities: BTreeMap<&'static str, usize>,
    pub contexts: Vec<ContextStatsJson>,
}

/// Round a percentage to one decimal place, matching the text report
fn round1(rate: f64) -> f64 {
    (rate * 10.0).round() / 10.0
}

pub fn stats_to_json(stats: &TaskStats) -> StatsJson {
    StatsJson {
        total: stats.total,
        completed: stats.completed,
        completion_rate: round1(stats.rate()),
        overdue: stats.overdue,
        priorities: stats
            .by_priority
            .iter()
            .map(|(p, n)| (p.label(), *n))
            .collect(),
        contexts: stats
            .contexts
            .iter()
            .map(|c| ContextStatsJson {
                name: c.name.clone(),
                total: c.total,
                completed: c.completed,
                completion_rate: round1(c.rate()),
            })
            .collect(),
    }
}
