use std::collections::HashMap;

use crate::domain::{AgentSummary, CaseRecord, TatStats};

/// Bucket label for records with no assignee.
pub const UNASSIGNED: &str = "Unassigned";

/// Derive one `AgentSummary` per distinct agent from the full record set.
///
/// A record counts as assigned (still outstanding) when its status contains
/// "not met", and as completed when its status equals "met"; both checks are
/// case-insensitive. Anything else contributes to the total only. Output is
/// sorted descending by total, ties kept in first-encounter order.
pub fn summarize_by_agent(records: &[CaseRecord]) -> Vec<AgentSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, AgentSummary> = HashMap::new();

    for record in records {
        let name = if record.agent.is_empty() {
            UNASSIGNED.to_string()
        } else {
            record.agent.clone()
        };

        let summary = buckets.entry(name.clone()).or_insert_with(|| {
            order.push(name.clone());
            AgentSummary {
                name,
                assigned_count: 0,
                urgent_count: 0,
                completed_count: 0,
                total_count: 0,
            }
        });

        summary.total_count += 1;
        if record.priority.eq_ignore_ascii_case("urgent") {
            summary.urgent_count += 1;
        }
        let status = record.status.to_lowercase();
        if status.contains("not met") {
            summary.assigned_count += 1;
        } else if status == "met" {
            summary.completed_count += 1;
        }
    }

    let mut summaries: Vec<AgentSummary> = order
        .into_iter()
        .filter_map(|name| buckets.remove(&name))
        .collect();
    // sort_by is stable, so equal totals keep first-encounter order
    summaries.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    summaries
}

/// Whole-set TAT compliance counts for the lead dashboard.
pub fn tat_stats(records: &[CaseRecord]) -> TatStats {
    let mut stats = TatStats::default();
    for record in records {
        stats.total += 1;
        let status = record.status.to_lowercase();
        if status.contains("not met") {
            stats.not_met += 1;
        } else if status == "met" {
            stats.met += 1;
        } else {
            stats.other += 1;
        }
        if record.priority.eq_ignore_ascii_case("urgent") {
            stats.urgent += 1;
        }
    }
    stats
}
