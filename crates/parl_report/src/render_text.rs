//! Plain-text renderer (terminal tables).
//!
//! Section order: constraints → results (with) → results (without) →
//! comparison → summary → observations. Numbers use `,` thousands separators;
//! percentages two decimals, ratios three.

use std::fmt::Write;

use parl_pipeline::Comparison;

use crate::structure::{build_report, AdvisoryEcho, ComparisonReport, ResultRow};
use crate::ReportError;

const RULE_WIDTH: usize = 80;

/// Render the full comparison report as text.
pub fn render_text(cmp: &Comparison) -> Result<String, ReportError> {
    let report = build_report(cmp)?;
    let mut out = String::with_capacity(4096);
    write_report(&mut out, &report)?;
    Ok(out)
}

fn write_report(out: &mut String, r: &ComparisonReport) -> Result<(), ReportError> {
    let p = &r.params;
    writeln!(out, "=== D'HONDT SEAT ALLOCATION ===")?;
    writeln!(out, "Chamber: {} seats", p.total_seats)?;
    writeln!(out, "Valid votes cast: {}", group(p.total_votes))?;

    write_constraints(out, "with coalitions", &r.advisory_with, r)?;
    write_constraints(out, "without coalitions", &r.advisory_without, r)?;

    write_results(out, "RESULTS WITH COALITIONS", &r.results_with)?;
    write_results(out, "RESULTS WITHOUT COALITIONS", &r.results_without)?;

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "COMPARISON: WITH COALITIONS VS WITHOUT")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{:<9} | {:>6} | {:>9} | {:>10} | Advantage", "Party", "With", "Without", "Difference")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for row in &r.comparison {
        writeln!(
            out,
            "{:<9} | {:>6} | {:>9} | {:>+10} | {}",
            row.name.as_str(),
            row.seats_with,
            row.seats_without,
            row.difference,
            row.advantage
        )?;
    }

    let s = &r.summary;
    writeln!(out)?;
    writeln!(out, "Summary")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(out, "Seats awarded (with coalitions):     {}", s.seats_with)?;
    writeln!(out, "Seats awarded (without coalitions):  {}", s.seats_without)?;
    writeln!(out, "Entities (with coalitions):          {}", s.entities_with)?;
    writeln!(out, "Entities (without coalitions):       {}", s.entities_without)?;
    writeln!(out, "Mean efficiency (with coalitions):   {:.3}", s.mean_efficiency_with)?;
    writeln!(out, "Mean efficiency (without coalitions): {:.3}", s.mean_efficiency_without)?;

    write_observations(out, r)?;
    Ok(())
}

fn write_constraints(out: &mut String, label: &str, a: &AdvisoryEcho, r: &ComparisonReport) -> Result<(), ReportError> {
    writeln!(out)?;
    writeln!(out, "Constraints ({label}, advisory only)")?;
    writeln!(out, "  Entry threshold:   {:.2}% ({} votes)", r.params.min_threshold_pct, group(a.min_votes))?;
    writeln!(out, "  Max vote share:    {:.2}% ({} votes)", r.params.max_vote_share_pct, group(a.max_votes))?;
    writeln!(out, "  Max top-two gap:   {:.2}% ({} votes)", r.params.max_top_two_gap_pct, group(a.max_gap_votes))?;
    if let Some((first, second)) = &a.top_two {
        writeln!(out, "  Top two: {} and {} (gap {} votes)", first.as_str(), second.as_str(), group(a.top_two_gap))?;
    }
    if a.max_share_exceeded {
        writeln!(out, "  ! a top-two entity exceeds the max vote share")?;
    }
    if a.top_two_gap_exceeded {
        writeln!(
            out,
            "  ! top-two gap exceeds the limit (actual {}, max {})",
            group(a.top_two_gap),
            group(a.max_gap_votes)
        )?;
    }
    Ok(())
}

fn write_results(out: &mut String, title: &str, rows: &[ResultRow]) -> Result<(), ReportError> {
    writeln!(out)?;
    writeln!(out, "=== {title} ===")?;
    writeln!(
        out,
        "{:<9} | {:>11} | {:>7} | {:>5} | {:>7} | {:>10} | {:>10}",
        "Party", "Votes", "%", "Seats", "% Seats", "Votes/Seat", "Efficiency"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for row in rows {
        writeln!(
            out,
            "{:<9} | {:>11} | {:>7.2} | {:>5} | {:>7.2} | {:>10} | {:>10.3}",
            row.name.as_str(),
            group(row.votes),
            row.vote_pct,
            row.seats,
            row.seat_pct,
            group(row.votes_per_seat.round() as u64),
            row.efficiency
        )?;
    }
    Ok(())
}

fn write_observations(out: &mut String, r: &ComparisonReport) -> Result<(), ReportError> {
    writeln!(out)?;
    writeln!(out, "{}", "~".repeat(RULE_WIDTH))?;
    writeln!(out, "OBSERVATIONS")?;
    writeln!(out, "{}", "~".repeat(RULE_WIDTH))?;

    writeln!(out, "1. Coalition impact")?;
    if r.coalition_impact.is_empty() {
        writeln!(out, "  - no coalitions declared")?;
    }
    for c in &r.coalition_impact {
        let members: Vec<&str> = c.members.iter().map(|m| m.as_str()).collect();
        writeln!(out, "  - {} ({}) won {} seats as a coalition", c.coalition.as_str(), members.join(" + "), c.seats_as_coalition)?;
        writeln!(out, "  - its members won {} seats running separately", c.seats_separately)?;
        writeln!(out, "  - net coalition effect: {:+} seats", c.net)?;
        if c.advantageous {
            writeln!(out, "  → the coalition paid off")?;
        } else {
            writeln!(out, "  → the coalition brought no seat advantage")?;
        }
    }
    for e in &r.estimates {
        writeln!(
            out,
            "  - illustrative estimate (rule of thumb, not D'Hondt): {} ~{} seats if separate ({:+} vs coalition result)",
            e.coalition.as_str(),
            e.estimate,
            e.vs_estimate
        )?;
    }

    let t = &r.threshold_effect;
    writeln!(out)?;
    writeln!(out, "2. Entry threshold ({} votes)", group(t.threshold_votes))?;
    writeln!(out, "  - excluded with coalitions:    {}", t.excluded_with.len())?;
    writeln!(out, "  - excluded without coalitions: {}", t.excluded_without.len())?;
    if t.coalitions_matter() {
        writeln!(out, "  → coalitions change who clears the threshold")?;
    }

    writeln!(out)?;
    writeln!(out, "3. Large-party bias (mean efficiency)")?;
    for b in &r.bias {
        writeln!(out, "  - {}: top two {:.3}, others {:.3}", b.scenario, b.top_two, b.rest)?;
    }
    if r.bias.iter().any(|b| b.favours_large()) {
        writeln!(out, "  → D'Hondt favours the largest entities")?;
    }
    Ok(())
}

/// `1234567` → `"1,234,567"`.
/// Always `,` every three digits; no locale.
pub(crate) fn group(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
