use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::processor::Analysis;
use crate::types::ClassifiedBill;

/// Write the whole analysis as pretty-printed JSON
pub fn write_report(path: &Path, analysis: &Analysis) -> Result<()> {
    let json = serde_json::to_string_pretty(analysis).context("Failed to serialize analysis")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write report: {}", path.display()))
}

/// Write one JSON object per classified bill, in input order
pub fn write_bills(path: &Path, bills: &[ClassifiedBill]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create bills file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for bill in bills {
        serde_json::to_writer(&mut writer, bill)
            .with_context(|| format!("Failed to serialize bill: {}", bill.record.name))?;
        writer.write_all(b"\n")?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write bills file: {}", path.display()))
}

/// Plain-text summary for terminals
pub fn render_summary(analysis: &Analysis) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_summary(&mut out, analysis);
    out
}

fn write_summary(out: &mut String, analysis: &Analysis) -> std::fmt::Result {
    let overview = &analysis.overview;
    writeln!(
        out,
        "Bills: {} rows ({} skipped), {} relevant, {} passed, {} in analysis population",
        overview.total_rows,
        overview.skipped_rows,
        overview.relevant_rows,
        overview.passed_rows,
        overview.population_size
    )?;
    if let Some(range) = overview.date_range {
        writeln!(out, "Dates: {} to {}", range.earliest, range.latest)?;
    }

    let inequity = &analysis.inequity;
    writeln!(
        out,
        "Jurisdictions: {}, mean score {:.2}, inequity index {:.3}, CV {:.3}",
        inequity.jurisdictions_analyzed,
        inequity.mean_score,
        inequity.inequity_index,
        inequity.coefficient_of_variation
    )?;
    let tiers: Vec<String> = inequity
        .tiers
        .iter()
        .map(|share| format!("{}: {} ({:.1}%)", share.label, share.count, share.percentage))
        .collect();
    writeln!(out, "Tiers: {}", tiers.join(", "))?;

    writeln!(out)?;
    writeln!(out, "Provision adoption ({}):", analysis.consensus.scheme.name())?;
    for stat in &analysis.consensus.stats {
        writeln!(
            out,
            "  {:<28}{:>3}{:>7.1}%  {}",
            stat.label, stat.jurisdiction_count, stat.percentage, stat.consensus_tier
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Federalism:")?;
    for entry in &analysis.federalism {
        writeln!(out, "  {:<28}{}", entry.provision.label(), entry.recommendation)?;
    }

    if !inequity.ranking.is_empty() {
        writeln!(out)?;
        writeln!(out, "Ranking:")?;
        for ranked in &inequity.ranking {
            writeln!(
                out,
                "  {:>2}. {:<8}{} ({:?})",
                ranked.rank, ranked.code, ranked.score, ranked.tier
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Evidence gaps:")?;
    for gap in &analysis.evidence_gaps {
        writeln!(
            out,
            "  {:<24}{:>6.1}%  {:?}",
            gap.area, gap.gap_percentage, gap.priority
        )?;
    }

    if let Some(federal) = &analysis.federal {
        writeln!(out)?;
        writeln!(
            out,
            "Federal: {} passed of {} relevant, state/federal ratio {:.1}",
            federal.federal_passed, federal.federal_relevant, federal.ratio
        )?;
    }

    Ok(())
}
