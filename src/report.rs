use std::io::{self, Write};

use crate::config::WITHDRAWAL_RATE_THRESHOLD;
use crate::summary::SummaryRow;
use crate::types::Age;

/// Renderer-side classification of a single percentile/extremum cell.
/// Rows before retirement are always healthy; the engine itself never looks
/// at this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    /// The scenario population at this rank is wiped out.
    Depleted,
    /// The balance no longer safely covers the annual withdrawal
    /// (value × threshold ≤ withdrawal).
    AtRisk,
    Healthy,
}

pub fn cell_status(
    age: Age,
    retirement_age: Age,
    value: f64,
    annual_withdrawal: f64,
) -> CellStatus {
    if age < retirement_age {
        CellStatus::Healthy
    } else if value == 0.0 {
        CellStatus::Depleted
    } else if value * WITHDRAWAL_RATE_THRESHOLD <= annual_withdrawal {
        CellStatus::AtRisk
    } else {
        CellStatus::Healthy
    }
}

fn cell_mark(status: CellStatus) -> &'static str {
    match status {
        CellStatus::Depleted => "!",
        CellStatus::AtRisk => "*",
        CellStatus::Healthy => "",
    }
}

/// Render the result table as an aligned text grid.
///
/// The retirement-age row is marked with `>` and skips per-cell flags; from
/// retirement onward, depleted cells carry `!` and at-risk cells `*`.
pub fn write_table(
    out: &mut impl Write,
    rows: &[SummaryRow],
    retirement_age: Age,
    annual_withdrawal: f64,
) -> io::Result<()> {
    writeln!(
        out,
        "{:>5} | {:>13} | {:>13} | {:>13} | {:>13} | {:>13} | {:>13} | {:>8}",
        "Age", "Worst", "25th", "Median", "75th", "90th", "Best", "Success"
    )?;
    writeln!(out, "{}", "-".repeat(5 + 6 * 16 + 3 + 11))?;

    for row in rows {
        let marker = if row.age == retirement_age { ">" } else { " " };
        let cell = |value: f64| -> String {
            let status = if row.age == retirement_age {
                CellStatus::Healthy
            } else {
                cell_status(row.age, retirement_age, value, annual_withdrawal)
            };
            format!("{:.2}{}", value, cell_mark(status))
        };
        writeln!(
            out,
            "{marker}{:>4} | {:>13} | {:>13} | {:>13} | {:>13} | {:>13} | {:>13} | {:>7.2}%",
            row.age,
            cell(row.worst),
            cell(row.p25),
            cell(row.median),
            cell(row.p75),
            cell(row.p90),
            cell(row.best),
            row.success_percent,
        )?;
    }

    writeln!(out)?;
    writeln!(out, "> retirement age   ! depleted   * withdrawal at risk")?;
    Ok(())
}

/// One CSV line per row, machine-readable counterpart of the table.
pub fn write_csv(out: &mut impl Write, rows: &[SummaryRow]) -> io::Result<()> {
    writeln!(out, "age,worst,p25,median,p75,p90,best,success_percent")?;
    for r in rows {
        writeln!(
            out,
            "{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.4}",
            r.age, r.worst, r.p25, r.median, r.p75, r.p90, r.best, r.success_percent
        )?;
    }
    Ok(())
}

/// One JSON object per line (NDJSON), camelCase fields.
pub fn write_ndjson(out: &mut impl Write, rows: &[SummaryRow]) -> io::Result<()> {
    for r in rows {
        serde_json::to_writer(&mut *out, r)?;
        writeln!(out)?;
    }
    Ok(())
}
