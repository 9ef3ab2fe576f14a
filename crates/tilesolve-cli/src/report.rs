//! Plan reporting.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tilesolve_core::{Board, HeuristicKind, Plan};

use crate::cli::Format;

/// JSON document emitted for a solved instance.
#[derive(Debug, Serialize)]
struct Report<'a> {
    heuristic: HeuristicKind,
    cost: usize,
    actions: String,
    plan: &'a Plan<Board>,
}

/// Write a plan in the requested format.
pub fn write_plan<W: Write>(
    out: &mut W,
    plan: &Plan<Board>,
    heuristic: HeuristicKind,
    format: Format,
) -> Result<()> {
    match format {
        Format::Text => {
            write!(out, "{}", plan)?;
            let stats = plan.stats();
            writeln!(
                out,
                "expanded {} states, generated {}, time to solve {}ms",
                stats.expanded, stats.generated, stats.elapsed_ms
            )?;
        }
        Format::Json => {
            let report = Report {
                heuristic,
                cost: plan.cost(),
                actions: plan.actions().iter().map(|a| a.as_char()).collect(),
                plan,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
