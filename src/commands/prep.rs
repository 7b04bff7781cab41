//! `labmix prep` - calculate a batch and register the preparation record
//!
//! The one command that writes history. Calculation and rendering are
//! side-effect free; the record is only created after the operator confirms
//! (or passes `--yes`), and `--dry-run` stops before the confirmation gate.

use std::fmt::Write as _;

use dialoguer::Confirm;
use is_terminal::IsTerminal;
use labmix::sync::AuditEvent;
use labmix::{
    calculate_batch, BatchResult, LabError, LabResult, MixProtocol, PreparationRecord, Strictness,
};

use super::Ctx;

#[allow(clippy::too_many_arguments)]
pub fn run(
    ctx: &Ctx,
    protocol: String,
    reactions: f64,
    overage: f64,
    volume: f64,
    analyst: String,
    yes: bool,
    dry_run: bool,
    strict: bool,
) -> LabResult<()> {
    let mut store = ctx.load_store()?;
    let protocol = store
        .find_protocol(&protocol)
        .cloned()
        .ok_or(LabError::NotFound {
            kind: "protocol",
            id: protocol,
        })?;

    let strictness = if strict {
        Strictness::Strict
    } else {
        ctx.config.calculator.strictness
    };

    let total_reactions = reactions + overage;
    let batch = calculate_batch(&protocol, &store, total_reactions, volume, strictness)?;

    for warning in &batch.warnings {
        eprintln!("warning: {warning}");
    }

    if ctx.json() {
        ctx.line(serde_json::json!({
            "protocol": protocol.name,
            "total_reactions": total_reactions,
            "reaction_volume": volume,
            "batch": batch,
        }));
    } else {
        print!("{}", render_batch(&protocol, &batch, reactions, overage, volume));
    }

    if dry_run {
        return Ok(());
    }

    if !yes && !confirm_registration()? {
        return Err(LabError::Aborted);
    }

    let equipment = store.equipment().to_vec();
    let record = PreparationRecord::finalize(
        &batch, &protocol, &equipment, &analyst, reactions, overage, volume,
    )?;
    store.push_record(record.clone());
    ctx.save_store(&store)?;
    ctx.emit(AuditEvent::PreparationCreated(Box::new(record.clone())));

    if !ctx.json() {
        println!();
        println!(
            "Registered preparation {} for '{}' by {} ({:.2} uL total)",
            record.id(),
            record.template_name(),
            record.analyst(),
            record.total_volume()
        );
    }
    Ok(())
}

/// Ask the operator before touching history. Refuses in non-interactive
/// contexts; scripts must pass `--yes`.
fn confirm_registration() -> LabResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(LabError::Aborted);
    }
    Confirm::new()
        .with_prompt("Register this preparation?")
        .default(false)
        .interact()
        .map_err(|e| LabError::Io(std::io::Error::other(e)))
}

/// Render the pipetting table for one calculated batch
fn render_batch(
    protocol: &MixProtocol,
    batch: &BatchResult,
    reactions: f64,
    overage: f64,
    volume: f64,
) -> String {
    let total = reactions + overage;
    let mut out = String::new();
    let _ = writeln!(out, "Protocol: {}", protocol.name);
    let _ = writeln!(
        out,
        "Batch:    {reactions} reactions + {overage} overage = {total} x {volume} uL = {:.2} uL total",
        total * volume
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<24}  {:<10}  {:<18}  {:>12}  {:>12}",
        "COMPONENT", "LOT", "TARGET", "PER RXN", "TOTAL"
    );
    for c in &batch.components {
        let target = format!(
            "{} -> {} {}",
            c.initial_concentration, c.target_concentration, c.unit
        );
        let _ = writeln!(
            out,
            "{:<24}  {:<10}  {:<18}  {:>9.4} uL  {:>9.3} uL",
            c.name, c.lot_number, target, c.volume_per_reaction, c.total_volume
        );
    }
    if batch.water_per_reaction > 0.0 {
        let _ = writeln!(
            out,
            "{:<24}  {:<10}  {:<18}  {:>9.4} uL  {:>9.3} uL",
            "Water", "-", "-", batch.water_per_reaction, batch.total_water
        );
    }
    out
}
