//! `labmix history` - browse and inspect preparation records
//!
//! Read-only. Records are stored newest first; `show` accepts a full id or
//! a unique-enough prefix.

use labmix::{LabError, LabResult, PreparationRecord};

use super::Ctx;

pub fn list(ctx: &Ctx, limit: usize) -> LabResult<()> {
    let store = ctx.load_store()?;

    if ctx.json() {
        for record in store.history().iter().take(limit) {
            ctx.line(serde_json::to_value(record)?);
        }
        return Ok(());
    }

    if store.history().is_empty() {
        println!("No preparations recorded.");
        return Ok(());
    }
    println!(
        "{:<10}  {:<16}  {:<24}  {:<12}  {:>12}",
        "ID", "DATE", "TEMPLATE", "ANALYST", "TOTAL"
    );
    for r in store.history().iter().take(limit) {
        println!(
            "{:<10}  {:<16}  {:<24}  {:<12}  {:>9.2} uL",
            short_id(r),
            r.timestamp().format("%Y-%m-%d %H:%M"),
            r.template_name(),
            r.analyst(),
            r.total_volume()
        );
    }
    Ok(())
}

pub fn show(ctx: &Ctx, id: String) -> LabResult<()> {
    let store = ctx.load_store()?;
    let record = store
        .history()
        .iter()
        .find(|r| r.id().as_str() == id || r.id().as_str().starts_with(&id))
        .ok_or(LabError::NotFound {
            kind: "preparation",
            id: id.clone(),
        })?;

    if ctx.json() {
        ctx.line(serde_json::to_value(record)?);
        return Ok(());
    }

    println!("Preparation {}", record.id());
    println!("  template   {}", record.template_name());
    println!(
        "  batch      {} reactions + {} overage, {} uL each ({:.2} uL total)",
        record.num_reactions(),
        record.extra_reactions(),
        record.reaction_volume(),
        record.total_volume()
    );
    println!("  analyst    {}", record.analyst());
    println!(
        "  prepared   {}",
        record.timestamp().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  integrity  {} ({})",
        record.checksum(),
        if record.verify() { "verified" } else { "MISMATCH" }
    );
    println!();
    println!(
        "{:<24}  {:<10}  {:<18}  {:>12}  {:>12}",
        "COMPONENT", "LOT", "TARGET", "PER RXN", "TOTAL"
    );
    for c in record.reagents() {
        let target = format!(
            "{} -> {} {}",
            c.initial_concentration, c.target_concentration, c.unit
        );
        println!(
            "{:<24}  {:<10}  {:<18}  {:>9.4} uL  {:>9.3} uL",
            c.name, c.lot_number, target, c.volume_per_reaction, c.total_volume
        );
    }
    if record.water_volume() > 0.0 {
        println!("Water: {:.3} uL total", record.water_volume());
    }
    if !record.equipment().is_empty() {
        println!();
        println!("Equipment:");
        for e in record.equipment() {
            println!("  {} '{}'", e.category, e.name);
        }
    }
    Ok(())
}

fn short_id(record: &PreparationRecord) -> &str {
    let id = record.id().as_str();
    id.get(..8).unwrap_or(id)
}
