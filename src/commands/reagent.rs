//! `labmix reagent` - inventory management

use labmix::sync::AuditEvent;
use labmix::{LabError, LabResult, Reagent};

use super::Ctx;

pub fn add(
    ctx: &Ctx,
    name: String,
    concentration: f64,
    unit: String,
    lot: Option<String>,
) -> LabResult<()> {
    let mut store = ctx.load_store()?;
    let mut reagent = Reagent::new(name, concentration, unit);
    if let Some(lot) = lot {
        reagent = reagent.with_lot(lot);
    }
    store.upsert_reagent(reagent.clone());
    ctx.save_store(&store)?;
    ctx.emit(AuditEvent::ReagentUpserted(reagent.clone()));

    if !ctx.json() {
        println!(
            "Added reagent '{}' ({} {}, lot {}) with id {}",
            reagent.name, reagent.initial_concentration, reagent.unit, reagent.lot_number,
            reagent.id
        );
    }
    Ok(())
}

pub fn list(ctx: &Ctx) -> LabResult<()> {
    let store = ctx.load_store()?;

    if ctx.json() {
        for reagent in store.reagents() {
            ctx.line(serde_json::to_value(reagent)?);
        }
        return Ok(());
    }

    if store.reagents().is_empty() {
        println!("No reagents in the inventory.");
        return Ok(());
    }
    println!(
        "{:<36}  {:<24}  {:>10}  {:<8}  LOT",
        "ID", "NAME", "CONC", "UNIT"
    );
    for r in store.reagents() {
        println!(
            "{:<36}  {:<24}  {:>10}  {:<8}  {}",
            r.id, r.name, r.initial_concentration, r.unit, r.lot_number
        );
    }
    Ok(())
}

pub fn edit(
    ctx: &Ctx,
    id: String,
    name: Option<String>,
    concentration: Option<f64>,
    unit: Option<String>,
    lot: Option<String>,
) -> LabResult<()> {
    let mut store = ctx.load_store()?;
    let mut reagent = store
        .find_reagent(&id)
        .cloned()
        .ok_or(LabError::NotFound {
            kind: "reagent",
            id: id.clone(),
        })?;

    if let Some(name) = name {
        reagent.name = name;
    }
    if let Some(concentration) = concentration {
        reagent.initial_concentration = concentration;
    }
    if let Some(unit) = unit {
        reagent.unit = unit;
    }
    if let Some(lot) = lot {
        reagent.lot_number = lot;
    }

    store.upsert_reagent(reagent.clone());
    ctx.save_store(&store)?;
    ctx.emit(AuditEvent::ReagentUpserted(reagent.clone()));

    if !ctx.json() {
        println!("Updated reagent '{}' ({})", reagent.name, reagent.id);
    }
    Ok(())
}

pub fn rm(ctx: &Ctx, id: String) -> LabResult<()> {
    let mut store = ctx.load_store()?;
    let reagent_id = store
        .find_reagent(&id)
        .map(|r| r.id.clone())
        .ok_or(LabError::NotFound {
            kind: "reagent",
            id: id.clone(),
        })?;

    let removed = store.delete_reagent(&reagent_id)?;
    ctx.save_store(&store)?;
    ctx.emit(AuditEvent::ReagentDeleted(reagent_id));

    if !ctx.json() {
        println!("Removed reagent '{}'", removed.name);
    }
    Ok(())
}
