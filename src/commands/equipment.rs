//! `labmix equipment` - instrument roster management
//!
//! Every registered instrument is attached to every new preparation
//! record; this roster is the only equipment selection there is.

use labmix::sync::AuditEvent;
use labmix::{Equipment, EquipmentCategory, LabResult};

use super::Ctx;

pub fn add(ctx: &Ctx, category: EquipmentCategory, name: String) -> LabResult<()> {
    let mut store = ctx.load_store()?;
    let item = Equipment::new(category, name);
    store.upsert_equipment(item.clone());
    ctx.save_store(&store)?;
    ctx.emit(AuditEvent::EquipmentUpserted(item.clone()));

    if !ctx.json() {
        println!(
            "Registered {} '{}' with id {}",
            item.category, item.name, item.id
        );
    }
    Ok(())
}

pub fn list(ctx: &Ctx) -> LabResult<()> {
    let store = ctx.load_store()?;

    if ctx.json() {
        for item in store.equipment() {
            ctx.line(serde_json::to_value(item)?);
        }
        return Ok(());
    }

    if store.equipment().is_empty() {
        println!("No equipment registered.");
        return Ok(());
    }
    println!("{:<36}  {:<16}  NAME", "ID", "CATEGORY");
    for e in store.equipment() {
        println!("{:<36}  {:<16}  {}", e.id, e.category, e.name);
    }
    Ok(())
}

pub fn rm(ctx: &Ctx, id: String) -> LabResult<()> {
    let mut store = ctx.load_store()?;
    let removed = store.delete_equipment(&id.as_str().into())?;
    ctx.save_store(&store)?;
    ctx.emit(AuditEvent::EquipmentDeleted(removed.id.clone()));

    if !ctx.json() {
        println!("Removed {} '{}'", removed.category, removed.name);
    }
    Ok(())
}
