//! `labmix protocol` - mix template management
//!
//! Components are given as `REAGENT:TARGET` specs; the reagent part is
//! resolved to an id at creation time, but the protocol stores only the
//! reference. Later edits to the reagent's stock concentration change
//! future calculations; deleting the reagent leaves a dangling reference
//! that the calculator treats as unresolved.

use labmix::sync::AuditEvent;
use labmix::{LabError, LabResult, MixProtocol, ReagentRequirement};

use super::Ctx;

pub fn add(
    ctx: &Ctx,
    name: String,
    description: String,
    components: Vec<(String, f64)>,
) -> LabResult<()> {
    let mut store = ctx.load_store()?;

    let mut requirements = Vec::with_capacity(components.len());
    for (needle, target) in components {
        let reagent = store.find_reagent(&needle).ok_or(LabError::NotFound {
            kind: "reagent",
            id: needle,
        })?;
        requirements.push(ReagentRequirement::new(reagent.id.clone(), target));
    }

    let protocol = MixProtocol::new(name, description, requirements)?;
    store.upsert_protocol(protocol.clone())?;
    ctx.save_store(&store)?;
    ctx.emit(AuditEvent::ProtocolUpserted(protocol.clone()));

    if !ctx.json() {
        println!(
            "Created protocol '{}' ({} components) with id {}",
            protocol.name,
            protocol.requirements.len(),
            protocol.id
        );
    }
    Ok(())
}

pub fn list(ctx: &Ctx) -> LabResult<()> {
    let store = ctx.load_store()?;

    if ctx.json() {
        for protocol in store.protocols() {
            ctx.line(serde_json::to_value(protocol)?);
        }
        return Ok(());
    }

    if store.protocols().is_empty() {
        println!("No protocols defined.");
        return Ok(());
    }
    println!("{:<36}  {:<24}  {:>10}  CREATED", "ID", "NAME", "COMPONENTS");
    for p in store.protocols() {
        println!(
            "{:<36}  {:<24}  {:>10}  {}",
            p.id,
            p.name,
            p.requirements.len(),
            p.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub fn show(ctx: &Ctx, id: String) -> LabResult<()> {
    let store = ctx.load_store()?;
    let protocol = store.find_protocol(&id).ok_or(LabError::NotFound {
        kind: "protocol",
        id: id.clone(),
    })?;

    if ctx.json() {
        ctx.line(serde_json::to_value(protocol)?);
        return Ok(());
    }

    println!("Protocol: {} ({})", protocol.name, protocol.id);
    if !protocol.description.is_empty() {
        println!("  {}", protocol.description);
    }
    println!("  created {}", protocol.created_at.format("%Y-%m-%d %H:%M"));
    println!();
    for req in &protocol.requirements {
        match store.reagent(&req.reagent_id) {
            Some(r) => println!(
                "  {:<24}  {} {} -> {} {}",
                r.name, r.initial_concentration, r.unit, req.target_concentration, r.unit
            ),
            None => println!(
                "  {:<24}  target {} (reagent missing from inventory)",
                req.reagent_id, req.target_concentration
            ),
        }
    }
    Ok(())
}

pub fn rm(ctx: &Ctx, id: String) -> LabResult<()> {
    let mut store = ctx.load_store()?;
    let protocol_id = store
        .find_protocol(&id)
        .map(|p| p.id.clone())
        .ok_or(LabError::NotFound {
            kind: "protocol",
            id: id.clone(),
        })?;

    let removed = store.delete_protocol(&protocol_id)?;
    ctx.save_store(&store)?;
    ctx.emit(AuditEvent::ProtocolDeleted(protocol_id));

    if !ctx.json() {
        println!("Removed protocol '{}'", removed.name);
    }
    Ok(())
}
