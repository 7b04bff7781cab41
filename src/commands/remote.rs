//! `labmix push` / `labmix pull` - full-state remote mirror
//!
//! Unlike the per-event audit mirror these run on demand and surface
//! errors. They work even when `sync.enabled` is false, so a one-off
//! backup does not require turning on live mirroring.

use dialoguer::Confirm;
use is_terminal::IsTerminal;
use labmix::sync::RemoteStore;
use labmix::{LabError, LabResult};

use super::Ctx;

pub fn push(ctx: &Ctx) -> LabResult<()> {
    let remote = connect(ctx)?;
    let store = ctx.load_store()?;
    let summary = remote.push_store(&store)?;

    if ctx.json() {
        ctx.line(serde_json::json!({
            "pushed": {
                "reagents": summary.reagents,
                "equipment": summary.equipment,
                "protocols": summary.protocols,
                "records": summary.records,
            }
        }));
    } else {
        println!(
            "Pushed {} reagents, {} equipment, {} protocols, {} records",
            summary.reagents, summary.equipment, summary.protocols, summary.records
        );
    }
    Ok(())
}

pub fn pull(ctx: &Ctx, yes: bool) -> LabResult<()> {
    let remote = connect(ctx)?;

    // pull replaces local state wholesale
    if !yes && !confirm_overwrite()? {
        return Err(LabError::Aborted);
    }

    let store = remote.pull_store()?;
    ctx.save_store(&store)?;

    if ctx.json() {
        ctx.line(serde_json::json!({
            "pulled": {
                "reagents": store.reagents().len(),
                "equipment": store.equipment().len(),
                "protocols": store.protocols().len(),
                "records": store.history().len(),
            }
        }));
    } else {
        println!(
            "Pulled {} reagents, {} equipment, {} protocols, {} records",
            store.reagents().len(),
            store.equipment().len(),
            store.protocols().len(),
            store.history().len()
        );
    }
    Ok(())
}

fn connect(ctx: &Ctx) -> LabResult<RemoteStore> {
    RemoteStore::from_config(&ctx.config.sync).ok_or_else(|| {
        LabError::Remote(
            "remote store not configured (set sync.remote_url and sync.remote_key)".to_string(),
        )
    })
}

fn confirm_overwrite() -> LabResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(LabError::Aborted);
    }
    Confirm::new()
        .with_prompt("Overwrite local state with the remote copy?")
        .default(false)
        .interact()
        .map_err(|e| LabError::Io(std::io::Error::other(e)))
}
