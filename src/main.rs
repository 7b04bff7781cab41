use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands, EquipmentAction, ProtocolAction, ReagentAction};
use commands::Ctx;
use labmix::{LabError, LabResult};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => Ok(()),
        Err(LabError::Aborted) => {
            eprintln!("aborted");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn run(cli: Cli) -> LabResult<()> {
    let ctx = Ctx::new(cli.json, cli.verbose)?;

    match cli.command {
        Commands::Reagent { action } => match action {
            ReagentAction::Add {
                name,
                concentration,
                unit,
                lot,
            } => commands::reagent::add(&ctx, name, concentration, unit, lot),
            ReagentAction::List => commands::reagent::list(&ctx),
            ReagentAction::Edit {
                id,
                name,
                concentration,
                unit,
                lot,
            } => commands::reagent::edit(&ctx, id, name, concentration, unit, lot),
            ReagentAction::Rm { id } => commands::reagent::rm(&ctx, id),
        },
        Commands::Equipment { action } => match action {
            EquipmentAction::Add { category, name } => {
                commands::equipment::add(&ctx, category, name)
            }
            EquipmentAction::List => commands::equipment::list(&ctx),
            EquipmentAction::Rm { id } => commands::equipment::rm(&ctx, id),
        },
        Commands::Protocol { action } => match action {
            ProtocolAction::Add {
                name,
                description,
                components,
            } => commands::protocol::add(&ctx, name, description, components),
            ProtocolAction::List => commands::protocol::list(&ctx),
            ProtocolAction::Show { id } => commands::protocol::show(&ctx, id),
            ProtocolAction::Rm { id } => commands::protocol::rm(&ctx, id),
        },
        Commands::Prep {
            protocol,
            reactions,
            overage,
            volume,
            analyst,
            yes,
            dry_run,
            strict,
        } => commands::prep::run(
            &ctx, protocol, reactions, overage, volume, analyst, yes, dry_run, strict,
        ),
        Commands::History { show, limit } => match show {
            Some(id) => commands::history::show(&ctx, id),
            None => commands::history::list(&ctx, limit),
        },
        Commands::Push => commands::remote::push(&ctx),
        Commands::Pull { yes } => commands::remote::pull(&ctx, yes),
    }
}
