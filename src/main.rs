use clap::Parser;
use std::path::Path;

use meal_swap_rs::catalog::{
    import_catalog_csv, load_catalog, save_catalog, InMemoryCatalog, NeutralPreference,
};
use meal_swap_rs::cli::{Cli, Command};
use meal_swap_rs::error::Result;
use meal_swap_rs::interface::{
    display_candidates, display_history, display_impact, display_plan, pick_candidate,
    prompt_yes_no, resolve_recipe,
};
use meal_swap_rs::service::SubstitutionService;
use meal_swap_rs::state::JsonPlanStore;
use meal_swap_rs::substitution::SubstitutionLimits;

type CliService = SubstitutionService<InMemoryCatalog, NeutralPreference, JsonPlanStore>;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if e.is_retryable() {
            eprintln!("This error is retryable; refresh the plan and try again.");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Command::ImportCatalog { csv } = &cli.command {
        return cmd_import_catalog(csv, &cli.catalog);
    }

    let service = build_service(&cli)?;

    match cli.command {
        Command::Substitutes {
            plan,
            slot,
            max,
            tolerance,
        } => cmd_substitutes(&service, &plan, slot, max, tolerance),
        Command::Preview { plan, slot, recipe } => cmd_preview(&service, &plan, slot, &recipe),
        Command::Apply {
            plan,
            slot,
            recipe,
            revision,
            yes,
        } => cmd_apply(&service, &plan, slot, recipe.as_deref(), revision, yes),
        Command::Undo { plan } => cmd_undo(&service, &plan),
        Command::History { plan } => cmd_history(&service, &plan),
        Command::ImportCatalog { .. } => unreachable!("handled above"),
    }
}

fn build_service(cli: &Cli) -> Result<CliService> {
    let catalog_path = Path::new(&cli.catalog);
    if !catalog_path.exists() {
        eprintln!("Catalog file not found: {}", cli.catalog);
        eprintln!("Use 'import-catalog' to create one from CSV.");
        std::process::exit(1);
    }

    let recipes = load_catalog(catalog_path)?;
    println!("Loaded {} recipes", recipes.len());

    let catalog = InMemoryCatalog::new(recipes);
    let store = JsonPlanStore::new(&cli.plans);
    Ok(SubstitutionService::new(catalog, NeutralPreference, store))
}

fn cmd_substitutes(
    service: &CliService,
    plan_id: &str,
    slot: usize,
    max: usize,
    tolerance: f64,
) -> Result<()> {
    let limits = SubstitutionLimits {
        max_alternatives: max,
        nutritional_tolerance: tolerance,
    };
    let response = service.get_substitutes(plan_id, slot, &limits)?;

    display_candidates(&response.alternatives);
    if !response.alternatives.is_empty() {
        println!(
            "Plan revision {}; pass --revision {} when applying.",
            response.plan_revision, response.plan_revision
        );
    }
    Ok(())
}

fn cmd_preview(service: &CliService, plan_id: &str, slot: usize, recipe: &str) -> Result<()> {
    let recipe_id = resolve_recipe(&service.catalog().all_recipes(), recipe)?;
    let response = service.preview_substitution(plan_id, slot, &recipe_id)?;

    display_impact(&response.impact);
    println!(
        "Plan revision {}; pass --revision {} when applying.",
        response.plan_revision, response.plan_revision
    );
    Ok(())
}

fn cmd_apply(
    service: &CliService,
    plan_id: &str,
    slot: usize,
    recipe: Option<&str>,
    revision: Option<u64>,
    yes: bool,
) -> Result<()> {
    let (recipe_id, expected_revision) = match recipe {
        Some(input) => {
            let id = resolve_recipe(&service.catalog().all_recipes(), input)?;
            (id, revision)
        }
        None => {
            // Interactive path: pick from the ranked candidates
            let response = service.get_substitutes(plan_id, slot, &SubstitutionLimits::default())?;
            if response.alternatives.is_empty() {
                println!("No alternatives available for this slot.");
                return Ok(());
            }
            display_candidates(&response.alternatives);

            let Some(choice) = pick_candidate(&response.alternatives)? else {
                println!("Cancelled.");
                return Ok(());
            };
            display_impact(&response.alternatives[choice].impact);
            (
                response.alternatives[choice].recipe_id.clone(),
                revision.or(Some(response.plan_revision)),
            )
        }
    };

    if !yes {
        let proceed = prompt_yes_no(
            &format!("Apply {} to slot {} of plan {}?", recipe_id, slot, plan_id),
            true,
        )?;
        if !proceed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let plan = service.apply_substitution(plan_id, slot, &recipe_id, expected_revision)?;
    println!("Substitution applied.");
    display_plan(&plan);
    Ok(())
}

fn cmd_undo(service: &CliService, plan_id: &str) -> Result<()> {
    let plan = service.undo_substitution(plan_id)?;
    println!("Substitution undone.");
    display_plan(&plan);
    Ok(())
}

fn cmd_history(service: &CliService, plan_id: &str) -> Result<()> {
    let response = service.substitution_history(plan_id)?;
    display_history(&response.entries, response.can_undo);
    Ok(())
}

fn cmd_import_catalog(csv_path: &str, catalog_path: &str) -> Result<()> {
    if !Path::new(csv_path).exists() {
        eprintln!("CSV file not found: {}", csv_path);
        return Ok(());
    }

    let recipes = import_catalog_csv(csv_path)?;
    println!("Imported {} recipes from {}", recipes.len(), csv_path);

    // Merge with any existing catalog; imported rows win on id collisions
    let mut merged = if Path::new(catalog_path).exists() {
        load_catalog(catalog_path)?
    } else {
        Vec::new()
    };
    merged.extend(recipes);
    save_catalog(catalog_path, &merged)?;
    println!("Catalog saved to {}", catalog_path);
    Ok(())
}
