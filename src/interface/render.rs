use crate::models::{MealPlan, SubstitutionCandidate, SubstitutionHistoryEntry, SubstitutionImpact};

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.1}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Display ranked candidates in an aligned table.
pub fn display_candidates(candidates: &[SubstitutionCandidate]) {
    if candidates.is_empty() {
        println!("No alternatives available for this slot.");
        return;
    }

    println!();
    println!("=== Substitution Candidates ===");
    println!();

    let max_name_len = candidates
        .iter()
        .map(|c| c.recipe_name.len())
        .max()
        .unwrap_or(10);

    for (i, candidate) in candidates.iter().enumerate() {
        println!(
            "{:>3}. {:<width$} [{}] score {:.2} (nutr {:.2} / pref {:.2} / cost {:.2}) | {:>4.0} kcal | ${:>5.2} | {} impact",
            i + 1,
            candidate.recipe_name,
            candidate.score_grade,
            candidate.total_score,
            candidate.nutritional_similarity,
            candidate.user_preference,
            candidate.cost_efficiency,
            candidate.nutrition.calories,
            candidate.estimated_cost,
            candidate.impact.impact_level,
            width = max_name_len,
        );
    }
    println!();
}

/// Display a substitution impact preview.
pub fn display_impact(impact: &SubstitutionImpact) {
    println!();
    println!("=== Substitution Impact ({}) ===", impact.impact_level);
    println!();
    println!("  Calories: {} kcal", signed(impact.calories_delta));
    println!("  Protein:  {} g", signed(impact.protein_delta));
    println!("  Carbs:    {} g", signed(impact.carbs_delta));
    println!("  Fat:      {} g", signed(impact.fat_delta));
    let cost = if impact.cost_delta >= 0.0 {
        format!("+${:.2}", impact.cost_delta)
    } else {
        format!("-${:.2}", impact.cost_delta.abs())
    };
    println!("  Cost:     {}", cost);
    println!();
}

/// Display the plan's slots and aggregates after a mutation.
pub fn display_plan(plan: &MealPlan) {
    println!();
    println!("=== Plan {} (revision {}) ===", plan.id, plan.revision);
    println!();

    for (i, slot) in plan.slots.iter().enumerate() {
        println!(
            "{:>3}. day {} {:<9} {} ({}) - {:.0} kcal, ${:.2}",
            i,
            slot.day,
            slot.meal_type.to_string(),
            slot.recipe_name,
            slot.recipe_id,
            slot.nutrition.calories,
            slot.estimated_cost,
        );
    }

    println!();
    println!(
        "Totals: {:.0} kcal | P {:.0} g | C {:.0} g | F {:.0} g | ${:.2}",
        plan.total_nutrition.calories,
        plan.total_nutrition.protein_g,
        plan.total_nutrition.carbs_g,
        plan.total_nutrition.fat_g,
        plan.total_cost,
    );
    if let Some(budget) = plan.budget_target {
        let marker = if plan.total_cost > budget { " (over)" } else { "" };
        println!("Budget: ${:.2}{}", budget, marker);
    }
    println!();
}

/// Display the substitution history, oldest first.
pub fn display_history(entries: &[SubstitutionHistoryEntry], can_undo: bool) {
    if entries.is_empty() {
        println!("No substitutions recorded for this plan.");
        return;
    }

    println!();
    println!("=== Substitution History ===");
    println!();

    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}. {} slot {}: {} ({}) -> {} ({})  [{} kcal]",
            i + 1,
            entry.applied_at.format("%Y-%m-%d %H:%M:%S"),
            entry.slot_index,
            entry.previous.recipe_name,
            entry.previous.recipe_id,
            entry.replacement.recipe_name,
            entry.replacement.recipe_id,
            signed(entry.replacement.nutrition.calories - entry.previous.nutrition.calories),
        );
    }

    println!();
    if can_undo {
        println!("Most recent entry can be undone with 'undo'.");
    }
    println!();
}
