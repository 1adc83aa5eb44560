//! Save and Restore
//!
//! This example edits a state collection, saves it through a
//! `FileRepository` and restores it into a fresh controller.
//!
//! Key concepts:
//! - Persistence as effects run against a repository
//! - Applying the result with `apply_save` / `apply_load`
//! - Dirty tracking across edits and saves
//! - Loading controller settings from TOML
//!
//! Run with: cargo run --example save_and_restore

use poise::core::{NewState, NewTransition, StateProperties, TransitionAnimation, TransitionTrigger};
use poise::{ControllerConfig, Easing, FileRepository, StateController};
use stillwater::prelude::*;

#[tokio::main]
async fn main() {
    println!("=== Save and Restore ===\n");

    let config = ControllerConfig::from_toml_str(
        r#"
        max_history_size = 20

        [default_animation]
        duration_ms = 200
        delay_ms = 0
        easing = "ease-out"
        "#,
    )
    .unwrap();

    let dir = std::env::temp_dir().join("poise-save-and-restore");
    let repo = FileRepository::open(&dir).unwrap();
    println!("Repository: {}\n", repo.dir().display());

    // Edit a card's states
    let mut card = StateController::with_config("feature-card", config.clone());
    let rest = card.current_state_id();
    card.update_state_properties(&rest, &StateProperties::new().with_opacity(1.0))
        .unwrap();
    let expanded = card.add_state(
        NewState::named("Expanded").with_properties(
            StateProperties::new()
                .with_opacity(1.0)
                .with_color("#1e88e5"),
        ),
    );
    card.add_transition(
        &rest,
        NewTransition::new(expanded, TransitionTrigger::Click)
            .with_animation(TransitionAnimation::new(350, Easing::EaseInOut)),
    )
    .unwrap();
    card.go_to_state(&expanded, false).unwrap();
    println!(
        "Edited {} states, dirty = {}",
        card.states().len(),
        card.is_dirty()
    );

    // Save: build the effect, run it, apply the receipt
    match card.save::<FileRepository>().run(&repo).await {
        Ok(receipt) => {
            card.apply_save(receipt);
            println!(
                "  [Save] revision {} written, dirty = {}",
                receipt.revision,
                card.is_dirty()
            );
        }
        Err(e) => {
            println!("  [Save] failed: {e}");
            return;
        }
    }

    // Restore into a fresh controller
    let mut restored = StateController::with_config("feature-card", config);
    match restored.load::<FileRepository>().run(&repo).await {
        Ok(Some(snapshot)) => {
            restored.apply_load(snapshot).unwrap();
            println!("  [Load] {} states restored", restored.states().len());
        }
        Ok(None) => println!("  [Load] nothing stored yet"),
        Err(e) => println!("  [Load] failed: {e}"),
    }

    println!("\nRestored collection:");
    for state in restored.states() {
        let marker = if state.id == restored.current_state_id() {
            "*"
        } else {
            " "
        };
        println!(
            "  {marker} {:<10} default={} transitions={}",
            state.name,
            state.is_default,
            state.transitions.len()
        );
    }
    println!("Valid: {}", restored.is_valid());

    println!("\n=== Example Complete ===");
}
