//! Easing Curves and Validation
//!
//! This example samples the built-in easing curves and shows how a broken
//! collection is reported.
//!
//! Key concepts:
//! - Easing curves parsed from CSS-style names
//! - Endpoints are exact for every curve
//! - Validation accumulates every problem instead of stopping at the first
//! - Deleting a state leaves incoming transitions to be reported
//!
//! Run with: cargo run --example easing_and_validation

use poise::core::{NewState, NewTransition, TransitionTrigger};
use poise::{Easing, StateController};

fn sample(easing: &Easing) -> String {
    (0..=4)
        .map(|i| format!("{:>6.3}", easing.evaluate(f64::from(i) / 4.0)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    println!("=== Easing Curves and Validation ===\n");

    println!("Curves sampled at t = 0, .25, .5, .75, 1:");
    for name in [
        "linear",
        "ease",
        "ease-in",
        "ease-out",
        "ease-in-out",
        "spring",
        "bounce",
        "elastic",
        "cubic-bezier(0.68, -0.55, 0.27, 1.55)",
    ] {
        match name.parse::<Easing>() {
            Ok(easing) => println!("  {:<40} {}", easing.to_string(), sample(&easing)),
            Err(e) => println!("  {name}: {e}"),
        }
    }

    println!("\nUnknown curve names are rejected:");
    if let Err(e) = "wobble".parse::<Easing>() {
        println!("  {e}");
    }

    println!("\nBuilding a menu with a dangling transition:");
    let mut menu = StateController::new("menu");
    let closed = menu.current_state_id();
    let open = menu.add_state(NewState::named("Open"));
    let peek = menu.add_state(NewState::named("Peek"));
    menu.add_transition(&closed, NewTransition::new(open, TransitionTrigger::Click))
        .unwrap();
    menu.add_transition(&closed, NewTransition::new(peek, TransitionTrigger::Hover))
        .unwrap();
    println!("  valid before delete: {}", menu.is_valid());

    menu.delete_state(&peek).unwrap();
    println!("  valid after deleting Peek: {}", menu.is_valid());
    for error in menu.errors() {
        println!("    [{}] {}", error.field(), error.message());
    }

    println!("\n=== Example Complete ===");
}
