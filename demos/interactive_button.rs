//! Interactive Button
//!
//! This example drives a button through hover, press and an idle timeout
//! with a fixed 60 Hz frame loop.
//!
//! Key concepts:
//! - Declaring states and transitions by name with the builders
//! - Firing triggers from input events
//! - Advancing animations explicitly with `tick`
//! - Reading interpolated properties mid-animation
//! - Listening for state events
//!
//! Run with: cargo run --example interactive_button

use poise::builder::{instant_transition, ControllerBuilder, StateBuilder, TransitionBuilder};
use poise::core::{Easing, TransitionTrigger, Vec3};
use poise::{AnimationFrame, StateController, StateEvent};
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);

fn build_button() -> StateController {
    ControllerBuilder::new("play-button")
        .state(StateBuilder::new("Idle").opacity(0.85).scale(Vec3::ONE))
        .unwrap()
        .state(StateBuilder::new("Hover").opacity(1.0).scale(Vec3::splat(1.08)))
        .unwrap()
        .state(StateBuilder::new("Pressed").opacity(1.0).scale(Vec3::splat(0.95)))
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from("Idle")
                .to("Hover")
                .on(TransitionTrigger::Hover)
                .duration_ms(150)
                .easing(Easing::EaseOut),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from("Hover")
                .to("Idle")
                .on(TransitionTrigger::HoverEnd)
                .duration_ms(250),
        )
        .unwrap()
        .transition(instant_transition("Hover", "Pressed", TransitionTrigger::Click))
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from("Pressed")
                .to("Hover")
                .on(TransitionTrigger::Timer { after_ms: 100 })
                .duration_ms(120)
                .easing(Easing::Spring),
        )
        .unwrap()
        .build()
        .unwrap()
}

fn name_of(controller: &StateController) -> &str {
    controller
        .current_state()
        .map(|state| state.name.as_str())
        .unwrap_or("?")
}

fn run_frames(controller: &mut StateController, frames: usize) {
    for _ in 0..frames {
        if let AnimationFrame::Running { progress, eased } = controller.tick(FRAME) {
            let properties = controller.current_properties();
            println!(
                "    t={:.2} eased={:.2} scale={:.3} opacity={:.2}",
                progress,
                eased,
                properties.scale.map(|s| s.x).unwrap_or(1.0),
                properties.opacity.unwrap_or(1.0),
            );
        }
    }
}

fn main() {
    println!("=== Interactive Button ===\n");

    let mut button = build_button();
    button.subscribe(|event| match event {
        StateEvent::StateChanged { trigger, .. } => println!("  [event] committed via {trigger}"),
        StateEvent::TransitionEnded(end) if !end.committed() => {
            println!("  [event] animation {} ended: {:?}", end.ticket, end.outcome)
        }
        _ => {}
    });

    println!("Initial state: {}\n", name_of(&button));

    println!("Pointer enters:");
    button.fire_trigger(&TransitionTrigger::Hover).unwrap();
    run_frames(&mut button, 10);
    println!("  now: {}\n", name_of(&button));

    println!("Click:");
    button.fire_trigger(&TransitionTrigger::Click).unwrap();
    println!("  now: {}\n", name_of(&button));

    println!("Resting in Pressed until the timer fires:");
    run_frames(&mut button, 16);
    println!("  now: {}\n", name_of(&button));

    println!("Pointer leaves, then re-enters halfway through:");
    button.fire_trigger(&TransitionTrigger::HoverEnd).unwrap();
    run_frames(&mut button, 7);
    let hover = button.store().get_by_name("Hover").map(|s| s.id).unwrap();
    button.go_to_state(&hover, true).unwrap();
    run_frames(&mut button, 20);
    println!("  now: {}\n", name_of(&button));

    println!("History:");
    for entry in button.history().entries() {
        let name = button
            .store()
            .get(&entry.state_id)
            .map(|s| s.name.as_str())
            .unwrap_or("?");
        println!("  {:<8} via {}", name, entry.trigger);
    }

    println!("\n=== Example Complete ===");
}
