//! Paginated List
//!
//! This example pages through a plain list of structs.
//!
//! Key concepts:
//! - Exposing struct fields to filtering and sorting with `impl_item!`
//! - Wrapping a list reducer with `Paginated`
//! - Page navigation wrapping around at both ends
//! - Saving and restoring the view with a checkpoint
//!
//! Run with: RUST_LOG=debug cargo run --example paginated_list

use cerebellum::core::{append, reducer_fn};
use cerebellum::impl_item;
use cerebellum::{
    PageActions, Paginated, PaginationCheckpoint, PaginationOptions, PaginationState, Reducer,
};

#[derive(Debug, Clone, PartialEq)]
struct Planet {
    id: u32,
    name: String,
    moons: u32,
}

impl_item!(Planet { "Id" => id, "name" => name, "moons" => moons });

#[derive(Debug, Clone)]
enum PlanetAction {
    Discovered(Planet),
}

fn planet(id: u32, name: &str, moons: u32) -> Planet {
    Planet {
        id,
        name: name.to_string(),
        moons,
    }
}

fn solar_system() -> Vec<Planet> {
    vec![
        planet(1, "Mercury", 0),
        planet(2, "Venus", 0),
        planet(3, "Earth", 1),
        planet(4, "Mars", 2),
        planet(5, "Jupiter", 95),
        planet(6, "Saturn", 146),
        planet(7, "Uranus", 28),
    ]
}

fn show(label: &str, state: &PaginationState<Vec<Planet>, Planet>) {
    let names: Vec<&str> = state.page_list.iter().map(|p| p.name.as_str()).collect();
    println!(
        "{:<28} page {}/{} ({} by {} {}, filter {:?}): {:?}",
        label,
        state.page,
        state.total,
        state.item_count(),
        state.by,
        state.order,
        state.filter,
        names
    );
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Paginated List Example ===\n");

    let planets = reducer_fn(solar_system, |list: &Vec<Planet>, action: &PlanetAction| {
        match action {
            PlanetAction::Discovered(planet) => append(list, planet.clone()),
        }
    });

    let paginated = Paginated::try_new(
        "PLANETS",
        planets,
        cerebellum::paginate::Identity,
        PaginationOptions::default().with_per(3),
    )
    .unwrap_or_else(|errors| panic!("invalid options: {errors:?}"));
    let actions = PageActions::new("PLANETS");

    let state = paginated.init();
    show("init", &state);

    let state = paginated.reduce(&state, &actions.next_page());
    show("next page", &state);

    let state = paginated.reduce(&state, &actions.next_page());
    let state = paginated.reduce(&state, &actions.next_page());
    show("next twice (wraps)", &state);

    let state = paginated.reduce(&state, &actions.prev_page());
    show("prev page (wraps)", &state);

    let state = paginated.reduce(&state, &actions.sort_by("moons"));
    show("sort by moons", &state);

    let state = paginated.reduce(&state, &actions.sort_by("moons"));
    show("sort by moons again", &state);

    let state = paginated.reduce(&state, &actions.filter_with("UR"));
    show("filter \"UR\"", &state);

    let checkpoint = paginated.checkpoint(&state);
    let json = checkpoint.to_json().unwrap_or_default();
    println!("\nCheckpoint: {json}\n");

    let state = paginated.reduce(
        &state,
        &actions.forward(PlanetAction::Discovered(planet(8, "Neptune", 16))),
    );
    show("Neptune discovered", &state);

    let state = paginated.reduce(&state, &actions.reset());
    show("reset", &state);

    match PaginationCheckpoint::from_json(&json) {
        Ok(checkpoint) => match paginated.restore(&state, &checkpoint) {
            Ok(restored) => show("restored", &restored),
            Err(e) => println!("restore failed: {e}"),
        },
        Err(e) => println!("checkpoint unreadable: {e}"),
    }

    let ignored = paginated.reduce(&state, &PageActions::new("MOONS").next_page());
    println!(
        "\nAction for another namespace left state untouched: {}",
        std::sync::Arc::ptr_eq(&state, &ignored)
    );

    println!("\n=== Example Complete ===");
}
