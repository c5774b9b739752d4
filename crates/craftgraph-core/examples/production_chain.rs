//! Production chain example: iron ore -> iron ingot -> iron plate.
//!
//! Builds a tiny dataset by hand, synthesizes the production tree for the
//! plate, lays it out, and prints the positioned steps.
//!
//! Run with: `cargo run -p craftgraph-core --example production_chain`

use craftgraph_core::index::RecipeIndex;
use craftgraph_core::item::Stack;
use craftgraph_core::layout::{LayoutMetrics, Position, align_tree};
use craftgraph_core::oredict::OredictTable;
use craftgraph_core::rate::RatingTables;
use craftgraph_core::recipe::{Dataset, Process, Recipe};
use craftgraph_core::solve::{ProductionNode, SolveBudget, StopSet, Synthesizer};
use std::collections::HashMap;

fn main() {
    // --- Dataset: two processes, one recipe each ---

    let mut names = HashMap::new();
    names.insert("demo:iron_ore:0".into(), "Iron Ore".to_string());
    names.insert("demo:iron_ingot:0".into(), "Iron Ingot".to_string());
    names.insert("demo:iron_plate:0".into(), "Iron Plate".to_string());

    let dataset = Dataset::new(
        names,
        vec![
            Process {
                id: "minecraft.smelting".to_string(),
                machines: vec!["demo:furnace:0".into()],
                recipes: vec![Recipe {
                    inputs: vec![Stack::new("demo:iron_ore:0", 1)],
                    outputs: vec![Stack::new("demo:iron_ingot:0", 1)],
                }],
            },
            Process {
                id: "demo:bending_machine".to_string(),
                machines: vec!["demo:bender:0".into()],
                recipes: vec![Recipe {
                    inputs: vec![Stack::new("demo:iron_ingot:0", 1)],
                    outputs: vec![Stack::new("demo:iron_plate:0", 1)],
                }],
            },
        ],
    );

    // --- Index and solve ---

    let index = RecipeIndex::build(&dataset);
    let oredict = OredictTable::new();
    let tables = RatingTables::default();
    let stops = StopSet::gregtech();

    let synthesizer = Synthesizer {
        dataset: &dataset,
        index: &index,
        oredict: &oredict,
        tables: &tables,
        stops: &stops,
        budget: SolveBudget::default(),
    };

    let mut root = synthesizer
        .solve_item(&"demo:iron_plate:0".into())
        .expect("the plate has a producing recipe");

    // --- Layout and print ---

    root.position = Position::new(0.0, 0.0);
    let metrics = LayoutMetrics::default();
    align_tree(&mut root, &metrics);

    println!("production tree ({} steps):", root.node_count());
    print_node(&root, &dataset, 0);
}

fn print_node(node: &ProductionNode, dataset: &Dataset, indent: usize) {
    let process = dataset.process(node.key).map(|p| p.id.as_str()).unwrap_or("?");
    let output = node
        .recipe
        .outputs
        .first()
        .map(|s| dataset.display_name(&s.item))
        .unwrap_or("?");
    println!(
        "{:indent$}{output} via {process} [{}] at ({}, {})",
        "",
        node.key,
        node.position.x,
        node.position.y,
        indent = indent * 2
    );
    for child in &node.children {
        print_node(child, dataset, indent + 1);
    }
}
