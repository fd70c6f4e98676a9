//! Interactive demo: reads filter expressions and prints the parsed tree
//! and the rendered SQL predicate.

use anyhow::Result;
use filterql::config::SelectorMappingConfig;
use filterql::{parse, SqlRenderer};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const MAPPING_FILE: &str = "selector_mapping.json";

/// Build a renderer from the JSON mapping file, falling back to identity
/// rendering when the file is absent or invalid.
fn create_renderer() -> SqlRenderer {
    match SelectorMappingConfig::from_json_file(MAPPING_FILE) {
        Ok(config) => {
            println!(
                "loaded {} selector mapping(s) from {}",
                config.get_mappings().len(),
                MAPPING_FILE
            );
            for (selector, column) in config.get_mappings() {
                println!("  {} -> {}", selector, column);
            }
            SqlRenderer::with_mapping(config.mappings)
        }
        Err(e) => {
            println!("no selector mapping ({}), selectors pass through as-is", e);
            SqlRenderer::new()
        }
    }
}

fn main() -> Result<()> {
    println!("--- filterql: filter expression to SQL predicate ---");
    println!("example: (sel1==arg1,sel2=lt=arg2);sel3=gt=arg3");
    println!("press ctrl-d to exit\n");

    let renderer = create_renderer();
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("filter> ") {
            Ok(line) => {
                let expression = line.trim();
                if expression.is_empty() {
                    continue;
                }
                editor.add_history_entry(expression)?;

                match parse(expression) {
                    Ok(node) => {
                        println!("tree: {}", node.render_debug());
                        println!("sql:  {}", renderer.render(&node));
                    }
                    Err(e) => {
                        println!("parse error: {}", e);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
