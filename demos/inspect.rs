//! Prints every table and element of a map file with its type.
//!
//! Run with: cargo run --example inspect -- demos/level.map

use mapparser::{MapParser, Value};
use std::process::ExitCode;

fn describe(value: &Value) -> String {
    match value {
        Value::List(items) => format!("list of {}", items.len()),
        Value::Table(table) => format!("table of {}", table.len()),
        other => other.kind().to_string(),
    }
}

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: inspect <file.map>");
        return ExitCode::FAILURE;
    };

    let mut parser = MapParser::new(path);
    let doc = match parser.parse() {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    for table in doc.tables() {
        println!("[{}] ({} elements)", table.name(), table.len());
        for element in table.elements() {
            println!(
                "  {:<12} {:<14} {}",
                element.key(),
                describe(element.value()),
                element.value()
            );
        }
    }

    ExitCode::SUCCESS
}
