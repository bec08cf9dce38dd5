use kpi_formula::kpi::{Kpi, Reading};
use std::io::Read;

/// Reads a reading message as JSON on stdin and prints the computed reading.
///
/// ```text
/// echo '{"asset_id":"43","attribute_id":"6","timestamp":"t","value":"I have a Dog"}' \
///     | cargo run --example compute_reading -- 'Regex(ATTR, ".*dog.*")'
/// ```
fn main() {
    pretty_env_logger::init();

    let Some(expression) = std::env::args().nth(1) else {
        eprintln!("usage: compute_reading <expression> < reading.json");
        std::process::exit(2);
    };

    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("Failed to read stdin: {}", err);
        std::process::exit(1);
    }

    let reading: Reading = match serde_json::from_str(&input) {
        Ok(reading) => reading,
        Err(err) => {
            eprintln!("Invalid reading: {}", err);
            std::process::exit(1);
        }
    };

    let kpi = Kpi::new("cli", &expression);
    match kpi.compute(&reading) {
        Ok(computed) => match serde_json::to_string_pretty(&computed) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Failed to serialize result: {}", err),
        },
        Err(err) => {
            let error = serde_json::json!({
                "error": format!("Interpreter Error: {} (Equation: {})", err, expression),
            });
            println!("{}", error);
            std::process::exit(1);
        }
    }
}
