use kpi_formula::{evaluate_expression, Context, RawValue};

fn main() {
    pretty_env_logger::init();

    let context = Context::from([("ATTR".to_string(), RawValue::from("10"))]);

    let expressions = [
        "3 + 5 * 2 - 4 / 2",
        "(3 + 5) * (2 - 4 / 2) + 10",
        "2 ** 3 ** 2",
        "ATTR + 5",
        r#"Regex(ATTR, "^\d+$")"#,
        "ATTR / 0",
        "-5",
    ];

    for expression in expressions {
        match evaluate_expression(expression, &context) {
            Ok(result) => println!("{} => {}", expression, result),
            Err(err) => println!("{} => Error: {}", expression, err),
        }
    }
}
