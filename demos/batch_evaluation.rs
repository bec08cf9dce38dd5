use kpi_formula::{evaluate_batch, Context, RawValue};

fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        Context::from([("ATTR".to_string(), RawValue::Integer(120))]),
        Context::from([("ATTR".to_string(), RawValue::from("80.5"))]),
        Context::from([("ATTR".to_string(), RawValue::from("offline"))]),
    ];

    let expression = "ATTR * 2 - 10";

    for (i, result) in evaluate_batch(expression, &contexts).iter().enumerate() {
        println!("Result {}: {:?}", i, result);
    }
}
