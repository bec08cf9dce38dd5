//! Stored KPI formulas applied to incoming attribute readings.
//!
//! A reading carries one raw value for an asset attribute. The linked KPI's
//! formula is evaluated with that value bound to [`SUBJECT_VARIABLE`], and the
//! result is reported on the derived `output_<attribute_id>` attribute.

use crate::ast::{Context, RawValue, Result, Value};
use crate::evaluate_expression;
use log::debug;
use serde::{Deserialize, Serialize};

/// Variable name under which a reading's value is exposed to the formula.
pub const SUBJECT_VARIABLE: &str = "ATTR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub name: String,
    pub expression: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub asset_id: String,
    pub attribute_id: String,
    pub timestamp: String,
    pub value: RawValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedReading {
    pub asset_id: String,
    pub attribute_id: String,
    pub timestamp: String,
    pub value: Value,
}

impl Kpi {
    pub fn new(name: &str, expression: &str) -> Self {
        Self {
            name: name.to_string(),
            expression: expression.to_string(),
            description: None,
        }
    }

    /// Evaluates the formula for one reading.
    pub fn compute(&self, reading: &Reading) -> Result<ComputedReading> {
        let expression = unescape_expression(&self.expression);
        let context = Context::from([(SUBJECT_VARIABLE.to_string(), reading.subject())]);
        debug!(
            "Computing KPI '{}' for {}/{}",
            self.name, reading.asset_id, reading.attribute_id
        );

        let value = evaluate_expression(&expression, &context)?;
        Ok(ComputedReading {
            asset_id: reading.asset_id.clone(),
            attribute_id: format!("output_{}", reading.attribute_id),
            timestamp: reading.timestamp.clone(),
            value,
        })
    }
}

impl Reading {
    /// The reading's value as bound into the context. Anything that parses as
    /// a float becomes a float; other text is passed through untouched.
    pub fn subject(&self) -> RawValue {
        match &self.value {
            RawValue::Integer(value) => RawValue::Float(*value as f64),
            RawValue::Float(value) => RawValue::Float(*value),
            RawValue::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) => RawValue::Float(value),
                Err(_) => RawValue::Text(text.clone()),
            },
        }
    }
}

/// Undoes the escaping applied to formulas when they are stored: `\"` becomes
/// `"`, then `\\` becomes `\`.
pub fn unescape_expression(expression: &str) -> String {
    expression.replace("\\\"", "\"").replace("\\\\", "\\")
}
