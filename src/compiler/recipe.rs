//! the raw, untyped shape of a recipe JSON document as `serde` sees it.
//!
//! deserializing here only validates JSON *shape*; cross-references (does a
//! variable name exist, does the output variable resolve) are checked by
//! [`super::compile`], which turns this into a [`crate::program::Program`].

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawRecipe {
    pub simulation_config: SimulationConfig,
    /// name-addressed recipes set this; index-addressed (legacy) recipes
    /// set `output_variable_index` + `variable_registry` instead.
    #[serde(default)]
    pub output_variable: Option<String>,
    #[serde(default)]
    pub output_variable_index: Option<usize>,
    #[serde(default)]
    pub variable_registry: Option<Vec<String>>,
    #[serde(default)]
    pub pre_trial_steps: Vec<RawStep>,
    #[serde(default)]
    pub per_trial_steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    pub num_trials: usize,
    #[serde(default)]
    pub output_file: Option<String>,
}

/// an assignment target: one name/index for single-valued functions, several
/// for functions like `capitalize_expense` or `SirModel` that return a tuple.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawTarget {
    Multi(Vec<RawVarRef>),
    Single(RawVarRef),
}

/// a variable reference, either by name (human-authored recipes) or by
/// pre-resolved slot index (legacy / machine-generated recipes).
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawVarRef {
    Index(usize),
    Name(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum RawStep {
    #[serde(rename = "literal_assignment")]
    LiteralAssignment {
        result: RawTarget,
        value: RawLiteral,
        #[serde(default)]
        line: Option<i64>,
    },
    #[serde(rename = "execution_assignment")]
    ExecutionAssignment {
        result: RawTarget,
        function: String,
        #[serde(default)]
        args: Vec<RawArg>,
        #[serde(default)]
        line: Option<i64>,
    },
    #[serde(rename = "conditional_assignment")]
    ConditionalAssignment {
        result: RawTarget,
        condition: Box<RawArg>,
        then_expr: Box<RawArg>,
        else_expr: Box<RawArg>,
        #[serde(default)]
        line: Option<i64>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawLiteral {
    Vector(Vec<f64>),
    Scalar(f64),
}

/// an argument to a function call: either a bare JSON literal, or a typed
/// object describing a literal, a variable reference, a nested call, or a
/// nested conditional expression.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawArg {
    Vector(Vec<f64>),
    Scalar(f64),
    Typed(RawTypedArg),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum RawTypedArg {
    #[serde(rename = "scalar_literal")]
    ScalarLiteral { value: f64 },
    #[serde(rename = "vector_literal")]
    VectorLiteral { value: Vec<f64> },
    #[serde(rename = "boolean_literal")]
    BooleanLiteral { value: bool },
    #[serde(rename = "string_literal")]
    StringLiteral { value: String },
    #[serde(rename = "variable_index")]
    VariableIndex { value: RawVarRef },
    #[serde(rename = "execution_assignment")]
    ExecutionAssignment {
        function: String,
        #[serde(default)]
        args: Vec<RawArg>,
        #[serde(default)]
        line: Option<i64>,
    },
    #[serde(rename = "conditional_expression")]
    ConditionalExpression {
        condition: Box<RawArg>,
        then_expr: Box<RawArg>,
        else_expr: Box<RawArg>,
        #[serde(default)]
        line: Option<i64>,
    },
}
