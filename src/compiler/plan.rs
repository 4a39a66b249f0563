//! the compiled, index-addressed program representation.
//!
//! built once per recipe; evaluated once per trial. no JSON, no string
//! lookups, no factory calls remain in this shape -- every name has already
//! been resolved to a slot index or a constructed [`Executable`].

use crate::executable::Executable;
use crate::value::Value;

/// a pre-resolved argument: a constant, a slot to read, a nested call to
/// run, or a nested conditional to evaluate. built once at compile time,
/// walked once per evaluation.
pub enum ArgPlan {
    Literal(Value),
    SlotRef(usize),
    Nested {
        function_name: String,
        line: Option<i64>,
        logic: Box<dyn Executable>,
        args: Vec<ArgPlan>,
    },
    Conditional {
        condition: Box<ArgPlan>,
        then_branch: Box<ArgPlan>,
        else_branch: Box<ArgPlan>,
        line: Option<i64>,
    },
}

/// a compiled step of either the pre-trial or per-trial program.
pub enum Step {
    LiteralAssign {
        slot: usize,
        value: Value,
    },
    CallAssign {
        slots: Vec<usize>,
        function_name: String,
        line: Option<i64>,
        logic: Box<dyn Executable>,
        args: Vec<ArgPlan>,
    },
    CondAssign {
        slot: usize,
        condition: ArgPlan,
        then_branch: ArgPlan,
        else_branch: ArgPlan,
        line: Option<i64>,
    },
}
