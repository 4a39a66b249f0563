//! the built-in function library: every name a recipe can call.

mod compare;
mod epidemiology;
mod financial;
mod io;
mod math;
mod samplers;
mod series;

use crate::registry::FunctionRegistry;

pub fn register_all(registry: &mut FunctionRegistry) {
    math::register(registry);
    compare::register(registry);
    series::register(registry);
    samplers::register(registry);
    io::register(registry);
    financial::register(registry);
    epidemiology::register(registry);
}
