pub mod time;
pub mod transform_stack;
