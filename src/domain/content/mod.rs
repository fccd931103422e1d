pub mod node;
pub mod value;
