pub mod common;
pub mod dock;
pub mod score;
