pub mod console;
pub mod grid;
