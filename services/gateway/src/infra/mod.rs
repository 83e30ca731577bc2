pub mod directory;
pub mod memory;
