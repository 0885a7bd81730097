pub mod disk;
pub mod filesystem;
