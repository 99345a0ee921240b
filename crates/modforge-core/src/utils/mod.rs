pub mod fs;

pub use fs::{is_contained_relative, is_dir, is_file, list_subdirectories};
