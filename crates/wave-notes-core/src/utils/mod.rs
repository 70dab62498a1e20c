pub mod fs;

pub use fs::{create_dir_all, has_line, remove_dir_all_if_exists, remove_dir_if_empty, remove_file_if_exists, write_atomic};
