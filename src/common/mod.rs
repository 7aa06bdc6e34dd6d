pub mod fs;
pub mod polygon;

pub use fs::{require_dir_exists, require_file_exists};
pub use polygon::shape_to_multipolygon;
