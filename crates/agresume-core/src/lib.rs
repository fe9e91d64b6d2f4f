pub mod fs;
pub mod path;

pub use fs::{file_name, is_dir, list_dir, modified_time, path_exists, rank_by_modified};
pub use path::{
    Error, Result, discover_project_root, expand_tilde, is_within_scope, normalize_path,
    paths_equal, project_hash_from_root,
};
