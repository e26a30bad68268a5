pub mod encoding;
pub mod environment;
pub mod terminal;

pub use encoding::{encode_component, slugify_term};
pub use environment::{APP_DIR_NAME, default_config_path, default_data_dir};
pub use terminal::{sanitize_line, truncate};
