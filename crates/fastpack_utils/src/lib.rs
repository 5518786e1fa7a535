pub mod base64;
pub mod data_url;
pub mod indexmap;
pub mod sanitize_file_name;
pub mod xxhash;
