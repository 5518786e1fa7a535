pub mod cancel_token;
pub mod chunk_file_info;
pub mod entry_point;
pub mod module_id;
pub mod output_asset;
pub mod raw_idx;
pub mod side_artifact;
pub mod source;
