pub mod clean;
pub mod html;
pub mod purge_css;
