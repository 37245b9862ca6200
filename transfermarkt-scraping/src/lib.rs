#[macro_use]
pub mod macros;

pub mod api;
pub mod fs_json_util;
pub mod parser;
pub mod schema;
