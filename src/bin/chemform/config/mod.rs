mod filter;
mod limits;

pub use filter::{ElementFilter, build_element_filter};
pub use limits::build_parser;
