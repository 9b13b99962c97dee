pub mod parse;
pub mod registry;
pub mod route;
