pub mod utils;
pub mod validation;
