pub mod generate;

pub use generate::{generate_language, GenerateOptions};
