//! dapgen-compiler
//!
//! Turns the Debug Adapter Protocol JSON schema into Rust types:
//!  1) An order-preserving JSON object reader (`tokenizer`),
//!  2) A schema parser building the intermediate model (`parser`, `types`),
//!  3) A model verifier (duplicate or undefined types, recursive structs, etc.),
//!  4) Code generation (`compile_schema_to_rust`) and formatting (`format`),
//!  5) Error types (`GenError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod tokenizer;
pub mod parser;
pub mod verifier;
pub mod gen_rust;
pub mod format;
pub mod compiler;

pub use compiler::compile_schema;
pub use compiler::generate_from_file;
pub use compiler::generate_rust;
pub use gen_rust::compile_schema_to_rust;
