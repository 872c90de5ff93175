use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::{
    types::Schema,
    parser::parse_schema,
    verifier::verify_schema,
    gen_rust::{compile_schema_to_rust, is_message_type, HEADER},
    format::pretty_print,
    error::GenError,
};

/// Parse and verify a schema document into the intermediate model.
/// Returns `Err(GenError)` if reading, parsing or verification fails.
pub fn compile_schema(text: &str) -> Result<Schema, GenError> {
    let schema = parse_schema(text)?;
    verify_schema(&schema)?;
    Ok(schema)
}

/// Generate the complete, formatted Rust module for a schema document.
/// Nothing is returned unless every stage succeeds.
pub fn generate_rust(text: &str) -> Result<String, GenError> {
    let schema = compile_schema(text)?;
    let source = compile_schema_to_rust(&schema);
    debug!(bytes = source.len(), "formatting generated source");
    let formatted = pretty_print(&source)?;

    info!(
        definitions = schema.definitions.len(),
        messages = schema.definitions.iter().filter(|d| is_message_type(d)).count(),
        "generated types"
    );
    Ok(format!("{}{}", HEADER, formatted))
}

/// Read a schema file and generate its Rust module.
pub fn generate_from_file(path: impl AsRef<Path>) -> Result<String, GenError> {
    let text = fs::read_to_string(path.as_ref())?;
    generate_rust(&text)
}
