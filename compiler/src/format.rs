use crate::error::GenError;

/// Parses generated source as a Rust file and prints it back in canonical
/// form. Fails if the text is not syntactically valid Rust.
pub fn pretty_print(source: &str) -> Result<String, GenError> {
    let file = syn::parse_file(source).map_err(|e| GenError::FormatError(e.to_string()))?;
    Ok(prettyplease::unparse(&file))
}
