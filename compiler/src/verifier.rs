use std::collections::{HashMap, HashSet};
use crate::{
    types::{Schema, Definition, DefinitionKind, TypeExpr},
    gen_rust::{base_field_ident, field_ident},
    utils::quote,
    error::GenError,
};

/// Names the generated module already uses for its own items.
pub const RESERVED_NAMES: [&str; 5] = [
    "Message", "Serialize", "Deserialize", "BTreeMap", "skip_serializing_none",
];

/// Returns `Ok(())` if the model renders to compilable Rust, or
/// `Err(GenError::VerifierError(_))` otherwise.
pub fn verify_schema(schema: &Schema) -> Result<(), GenError> {
    let mut definitions_map: HashMap<&str, &Definition> = HashMap::new();

    // 1) Check duplicate / reserved type names
    for def in &schema.definitions {
        if definitions_map.contains_key(def.name.as_str()) {
            return Err(GenError::VerifierError(format!(
                "The type {} is defined twice",
                quote(&def.name)
            )));
        }
        if RESERVED_NAMES.contains(&def.name.as_str()) {
            return Err(GenError::VerifierError(format!(
                "The type name {} is reserved",
                quote(&def.name)
            )));
        }
        definitions_map.insert(&def.name, def);
    }

    // 2) Check references and field identifiers inside each struct
    for def in &schema.definitions {
        let mut idents = HashSet::new();

        if let Some(ref base) = def.base {
            if !definitions_map.contains_key(base.as_str()) {
                return Err(GenError::VerifierError(format!(
                    "The base type {} of {} is not defined",
                    quote(base),
                    quote(&def.name)
                )));
            }
            idents.insert(base_field_ident(base));
        }

        for field in &def.fields {
            if let TypeExpr::Ref(ref ty) = field.type_.innermost() {
                if !definitions_map.contains_key(ty.as_str()) {
                    return Err(GenError::VerifierError(format!(
                        "The type {} is not defined for field {}",
                        quote(ty),
                        quote(&field.name)
                    )));
                }
            }

            let ident = field_ident(&field.name);
            if !idents.insert(ident.clone()) {
                return Err(GenError::VerifierError(format!(
                    "The field {} of {} collides with another field named {}",
                    quote(&field.name),
                    quote(&def.name),
                    quote(&ident)
                )));
            }
        }
    }

    // 3) Check that structs do not contain themselves without indirection
    let mut state: HashMap<String, u8> = HashMap::new();
    fn check_recursion(
        name: &str,
        definitions_map: &HashMap<&str, &Definition>,
        state: &mut HashMap<String, u8>,
    ) -> Result<(), GenError> {
        let definition = match definitions_map.get(name) {
            Some(def) => def,
            None => return Ok(()),
        };
        if let DefinitionKind::Struct = definition.kind {
            if let Some(&s) = state.get(name) {
                if s == 1 {
                    return Err(GenError::VerifierError(format!(
                        "Recursive nesting of {} is not allowed",
                        quote(name)
                    )));
                } else if s == 2 {
                    return Ok(());
                }
            }
            state.insert(name.to_string(), 1);
            if let Some(ref base) = definition.base {
                check_recursion(base, definitions_map, state)?;
            }
            for field in &definition.fields {
                // Vec and BTreeMap fields are heap indirections.
                if let TypeExpr::Ref(ref ty) = field.type_ {
                    check_recursion(ty, definitions_map, state)?;
                }
            }
            state.insert(name.to_string(), 2);
        }
        Ok(())
    }

    for def in &schema.definitions {
        check_recursion(&def.name, &definitions_map, &mut state)?;
    }

    Ok(())
}
