use std::collections::HashSet;

use serde::de::IgnoredAny;
use serde_json::value::RawValue;
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    tokenizer::entries_in_order,
    types::{Definition, DefinitionKind, Field, Schema, TypeExpr},
    utils::{quote, schema_error},
    error::GenError,
};

pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Name of the marker trait shared by all protocol messages in the output.
pub const MESSAGE_TRAIT: &str = "Message";

/// The schema's own `Message` type is emitted under this name.
pub const ERROR_MESSAGE_TYPE: &str = "ErrorMessage";

/// A JSON object whose values are kept as raw text, in source order.
struct RawObject<'a> {
    text:    &'a str,
    entries: Vec<(String, &'a str)>,
}

impl<'a> RawObject<'a> {
    fn parse(text: &'a str) -> Result<Self, GenError> {
        Ok(RawObject {
            text,
            entries: entries_in_order(text)?,
        })
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }
}

/// Renames schema types whose names collide with items the generated module
/// defines itself.
pub fn replace_type_name(type_name: &str) -> String {
    if type_name == MESSAGE_TRAIT {
        ERROR_MESSAGE_TYPE.to_string()
    } else {
        type_name.to_string()
    }
}

/// Parses the value of a `$ref` key, e.g. `"#/definitions/ProtocolMessage"`
/// becomes `ProtocolMessage`.
pub fn parse_ref(ref_value: &Value) -> Result<String, GenError> {
    let reference = ref_value
        .as_str()
        .ok_or_else(|| schema_error("want $ref to be a string", &ref_value.to_string()))?;
    let name = reference.strip_prefix(DEFINITIONS_PREFIX).ok_or_else(|| {
        schema_error(
            &format!("want ref to start with {}", quote(DEFINITIONS_PREFIX)),
            &ref_value.to_string(),
        )
    })?;
    Ok(replace_type_name(name))
}

/// Maps a property descriptor such as `{"type": "array", "items": {...}}`
/// to its type expression.
pub fn parse_property_type(prop: &Value) -> Result<TypeExpr, GenError> {
    if let Some(ref_value) = prop.get("$ref") {
        return Ok(TypeExpr::Ref(parse_ref(ref_value)?));
    }

    let prop_type = prop
        .get("type")
        .ok_or_else(|| schema_error("property with no type or ref", &prop.to_string()))?;

    match prop_type {
        Value::String(type_name) => match type_name.as_str() {
            "string"  => Ok(TypeExpr::String),
            "integer" => Ok(TypeExpr::Integer),
            "boolean" => Ok(TypeExpr::Boolean),
            "array" => {
                let items = prop.get("items").ok_or_else(|| {
                    schema_error("missing items type for property of array type", &prop.to_string())
                })?;
                Ok(TypeExpr::Array(Box::new(parse_property_type(items)?)))
            }
            "object" => {
                // Objects used as property types are maps from string keys to
                // the additionalProperties type.
                let values = prop.get("additionalProperties").ok_or_else(|| {
                    schema_error(
                        "missing additionalProperties field when type=object",
                        &prop.to_string(),
                    )
                })?;
                Ok(TypeExpr::Map(Box::new(parse_property_type(values)?)))
            }
            other => Err(schema_error(
                &format!("unknown property type value {}", quote(other)),
                &prop.to_string(),
            )),
        },
        Value::Array(_) => Ok(TypeExpr::Any),
        _ => Err(schema_error("unknown property type", &prop.to_string())),
    }
}

/// Splits an `allOf` description into the base type name and the type's own
/// description. Descriptions without `allOf` are returned unchanged.
fn parse_inheritance<'a>(desc: RawObject<'a>) -> Result<(Option<String>, RawObject<'a>), GenError> {
    let all_of = match desc.get("allOf") {
        Some(all_of) => all_of,
        None => return Ok((None, desc)),
    };

    let elements: Vec<&'a RawValue> = serde_json::from_str(all_of)?;
    if elements.len() != 2 {
        return Err(schema_error(
            &format!("want 2 elements in allOf list, found {}", elements.len()),
            all_of,
        ));
    }

    let base_ref: Value = serde_json::from_str(elements[0].get())?;
    let base_value = base_ref
        .get("$ref")
        .ok_or_else(|| schema_error("want first allOf element to be a $ref", elements[0].get()))?;
    let base_type = parse_ref(base_value)?;

    let own_desc = RawObject::parse(elements[1].get())?;
    Ok((Some(base_type), own_desc))
}

/// The schema targets a type system where a subtype may redeclare an
/// inherited field with a narrower type. Each of these fields must appear
/// exactly once along an embedding chain, so the generic declarations are
/// dropped where a more specific one exists.
pub fn is_suppressed(type_name: &str, prop_name: &str) -> bool {
    match prop_name {
        "type"      => matches!(type_name, "Request" | "Response" | "Event"),
        "command"   => !matches!(type_name, "Request" | "Response"),
        "event"     => type_name != "Event",
        "arguments" => type_name == "Request",
        "body"      => matches!(type_name, "Response" | "Event"),
        _ => false,
    }
}

fn parse_required(required: Option<&str>) -> Result<HashSet<String>, GenError> {
    let text = match required {
        Some(text) => text,
        None => return Ok(HashSet::new()),
    };
    let values: Vec<Value> = serde_json::from_str(text)?;
    values
        .into_iter()
        .map(|value| match value {
            Value::String(name) => Ok(name),
            other => Err(schema_error("want required entries to be strings", &other.to_string())),
        })
        .collect()
}

/// Builds the definition for `type_name` from its raw description. The first
/// returned definition is the type itself; an inline `body` property adds a
/// `<type_name>Body` definition (and its own nested bodies) after it.
pub fn parse_definition(type_name: &str, desc_text: &str) -> Result<Vec<Definition>, GenError> {
    let desc = RawObject::parse(desc_text)?;
    let (base, desc) = parse_inheritance(desc)?;

    let type_text = desc
        .get("type")
        .ok_or_else(|| schema_error("want description to have 'type'", desc.text))?;
    let desc_type: String = serde_json::from_str(type_text)
        .map_err(|_| schema_error("want description type to be a string", type_text))?;

    let mut definition = Definition {
        name:   type_name.to_string(),
        kind:   DefinitionKind::Struct,
        base,
        fields: Vec::new(),
        parent: None,
    };

    match desc_type.as_str() {
        "string" => {
            definition.kind = DefinitionKind::Alias;
            definition.base = None;
            return Ok(vec![definition]);
        }
        "object" => {}
        _ => {
            return Err(schema_error(
                "want description type to be object or string",
                type_text,
            ))
        }
    }

    let props_text = match desc.get("properties") {
        Some(props_text) => props_text,
        None => return Ok(vec![definition]),
    };
    let required = parse_required(desc.get("required"))?;

    // An inline body becomes its own type, emitted right after this one.
    let mut body_definitions = Vec::new();

    for (prop_name, prop_text) in entries_in_order(props_text)? {
        if is_suppressed(type_name, &prop_name) {
            trace!(type_name = %type_name, prop_name = %prop_name, "suppressing field");
            continue;
        }

        let is_required = required.contains(&prop_name);
        let prop: Value = serde_json::from_str(prop_text)?;

        let type_ = if prop_name == "body" {
            match prop.get("$ref") {
                Some(ref_value) => TypeExpr::Ref(parse_ref(ref_value)?),
                None => {
                    let body_name = format!("{}Body", type_name);
                    body_definitions = parse_definition(&body_name, prop_text)?;
                    body_definitions[0].parent = Some(type_name.to_string());
                    TypeExpr::Ref(body_name)
                }
            }
        } else {
            parse_property_type(&prop)?
        };

        definition.fields.push(Field {
            name: prop_name,
            type_,
            is_required,
        });
    }

    let mut definitions = vec![definition];
    definitions.extend(body_definitions);
    Ok(definitions)
}

/// Parses a whole schema document, keeping the order of its `definitions`.
pub fn parse_schema(text: &str) -> Result<Schema, GenError> {
    // The ordered reader only walks structure; literals are checked here.
    serde_json::from_str::<IgnoredAny>(text)?;
    let root = RawObject::parse(text)?;
    let defs_text = root
        .get("definitions")
        .ok_or_else(|| GenError::SchemaError("want a top-level 'definitions' object".to_string()))?;

    let mut definitions = Vec::new();
    for (name, desc_text) in entries_in_order(defs_text)? {
        let type_name = replace_type_name(&name);
        let parsed = parse_definition(&type_name, desc_text)?;
        debug!(type_name = %type_name, emitted = parsed.len(), "parsed definition");
        definitions.extend(parsed);
    }

    Ok(Schema { definitions })
}
