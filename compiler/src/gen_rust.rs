use crate::types::{Definition, DefinitionKind, Field, Schema, TypeExpr};
use crate::parser::MESSAGE_TRAIT;

/// Fixed header placed above the formatted source. Plain comments do not
/// survive the pretty-printer, so this is prepended afterwards.
pub const HEADER: &str = "\
// Licensed under the Apache License, Version 2.0 (the \"License\");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an \"AS IS\" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// DO NOT EDIT: This file is auto-generated by dapgen.
// DAP spec: https://microsoft.github.io/debug-adapter-protocol/specification

";

const MESSAGE_TRAIT_DOC: &str = "\
/// Implemented by every protocol message type. It is not part of the protocol
/// but lets code accept any message while keeping static types.
///
/// The protocol type `Message` (used in the body of `ErrorResponse`) is
/// renamed to `ErrorMessage` to avoid colliding with this trait.";

/// Top-level types whose names end in one of these implement the marker trait.
const MESSAGE_SUFFIXES: [&str; 3] = ["Event", "Request", "Response"];
const ENVELOPE_TYPE: &str = "ProtocolMessage";

/// Converts a string to snake_case.
/// This implementation avoids inserting underscores between consecutive uppercase letters,
/// so that acronyms remain intact (e.g. "sessionID" becomes "session_id").
fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut snake = String::new();
    for i in 0..chars.len() {
        let c = chars[i];
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                if !prev.is_uppercase() || (i + 1 < chars.len() && chars[i + 1].is_lowercase()) {
                    snake.push('_');
                }
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

/// Escapes Rust strict and reserved keywords by suffixing with an underscore.
fn escape_rust_keyword(s: &str) -> String {
    let keywords = [
        "as", "async", "await", "break", "const", "continue", "crate", "dyn",
        "else", "enum", "extern", "false", "fn", "for", "if", "impl",
        "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "self", "Self", "static",
        "struct", "super", "trait", "true", "type", "unsafe",
        "use", "where", "while",
        // Reserved for future use.
        "abstract", "become", "box", "do", "final", "gen", "macro",
        "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
    ];
    if keywords.contains(&s) {
        format!("{}_", s)
    } else {
        s.to_string()
    }
}

/// Rust identifier of the field generated for a JSON property.
pub fn field_ident(json_name: &str) -> String {
    escape_rust_keyword(&to_snake_case(json_name))
}

/// Rust identifier of the flattened field that embeds a base type.
pub fn base_field_ident(base_type: &str) -> String {
    escape_rust_keyword(&to_snake_case(base_type))
}

fn map_type(type_: &TypeExpr) -> String {
    match type_ {
        TypeExpr::String  => "String".to_string(),
        TypeExpr::Integer => "i64".to_string(),
        TypeExpr::Boolean => "bool".to_string(),
        TypeExpr::Any     => "serde_json::Value".to_string(),
        TypeExpr::Array(inner) => format!("Vec<{}>", map_type(inner)),
        TypeExpr::Map(inner)   => format!("BTreeMap<String, {}>", map_type(inner)),
        TypeExpr::Ref(name)    => name.clone(),
    }
}

fn uses_map(type_: &TypeExpr) -> bool {
    match type_ {
        TypeExpr::Map(_) => true,
        TypeExpr::Array(inner) => uses_map(inner),
        _ => false,
    }
}

/// Whether a definition gets an `impl Message`.
pub fn is_message_type(definition: &Definition) -> bool {
    definition.is_toplevel()
        && (definition.name == ENVELOPE_TYPE
            || MESSAGE_SUFFIXES.iter().any(|suffix| definition.name.ends_with(suffix)))
}

/// Compiles the model into unformatted Rust source: the preamble, one item
/// per definition in order, then the marker trait implementations.
pub fn compile_schema_to_rust(schema: &Schema) -> String {
    let mut rust_code: Vec<String> = Vec::new();

    let has_structs = schema
        .definitions
        .iter()
        .any(|d| d.kind == DefinitionKind::Struct);
    let has_aliases = schema
        .definitions
        .iter()
        .any(|d| d.kind == DefinitionKind::Alias);
    let has_maps = schema
        .definitions
        .iter()
        .flat_map(|d| d.fields.iter())
        .any(|f| uses_map(&f.type_));

    if has_structs || has_aliases {
        rust_code.push("use serde::{Deserialize, Serialize};".to_string());
    }
    if has_structs {
        rust_code.push("use serde_with::skip_serializing_none;".to_string());
    }
    if has_maps {
        rust_code.push("use std::collections::BTreeMap;".to_string());
    }
    rust_code.push("".to_string());

    rust_code.push(MESSAGE_TRAIT_DOC.to_string());
    rust_code.push(format!("pub trait {} {{}}", MESSAGE_TRAIT));
    rust_code.push("".to_string());

    for definition in &schema.definitions {
        match definition.kind {
            DefinitionKind::Alias => {
                rust_code.push(generate_alias(definition));
            },
            DefinitionKind::Struct => {
                rust_code.push(generate_struct(definition));
            },
        }
    }

    for definition in schema.definitions.iter().filter(|d| is_message_type(d)) {
        rust_code.push(format!("impl {} for {} {{}}", MESSAGE_TRAIT, definition.name));
    }

    rust_code.join("\n")
}

/// String definitions become transparent newtypes, so they stay distinct
/// types that can carry trait impls of their own.
fn generate_alias(definition: &Definition) -> String {
    format!(
        "#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]\n#[serde(transparent)]\npub struct {}(pub String);\n",
        definition.name
    )
}

fn generate_field(field: &Field) -> String {
    let rust_field_name = field_ident(&field.name);
    let mut field_line = String::new();
    if rust_field_name != field.name {
        field_line.push_str(&format!("    #[serde(rename = {:?})]\n", field.name));
    }
    let field_type = if field.is_required {
        map_type(&field.type_)
    } else {
        format!("Option<{}>", map_type(&field.type_))
    };
    field_line.push_str(&format!("    pub {}: {},", rust_field_name, field_type));
    field_line
}

/// Generates a struct with serde derives. A base type is embedded as a
/// flattened first field; optional fields are `Option<T>` and are skipped
/// when serializing `None`.
fn generate_struct(definition: &Definition) -> String {
    let mut fields = Vec::new();

    if let Some(ref base) = definition.base {
        fields.push(format!(
            "    #[serde(flatten)]\n    pub {}: {},",
            base_field_ident(base),
            base
        ));
    }

    for field in &definition.fields {
        fields.push(generate_field(field));
    }

    let derived = "#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]";
    let serde_attribute = "#[skip_serializing_none]";
    if fields.is_empty() {
        format!(
            "{}\n{}\npub struct {} {{}}\n",
            serde_attribute, derived, definition.name
        )
    } else {
        format!(
            "{}\n{}\npub struct {} {{\n{}\n}}\n",
            serde_attribute,
            derived,
            definition.name,
            fields.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn struct_def(name: &str, base: Option<&str>, fields: Vec<Field>) -> Definition {
        Definition {
            name:   name.to_string(),
            kind:   DefinitionKind::Struct,
            base:   base.map(str::to_string),
            fields,
            parent: None,
        }
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("sessionID"), "session_id");
        assert_eq!(to_snake_case("supportsConfigurationDoneRequest"), "supports_configuration_done_request");
        assert_eq!(to_snake_case("ProtocolMessage"), "protocol_message");
        assert_eq!(to_snake_case("__restart"), "__restart");
        assert_eq!(to_snake_case("seq"), "seq");
    }

    #[test]
    fn test_field_ident_escapes_keywords() {
        assert_eq!(field_ident("type"), "type_");
        assert_eq!(field_ident("threadId"), "thread_id");
        assert_eq!(base_field_ident("Request"), "request");
    }

    #[test]
    fn test_field_ident_escapes_reserved_keywords() {
        for word in ["abstract", "box", "do", "final", "macro", "try", "typeof", "yield"] {
            assert_eq!(field_ident(word), format!("{}_", word));
        }
        assert_eq!(field_ident("finally"), "finally");
    }

    #[test]
    fn test_map_type() {
        assert_eq!(map_type(&TypeExpr::Integer), "i64");
        assert_eq!(
            map_type(&TypeExpr::Map(Box::new(TypeExpr::Array(Box::new(TypeExpr::Ref("Source".into())))))),
            "BTreeMap<String, Vec<Source>>"
        );
        assert_eq!(map_type(&TypeExpr::Any), "serde_json::Value");
    }

    #[test]
    fn test_generate_struct() {
        let def = struct_def(
            "LaunchRequest",
            Some("Request"),
            vec![
                Field { name: "arguments".into(), type_: TypeExpr::Ref("LaunchRequestArguments".into()), is_required: true },
                Field { name: "threadId".into(), type_: TypeExpr::Integer, is_required: false },
            ],
        );
        let expected = "\
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaunchRequest {
    #[serde(flatten)]
    pub request: Request,
    pub arguments: LaunchRequestArguments,
    #[serde(rename = \"threadId\")]
    pub thread_id: Option<i64>,
}
";
        assert_eq!(generate_struct(&def), expected);
    }

    #[test]
    fn test_generate_empty_struct_and_alias() {
        let def = struct_def("ConfigurationDoneArguments", None, vec![]);
        assert!(generate_struct(&def).ends_with("pub struct ConfigurationDoneArguments {}\n"));

        let alias = Definition {
            name:   "ChecksumAlgorithm".into(),
            kind:   DefinitionKind::Alias,
            base:   None,
            fields: vec![],
            parent: None,
        };
        assert_eq!(
            generate_alias(&alias),
            "#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]\n#[serde(transparent)]\npub struct ChecksumAlgorithm(pub String);\n"
        );
    }

    #[test]
    fn test_message_types() {
        assert!(is_message_type(&struct_def("ProtocolMessage", None, vec![])));
        assert!(is_message_type(&struct_def("StoppedEvent", None, vec![])));
        assert!(is_message_type(&struct_def("Response", None, vec![])));
        assert!(!is_message_type(&struct_def("Source", None, vec![])));

        let mut body = struct_def("ErrorResponseBody", None, vec![]);
        body.parent = Some("ErrorResponse".into());
        assert!(!is_message_type(&body));

        let alias = Definition {
            name:   "ExitedEvent".into(),
            kind:   DefinitionKind::Alias,
            base:   None,
            fields: vec![],
            parent: None,
        };
        assert!(is_message_type(&alias));

        let mut nested = struct_def("FooRequest", None, vec![]);
        nested.parent = Some("Foo".into());
        assert!(!is_message_type(&nested));
    }

    #[test]
    fn test_marker_impls_follow_definitions() {
        let schema = Schema {
            definitions: vec![
                struct_def("ProtocolMessage", None, vec![]),
                struct_def("Source", None, vec![]),
                struct_def("NextRequest", Some("ProtocolMessage"), vec![]),
            ],
        };
        let code = compile_schema_to_rust(&schema);
        let impls: Vec<&str> = code.lines().filter(|l| l.starts_with("impl ")).collect();
        assert_eq!(
            impls,
            vec!["impl Message for ProtocolMessage {}", "impl Message for NextRequest {}"]
        );
        assert!(!code.contains("BTreeMap"));
    }
}
