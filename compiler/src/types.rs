use serde::Serialize;

#[derive(Debug, PartialEq, Serialize)]
pub struct Schema {
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DefinitionKind {
    /// A plain `string` alias.
    Alias,
    Struct,
}

/// Type of a single property, mapped from its schema descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeExpr {
    String,
    Integer,
    Boolean,
    /// Untyped value, used for `type` unions.
    Any,
    Array(Box<TypeExpr>),
    /// String-keyed map.
    Map(Box<TypeExpr>),
    Ref(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name:        String,
    pub type_:       TypeExpr,
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    pub name:   String,
    pub kind:   DefinitionKind,
    /// Type named in the first element of an `allOf` pair.
    pub base:   Option<String>,
    pub fields: Vec<Field>,
    /// Owning type of a synthesized `<Type>Body` definition.
    pub parent: Option<String>,
}

impl TypeExpr {
    /// The element type at the bottom of any array/map nesting.
    pub fn innermost(&self) -> &TypeExpr {
        match self {
            TypeExpr::Array(inner) | TypeExpr::Map(inner) => inner.innermost(),
            other => other,
        }
    }
}

impl Definition {
    pub fn is_toplevel(&self) -> bool {
        self.parent.is_none()
    }
}
