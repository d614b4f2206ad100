//! Schema model built from SDL.
//!
//! A [`Schema`] answers the lookups validation needs: types by name, fields
//! of composite types, directive definitions and the root operation types.
//! Built-in scalars and the `@skip`, `@include` and `@deprecated` directives
//! are always present. The `@export` directive is not built in; a schema opts
//! into exported variables by declaring it.

use std::collections::HashMap;

use smol_str::SmolStr;

use crate::ast::{
    Definition, DirectiveDefinition, FieldDefinition, InputValueDefinition, OperationKind,
    SchemaDefinition, Spanned, Type, TypeDefinition, TypeDefinitionKind, TypeSystemDefinition,
};
use crate::diag::Diag;
use crate::parser::parse;

/// Definitions every schema starts with.
const BUILTIN_SDL: &str = r#"
scalar Int
scalar Float
scalar String
scalar Boolean
scalar ID

directive @skip(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT
directive @include(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT
directive @deprecated(reason: String = "No longer supported") on FIELD_DEFINITION | ARGUMENT_DEFINITION | INPUT_FIELD_DEFINITION | ENUM_VALUE
"#;

/// Error type for schema construction failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error, miette::Diagnostic)]
pub enum SchemaError {
    #[error("schema source has {} syntax error(s)", .diagnostics.len())]
    #[diagnostic(code(schema::syntax))]
    Syntax { diagnostics: Vec<Diag> },

    #[error("executable definitions are not allowed in a schema (found {kind})")]
    #[diagnostic(code(schema::unexpected_executable_definition))]
    UnexpectedExecutableDefinition { kind: &'static str },

    #[error("there can be only one schema definition")]
    #[diagnostic(code(schema::duplicate_schema_definition))]
    DuplicateSchemaDefinition,

    #[error("type \"{name}\" is defined more than once")]
    #[diagnostic(code(schema::duplicate_type))]
    DuplicateType { name: SmolStr },

    #[error("directive \"@{name}\" is defined more than once")]
    #[diagnostic(code(schema::duplicate_directive))]
    DuplicateDirective { name: SmolStr },

    #[error("unknown type \"{name}\" referenced by {referenced_by}")]
    #[diagnostic(code(schema::unknown_type))]
    UnknownType { name: SmolStr, referenced_by: String },

    #[error("schema has no query root type")]
    #[diagnostic(
        code(schema::missing_query_type),
        help("define a type named `Query` or declare `schema {{ query: ... }}`")
    )]
    MissingQueryType,
}

/// Result type for schema construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// An immutable GraphQL schema.
#[derive(Debug, Clone)]
pub struct Schema {
    types: HashMap<SmolStr, TypeDefinition>,
    directives: HashMap<SmolStr, DirectiveDefinition>,
    query_type: SmolStr,
    mutation_type: Option<SmolStr>,
    subscription_type: Option<SmolStr>,
    typename_field: FieldDefinition,
}

impl Schema {
    /// Builds a schema from SDL source.
    pub fn from_sdl(source: &str) -> SchemaResult<Schema> {
        SchemaBuilder::new().add_sdl(source)?.build()
    }

    pub fn type_definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    /// Name of the root type for operations of `kind`.
    pub fn root_type_name(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => Some(self.query_type.as_str()),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    pub fn root_type(&self, kind: OperationKind) -> Option<&TypeDefinition> {
        self.root_type_name(kind)
            .and_then(|name| self.type_definition(name))
    }

    /// Field `field` of the composite type `parent`, including `__typename`.
    pub fn field_definition(&self, parent: &str, field: &str) -> Option<&FieldDefinition> {
        let parent = self.type_definition(parent)?;
        if field == "__typename" && parent.is_composite() {
            return Some(&self.typename_field);
        }
        parent.field(field)
    }

    pub fn input_field(&self, input_type: &str, field: &str) -> Option<&InputValueDefinition> {
        self.type_definition(input_type)?.input_field(field)
    }

    /// True for object, interface and union types.
    pub fn is_composite(&self, name: &str) -> bool {
        self.type_definition(name)
            .is_some_and(TypeDefinition::is_composite)
    }
}

/// Accumulates SDL documents and validates them into a [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    types: Vec<TypeDefinition>,
    directives: Vec<DirectiveDefinition>,
    schema_definitions: Vec<SchemaDefinition>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `source` and adds its type-system definitions.
    pub fn add_sdl(mut self, source: &str) -> SchemaResult<Self> {
        let result = parse(source);
        if result.has_errors() {
            return Err(SchemaError::Syntax {
                diagnostics: result.diagnostics,
            });
        }
        let Some(document) = result.document else {
            return Ok(self);
        };

        for definition in document.definitions {
            match definition {
                Definition::TypeSystem(definition) => self.add_definition(definition),
                Definition::Operation(_) => {
                    return Err(SchemaError::UnexpectedExecutableDefinition { kind: "operation" });
                }
                Definition::Fragment(_) => {
                    return Err(SchemaError::UnexpectedExecutableDefinition { kind: "fragment" });
                }
            }
        }
        Ok(self)
    }

    pub fn add_definition(&mut self, definition: TypeSystemDefinition) {
        match definition {
            TypeSystemDefinition::Schema(schema) => self.schema_definitions.push(schema),
            TypeSystemDefinition::Type(ty) => self.types.push(ty),
            TypeSystemDefinition::Directive(directive) => self.directives.push(directive),
        }
    }

    /// Resolves root types and checks every type reference.
    pub fn build(self) -> SchemaResult<Schema> {
        let SchemaBuilder {
            types: user_types,
            directives: user_directives,
            mut schema_definitions,
        } = self;

        if schema_definitions.len() > 1 {
            return Err(SchemaError::DuplicateSchemaDefinition);
        }

        let mut types = HashMap::new();
        for ty in user_types {
            let name = ty.name.node.clone();
            if types.insert(name.clone(), ty).is_some() {
                return Err(SchemaError::DuplicateType { name });
            }
        }
        let mut directives = HashMap::new();
        for directive in user_directives {
            let name = directive.name.node.clone();
            if directives.insert(name.clone(), directive).is_some() {
                return Err(SchemaError::DuplicateDirective { name });
            }
        }

        // Built-ins fill in whatever the SDL did not redefine.
        let mut builtins = SchemaBuilder::new();
        if let Some(document) = parse(BUILTIN_SDL).document {
            for definition in document.definitions {
                if let Definition::TypeSystem(definition) = definition {
                    builtins.add_definition(definition);
                }
            }
        }
        for ty in builtins.types {
            types.entry(ty.name.node.clone()).or_insert(ty);
        }
        for directive in builtins.directives {
            directives
                .entry(directive.name.node.clone())
                .or_insert(directive);
        }

        let (query_type, mutation_type, subscription_type) = match schema_definitions.pop() {
            Some(schema) => {
                let root = |kind: OperationKind| {
                    schema
                        .root_operations
                        .iter()
                        .find(|op| op.kind == kind)
                        .map(|op| op.named_type.node.clone())
                };
                let Some(query) = root(OperationKind::Query) else {
                    return Err(SchemaError::MissingQueryType);
                };
                (
                    query,
                    root(OperationKind::Mutation),
                    root(OperationKind::Subscription),
                )
            }
            None => {
                let default = |name: &str| types.contains_key(name).then(|| SmolStr::new(name));
                let Some(query) = default("Query") else {
                    return Err(SchemaError::MissingQueryType);
                };
                (query, default("Mutation"), default("Subscription"))
            }
        };

        let schema = Schema {
            types,
            directives,
            query_type,
            mutation_type,
            subscription_type,
            typename_field: typename_field(),
        };
        check_references(&schema)?;
        Ok(schema)
    }
}

fn typename_field() -> FieldDefinition {
    FieldDefinition {
        description: None,
        name: Spanned::new(SmolStr::new_static("__typename"), 0..0),
        arguments: Vec::new(),
        ty: Spanned::new(Type::non_null(Type::named("String")), 0..0),
        directives: Vec::new(),
        span: 0..0,
    }
}

fn check_references(schema: &Schema) -> SchemaResult<()> {
    let require = |name: &SmolStr, referenced_by: &dyn Fn() -> String| {
        if schema.types.contains_key(name) {
            Ok(())
        } else {
            Err(SchemaError::UnknownType {
                name: name.clone(),
                referenced_by: referenced_by(),
            })
        }
    };

    for kind in [
        OperationKind::Query,
        OperationKind::Mutation,
        OperationKind::Subscription,
    ] {
        if let Some(name) = schema.root_type_name(kind) {
            require(&SmolStr::new(name), &|| format!("the {kind} root"))?;
        }
    }

    for ty in schema.types.values() {
        let owner = &ty.name.node;
        match &ty.kind {
            TypeDefinitionKind::Object { interfaces, fields }
            | TypeDefinitionKind::Interface { interfaces, fields } => {
                for interface in interfaces {
                    require(&interface.node, &|| format!("type \"{owner}\""))?;
                }
                for field in fields {
                    require(field.ty.node.base_name(), &|| {
                        format!("field \"{owner}.{}\"", field.name.node)
                    })?;
                    for argument in &field.arguments {
                        require(argument.ty.node.base_name(), &|| {
                            format!(
                                "argument \"{owner}.{}({}:)\"",
                                field.name.node, argument.name.node
                            )
                        })?;
                    }
                }
            }
            TypeDefinitionKind::Union { members } => {
                for member in members {
                    require(&member.node, &|| format!("union \"{owner}\""))?;
                }
            }
            TypeDefinitionKind::InputObject { fields } => {
                for field in fields {
                    require(field.ty.node.base_name(), &|| {
                        format!("input field \"{owner}.{}\"", field.name.node)
                    })?;
                }
            }
            TypeDefinitionKind::Scalar | TypeDefinitionKind::Enum { .. } => {}
        }
    }

    for directive in schema.directives.values() {
        for argument in &directive.arguments {
            require(argument.ty.node.base_name(), &|| {
                format!(
                    "argument \"@{}({}:)\"",
                    directive.name.node, argument.name.node
                )
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDL: &str = r#"
        directive @export(as: String!) on FIELD

        type Query {
            user(id: ID!): User
            users: [User!]!
        }

        type User {
            id: ID!
            name: String
        }

        input UserFilter { name: String }
    "#;

    #[test]
    fn builds_with_builtins_and_default_roots() {
        let schema = Schema::from_sdl(SDL).expect("schema");
        assert_eq!(schema.root_type_name(OperationKind::Query), Some("Query"));
        assert!(schema.root_type(OperationKind::Mutation).is_none());
        assert!(schema.type_definition("Boolean").is_some());
        assert!(schema.has_directive("export"));
        assert!(schema.directive("skip").is_some());
        assert!(schema.is_composite("User"));
        assert!(!schema.is_composite("String"));
    }

    #[test]
    fn field_lookup_includes_typename() {
        let schema = Schema::from_sdl(SDL).expect("schema");
        let users = schema.field_definition("Query", "users").expect("users");
        assert_eq!(users.ty.node.to_string(), "[User!]!");
        let typename = schema
            .field_definition("User", "__typename")
            .expect("__typename");
        assert_eq!(typename.ty.node.to_string(), "String!");
        assert!(schema.field_definition("String", "__typename").is_none());
        assert!(schema.input_field("UserFilter", "name").is_some());
    }

    #[test]
    fn explicit_schema_block_sets_roots() {
        let schema = Schema::from_sdl(
            "schema { query: Root mutation: Writes } type Root { a: Int } type Writes { b: Int }",
        )
        .expect("schema");
        assert_eq!(schema.root_type_name(OperationKind::Query), Some("Root"));
        assert_eq!(
            schema.root_type_name(OperationKind::Mutation),
            Some("Writes")
        );
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            Schema::from_sdl("type User { id: ID }").unwrap_err(),
            SchemaError::MissingQueryType
        );
        assert_eq!(
            Schema::from_sdl("type Query { a: Int } type Query { b: Int }").unwrap_err(),
            SchemaError::DuplicateType {
                name: "Query".into()
            }
        );
        assert!(matches!(
            Schema::from_sdl("type Query { a: Missing }").unwrap_err(),
            SchemaError::UnknownType { name, .. } if name == "Missing"
        ));
        assert!(matches!(
            Schema::from_sdl("type Query { a: Int } { a }").unwrap_err(),
            SchemaError::UnexpectedExecutableDefinition { kind: "operation" }
        ));
        assert!(matches!(
            Schema::from_sdl("type Query {").unwrap_err(),
            SchemaError::Syntax { diagnostics } if !diagnostics.is_empty()
        ));
    }

    #[test]
    fn builder_merges_sources() {
        let schema = SchemaBuilder::new()
            .add_sdl("type Query { me: User }")
            .and_then(|builder| builder.add_sdl("type User { id: ID! }"))
            .and_then(SchemaBuilder::build)
            .expect("schema");
        assert!(schema.field_definition("User", "id").is_some());
    }

    #[test]
    fn redefined_builtin_scalar_wins() {
        let schema =
            Schema::from_sdl(r#""custom" scalar ID type Query { id: ID }"#).expect("schema");
        let id = schema.type_definition("ID").expect("ID");
        assert_eq!(id.description.as_deref(), Some("custom"));
    }

    #[test]
    fn error_display() {
        let error = SchemaError::UnknownType {
            name: "Missing".into(),
            referenced_by: "field \"Query.a\"".into(),
        };
        assert_eq!(
            error.to_string(),
            "unknown type \"Missing\" referenced by field \"Query.a\""
        );
    }
}
