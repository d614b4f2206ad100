//! Static type context tracked while walking an executable document.

use smol_str::SmolStr;

use crate::ast::{
    Argument, Directive, DirectiveDefinition, Field, FieldDefinition, FragmentDefinition,
    InlineFragment, ObjectField, OperationDefinition, Type,
};
use crate::schema::Schema;

/// Stacks of output, parent and input types for the node being visited.
///
/// Entries are `None` where the document refers to something the schema
/// does not define; lookups below an unknown node stay unknown.
pub struct TypeInfo<'s> {
    schema: &'s Schema,
    output_types: Vec<Option<Type>>,
    parent_types: Vec<Option<SmolStr>>,
    field_definitions: Vec<Option<&'s FieldDefinition>>,
    input_types: Vec<Option<Type>>,
    /// Set while inside a directive; the inner value is `None` when the
    /// schema does not define it.
    directive: Option<Option<&'s DirectiveDefinition>>,
}

impl<'s> TypeInfo<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            output_types: Vec::new(),
            parent_types: Vec::new(),
            field_definitions: Vec::new(),
            input_types: Vec::new(),
            directive: None,
        }
    }

    /// Output type of the innermost field, operation root or fragment.
    pub fn output_type(&self) -> Option<&Type> {
        self.output_types.last().and_then(Option::as_ref)
    }

    /// Composite type whose selection set is being visited.
    pub fn parent_type(&self) -> Option<&str> {
        self.parent_types.last().and_then(|ty| ty.as_deref())
    }

    pub fn field_definition(&self) -> Option<&'s FieldDefinition> {
        self.field_definitions.last().copied().flatten()
    }

    /// Type expected for the input value being visited.
    pub fn input_type(&self) -> Option<&Type> {
        self.input_types.last().and_then(Option::as_ref)
    }

    pub fn enter_operation(&mut self, operation: &OperationDefinition) {
        let root = self
            .schema
            .root_type_name(operation.kind)
            .map(Type::named);
        self.output_types.push(root);
    }

    pub fn leave_operation(&mut self) {
        self.output_types.pop();
    }

    pub fn enter_fragment_definition(&mut self, fragment: &FragmentDefinition) {
        self.output_types
            .push(Some(Type::named(fragment.type_condition.node.clone())));
    }

    pub fn leave_fragment_definition(&mut self) {
        self.output_types.pop();
    }

    pub fn enter_inline_fragment(&mut self, fragment: &InlineFragment) {
        let ty = match &fragment.type_condition {
            Some(condition) => Some(Type::named(condition.node.clone())),
            None => self.parent_type().map(Type::named),
        };
        self.output_types.push(ty);
    }

    pub fn leave_inline_fragment(&mut self) {
        self.output_types.pop();
    }

    pub fn enter_selection_set(&mut self) {
        let parent = self
            .output_type()
            .map(Type::base_name)
            .filter(|name| self.schema.is_composite(name))
            .cloned();
        self.parent_types.push(parent);
    }

    pub fn leave_selection_set(&mut self) {
        self.parent_types.pop();
    }

    pub fn enter_field(&mut self, field: &Field) {
        let definition = self
            .parent_type()
            .and_then(|parent| self.schema.field_definition(parent, &field.name.node));
        self.field_definitions.push(definition);
        self.output_types
            .push(definition.map(|definition| definition.ty.node.clone()));
    }

    pub fn leave_field(&mut self) {
        self.field_definitions.pop();
        self.output_types.pop();
    }

    pub fn enter_directive(&mut self, directive: &Directive) {
        self.directive = Some(self.schema.directive(&directive.name.node));
    }

    pub fn leave_directive(&mut self) {
        self.directive = None;
    }

    /// Resolves the argument against the enclosing directive, or else the field.
    /// Arguments of directives unknown to the schema have no type.
    pub fn enter_argument(&mut self, argument: &Argument) {
        let name = argument.name.node.as_str();
        let definition = match self.directive {
            Some(directive) => directive.and_then(|directive| directive.argument(name)),
            None => self
                .field_definition()
                .and_then(|field| field.argument(name)),
        };
        self.input_types
            .push(definition.map(|definition| definition.ty.node.clone()));
    }

    pub fn leave_argument(&mut self) {
        self.input_types.pop();
    }

    pub fn enter_list_value(&mut self) {
        let item = self.input_type().and_then(Type::list_item).cloned();
        self.input_types.push(item);
    }

    pub fn leave_list_value(&mut self) {
        self.input_types.pop();
    }

    pub fn enter_object_field(&mut self, field: &ObjectField) {
        let ty = self
            .input_type()
            .map(Type::base_name)
            .and_then(|input| self.schema.input_field(input, &field.name.node))
            .map(|definition| definition.ty.node.clone());
        self.input_types.push(ty);
    }

    pub fn leave_object_field(&mut self) {
        self.input_types.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Selection, Spanned, Value};

    fn schema() -> Schema {
        Schema::from_sdl(
            r#"
            type Query { user(id: ID!, filter: Filter): User }
            type User { id: ID! tags: [String] }
            input Filter { ids: [ID!] }
            "#,
        )
        .expect("schema")
    }

    fn field(name: &str) -> Field {
        Field {
            alias: None,
            name: Spanned::new(name.into(), 0..0),
            arguments: Vec::new(),
            directives: Vec::new(),
            selection_set: None,
            span: 0..0,
        }
    }

    #[test]
    fn tracks_field_output_types() {
        let schema = schema();
        let document = crate::parse("{ user(id: 1) { tags } }")
            .document
            .expect("document");
        let operation = document.operations().next().expect("operation");

        let mut info = TypeInfo::new(&schema);
        info.enter_operation(operation);
        info.enter_selection_set();
        assert_eq!(info.parent_type(), Some("Query"));

        let Selection::Field(user) = &operation.selection_set.selections[0] else {
            panic!("expected field");
        };
        info.enter_field(user);
        assert_eq!(info.output_type(), Some(&Type::named("User")));
        info.enter_selection_set();
        info.enter_field(&field("tags"));
        assert_eq!(info.output_type().map(ToString::to_string), Some("[String]".into()));
        info.leave_field();
        info.enter_field(&field("missing"));
        assert_eq!(info.output_type(), None);
        info.leave_field();
        info.leave_selection_set();
        info.leave_field();
        assert_eq!(info.parent_type(), Some("Query"));
    }

    #[test]
    fn tracks_input_types_through_lists_and_objects() {
        let schema = schema();
        let mut info = TypeInfo::new(&schema);
        info.output_types.push(Some(Type::named("Query")));
        info.enter_selection_set();
        info.enter_field(&field("user"));

        let argument = Argument {
            name: Spanned::new("filter".into(), 0..0),
            value: Spanned::new(Value::Null, 0..0),
            span: 0..0,
        };
        info.enter_argument(&argument);
        assert_eq!(info.input_type(), Some(&Type::named("Filter")));
        info.enter_object_field(&ObjectField {
            name: Spanned::new("ids".into(), 0..0),
            value: Spanned::new(Value::Null, 0..0),
            span: 0..0,
        });
        info.enter_list_value();
        assert_eq!(info.input_type(), Some(&Type::non_null(Type::named("ID"))));
        info.leave_list_value();
        info.leave_object_field();
        info.leave_argument();
        assert_eq!(info.input_type(), None);
    }

    #[test]
    fn unknown_directive_arguments_are_untyped() {
        let schema = schema();
        let mut info = TypeInfo::new(&schema);
        info.output_types.push(Some(Type::named("Query")));
        info.enter_selection_set();
        info.enter_field(&field("user"));

        let id = Argument {
            name: Spanned::new("id".into(), 0..0),
            value: Spanned::new(Value::Null, 0..0),
            span: 0..0,
        };
        info.enter_directive(&Directive {
            name: Spanned::new("unknown".into(), 0..0),
            arguments: Vec::new(),
            span: 0..0,
        });
        info.enter_argument(&id);
        assert_eq!(info.input_type(), None);
        info.leave_argument();
        info.leave_directive();

        info.enter_argument(&id);
        assert_eq!(info.input_type(), Some(&Type::non_null(Type::named("ID"))));
    }
}
