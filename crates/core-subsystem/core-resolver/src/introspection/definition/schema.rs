// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_parser::{
    Positioned,
    types::{
        BaseType, FieldDefinition, InputValueDefinition, ObjectType, Type, TypeDefinition,
        TypeKind,
    },
};
use async_graphql_value::Name;
use thiserror::Error;

use crate::{plugin::SubsystemGraphQLResolver, validation::underlying_type};

use super::{
    subsystem_schema::SubsystemSchema,
    type_introspection::{default_positioned, default_positioned_name},
};

const BUILTIN_SDL: &str = include_str!("builtin.graphql");

/// The complete schema served by the GraphQL endpoint: the subsystems' types, the root operation
/// types, the built-in scalars and the introspection types.
#[derive(Debug, Clone)]
pub struct Schema {
    pub type_definitions: Vec<TypeDefinition>,
    pub directives: Vec<DirectiveDescriptor>,
    pub(crate) schema_field_definition: FieldDefinition,
    pub(crate) type_field_definition: FieldDefinition,
}

/// An executable directive understood by the validator.
#[derive(Debug, Clone)]
pub struct DirectiveDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub locations: &'static [&'static str],
    pub arguments: Vec<InputValueDefinition>,
}

pub const QUERY_ROOT_TYPENAME: &str = "Query";
pub const MUTATION_ROOT_TYPENAME: &str = "Mutation";

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to parse schema: {0}")]
    Parse(String),

    #[error("Type '{0}' must be an object type to serve as a root operation type")]
    InvalidRootType(String),

    #[error("Unsupported definition in subsystem schema: {0}")]
    Unsupported(String),

    #[error("Type '{type_name}' referenced by '{referenced_by}' is not defined")]
    UnknownType {
        type_name: String,
        referenced_by: String,
    },
}

impl Schema {
    pub fn new_from_resolvers(
        subsystem_resolvers: &[Arc<dyn SubsystemGraphQLResolver + Send + Sync>],
        allow_mutations: bool,
    ) -> Result<Schema, SchemaError> {
        let type_definitions = subsystem_resolvers
            .iter()
            .flat_map(|resolver| resolver.schema_types())
            .collect();

        let queries = subsystem_resolvers
            .iter()
            .flat_map(|resolver| resolver.schema_queries())
            .collect();

        let mutations = if allow_mutations {
            subsystem_resolvers
                .iter()
                .flat_map(|resolver| resolver.schema_mutations())
                .collect()
        } else {
            vec![]
        };

        Self::new(type_definitions, queries, mutations)
    }

    pub(crate) fn new(
        type_definitions: Vec<TypeDefinition>,
        queries: Vec<FieldDefinition>,
        mutations: Vec<FieldDefinition>,
    ) -> Result<Schema, SchemaError> {
        let mut type_definitions = type_definitions;
        type_definitions.extend(SubsystemSchema::parse(BUILTIN_SDL)?.types);

        // The query root is always present (even if empty) so that introspection has a
        // `queryType` to report. Root field order follows declaration order.
        type_definitions.push(Self::create_root_type(QUERY_ROOT_TYPENAME, queries));

        if !mutations.is_empty() {
            type_definitions.push(Self::create_root_type(MUTATION_ROOT_TYPENAME, mutations));
        }

        // ensure introspection outputs types in a stable order
        type_definitions.sort_by(|a, b| a.name.node.cmp(&b.name.node));
        type_definitions.dedup_by(|a, b| a.name.node == b.name.node);

        Self::check_references(&type_definitions)?;

        Ok(Schema {
            type_definitions,
            directives: Self::create_directives(),
            schema_field_definition: Self::create_field(
                "__schema",
                false,
                Some("Access the current type schema of this server."),
                "__Schema",
                vec![],
            )
            .node,
            type_field_definition: Self::create_field(
                "__type",
                true,
                Some("Request the type information of a single type."),
                "__Type",
                vec![Self::create_argument("name", false, "String")],
            )
            .node,
        })
    }

    pub fn get_type_definition(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.type_definitions
            .iter()
            .find(|td| td.name.node.as_str() == type_name)
    }

    pub fn has_mutations(&self) -> bool {
        self.get_type_definition(MUTATION_ROOT_TYPENAME).is_some()
    }

    fn create_root_type(name: &str, fields: Vec<FieldDefinition>) -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(name),
            directives: vec![],
            kind: TypeKind::Object(ObjectType {
                implements: vec![],
                fields: fields.into_iter().map(default_positioned).collect(),
            }),
        }
    }

    fn check_references(type_definitions: &[TypeDefinition]) -> Result<(), SchemaError> {
        let known = |name: &Name| {
            type_definitions
                .iter()
                .any(|td| td.name.node.as_str() == name.as_str())
        };

        let check = |name: &Name, referenced_by: String| {
            if known(name) {
                Ok(())
            } else {
                Err(SchemaError::UnknownType {
                    type_name: name.to_string(),
                    referenced_by,
                })
            }
        };

        for td in type_definitions {
            let type_name = td.name.node.as_str();

            match &td.kind {
                TypeKind::Object(object_type) => {
                    for field in &object_type.fields {
                        let field_name = format!("{type_name}.{}", field.node.name.node);
                        check(underlying_type(&field.node.ty.node), field_name.clone())?;
                        for arg in &field.node.arguments {
                            check(
                                underlying_type(&arg.node.ty.node),
                                format!("{field_name}({})", arg.node.name.node),
                            )?;
                        }
                    }
                }
                TypeKind::InputObject(input_type) => {
                    for field in &input_type.fields {
                        check(
                            underlying_type(&field.node.ty.node),
                            format!("{type_name}.{}", field.node.name.node),
                        )?;
                    }
                }
                TypeKind::Union(union_type) => {
                    for member in &union_type.members {
                        check(&member.node, type_name.to_string())?;
                    }
                }
                TypeKind::Scalar | TypeKind::Enum(_) | TypeKind::Interface(_) => {}
            }
        }

        Ok(())
    }

    fn create_directives() -> Vec<DirectiveDescriptor> {
        const LOCATIONS: &[&str] = &["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"];

        vec![
            DirectiveDescriptor {
                name: "include",
                description: "Directs the executor to include this field or fragment only when the `if` argument is true.",
                locations: LOCATIONS,
                arguments: vec![Self::create_argument("if", false, "Boolean").node],
            },
            DirectiveDescriptor {
                name: "skip",
                description: "Directs the executor to skip this field or fragment when the `if` argument is true.",
                locations: LOCATIONS,
                arguments: vec![Self::create_argument("if", false, "Boolean").node],
            },
        ]
    }

    fn create_argument(
        name: &str,
        nullable: bool,
        type_name: &str,
    ) -> Positioned<InputValueDefinition> {
        default_positioned(InputValueDefinition {
            description: None,
            name: default_positioned_name(name),
            directives: vec![],
            default_value: None,
            ty: default_positioned(Type {
                base: BaseType::Named(Name::new(type_name)),
                nullable,
            }),
        })
    }

    pub fn create_field(
        name: &str,
        nullable: bool,
        description: Option<&str>,
        element_type: &str,
        arguments: Vec<Positioned<InputValueDefinition>>,
    ) -> Positioned<FieldDefinition> {
        default_positioned(FieldDefinition {
            description: description.map(|d| default_positioned(d.to_string())),
            name: default_positioned_name(name),
            arguments,
            ty: default_positioned(Type {
                base: BaseType::Named(Name::new(element_type)),
                nullable,
            }),
            directives: vec![],
        })
    }
}
