// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{FieldDefinition, TypeDefinition, TypeKind, TypeSystemDefinition};

use super::schema::{MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, SchemaError};

/// The part of the schema contributed by a single subsystem, declared in SDL.
///
/// The `Query` and `Mutation` object types of the document supply the root operations; all
/// other type definitions are kept as is.
#[derive(Debug, Clone)]
pub struct SubsystemSchema {
    pub queries: Vec<FieldDefinition>,
    pub mutations: Vec<FieldDefinition>,
    pub types: Vec<TypeDefinition>,
}

impl SubsystemSchema {
    pub fn parse(sdl: &str) -> Result<Self, SchemaError> {
        let document = async_graphql_parser::parse_schema(sdl)
            .map_err(|e| SchemaError::Parse(e.to_string()))?;

        let mut schema = SubsystemSchema {
            queries: vec![],
            mutations: vec![],
            types: vec![],
        };

        for definition in document.definitions {
            match definition {
                TypeSystemDefinition::Type(type_definition) => {
                    let type_definition = type_definition.node;
                    let root_fields = match type_definition.name.node.as_str() {
                        QUERY_ROOT_TYPENAME => Some(&mut schema.queries),
                        MUTATION_ROOT_TYPENAME => Some(&mut schema.mutations),
                        _ => None,
                    };

                    match (root_fields, type_definition.kind) {
                        (Some(root_fields), TypeKind::Object(object_type)) => {
                            root_fields.extend(object_type.fields.into_iter().map(|f| f.node))
                        }
                        (Some(_), _) => {
                            return Err(SchemaError::InvalidRootType(
                                type_definition.name.node.to_string(),
                            ));
                        }
                        (None, kind) => schema.types.push(TypeDefinition {
                            kind,
                            ..type_definition
                        }),
                    }
                }
                TypeSystemDefinition::Schema(_) | TypeSystemDefinition::Directive(_) => {
                    return Err(SchemaError::Unsupported(
                        "schema and directive definitions".to_string(),
                    ));
                }
            }
        }

        Ok(schema)
    }
}
