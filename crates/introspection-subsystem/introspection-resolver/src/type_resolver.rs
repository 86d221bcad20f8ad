// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::introspection::definition::schema::Schema;
use core_resolver::introspection::definition::type_introspection::TypeDefinitionIntrospection;
use core_resolver::plugin::SubsystemResolutionError;
use core_resolver::validation::field::ValidatedField;

use async_graphql_parser::Positioned;
use async_graphql_parser::types::{BaseType, Type, TypeDefinition, TypeKind};
use async_graphql_value::Name;
use serde_json::Value;

use crate::field_resolver::FieldResolver;

use super::resolver_support::Resolver;

#[derive(Debug)]
struct BoxedType<'a> {
    tpe: &'a Type,
    type_kind: &'a str,
}

impl FieldResolver for TypeDefinition {
    fn resolve_field(
        &self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "name" => Ok(Value::String(self.name())),
            "kind" => Ok(Value::String(self.kind())),
            "description" => Ok(self.description().map(Value::String).unwrap_or(Value::Null)),
            "fields" => self.fields().resolve_value(&field.subfields, schema),
            "interfaces" => resolve_named_types(self.interfaces(), field, schema),
            "possibleTypes" => resolve_named_types(self.possible_types(), field, schema),
            "enumValues" => self.enum_values().resolve_value(&field.subfields, schema),
            "inputFields" => self.input_fields().resolve_value(&field.subfields, schema),
            "ofType" | "specifiedByURL" => Ok(Value::Null),
            "isOneOf" => match self.kind {
                TypeKind::InputObject(_) => Ok(Value::Bool(false)),
                _ => Ok(Value::Null),
            },
            "__typename" => Ok(Value::String("__Type".to_string())),
            field_name => Err(SubsystemResolutionError::InvalidField(
                field_name.to_owned(),
                "TypeDefinition",
            )),
        }
    }
}

/// Resolve a list of type references (union members or implemented interfaces)
fn resolve_named_types(
    names: Option<&Vec<Positioned<Name>>>,
    field: &ValidatedField,
    schema: &Schema,
) -> Result<Value, SubsystemResolutionError> {
    match names {
        Some(names) => names
            .iter()
            .map(|name| {
                schema
                    .get_type_definition(name.node.as_str())
                    .resolve_value(&field.subfields, schema)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        None => Ok(Value::Null),
    }
}

impl FieldResolver for Type {
    fn resolve_field(
        &self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        let base_type = &self.base;

        if !self.nullable {
            let underlying = Type {
                base: base_type.to_owned(),
                nullable: true, // Now the underlying type is nullable
            };
            let boxed_type = BoxedType {
                tpe: &underlying,
                type_kind: "NON_NULL",
            };
            boxed_type.resolve_field(field, schema)
        } else {
            match base_type {
                BaseType::Named(name) => match schema.get_type_definition(name) {
                    Some(tpe) => tpe.resolve_field(field, schema),
                    None => Ok(Value::Null),
                },
                BaseType::List(underlying) => {
                    let boxed_type = BoxedType {
                        tpe: underlying,
                        type_kind: "LIST",
                    };
                    boxed_type.resolve_field(field, schema)
                }
            }
        }
    }
}

impl FieldResolver for BoxedType<'_> {
    fn resolve_field(
        &self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "kind" => Ok(Value::String(self.type_kind.to_owned())),
            "ofType" => self.tpe.resolve_value(&field.subfields, schema),
            "name" | "description" | "specifiedByURL" | "fields" | "interfaces"
            | "possibleTypes" | "enumValues" | "inputFields" | "isOneOf" => Ok(Value::Null),
            "__typename" => Ok(Value::String("__Type".to_string())),
            field_name => Err(SubsystemResolutionError::InvalidField(
                field_name.to_owned(),
                "List/NonNull type",
            )),
        }
    }
}
