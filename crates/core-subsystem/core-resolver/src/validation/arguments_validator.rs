// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{
    Pos, Positioned,
    types::{BaseType, InputValueDefinition, Type, TypeKind},
};
use async_graphql_value::{ConstValue, Name, Number, Value, indexmap::IndexMap};

use crate::{
    introspection::definition::schema::Schema, validation::validation_error::ValidationError,
};

use super::operation_validator::Variables;

pub struct ArgumentValidator<'a> {
    schema: &'a Schema,
    variables: &'a Variables,
    /// The field (or directive) the arguments are supplied to
    owner_name: &'a str,
    pos: Pos,
}

impl<'a> ArgumentValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        variables: &'a Variables,
        owner_name: &'a str,
        pos: Pos,
    ) -> Self {
        Self {
            schema,
            variables,
            owner_name,
            pos,
        }
    }

    /// Validations performed:
    /// - Ensure that all required arguments are provided
    /// - Ensure that there are no stray arguments (arguments that are not defined in the field)
    /// - Ensure that each value is compatible with the declared type
    ///
    /// Declared defaults are filled in for absent arguments.
    pub(super) fn validate(
        &self,
        argument_definitions: &[&InputValueDefinition],
        arguments: &[(Positioned<Name>, Positioned<Value>)],
    ) -> Result<IndexMap<String, ConstValue>, ValidationError> {
        self.validate_arguments(self.owner_name, argument_definitions, arguments)
    }

    fn validate_arguments(
        &self,
        owner_name: &str,
        argument_definitions: &[&InputValueDefinition],
        arguments: &[(Positioned<Name>, Positioned<Value>)],
    ) -> Result<IndexMap<String, ConstValue>, ValidationError> {
        // Stray arguments tracking: 1. Maintain a map of all the arguments supplied in the query
        let mut arguments: IndexMap<_, _> = arguments
            .iter()
            .filter(|(name, _)| {
                // Clients (such as Apollo) may echo `__typename` back in input objects. We
                // don't consider it a stray argument.
                name.node != "__typename"
            })
            .map(|(name, value)| (&name.node, value))
            .collect();

        let validated_arguments = argument_definitions
            .iter()
            .filter_map(|argument_definition| {
                let argument_name = &argument_definition.name.node;
                // Stray arguments tracking: 2. Remove the argument being processed
                let argument_value = arguments.shift_remove(argument_name);

                self.validate_argument(argument_definition, argument_value)
                    .map(|argument_value| {
                        argument_value
                            .map(|argument_value| (argument_name.to_string(), argument_value))
                    })
            })
            .collect::<Result<_, _>>()?;

        // Stray arguments tracking: 3. If any arguments are left in the map, they are not defined
        // in the field
        if !arguments.is_empty() {
            let stray_arguments = arguments
                .keys()
                .map(|name| name.to_string())
                .collect::<Vec<_>>();

            Err(ValidationError::StrayArguments(
                stray_arguments,
                owner_name.to_string(),
                self.pos,
            ))
        } else {
            Ok(validated_arguments)
        }
    }

    /// Validate a single argument
    ///
    /// Returns `None` if the argument is absent (or bound to an absent variable) and the
    /// definition has neither a default nor a non-null type.
    fn validate_argument(
        &self,
        argument_definition: &InputValueDefinition,
        argument_value: Option<&Positioned<Value>>,
    ) -> Option<Result<ConstValue, ValidationError>> {
        let argument_name = argument_definition.name.node.as_str();
        let ty = &argument_definition.ty.node;

        let supplied = match argument_value {
            Some(Positioned {
                node: Value::Variable(name),
                pos,
            }) => match self.variables.get(name) {
                Some(Some(value)) => Some((value.clone().into_value(), *pos)),
                Some(None) => None,
                None => {
                    return Some(Err(ValidationError::VariableNotFound(
                        name.to_string(),
                        *pos,
                    )));
                }
            },
            Some(value) => Some((value.node.clone(), value.pos)),
            None => None,
        };

        match supplied {
            Some((value, pos)) => Some(self.validate_value(argument_name, ty, &value, pos)),
            None => match &argument_definition.default_value {
                Some(default_value) => Some(Ok(default_value.node.clone())),
                None if ty.nullable => None,
                None => Some(Err(ValidationError::RequiredArgumentNotFound(
                    argument_name.to_string(),
                    self.pos,
                ))),
            },
        }
    }

    /// Validate a value against a (possibly list or non-null) type
    ///
    /// Validations performed:
    /// - A null value is specified only for a nullable type
    /// - Scalars match the expected type
    /// - Objects match the expected shape (recursively)
    /// - Lists match the expected shape (a single value is coerced to a one-element list)
    fn validate_value(
        &self,
        argument_name: &str,
        ty: &Type,
        value: &Value,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        match value {
            Value::Variable(name) => match self.variables.get(name) {
                Some(Some(value)) => {
                    self.validate_value(argument_name, ty, &value.clone().into_value(), pos)
                }
                Some(None) => self.validate_value(argument_name, ty, &Value::Null, pos),
                None => Err(ValidationError::VariableNotFound(name.to_string(), pos)),
            },
            Value::Null => {
                if ty.nullable {
                    Ok(ConstValue::Null)
                } else {
                    Err(ValidationError::RequiredArgumentNotFound(
                        argument_name.to_string(),
                        pos,
                    ))
                }
            }
            _ => match &ty.base {
                BaseType::List(elem_type) => match value {
                    Value::List(elems) => elems
                        .iter()
                        .map(|elem| self.validate_value(argument_name, elem_type, elem, pos))
                        .collect::<Result<Vec<_>, _>>()
                        .map(ConstValue::List),
                    _ => Ok(ConstValue::List(vec![self.validate_value(
                        argument_name,
                        elem_type,
                        value,
                        pos,
                    )?])),
                },
                BaseType::Named(type_name) => {
                    self.validate_named_value(argument_name, type_name, value, pos)
                }
            },
        }
    }

    fn validate_named_value(
        &self,
        argument_name: &str,
        type_name: &Name,
        value: &Value,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        match value {
            Value::Number(number) => {
                self.validate_number_argument(argument_name, type_name, number, pos)
            }
            Value::String(string) => self.validate_scalar_argument(
                argument_name,
                "String",
                &["String", "ID"],
                || ConstValue::String(string.clone()),
                type_name,
                pos,
            ),
            Value::Boolean(boolean) => self.validate_scalar_argument(
                argument_name,
                "Boolean",
                &["Boolean"],
                || ConstValue::Boolean(*boolean),
                type_name,
                pos,
            ),
            Value::Enum(enum_value) => {
                self.validate_enum_argument(argument_name, type_name, enum_value, pos)
            }
            Value::Object(entries) => {
                self.validate_object_argument(argument_name, type_name, entries, pos)
            }
            Value::List(_) | Value::Binary(_) | Value::Variable(_) | Value::Null => {
                Err(ValidationError::InvalidArgumentType {
                    argument_name: argument_name.to_string(),
                    expected_type: type_name.to_string(),
                    actual_type: value_kind(value).to_string(),
                    pos,
                })
            }
        }
    }

    fn validate_number_argument(
        &self,
        argument_name: &str,
        type_name: &Name,
        number: &Number,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        // An `Int` must be integral and fit in 32 bits, a `Float` may be anything. `ID` accepts
        // integers as well as strings.
        let is_int = number
            .as_i64()
            .is_some_and(|n| i32::try_from(n).is_ok());

        if is_int {
            self.validate_scalar_argument(
                argument_name,
                "Int",
                &["Int", "Float", "ID"],
                || match type_name.as_str() {
                    "ID" => ConstValue::String(number.to_string()),
                    _ => ConstValue::Number(number.clone()),
                },
                type_name,
                pos,
            )
        } else {
            self.validate_scalar_argument(
                argument_name,
                "Float",
                &["Float"],
                || ConstValue::Number(number.clone()),
                type_name,
                pos,
            )
        }
    }

    /// Validate a scalar argument
    /// Check if the argument is compatible with one the expected destination types
    fn validate_scalar_argument<const N: usize>(
        &self,
        argument_name: &str,
        argument_typename: &str,
        acceptable_destination_types: &[&str; N],
        to_value: impl FnOnce() -> ConstValue,
        type_name: &Name,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        if acceptable_destination_types.contains(&type_name.as_str()) {
            Ok(to_value())
        } else {
            Err(ValidationError::InvalidArgumentType {
                argument_name: argument_name.to_string(),
                expected_type: type_name.to_string(),
                actual_type: argument_typename.to_string(),
                pos,
            })
        }
    }

    fn validate_enum_argument(
        &self,
        argument_name: &str,
        type_name: &Name,
        enum_value: &Name,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        let is_member = self
            .schema
            .get_type_definition(type_name)
            .is_some_and(|td| match &td.kind {
                TypeKind::Enum(enum_type) => enum_type
                    .values
                    .iter()
                    .any(|value| &value.node.value.node == enum_value),
                _ => false,
            });

        if is_member {
            Ok(ConstValue::Enum(enum_value.clone()))
        } else {
            Err(ValidationError::InvalidArgumentType {
                argument_name: argument_name.to_string(),
                expected_type: type_name.to_string(),
                actual_type: format!("Enum value {enum_value}"),
                pos,
            })
        }
    }

    /// Recursively validate an object argument
    fn validate_object_argument(
        &self,
        argument_name: &str,
        type_name: &Name,
        entries: &IndexMap<Name, Value>,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        let input_object_type = self
            .schema
            .get_type_definition(type_name)
            .and_then(|td| match &td.kind {
                TypeKind::InputObject(input_object_type) => Some(input_object_type),
                _ => None,
            })
            .ok_or_else(|| ValidationError::InvalidArgumentType {
                argument_name: argument_name.to_string(),
                expected_type: type_name.to_string(),
                actual_type: "Object".to_string(),
                pos,
            })?;

        let field_arguments: Vec<_> = entries
            .iter()
            .map(|(name, v)| {
                (
                    Positioned::new(name.clone(), pos),
                    Positioned::new(v.clone(), pos),
                )
            })
            .collect();

        let validated_fields = self.validate_arguments(
            type_name.as_str(),
            &input_object_type
                .fields
                .iter()
                .map(|d| &d.node)
                .collect::<Vec<_>>(),
            &field_arguments,
        )?;

        Ok(ConstValue::Object(
            validated_fields
                .into_iter()
                .map(|(name, value)| (Name::new(name), value))
                .collect(),
        ))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Variable(_) => "Variable",
        Value::Null => "Null",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Boolean(_) => "Boolean",
        Value::Binary(_) => "Binary",
        Value::Enum(_) => "Enum",
        Value::List(_) => "List",
        Value::Object(_) => "Object",
    }
}
