// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_parser::{
    Pos, Positioned,
    types::{FragmentDefinition, OperationDefinition, OperationType, VariableDefinition},
};
use async_graphql_value::{ConstValue, Name};
use serde_json::{Map, Value};

use crate::{
    introspection::definition::schema::{MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, Schema},
    validation::validation_error::ValidationError,
};

use super::{operation::ValidatedOperation, selection_set_validator::SelectionSetValidator};

/// Variables declared by an operation. A `None` value marks a nullable variable that was
/// declared but neither supplied nor defaulted.
pub(super) type Variables = HashMap<Name, Option<ConstValue>>;

/// Context for validating an operation.
pub struct OperationValidator<'a> {
    schema: &'a Schema,
    operation_name: Option<String>,
    variables: Option<Map<String, Value>>,
    fragment_definitions: HashMap<Name, Positioned<FragmentDefinition>>,
    normal_query_depth_limit: usize,
    introspection_query_depth_limit: usize,
}

impl<'a> OperationValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        operation_name: Option<String>,
        variables: Option<Map<String, Value>>,
        fragment_definitions: HashMap<Name, Positioned<FragmentDefinition>>,
        normal_query_depth_limit: usize,
        introspection_query_depth_limit: usize,
    ) -> Self {
        Self {
            schema,
            operation_name,
            variables,
            fragment_definitions,
            normal_query_depth_limit,
            introspection_query_depth_limit,
        }
    }

    /// Check if the query depth is within the allowed limits
    fn selection_depth_check(
        &self,
    ) -> impl Fn(usize, bool, Pos) -> Result<(), ValidationError> + '_ {
        move |depth: usize, is_introspection: bool, pos: Pos| -> Result<(), ValidationError> {
            let max_depth = if is_introspection {
                self.introspection_query_depth_limit
            } else {
                self.normal_query_depth_limit
            };

            if depth > max_depth {
                Err(ValidationError::SelectionSetTooDeep(pos))
            } else {
                Ok(())
            }
        }
    }

    /// Validate operation. Operation defines a GraphQL top-level operation such
    /// as
    /// ```graphql
    ///    mutation create($input: CountryInput!) {
    ///       createCountry(input: $input) {
    ///          id
    ///       }
    ///    }
    /// ```
    ///
    /// Validations performed:
    /// - The operation actually exists
    /// - Each variables in [OperationDefinition.variable_definitions] is
    ///   available (see [`validate_variables`] for details)
    /// - The selected fields are valid (see [SelectionSetValidator] for details)])
    ///
    /// # Returns
    ///   A validated operation with all variables and fields resolved and normalized.
    pub(super) fn validate(
        self,
        operation: Positioned<OperationDefinition>,
    ) -> Result<ValidatedOperation, ValidationError> {
        let operation_type_name = match operation.node.ty {
            OperationType::Query => QUERY_ROOT_TYPENAME,
            OperationType::Mutation => MUTATION_ROOT_TYPENAME,
            OperationType::Subscription => {
                return Err(ValidationError::SubscriptionNotSupported(operation.pos));
            }
        };

        let container_type = match self.schema.get_type_definition(operation_type_name) {
            Some(td) => td,
            None => {
                return Err(ValidationError::OperationNotFound(
                    operation_type_name.to_string(),
                    operation.pos,
                ));
            }
        };

        let variables = self.validate_variables(operation.node.variable_definitions)?;
        let selection_set_validator = SelectionSetValidator::new(
            self.schema,
            container_type,
            &variables,
            &self.fragment_definitions,
        );

        let fields = selection_set_validator
            .validate(&operation.node.selection_set, &self.selection_depth_check())?;

        Ok(ValidatedOperation {
            name: self.operation_name,
            typ: operation.node.ty,
            fields,
        })
    }

    /// Validate variables.
    ///
    /// Validations performed:
    /// - All non-null variables in [OperationDefinition.variable_definitions] are either
    ///   supplied or have a default
    /// - Supplied values are representable as GraphQL values
    ///
    /// Values are checked against the declared type where they are used as arguments.
    ///
    /// # Returns
    ///   Resolved variables (note the output type uses `ConstValue` instead of
    ///   `Value` to indicate that the value has been resolved)
    fn validate_variables(
        &'a self,
        variable_definitions: Vec<Positioned<VariableDefinition>>,
    ) -> Result<Variables, ValidationError> {
        variable_definitions
            .into_iter()
            .map(|variable_definition| {
                let variable_value = self.var_value(&variable_definition)?;
                Ok((variable_definition.node.name.node, variable_value))
            })
            .collect()
    }

    fn var_value(
        &self,
        definition: &Positioned<VariableDefinition>,
    ) -> Result<Option<ConstValue>, ValidationError> {
        let name = &definition.node.name;

        let supplied = self
            .variables
            .as_ref()
            .and_then(|variables| variables.get(name.node.as_str()));

        match supplied {
            Some(resolved) => ConstValue::from_json(resolved.to_owned())
                .map(Some)
                .map_err(|e| {
                    ValidationError::MalformedVariable(name.node.as_str().to_string(), name.pos, e)
                }),
            None => match &definition.node.default_value {
                Some(default_value) => Ok(Some(default_value.node.clone())),
                None if definition.node.var_type.node.nullable => Ok(None),
                None => Err(ValidationError::VariableNotFound(
                    name.node.as_str().to_string(),
                    name.pos,
                )),
            },
        }
    }
}
