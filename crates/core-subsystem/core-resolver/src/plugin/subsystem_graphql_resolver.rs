// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{FieldDefinition, OperationType, TypeDefinition};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::validation::field::ValidatedField;

/// Provides resolution of GraphQL operations for a subsystem.
#[async_trait]
pub trait SubsystemGraphQLResolver: Sync {
    /// The id of the subsystem (for debugging purposes)
    fn id(&self) -> &'static str;

    /// Resolve an individual operation
    ///
    /// Returns `None` if the operation is not handled by this subsystem
    async fn resolve<'a>(
        &'a self,
        operation: &'a ValidatedField,
        operation_type: OperationType,
    ) -> Result<Option<Value>, SubsystemResolutionError>;

    // Support for schema creation (and in turn, validation)

    /// Queries supported by this subsystem
    fn schema_queries(&self) -> Vec<FieldDefinition>;

    /// Mutations supported by this subsystem
    fn schema_mutations(&self) -> Vec<FieldDefinition>;

    /// Types supported by this subsystem (including the types of arguments)
    fn schema_types(&self) -> Vec<TypeDefinition>;
}

#[derive(Error, Debug)]
pub enum SubsystemResolutionError {
    #[error("Invalid field {0} for {1}")]
    InvalidField(String, &'static str), // (field name, container type)

    #[error("Required argument '{0}' not provided")]
    MissingArgument(String),

    #[error("Malformed arguments to '{field}': {message}")]
    MalformedArguments { field: String, message: String },

    #[error("{0}")]
    UserDisplayError(String), // Error message to be displayed to the user (subsystems should hide internal errors through this)
}

impl SubsystemResolutionError {
    pub fn user_error_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}
