// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::Pos;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    QueryParsingFailed(String, Pos, Option<Pos>),

    #[error("Variable '{0}' not found")]
    VariableNotFound(String, Pos),

    #[error("Variable '{0}' could not be deserialized: {2}")]
    MalformedVariable(String, Pos, serde_json::Error),

    #[error("Fragment definition '{0}' not found")]
    FragmentDefinitionNotFound(String, Pos),

    #[error("Cannot spread fragment '{0}' within itself")]
    FragmentCycle(String, Pos),

    #[error("Unknown type '{0}' in type condition")]
    UnknownTypeCondition(String, Pos),

    #[error("Fragment on '{0}' cannot be spread within '{1}'")]
    InvalidTypeCondition(String, String, Pos),

    #[error("No such operation '{0}'")]
    OperationNotFound(String, Pos),

    #[error("Subscriptions are not supported")]
    SubscriptionNotSupported(Pos),

    #[error("Field '{0}' is not valid for type '{1}'")]
    InvalidField(String, String, Pos),

    #[error("Field '{0}' is of a scalar type, which should not specify fields")]
    ScalarWithField(String, Pos),

    #[error("Field '{0}' of type '{1}' must have a selection of subfields")]
    SelectionRequired(String, String, Pos),

    #[error("Field type '{0}' is not valid")]
    InvalidFieldType(String, Pos),

    #[error("Fields '{0}' conflict because they select different fields or arguments")]
    MergeFailure(String, Pos),

    #[error("Selection set too deep")]
    SelectionSetTooDeep(Pos),

    #[error("Unknown directive '@{0}'")]
    UnknownDirective(String, Pos),

    #[error("Required argument '{0}' not found")]
    RequiredArgumentNotFound(String, Pos),

    #[error("Argument(s) '{0:?}' invalid for '{1}'")]
    StrayArguments(Vec<String>, String, Pos),

    #[error(
        "Argument '{argument_name}' is not of a valid type. Expected '{expected_type}', got '{actual_type}'"
    )]
    InvalidArgumentType {
        argument_name: String,
        expected_type: String,
        actual_type: String,
        pos: Pos,
    },

    #[error("No operation found")]
    NoOperationFound,

    #[error("Must provide operation name if query contains multiple operations")]
    MultipleOperationsNoOperationName,

    #[error("operationName '{0}' doesn't match any operation")]
    MultipleOperationsUnmatchedOperationName(String),
}

impl ValidationError {
    /// Source locations to report along with the message. Empty for errors that concern the
    /// document as a whole.
    pub fn positions(&self) -> Vec<Pos> {
        match self {
            ValidationError::QueryParsingFailed(_, pos1, pos2) => {
                std::iter::once(*pos1).chain(*pos2).collect()
            }
            ValidationError::VariableNotFound(_, pos)
            | ValidationError::MalformedVariable(_, pos, _)
            | ValidationError::FragmentDefinitionNotFound(_, pos)
            | ValidationError::FragmentCycle(_, pos)
            | ValidationError::UnknownTypeCondition(_, pos)
            | ValidationError::InvalidTypeCondition(_, _, pos)
            | ValidationError::OperationNotFound(_, pos)
            | ValidationError::SubscriptionNotSupported(pos)
            | ValidationError::InvalidField(_, _, pos)
            | ValidationError::ScalarWithField(_, pos)
            | ValidationError::SelectionRequired(_, _, pos)
            | ValidationError::InvalidFieldType(_, pos)
            | ValidationError::MergeFailure(_, pos)
            | ValidationError::SelectionSetTooDeep(pos)
            | ValidationError::UnknownDirective(_, pos)
            | ValidationError::RequiredArgumentNotFound(_, pos)
            | ValidationError::StrayArguments(_, _, pos)
            | ValidationError::InvalidArgumentType { pos, .. } => vec![*pos],
            ValidationError::NoOperationFound
            | ValidationError::MultipleOperationsNoOperationName
            | ValidationError::MultipleOperationsUnmatchedOperationName(_) => vec![],
        }
    }
}
