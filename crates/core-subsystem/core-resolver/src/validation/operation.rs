// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::OperationType;

use crate::validation::field::ValidatedField;

/// An operation of a GraphQL document after validation, ready to be handed to the resolvers.
#[derive(Debug)]
pub struct ValidatedOperation {
    pub name: Option<String>,
    /// Query or mutation (subscriptions are rejected by the validator)
    pub typ: OperationType,
    /// The root fields, in document order
    pub fields: Vec<ValidatedField>,
}
