// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Validation of GraphQL documents against the composed schema.
//!
//! [`document_validator::DocumentValidator`] checks a parsed document along with the request's
//! operation name and variables, and produces a [`operation::ValidatedOperation`] whose fields
//! carry coerced arguments and resolved selections.

use async_graphql_parser::types::{BaseType, Type};
use async_graphql_value::Name;

pub mod document_validator;
pub mod field;
pub mod operation;
pub mod validation_error;

mod arguments_validator;
mod operation_validator;
mod selection_set_validator;

/// The named type at the core of a (possibly list or non-null) type.
pub fn underlying_type(typ: &Type) -> &Name {
    match &typ.base {
        BaseType::List(typ) => underlying_type(typ),
        BaseType::Named(name) => name,
    }
}
