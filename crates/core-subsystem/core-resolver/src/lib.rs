// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod introspection;
pub mod lookup;
pub mod plugin;
pub mod system_resolver;
pub mod system_rest_resolver;
pub mod validation;

mod field_resolver;
mod operation_payload;

pub use field_resolver::{FieldResolver, Resolver};
pub use lookup::Lookup;
pub use operation_payload::OperationsPayload;

#[cfg(test)]
mod test_schema;
