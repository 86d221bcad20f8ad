// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// A root field of an introspection query (`__schema` or `__type`).
#[derive(Debug)]
pub struct IntrospectionRootElement<'a> {
    pub name: &'a str,
}
