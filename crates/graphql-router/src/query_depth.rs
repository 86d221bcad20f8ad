// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use almanac_env::{EnvError, Environment, get_parsed};
use common::env_const::ALMANAC_MAX_SELECTION_DEPTH;

const DEFAULT_QUERY_DEPTH: usize = 5;
const DEFAULT_INTROSPECTION_QUERY_DEPTH: usize = 15;

/// Returns the maximum depth of a selection set for normal queries and introspection queries. We
/// hard-code the introspection query depth to 15 to accommodate the query invoked by GraphiQL.
pub fn query_depth_limits(env: &dyn Environment) -> Result<(usize, usize), EnvError> {
    let query_depth = get_parsed(env, ALMANAC_MAX_SELECTION_DEPTH, DEFAULT_QUERY_DEPTH)?;

    Ok((query_depth, DEFAULT_INTROSPECTION_QUERY_DEPTH))
}
