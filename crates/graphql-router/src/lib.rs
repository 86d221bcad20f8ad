// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// Provides core functionality for handling incoming queries without depending
/// on any specific web framework.
///
/// The `route` function is responsible for doing the work, using information
/// extracted from an incoming request, and returning the response as a stream.
mod graphql_router;
mod query_depth;

pub use graphql_router::GraphQLRouter;
pub use query_depth::query_depth_limits;
