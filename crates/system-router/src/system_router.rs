// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use almanac_env::Environment;
use common::env_const::ALMANAC_GRAPHQL_ALLOW_MUTATIONS;
use common::introspection::{IntrospectionMode, introspection_mode};
use common::{
    http::{RequestPayload, ResponsePayload},
    router::{CompositeRouter, Router},
};
use core_resolver::introspection::definition::schema::Schema;
use core_resolver::{
    plugin::{SubsystemGraphQLResolver, SubsystemLoader, SubsystemRestResolver},
    system_rest_resolver::SystemRestResolver,
};
use graphql_router::GraphQLRouter;
use introspection_resolver::IntrospectionResolver;
use playground_router::{PlaygroundRouter, PlaygroundRouterConfig};
use rest_router::RestRouter;
use tracing::debug;

use crate::SystemLoadingError;

pub type StaticLoaders = Vec<Box<dyn SubsystemLoader>>;

/// How the GraphiQL page presents a server.
#[derive(Debug, Clone, Copy)]
pub struct PlaygroundPage {
    pub title: &'static str,
    pub default_query: &'static str,
}

/// Initialize every subsystem and assemble the routers serving them.
///
/// Routers are tried in order: GraphQL, REST, playground. Requests none of them accept get a 404.
pub fn create_system_router(
    static_loaders: StaticLoaders,
    playground_page: PlaygroundPage,
    env: Arc<dyn Environment>,
) -> Result<SystemRouter, SystemLoadingError> {
    if static_loaders.is_empty() {
        return Err(SystemLoadingError::NoSubsystems);
    }

    let mut graphql_resolvers: Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>> = vec![];
    let mut rest_resolvers: Vec<Box<dyn SubsystemRestResolver + Send + Sync>> = vec![];

    for loader in static_loaders {
        debug!("Initializing subsystem {}", loader.id());

        let resolver = loader
            .init(env.as_ref())
            .map_err(|e| SystemLoadingError::SubsystemLoadingError(loader.id(), e))?;

        if let Some(graphql) = resolver.graphql {
            graphql_resolvers.push(graphql);
        }

        if let Some(rest) = resolver.rest {
            rest_resolvers.push(rest);
        }
    }

    let graphql_router = {
        let allow_mutations = env.enabled(ALMANAC_GRAPHQL_ALLOW_MUTATIONS, true)?;

        let introspection_schema = Arc::new(Schema::new_from_resolvers(
            &graphql_resolvers,
            allow_mutations,
        )?);

        let introspection_resolver: Option<Arc<dyn SubsystemGraphQLResolver + Send + Sync>> =
            match introspection_mode(env.as_ref())? {
                IntrospectionMode::Disabled => None,
                IntrospectionMode::Enabled => Some(Arc::new(IntrospectionResolver::new(
                    introspection_schema.clone(),
                ))),
            };

        GraphQLRouter::from_resolvers(
            graphql_resolvers,
            introspection_resolver,
            introspection_schema,
            env.as_ref(),
        )?
    };

    let rest_router = RestRouter::new(SystemRestResolver::new(rest_resolvers));

    let playground_router = PlaygroundRouter::new(PlaygroundRouterConfig::new(
        env.as_ref(),
        playground_page.title,
        playground_page.default_query,
    )?);

    let routers: Vec<Box<dyn Router + Send + Sync>> = vec![
        Box::new(graphql_router),
        Box::new(rest_router),
        Box::new(playground_router),
    ];

    Ok(SystemRouter {
        underlying: CompositeRouter::new(routers),
    })
}

pub struct SystemRouter {
    underlying: CompositeRouter,
}

#[async_trait::async_trait]
impl Router for SystemRouter {
    async fn route(&self, request: &mut (dyn RequestPayload + Send)) -> Option<ResponsePayload> {
        self.underlying.route(request).await
    }
}
