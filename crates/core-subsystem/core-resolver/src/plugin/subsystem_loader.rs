// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use almanac_env::{EnvError, Environment};
use dataset_store::LoadError;
use thiserror::Error;

use crate::introspection::definition::schema::SchemaError;

use super::{SubsystemGraphQLResolver, SubsystemRestResolver};

/// The resolvers a subsystem contributes to the server.
pub struct SubsystemResolver {
    pub id: &'static str,
    pub graphql: Option<Arc<dyn SubsystemGraphQLResolver + Send + Sync>>,
    pub rest: Option<Box<dyn SubsystemRestResolver + Send + Sync>>,
}

/// Creates a subsystem's resolvers from the environment (loading its dataset in the process).
pub trait SubsystemLoader {
    fn id(&self) -> &'static str;

    fn init(&self, env: &dyn Environment) -> Result<SubsystemResolver, SubsystemLoadingError>;
}

#[derive(Error, Debug)]
pub enum SubsystemLoadingError {
    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Env(#[from] EnvError),
}
