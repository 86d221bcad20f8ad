// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::pin::pin;

use futures::StreamExt;

use common::http::{RequestHead, ResponsePayload};

use crate::plugin::{SubsystemResolutionError, SubsystemRestResolver};

pub struct SystemRestResolver {
    subsystem_resolvers: Vec<Box<dyn SubsystemRestResolver + Send + Sync>>,
}

impl SystemRestResolver {
    pub fn new(subsystem_resolvers: Vec<Box<dyn SubsystemRestResolver + Send + Sync>>) -> Self {
        Self {
            subsystem_resolvers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subsystem_resolvers.is_empty()
    }

    pub async fn resolve(
        &self,
        request_head: &(dyn RequestHead + Send + Sync),
    ) -> Result<Option<ResponsePayload>, SubsystemResolutionError> {
        let stream = futures::stream::iter(self.subsystem_resolvers.iter())
            .then(|resolver| resolver.resolve(request_head));

        let mut stream = pin!(stream);

        // Really a find_map(), but StreamExt::find_map() is not available
        while let Some(next_val) = stream.next().await {
            if let Some(val) = next_val? {
                // Found a resolver that could return a value (or an error), so we are done resolving
                return Ok(Some(val));
            }
        }

        Ok(None)
    }
}
