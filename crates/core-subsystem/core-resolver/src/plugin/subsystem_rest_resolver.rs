// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use common::http::{RequestHead, ResponsePayload};

use super::SubsystemResolutionError;

#[async_trait]
pub trait SubsystemRestResolver: Sync {
    /// The id of the subsystem (for debugging purposes)
    fn id(&self) -> &'static str;

    /// Returns `None` if the request is not handled by this subsystem
    async fn resolve<'a>(
        &self,
        request_head: &'a (dyn RequestHead + Send + Sync),
    ) -> Result<Option<ResponsePayload>, SubsystemResolutionError>;
}
