// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::{Config, Credential};
use async_trait::async_trait;
use cossign_core::time::now;
use cossign_core::{Context, ProvideCredential, Result};
use log::debug;
use std::sync::Arc;

/// Static configuration based loader.
///
/// Unset fields of the config are filled from the environment on every load.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref().clone().from_env(ctx);

        let (Some(secret_id), Some(secret_key)) = (config.secret_id, config.secret_key) else {
            debug!("incomplete config, skipping");
            return Ok(None);
        };

        debug!("loading credential from config");
        Ok(Some(Credential {
            secret_id,
            secret_key,
            security_token: config.security_token,
            // Set expires_in to 10 minutes to enforce re-read
            expires_in: Some(now() + chrono::TimeDelta::minutes(10)),
        }))
    }
}
