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
use cossign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use std::sync::Arc;

/// Default loader for Tencent COS.
///
/// This loader will try to load credentials in the following order:
/// 1. From environment variables
/// 2. From static configuration
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new(config: Config) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(super::EnvCredentialProvider::new())
            .push(super::ConfigCredentialProvider::new(Arc::new(config)));

        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use cossign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_env_wins_over_config() -> Result<()> {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (TENCENTCLOUD_SECRET_ID.to_string(), "env_id".to_string()),
                (TENCENTCLOUD_SECRET_KEY.to_string(), "env_key".to_string()),
            ]),
        });
        let config = Config::default()
            .with_secret_id("config_id")
            .with_secret_key("config_key");

        let cred = DefaultCredentialProvider::new(config)
            .provide_credential(&ctx)
            .await?
            .expect("must load");
        assert_eq!(cred.secret_id, "env_id");
        assert_eq!(cred.secret_key, "env_key");

        Ok(())
    }

    #[tokio::test]
    async fn test_falls_back_to_config() -> Result<()> {
        let config = Config::default()
            .with_secret_id("config_id")
            .with_secret_key("config_key");

        let cred = DefaultCredentialProvider::new(config)
            .provide_credential(&Context::new())
            .await?
            .expect("must load");
        assert_eq!(cred.secret_id, "config_id");

        Ok(())
    }

    #[tokio::test]
    async fn test_nothing_configured() -> Result<()> {
        let cred = DefaultCredentialProvider::default()
            .provide_credential(&Context::new())
            .await?;
        assert!(cred.is_none());

        Ok(())
    }
}
