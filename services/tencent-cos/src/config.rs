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

use crate::constants::*;
use cossign_core::utils::Redact;
use cossign_core::Context;
use std::fmt::{Debug, Formatter};

/// Config for Tencent COS services.
#[derive(Clone, Default)]
pub struct Config {
    /// Secret ID (Access Key ID)
    pub secret_id: Option<String>,
    /// Secret Key (Secret Access Key)
    pub secret_key: Option<String>,
    /// Security token for temporary credentials
    pub security_token: Option<String>,
    /// App id appended to bucket names, e.g. `1250000000`.
    pub app_id: Option<String>,
    /// Default region for new buckets, e.g. `ap-beijing`.
    pub region: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_id", &Redact::from(&self.secret_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("security_token", &Redact::from(&self.security_token))
            .field("app_id", &self.app_id)
            .field("region", &self.region)
            .finish()
    }
}

impl Config {
    /// Set the secret id.
    pub fn with_secret_id(mut self, secret_id: impl Into<String>) -> Self {
        self.secret_id = Some(secret_id.into());
        self
    }

    /// Set the secret key.
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the security token.
    pub fn with_security_token(mut self, security_token: impl Into<String>) -> Self {
        self.security_token = Some(security_token.into());
        self
    }

    /// Set the app id.
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Fill every unset field from environment variables.
    ///
    /// Fields that are already set win over the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.secret_id.is_none() {
            self.secret_id = ctx
                .env_var(TENCENTCLOUD_SECRET_ID)
                .or_else(|| ctx.env_var(TKE_SECRET_ID));
        }
        if self.secret_key.is_none() {
            self.secret_key = ctx
                .env_var(TENCENTCLOUD_SECRET_KEY)
                .or_else(|| ctx.env_var(TKE_SECRET_KEY));
        }
        if self.security_token.is_none() {
            self.security_token = ctx
                .env_var(TENCENTCLOUD_TOKEN)
                .or_else(|| ctx.env_var(TENCENTCLOUD_SECURITY_TOKEN))
                .or_else(|| ctx.env_var(QCLOUD_SECRET_TOKEN));
        }
        if self.app_id.is_none() {
            self.app_id = ctx.env_var(TENCENTCLOUD_APPID);
        }
        if self.region.is_none() {
            self.region = ctx
                .env_var(TENCENTCLOUD_REGION)
                .or_else(|| ctx.env_var(TKE_REGION));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cossign_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_from_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (TKE_SECRET_ID.to_string(), "tke_id".to_string()),
                (TENCENTCLOUD_SECRET_KEY.to_string(), "env_key".to_string()),
                (QCLOUD_SECRET_TOKEN.to_string(), "qcloud_token".to_string()),
                (TENCENTCLOUD_APPID.to_string(), "1250000000".to_string()),
                (TKE_REGION.to_string(), "ap-guangzhou".to_string()),
            ]),
        });

        let config = Config::default().with_region("ap-beijing").from_env(&ctx);
        assert_eq!(config.secret_id.as_deref(), Some("tke_id"));
        assert_eq!(config.secret_key.as_deref(), Some("env_key"));
        assert_eq!(config.security_token.as_deref(), Some("qcloud_token"));
        assert_eq!(config.app_id.as_deref(), Some("1250000000"));
        assert_eq!(config.region.as_deref(), Some("ap-beijing"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let config = Config::default()
            .with_secret_id("AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE")
            .with_secret_key("gg7cVbmNz7e2EXAMPLEKEY");
        let output = format!("{config:?}");
        assert!(!output.contains("gg7cVbmNz7e2EXAMPLEKEY"));
        assert!(output.contains("AKI***PLE"));
    }
}
