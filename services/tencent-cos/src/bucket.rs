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

use cossign_core::{Error, Result};
use http::Uri;
use std::fmt::{Display, Formatter};

const HOST_SUFFIX: &str = ".myqcloud.com";

/// A COS bucket.
///
/// On the wire a bucket is addressed as `{name}-{app_id}`, for example
/// `examplebucket-1250000000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Bucket name without the app id suffix.
    pub name: String,
    /// App id of the owner.
    pub app_id: String,
    /// Region the bucket lives in, e.g. `ap-beijing`.
    pub region: String,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(
        name: impl Into<String>,
        app_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            app_id: app_id.into(),
            region: region.into(),
        }
    }

    /// Split a `{name}-{app_id}` full name at its last `-`.
    pub fn from_full_name(full_name: &str, region: impl Into<String>) -> Result<Self> {
        match full_name.rsplit_once('-') {
            Some((name, app_id)) if !name.is_empty() && !app_id.is_empty() => {
                Ok(Self::new(name, app_id, region))
            }
            _ => Err(Error::request_invalid(format!(
                "bucket {full_name} is not in the form of {{name}}-{{app_id}}"
            ))),
        }
    }

    /// Parse a bucket from its XML API address.
    ///
    /// ```
    /// use cossign_tencent_cos::Bucket;
    ///
    /// let bucket = Bucket::parse_url("https://test-123-1203324242.cos.ap-shanghai.myqcloud.com")?;
    /// assert_eq!(bucket.name, "test-123");
    /// assert_eq!(bucket.app_id, "1203324242");
    /// assert_eq!(bucket.region, "ap-shanghai");
    /// # Ok::<(), cossign_core::Error>(())
    /// ```
    pub fn parse_url(url: &str) -> Result<Self> {
        let uri: Uri = url.parse()?;
        let invalid = || {
            Error::request_invalid(format!(
                "{url} is not a bucket address like https://{{name}}-{{app_id}}.cos.{{region}}.myqcloud.com"
            ))
        };

        let host = uri.host().ok_or_else(invalid)?;
        let (full_name, region) = host
            .strip_suffix(HOST_SUFFIX)
            .and_then(|v| v.split_once(".cos."))
            .ok_or_else(invalid)?;
        if region.is_empty() || region.contains('.') {
            return Err(invalid());
        }

        Self::from_full_name(full_name, region).map_err(|_| invalid())
    }

    /// XML API address of this bucket, without trailing `/`.
    pub fn address(&self) -> String {
        format!(
            "https://{}-{}.cos.{}{HOST_SUFFIX}",
            self.name, self.app_id, self.region
        )
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}@{}", self.name, self.app_id, self.region)
    }
}
