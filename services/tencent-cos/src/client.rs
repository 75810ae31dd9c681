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

use crate::constants::SERVICE_ENDPOINT;
use crate::error::RequestFailure;
use crate::{Bucket, Config, Credential, DefaultCredentialProvider, RequestSigner};
use bytes::Bytes;
use cossign_core::{Context, Error, Result, Signer};
use http::{HeaderMap, Method, Request, Response, StatusCode};
use log::debug;
use quick_xml::de;
use serde::Deserialize;

/// Client for the COS XML API.
///
/// Every request is signed by the given [`Signer`] right before it is sent
/// through the signer's [`Context`].
#[derive(Debug, Clone)]
pub struct Client {
    app_id: String,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client for buckets owned by `app_id`.
    pub fn new(app_id: impl Into<String>, signer: Signer<Credential>) -> Self {
        Self {
            app_id: app_id.into(),
            signer,
        }
    }

    /// Create a client that loads credentials from env first and `config` second.
    ///
    /// `config.app_id` (or `TENCENTCLOUD_APPID`) must be set.
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let app_id = config
            .app_id
            .clone()
            .ok_or_else(|| Error::config_invalid("app_id is required to address buckets"))?;

        let signer = Signer::new(
            ctx,
            DefaultCredentialProvider::new(config),
            RequestSigner::new(),
        );
        Ok(Self::new(app_id, signer))
    }

    /// App id appended to bucket names.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// List all buckets of the caller.
    ///
    /// - [GET Service](https://cloud.tencent.com/document/product/436/8291)
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        let req = Request::get(SERVICE_ENDPOINT).body(Bytes::new())?;
        let resp = self.send(req).await?;
        if resp.status() != StatusCode::OK {
            return Err(failure(Method::GET, resp));
        }

        let body = String::from_utf8_lossy(resp.body());
        let result: ListAllMyBucketsResult = de::from_str(&body).map_err(|e| {
            Error::unexpected("parse list buckets response failed").with_source(e)
        })?;

        result
            .buckets
            .bucket
            .into_iter()
            .map(|v| Bucket::from_full_name(&v.name, v.location))
            .collect()
    }

    /// Create a bucket named `name` in `region`.
    ///
    /// `headers` are sent as-is and may carry `x-cos-acl` and friends.
    ///
    /// - [PUT Bucket](https://cloud.tencent.com/document/product/436/7738)
    pub async fn put_bucket(&self, name: &str, region: &str, headers: &HeaderMap) -> Result<Bucket> {
        let bucket = Bucket::new(name, &self.app_id, region);

        let mut req = Request::put(format!("{}/", bucket.address())).body(Bytes::new())?;
        req.headers_mut().extend(headers.clone());

        let resp = self.send(req).await?;
        match resp.status() {
            StatusCode::OK => Ok(bucket),
            _ => Err(failure(Method::PUT, resp)),
        }
    }

    /// Delete an empty bucket.
    ///
    /// - [DELETE Bucket](https://cloud.tencent.com/document/product/436/7732)
    pub async fn delete_bucket(&self, name: &str, region: &str) -> Result<()> {
        let bucket = Bucket::new(name, &self.app_id, region);

        let req = Request::delete(format!("{}/", bucket.address())).body(Bytes::new())?;
        let resp = self.send(req).await?;
        match resp.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            _ => Err(failure(Method::DELETE, resp)),
        }
    }

    /// Upload `body` to the object at `url`.
    ///
    /// - [PUT Object](https://cloud.tencent.com/document/product/436/7749)
    pub async fn put_object(
        &self,
        url: &str,
        body: impl Into<Bytes>,
        headers: &HeaderMap,
    ) -> Result<()> {
        let mut req = Request::put(url).body(body.into())?;
        req.headers_mut().extend(headers.clone());

        let resp = self.send(req).await?;
        match resp.status() {
            StatusCode::OK => Ok(()),
            _ => Err(failure(Method::PUT, resp)),
        }
    }

    /// Download the object at `url`.
    ///
    /// - [GET Object](https://cloud.tencent.com/document/product/436/7753)
    pub async fn get_object(&self, url: &str) -> Result<Bytes> {
        let req = Request::get(url).body(Bytes::new())?;
        let resp = self.send(req).await?;
        match resp.status() {
            StatusCode::OK => Ok(resp.into_body()),
            _ => Err(failure(Method::GET, resp)),
        }
    }

    /// Delete the object at `url`.
    ///
    /// Deleting an object that doesn't exist succeeds.
    ///
    /// - [DELETE Object](https://cloud.tencent.com/document/product/436/7743)
    pub async fn delete_object(&self, url: &str) -> Result<()> {
        let req = Request::delete(url).body(Bytes::new())?;
        let resp = self.send(req).await?;
        match resp.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            _ => Err(failure(Method::DELETE, resp)),
        }
    }

    async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        let (mut parts, body) = req.into_parts();
        self.signer.sign(&mut parts, None).await?;
        debug!("sending request: {} {}", parts.method, parts.uri);

        let resp = self
            .signer
            .context()
            .http_send(Request::from_parts(parts, body))
            .await?;
        debug!("got response status: {}", resp.status());
        Ok(resp)
    }
}

fn failure(method: Method, resp: Response<Bytes>) -> Error {
    RequestFailure::parse(method, resp.status(), resp.body()).into()
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ListAllMyBucketsResult {
    buckets: ListBuckets,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ListBuckets {
    bucket: Vec<ListBucketsEntry>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ListBucketsEntry {
    name: String,
    location: String,
}
