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

//! Tencent COS signing and client.
//!
//! The signing engine is a pure function of the request shape, a secret pair
//! and the current time:
//!
//! ```
//! use cossign_tencent_cos::{authorize, Credential, SignableRequest, TimeWindow};
//!
//! let req = SignableRequest::new("GET", "/");
//! let cred = Credential::new("AKIDexample", "mykey");
//! let auth = authorize(&req, &cred, TimeWindow::starting_at(0))?;
//! assert!(auth.ends_with("&q-signature=9edc9bac1186f707dffbb2688f01f45d9cc609e0"));
//! # Ok::<(), cossign_core::Error>(())
//! ```
//!
//! [`RequestSigner`] plugs the engine into [`cossign_core::Signer`] for
//! `http` requests, and [`Client`] covers the bucket and object operations.
//!
//! ```no_run
//! use cossign_core::{Context, OsEnv};
//! use cossign_http_send_reqwest::ReqwestHttpSend;
//! use cossign_tencent_cos::{Client, Config};
//!
//! # async fn example() -> cossign_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let client = Client::from_config(ctx, Config::default())?;
//!
//! for bucket in client.list_buckets().await? {
//!     println!("{bucket}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod constants;

mod credential;
pub use credential::Credential;

mod config;
pub use config::Config;

mod provide_credential;
pub use provide_credential::*;

mod canonical_request;
pub use canonical_request::{canonicalize, CanonicalForm, SignableRequest};

mod signature;
pub use signature::{derive_signature, Signature, TimeWindow};

mod authorization;
pub use authorization::{authorize, build_authorization};

mod sign_request;
pub use sign_request::RequestSigner;

mod bucket;
pub use bucket::Bucket;

mod error;
pub use error::RequestFailure;

mod client;
pub use client::Client;
