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

use crate::authorization::authorize;
use crate::canonical_request::SignableRequest;
use crate::constants::X_COS_SECURITY_TOKEN;
use crate::signature::TimeWindow;
use crate::Credential;
use async_trait::async_trait;
use cossign_core::time::{now, DateTime};
use cossign_core::{Context, Error, Result, SignRequest, SigningRequest};
use http::header::{AUTHORIZATION, HOST};
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use std::time::Duration;

/// RequestSigner that implements Tencent COS header signing.
///
/// - [Tencent COS Signature](https://cloud.tencent.com/document/product/436/7778)
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new request signer for Tencent COS.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if let Some(expires) = expires_in {
            return Err(Error::request_invalid(format!(
                "signatures are valid for a fixed 30s window, expires_in {expires:?} is not supported"
            )));
        }
        let Some(cred) = credential else {
            debug!("no credential available, sending request anonymously");
            return Ok(());
        };

        cred.check()?;

        let now = self.time.unwrap_or_else(now);
        let mut signing_req = SigningRequest::build(req)?;

        if !signing_req.headers.contains_key(HOST) {
            let host = HeaderValue::from_str(signing_req.authority.as_str())?;
            signing_req.headers.insert(HOST, host);
        }
        signing_req.headers.remove(AUTHORIZATION);

        let authorization = authorize(
            &signable_request(&signing_req),
            cred,
            TimeWindow::from_time(now),
        )?;

        signing_req.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = authorization.parse()?;
            value.set_sensitive(true);
            value
        });
        if let Some(token) = &cred.security_token {
            signing_req.headers.insert(X_COS_SECURITY_TOKEN, {
                let mut value: HeaderValue = token.parse()?;
                value.set_sensitive(true);
                value
            });
        }

        signing_req.apply(req)
    }
}

fn signable_request(req: &SigningRequest) -> SignableRequest {
    let mut signable =
        SignableRequest::new(req.method.as_str(), req.path_percent_decoded().into_owned());
    for (k, v) in &req.query {
        signable.push_query(k.as_str(), v.as_str());
    }
    for name in req.headers.keys() {
        if let Some(value) = req.headers.get(name) {
            signable.push_header(name.as_str(), value.as_bytes());
        }
    }
    signable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical_request::canonicalize;
    use cossign_core::time::from_unix_seconds;
    use cossign_core::ErrorKind;
    use pretty_assertions::assert_eq;

    fn parts(req: http::request::Builder) -> Parts {
        req.body(()).expect("request must be valid").into_parts().0
    }

    #[tokio::test]
    async fn test_sign_put_object() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut req = parts(
            http::Request::put(
                "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/exampleobject?B=2&prefix=A%20B",
            )
            .header("Content-Type", "text/plain")
            .header("x-cos-meta-a", "Hello World"),
        );

        let signer = RequestSigner::new().with_time(from_unix_seconds(1000)?);
        signer
            .sign_request(
                &Context::new(),
                &mut req,
                Some(&Credential::new("AKIDexample", "secret_key")),
                None,
            )
            .await?;

        assert_eq!(
            req.headers[AUTHORIZATION],
            "q-sign-algorithm=sha1&q-ak=AKIDexample&q-sign-time=1000;1030&q-key-time=1000;1030&q-header-list=content-type;host;x-cos-meta-a&q-url-param-list=b;prefix&q-signature=859cc338c0f9ffedac80a07ae9ce4df3a02a1589"
        );
        assert!(req.headers[AUTHORIZATION].is_sensitive());
        assert_eq!(
            req.headers[HOST],
            "examplebucket-1250000000.cos.ap-beijing.myqcloud.com"
        );
        assert_eq!(
            req.uri.to_string(),
            "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/exampleobject?B=2&prefix=A%20B"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_resign_replaces_authorization() -> Result<()> {
        let signer = RequestSigner::new().with_time(from_unix_seconds(0)?);
        let cred = Credential::new("AKIDexample", "mykey");

        let mut first = parts(http::Request::get("https://service.cos.myqcloud.com/"));
        signer
            .sign_request(&Context::new(), &mut first, Some(&cred), None)
            .await?;

        let mut second = parts(http::Request::get("https://service.cos.myqcloud.com/"));
        second.headers = first.headers.clone();
        signer
            .sign_request(&Context::new(), &mut second, Some(&cred), None)
            .await?;

        assert_eq!(first.headers[AUTHORIZATION], second.headers[AUTHORIZATION]);
        assert_eq!(second.headers.get_all(AUTHORIZATION).iter().count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_security_token_header() -> Result<()> {
        let signer = RequestSigner::new().with_time(from_unix_seconds(0)?);
        let cred = Credential::new("AKIDexample", "mykey").with_security_token("session-token");

        let mut req = parts(http::Request::get("https://service.cos.myqcloud.com/"));
        signer
            .sign_request(&Context::new(), &mut req, Some(&cred), None)
            .await?;

        assert_eq!(req.headers[X_COS_SECURITY_TOKEN], "session-token");
        assert!(req.headers[X_COS_SECURITY_TOKEN].is_sensitive());
        assert!(req.headers[AUTHORIZATION]
            .to_str()?
            .contains("q-header-list=host&"));
        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_request_is_untouched() -> Result<()> {
        let mut req = parts(http::Request::get("https://service.cos.myqcloud.com/"));
        RequestSigner::new()
            .sign_request(&Context::new(), &mut req, None, None)
            .await?;
        assert!(req.headers.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_expires_in_is_rejected() {
        let mut req = parts(http::Request::get("https://service.cos.myqcloud.com/"));
        let err = RequestSigner::new()
            .sign_request(
                &Context::new(),
                &mut req,
                Some(&Credential::new("AKIDexample", "mykey")),
                Some(Duration::from_secs(3600)),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_expires_in_is_rejected_without_credential() {
        let mut req = parts(http::Request::get("https://service.cos.myqcloud.com/"));
        let err = RequestSigner::new()
            .sign_request(
                &Context::new(),
                &mut req,
                None,
                Some(Duration::from_secs(3600)),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(req.headers.is_empty());
    }

    #[tokio::test]
    async fn test_empty_secret_is_rejected() {
        let mut req = parts(http::Request::get("https://service.cos.myqcloud.com/"));
        let err = RequestSigner::new()
            .sign_request(
                &Context::new(),
                &mut req,
                Some(&Credential::new("AKIDexample", "")),
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(req.headers.get(AUTHORIZATION).is_none());
        assert_eq!(req.uri, "https://service.cos.myqcloud.com/");
    }

    #[test]
    fn test_signable_request_decodes_path_and_query() -> Result<()> {
        let mut req = parts(
            http::Request::get(
                "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/My%20Photos/a.jpg?Prefix=a%2Fb&acl",
            )
            .header("x-cos-meta-a", "one")
            .header("x-cos-meta-a", "two"),
        );
        let signing_req = SigningRequest::build(&mut req)?;

        let form = canonicalize(&signable_request(&signing_req));
        assert_eq!(
            String::from_utf8_lossy(&form.canonical_request),
            "get\n/My Photos/a.jpg\nacl=&prefix=a/b\nx-cos-meta-a=one\n"
        );
        Ok(())
    }

    #[test]
    fn test_signable_request_keeps_raw_bytes() -> Result<()> {
        let mut req = parts(
            http::Request::get("https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/%FFa")
                .header("x-cos-meta-a", HeaderValue::from_bytes(b"\xff")?),
        );
        let signing_req = SigningRequest::build(&mut req)?;

        let form = canonicalize(&signable_request(&signing_req));
        assert_eq!(form.canonical_request, b"get\n/\xffa\n\nx-cos-meta-a=%ff\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_non_utf8_header_value() -> Result<()> {
        let mut req = parts(
            http::Request::get("https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/%FFa")
                .header("x-cos-meta-a", HeaderValue::from_bytes(b"\xff")?),
        );
        let signer = RequestSigner::new().with_time(from_unix_seconds(0)?);
        signer
            .sign_request(
                &Context::new(),
                &mut req,
                Some(&Credential::new("AKIDexample", "mykey")),
                None,
            )
            .await?;

        assert_eq!(req.headers["x-cos-meta-a"].as_bytes(), b"\xff");
        assert!(req.headers[AUTHORIZATION]
            .to_str()?
            .contains("&q-header-list=host;x-cos-meta-a&"));
        assert_eq!(
            req.uri.to_string(),
            "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/%FFa"
        );
        Ok(())
    }
}
