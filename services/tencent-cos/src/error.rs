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

use cossign_core::{Error, ErrorKind};
use http::{Method, StatusCode};
use log::debug;
use quick_xml::de;
use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// A request rejected by COS.
///
/// - [Error codes](https://cloud.tencent.com/document/product/436/7730)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFailure {
    /// Method of the failed request.
    pub method: Method,
    /// Status returned by COS.
    pub status: StatusCode,
    /// COS error code, e.g. `NoSuchBucket`.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// The resource the request addressed.
    pub resource: String,
    /// Request id assigned by COS.
    pub request_id: String,
    /// Trace id assigned by COS.
    pub trace_id: String,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ErrorResponse {
    code: String,
    message: String,
    resource: String,
    request_id: String,
    trace_id: String,
}

impl RequestFailure {
    /// Build a failure from a COS error response.
    ///
    /// A body that is not a COS `<Error>` document leaves the COS fields empty.
    pub fn parse(method: Method, status: StatusCode, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body);
        let resp: ErrorResponse = de::from_str(&body).unwrap_or_else(|err| {
            debug!("response body is not a cos error document: {err}");
            ErrorResponse::default()
        });

        Self {
            method,
            status,
            code: resp.code,
            message: resp.message,
            resource: resp.resource,
            request_id: resp.request_id,
            trace_id: resp.trace_id,
        }
    }

    /// The error kind this failure is reported as.
    pub fn kind(&self) -> ErrorKind {
        match self.status {
            StatusCode::FORBIDDEN => ErrorKind::CredentialDenied,
            StatusCode::BAD_REQUEST => ErrorKind::RequestInvalid,
            _ => ErrorKind::Unexpected,
        }
    }
}

impl Display for RequestFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} - {}[{}]",
            self.method,
            self.resource,
            self.status.as_u16(),
            self.code
        )
    }
}

impl std::error::Error for RequestFailure {}

impl From<RequestFailure> for Error {
    fn from(failure: RequestFailure) -> Self {
        let mut err = Error::new(failure.kind(), failure.to_string());
        if !failure.request_id.is_empty() {
            err = err.with_context(format!("request_id: {}", failure.request_id));
        }
        err.with_source(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NO_SUCH_BUCKET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
    <Code>NoSuchBucket</Code>
    <Message>The specified bucket does not exist.</Message>
    <Resource>examplebucket-1250000000.cos.ap-beijing.myqcloud.com</Resource>
    <RequestId>NTk0MjdmODlfMjQ4OGY3Nl9hMGE4XzRh</RequestId>
    <TraceId>OGVmYzZiMmQzYjA2OWNhODk0NTRkMTBiOWVmMDAxODc0OWRkZjk0ZDM1NmI1M2E2MTRlY2MzZDhmNmI5MWI1OTBjYzE2MjAxN2M1MzJiOTdkZjMxMDVlYTZjN2FiMmI0NTk3NWFiNjAyMzdjM2RlMmVmOGNiNWI0ZTE2MDNjYjk=</TraceId>
</Error>"#;

    #[test]
    fn test_parse() {
        let failure = RequestFailure::parse(
            Method::DELETE,
            StatusCode::NOT_FOUND,
            NO_SUCH_BUCKET.as_bytes(),
        );

        assert_eq!(failure.code, "NoSuchBucket");
        assert_eq!(failure.message, "The specified bucket does not exist.");
        assert_eq!(
            failure.resource,
            "examplebucket-1250000000.cos.ap-beijing.myqcloud.com"
        );
        assert_eq!(failure.request_id, "NTk0MjdmODlfMjQ4OGY3Nl9hMGE4XzRh");
        assert!(failure.trace_id.starts_with("OGVmYzZi"));
        assert_eq!(
            failure.to_string(),
            "DELETE examplebucket-1250000000.cos.ap-beijing.myqcloud.com - 404[NoSuchBucket]"
        );
        assert_eq!(failure.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_parse_invalid_body() {
        let failure = RequestFailure::parse(Method::GET, StatusCode::BAD_GATEWAY, b"<html>oops");
        assert_eq!(failure.code, "");
        assert_eq!(failure.to_string(), "GET  - 502[]");
    }

    #[test]
    fn test_into_error() {
        let body = "<Error><Code>SignatureDoesNotMatch</Code><RequestId>abc</RequestId></Error>";
        let failure = RequestFailure::parse(Method::GET, StatusCode::FORBIDDEN, body.as_bytes());

        let err = Error::from(failure.clone());
        assert_eq!(err.kind(), ErrorKind::CredentialDenied);
        assert!(err.is_credential_error());
        assert_eq!(err.context(), ["request_id: abc".to_string()]);
        assert_eq!(err.source_as::<RequestFailure>(), Some(&failure));

        let failure = RequestFailure::parse(Method::PUT, StatusCode::BAD_REQUEST, b"");
        assert_eq!(Error::from(failure).kind(), ErrorKind::RequestInvalid);
    }
}
