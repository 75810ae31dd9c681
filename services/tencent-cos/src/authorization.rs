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

use crate::canonical_request::{canonicalize, CanonicalForm, SignableRequest};
use crate::signature::{derive_signature, Signature, TimeWindow};
use crate::Credential;
use cossign_core::Result;

/// Assemble the `Authorization` value.
///
/// Fields are always emitted in this order:
///
/// ```text
/// q-sign-algorithm=sha1&q-ak=<id>&q-sign-time=<window>&q-key-time=<window>
///     &q-header-list=<headers>&q-url-param-list=<params>&q-signature=<hex>
/// ```
pub fn build_authorization(secret_id: &str, form: &CanonicalForm, signature: &Signature) -> String {
    format!(
        "q-sign-algorithm={}&q-ak={}&q-sign-time={}&q-key-time={}&q-header-list={}&q-url-param-list={}&q-signature={}",
        signature.algorithm,
        secret_id,
        signature.sign_time,
        signature.sign_time,
        form.sorted_header_keys,
        form.sorted_param_keys,
        signature.signature,
    )
}

/// Canonicalize, sign and assemble in one go.
///
/// Returns `CredentialInvalid` if the secret id or key is empty.
pub fn authorize(req: &SignableRequest, cred: &Credential, window: TimeWindow) -> Result<String> {
    cred.check()?;

    let form = canonicalize(req);
    let signature = derive_signature(&form.canonical_request, &cred.secret_key, window);
    Ok(build_authorization(&cred.secret_id, &form, &signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cossign_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_authorization() {
        let form = CanonicalForm {
            sorted_param_keys: "b;prefix".to_string(),
            sorted_header_keys: "content-type;host".to_string(),
            canonical_request: Vec::new(),
        };
        let signature = Signature {
            algorithm: "sha1",
            sign_time: "1000;1030".to_string(),
            signature: "abc".to_string(),
        };

        assert_eq!(
            build_authorization("AKIDexample", &form, &signature),
            "q-sign-algorithm=sha1&q-ak=AKIDexample&q-sign-time=1000;1030&q-key-time=1000;1030&q-header-list=content-type;host&q-url-param-list=b;prefix&q-signature=abc"
        );
    }

    #[test]
    fn test_authorize_empty_request() -> Result<()> {
        let auth = authorize(
            &SignableRequest::new("GET", "/"),
            &Credential::new("AKIDexample", "mykey"),
            TimeWindow::starting_at(0),
        )?;
        assert_eq!(
            auth,
            "q-sign-algorithm=sha1&q-ak=AKIDexample&q-sign-time=0;30&q-key-time=0;30&q-header-list=&q-url-param-list=&q-signature=9edc9bac1186f707dffbb2688f01f45d9cc609e0"
        );
        Ok(())
    }

    #[test]
    fn test_authorize_put_object() -> Result<()> {
        let req = SignableRequest::new("PUT", "/exampleobject")
            .with_query("B", "2")
            .with_query("prefix", "A B")
            .with_header("Content-Type", "text/plain")
            .with_header("x-cos-meta-a", "Hello World")
            .with_header("host", "examplebucket-1250000000.cos.ap-beijing.myqcloud.com");

        let form = canonicalize(&req);
        assert_eq!(
            String::from_utf8_lossy(&form.canonical_request),
            "put\n/exampleobject\nb=2&prefix=a b\ncontent-type=text%2fplain&host=examplebucket-1250000000.cos.ap-beijing.myqcloud.com&x-cos-meta-a=hello%20world\n"
        );

        let auth = authorize(
            &req,
            &Credential::new("AKIDexample", "secret_key"),
            TimeWindow::starting_at(1000),
        )?;
        assert_eq!(
            auth,
            "q-sign-algorithm=sha1&q-ak=AKIDexample&q-sign-time=1000;1030&q-key-time=1000;1030&q-header-list=content-type;host;x-cos-meta-a&q-url-param-list=b;prefix&q-signature=859cc338c0f9ffedac80a07ae9ce4df3a02a1589"
        );
        Ok(())
    }

    #[test]
    fn test_authorize_rejects_empty_secret() {
        let req = SignableRequest::new("GET", "/");
        let window = TimeWindow::starting_at(0);

        for cred in [
            Credential::new("", "mykey"),
            Credential::new("AKIDexample", ""),
        ] {
            let err = authorize(&req, &cred, window).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        }
    }
}
