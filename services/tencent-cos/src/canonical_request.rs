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

use crate::constants::TENCENT_URI_ENCODE_SET;
use log::debug;
use percent_encoding::percent_encode;

/// The logical content of a request that gets authorized.
///
/// Query parameters and headers are multimaps, but only the first value of a
/// repeated key takes part in signing. Query keys repeat when they are
/// byte-equal, header names when they are equal ignoring ASCII case.
///
/// The path and header values are raw bytes: HTTP allows both to carry
/// octets that are not UTF-8, and they are signed exactly as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignableRequest {
    method: String,
    path: Vec<u8>,
    query: Vec<(String, String)>,
    headers: Vec<(String, Vec<u8>)>,
}

impl SignableRequest {
    /// Create a request with the given method and an already normalized path.
    ///
    /// The path is signed verbatim, so callers must pass `/` instead of an
    /// empty path.
    pub fn new(method: impl Into<String>, path: impl Into<Vec<u8>>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_query(key, value);
        self
    }

    /// Append a header field.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.push_header(key, value);
        self
    }

    /// Append a query parameter in place.
    pub fn push_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Append a header field in place.
    pub fn push_header(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.headers.push((key.into(), value.into()));
    }

    /// HTTP method as given.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request path as given.
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// Query parameters with the first value of every key, in input order.
    pub fn query_params(&self) -> Vec<(&str, &str)> {
        first_values(&self.query, |a, b| a == b)
            .into_iter()
            .map(|(k, v)| (k, v.as_str()))
            .collect()
    }

    /// Header fields with the first value of every name, in input order.
    pub fn header_fields(&self) -> Vec<(&str, &[u8])> {
        first_values(&self.headers, |a, b| a.eq_ignore_ascii_case(b))
            .into_iter()
            .map(|(k, v)| (k, v.as_slice()))
            .collect()
    }
}

fn first_values<'a, V>(
    pairs: &'a [(String, V)],
    same_key: impl Fn(&str, &str) -> bool,
) -> Vec<(&'a str, &'a V)> {
    let mut out: Vec<(&str, &V)> = Vec::with_capacity(pairs.len());
    for (k, v) in pairs {
        if !out.iter().any(|(seen, _)| same_key(seen, k)) {
            out.push((k.as_str(), v));
        }
    }
    out
}

/// Canonical form of a [`SignableRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalForm {
    /// Lowercased query keys in sorted order, joined by `;`.
    pub sorted_param_keys: String,
    /// Lowercased header names in sorted order, joined by `;`.
    pub sorted_header_keys: String,
    /// The four newline-terminated segments that get hashed.
    ///
    /// UTF-8 unless the path carries other bytes.
    pub canonical_request: Vec<u8>,
}

/// Canonicalize a request.
///
/// Query keys and values are lowercased. Header names are lowercased and
/// header values are percent-encoded then lowercased. Both lists are sorted
/// by key with a stable sort.
pub fn canonicalize(req: &SignableRequest) -> CanonicalForm {
    let mut params = req
        .query_params()
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
        .collect::<Vec<_>>();
    params.sort_by(|a, b| a.0.cmp(&b.0));

    let mut headers = req
        .header_fields()
        .into_iter()
        .map(|(k, v)| {
            (
                k.to_lowercase(),
                percent_encode(v, &TENCENT_URI_ENCODE_SET)
                    .to_string()
                    .to_lowercase(),
            )
        })
        .collect::<Vec<_>>();
    headers.sort_by(|a, b| a.0.cmp(&b.0));

    let param_list = join_keys(&params);
    debug!("param list: {param_list}");
    let param_string = join_pairs(&params);
    debug!("param string: {param_string}");

    let header_list = join_keys(&headers);
    debug!("header list: {header_list}");
    let header_string = join_pairs(&headers);
    debug!("header string: {header_string}");

    let mut canonical_request = Vec::new();
    canonical_request.extend_from_slice(req.method.to_lowercase().as_bytes());
    canonical_request.push(b'\n');
    canonical_request.extend_from_slice(&req.path);
    canonical_request.push(b'\n');
    canonical_request.extend_from_slice(param_string.as_bytes());
    canonical_request.push(b'\n');
    canonical_request.extend_from_slice(header_string.as_bytes());
    canonical_request.push(b'\n');
    debug!(
        "canonical request: {}",
        String::from_utf8_lossy(&canonical_request)
    );

    CanonicalForm {
        sorted_param_keys: param_list,
        sorted_header_keys: header_list,
        canonical_request,
    }
}

fn join_keys(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";")
}

fn join_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
