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

use crate::constants::{SIGN_ALGORITHM, SIGN_WINDOW_SECONDS};
use cossign_core::hash::{hex_hmac_sha1, hex_sha1};
use cossign_core::time::DateTime;
use log::debug;

/// The unix-second interval a signature is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    /// A window that opens at `start` and closes 30 seconds later.
    pub fn starting_at(start: i64) -> Self {
        Self {
            start,
            end: start.saturating_add(SIGN_WINDOW_SECONDS),
        }
    }

    /// A window that opens at the given time, truncated to whole seconds.
    pub fn from_time(time: DateTime) -> Self {
        Self::starting_at(time.timestamp())
    }

    /// Window start.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Window end.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// `{start};{end}`, used for both `q-sign-time` and `q-key-time`.
    pub fn sign_time(&self) -> String {
        format!("{};{}", self.start, self.end)
    }
}

/// Result of signing a canonical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Always `sha1`.
    pub algorithm: &'static str,
    /// The window this signature is valid for, as `{start};{end}`.
    pub sign_time: String,
    /// Lowercase hex HMAC-SHA1.
    pub signature: String,
}

/// Sign a canonical request with the secret key for the given window.
pub fn derive_signature(canonical_request: &[u8], secret_key: &str, window: TimeWindow) -> Signature {
    let sign_time = window.sign_time();

    let string_to_sign = string_to_sign(canonical_request, &sign_time);
    debug!("string to sign: {string_to_sign}");

    let key = signing_key(secret_key, &sign_time);
    // The hex string itself is the key, not the bytes it encodes.
    let signature = hex_hmac_sha1(key.as_bytes(), string_to_sign.as_bytes());

    Signature {
        algorithm: SIGN_ALGORITHM,
        sign_time,
        signature,
    }
}

fn string_to_sign(canonical_request: &[u8], sign_time: &str) -> String {
    let mut s = String::new();
    s.push_str(SIGN_ALGORITHM);
    s.push('\n');
    s.push_str(sign_time);
    s.push('\n');
    s.push_str(&hex_sha1(canonical_request));
    s.push('\n');
    s
}

fn signing_key(secret_key: &str, sign_time: &str) -> String {
    hex_hmac_sha1(secret_key.as_bytes(), sign_time.as_bytes())
}
