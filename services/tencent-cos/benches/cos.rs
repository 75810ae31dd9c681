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

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use cossign_core::{Context, SignRequest};
use cossign_tencent_cos::{authorize, Credential, RequestSigner, SignableRequest, TimeWindow};

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("must success");
    let cred = Credential::new("AKIDexample", "secret_key");

    let mut group = c.benchmark_group("tencent_cos");

    group.bench_function("authorize", |b| {
        let req = SignableRequest::new("PUT", "/exampleobject")
            .with_query("prefix", "A B")
            .with_header("content-type", "text/plain")
            .with_header("host", "examplebucket-1250000000.cos.ap-beijing.myqcloud.com")
            .with_header("x-cos-meta-a", "Hello World");
        let window = TimeWindow::starting_at(1_660_582_212);

        b.iter(|| authorize(&req, &cred, window).expect("must success"))
    });

    group.bench_function("request_signer", |b| {
        let s = RequestSigner::new();
        let ctx = Context::new();

        b.to_async(&runtime).iter(|| async {
            let req = http::Request::put(
                "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/exampleobject?prefix=A%20B",
            )
            .header("content-type", "text/plain")
            .body(())
            .expect("request must be valid");

            let (mut parts, _) = req.into_parts();
            s.sign_request(&ctx, &mut parts, Some(&cred), None)
                .await
                .expect("must success")
        })
    });

    group.finish();
}
