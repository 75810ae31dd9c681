//! Sign a COS request and print the resulting headers.
//!
//! Credentials are taken from `TENCENTCLOUD_SECRET_ID` / `TENCENTCLOUD_SECRET_KEY`
//! when set, demo values otherwise.

use cossign_core::{Context, OsEnv, ProvideCredentialChain, Result, Signer};
use cossign_tencent_cos::{EnvCredentialProvider, RequestSigner, StaticCredentialProvider};
use http::header::AUTHORIZATION;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let loader = ProvideCredentialChain::new()
        .push(EnvCredentialProvider::new())
        .push(StaticCredentialProvider::new(
            "AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE",
            "gg7cVbmNz7e2EXAMPLEKEY",
        ));
    let signer = Signer::new(ctx, loader, RequestSigner::new());

    let (mut parts, _) = http::Request::put(
        "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/exampleobject?prefix=photos",
    )
    .header("content-type", "text/plain")
    .header("x-cos-meta-author", "cossign example")
    .body(())?
    .into_parts();

    signer.sign(&mut parts, None).await?;

    info!("signed {} {}", parts.method, parts.uri);
    for (name, value) in &parts.headers {
        if name == AUTHORIZATION {
            println!("{name}: {}", value.to_str()?);
        } else {
            println!("{name}: {value:?}");
        }
    }
    Ok(())
}
