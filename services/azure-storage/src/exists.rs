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

use blobsas_core::{Context, Error, Result, Signer};
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use log::debug;
use percent_encoding::utf8_percent_encode;

use crate::constants::*;
use crate::{ConnectionString, RequestSigner, StaticCredentialProvider};

/// Check whether `blob_name` exists in `container_name`.
///
/// The connection string decides both where the request goes and how it is
/// authenticated. Sends a single `HEAD` for the blob:
///
/// - `2xx` means the blob exists.
/// - `404` means it doesn't (this includes a missing container).
/// - Anything else is an error. Nothing is retried.
pub async fn exists(
    ctx: &Context,
    connection_string: &str,
    container_name: &str,
    blob_name: &str,
) -> Result<bool> {
    let conn = ConnectionString::parse(connection_string)?;
    let endpoint = conn.endpoint.ok_or_else(|| {
        Error::request_invalid("connection string does not describe a blob endpoint")
    })?;

    let url = format!(
        "{endpoint}/{container_name}/{}",
        utf8_percent_encode(blob_name, &BLOB_PATH_ENCODE_SET)
    );
    debug!("checking blob existence: HEAD {url}");

    let mut parts = Request::builder()
        .method(Method::HEAD)
        .uri(&url)
        .header(X_MS_VERSION, STORAGE_SERVICE_VERSION)
        .body(())?
        .into_parts()
        .0;

    match conn.credential {
        Some(credential) => {
            let signer = Signer::new(
                ctx.clone(),
                StaticCredentialProvider::new(credential),
                RequestSigner::new(),
            );
            signer.sign(&mut parts).await?;
        }
        None => debug!("connection string carries no credential, sending anonymous request"),
    }

    let resp = ctx
        .http_send(Request::from_parts(parts, Bytes::new()))
        .await?;
    let status = resp.status();
    debug!("got response status: {status}");

    match status {
        s if s.is_success() => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        s => {
            let code = resp
                .headers()
                .get(X_MS_ERROR_CODE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            Err(Error::unexpected(format!(
                "unexpected status {s} ({code}) while checking {container_name}/{blob_name}"
            )))
        }
    }
}
