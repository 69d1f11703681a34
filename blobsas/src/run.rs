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

use blobsas_azure_storage::{exists, Config, Credential, SasRequest};
use blobsas_core::time::DateTime;
use blobsas_core::{Context, Error, ErrorKind, ProvideCredential};
use log::debug;

use crate::Failure;

/// Load config, check the blob exists and build its read URL.
///
/// `now` is the moment the SAS validity window starts. The blob name is
/// checked before anything is read, and nothing is sent over the network
/// until the config is fully loaded.
///
/// `credential_provider` builds the provider of the SAS signing key from the
/// loaded config, e.g. `ConfigCredentialProvider::new`. It is only asked for
/// a credential once the blob is known to exist.
pub async fn run<P>(
    ctx: &Context,
    blob_name: Option<&str>,
    config_path: &str,
    now: DateTime,
    credential_provider: impl FnOnce(&Config) -> P,
) -> Result<String, Failure>
where
    P: ProvideCredential<Credential = Credential>,
{
    let Some(blob_name) = blob_name else {
        return Err(Failure::NoArguments);
    };

    let config = Config::load(ctx, config_path)
        .await
        .map_err(|e| config_failure(e, config_path))?;
    debug!("loaded config: {config:?}");

    let found = exists(
        ctx,
        &config.storage_account_connection_string,
        &config.container_name,
        blob_name,
    )
    .await
    .map_err(|source| Failure::ExistenceCheck {
        blob_name: blob_name.to_string(),
        source,
    })?;
    if !found {
        return Err(Failure::BlobNotFound {
            blob_name: blob_name.to_string(),
            container_name: config.container_name,
        });
    }

    let provider = credential_provider(&config);
    sign(ctx, &provider, &config.container_name, blob_name, now)
        .await
        .map_err(|source| Failure::Signing {
            blob_name: blob_name.to_string(),
            source,
        })
}

async fn sign(
    ctx: &Context,
    provider: &impl ProvideCredential<Credential = Credential>,
    container_name: &str,
    blob_name: &str,
    now: DateTime,
) -> blobsas_core::Result<String> {
    let credential = provider
        .provide_credential(ctx)
        .await?
        .ok_or_else(|| Error::credential_invalid("no account name and key to sign with"))?;

    SasRequest::new(&credential, container_name, blob_name, now)?.build_url()
}

fn config_failure(err: Error, path: &str) -> Failure {
    match err.kind() {
        ErrorKind::ConfigKeyMissing => Failure::MissingConfigKey(err),
        ErrorKind::ConfigInvalid => Failure::ConfigParse {
            path: path.to_string(),
            source: err,
        },
        _ => Failure::ConfigNotFound(err),
    }
}
