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

use std::fmt::{Debug, Formatter};

use blobsas_core::time::{self, DateTime};
use blobsas_core::utils::Redact;
use blobsas_core::{Error, Result};
use log::debug;

use crate::service_sas::BlobSharedAccessSignature;
use crate::Credential;

/// How long a generated SAS URL stays valid.
pub const SAS_VALIDITY_DAYS: i64 = 30;

/// Everything needed to sign one read URL.
#[derive(Clone)]
pub struct SasRequest {
    /// Storage account name.
    pub account_name: String,
    /// Base64 storage account key.
    pub account_key: String,
    /// Container holding the blob.
    pub container_name: String,
    /// Blob to grant read access to.
    pub blob_name: String,
    /// Moment the SAS stops being accepted.
    pub expiry: DateTime,
}

impl Debug for SasRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SasRequest")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("container_name", &self.container_name)
            .field("blob_name", &self.blob_name)
            .field("expiry", &self.expiry)
            .finish()
    }
}

impl SasRequest {
    /// Build a request that expires [`SAS_VALIDITY_DAYS`] after `now`.
    ///
    /// Only a shared key can sign a SAS; a SAS token credential is rejected.
    pub fn new(
        credential: &Credential,
        container_name: &str,
        blob_name: &str,
        now: DateTime,
    ) -> Result<Self> {
        let Credential::SharedKey {
            account_name,
            account_key,
        } = credential
        else {
            return Err(Error::credential_invalid(
                "a SAS can only be signed with an account key",
            ));
        };

        Ok(Self {
            account_name: account_name.clone(),
            account_key: account_key.clone(),
            container_name: container_name.to_string(),
            blob_name: blob_name.to_string(),
            expiry: now + time::days(SAS_VALIDITY_DAYS)?,
        })
    }

    /// Sign and render the URL, see [`build_url`].
    pub fn build_url(&self) -> Result<String> {
        build_url(
            &self.account_name,
            &self.account_key,
            &self.container_name,
            &self.blob_name,
            self.expiry,
        )
    }
}

/// Build `https://{account}.blob.core.windows.net/{container}/{blob}?{token}`.
///
/// The token is a read-only service SAS for the blob, expiring at `expiry`.
/// Names are inserted verbatim.
pub fn build_url(
    account_name: &str,
    account_key: &str,
    container_name: &str,
    blob_name: &str,
    expiry: DateTime,
) -> Result<String> {
    let token = BlobSharedAccessSignature::new(
        account_name.to_string(),
        account_key.to_string(),
        container_name.to_string(),
        blob_name.to_string(),
        expiry,
    )
    .token_string()?;
    debug!(
        "signed read SAS for {container_name}/{blob_name}, expires at {}",
        time::format_rfc3339(expiry)
    );

    Ok(format!(
        "https://{account_name}.blob.core.windows.net/{container_name}/{blob_name}?{token}"
    ))
}
