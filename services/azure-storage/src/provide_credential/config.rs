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

use async_trait::async_trait;
use blobsas_core::{Context, ProvideCredential, Result};
use log::debug;

use crate::{Config, Credential};

/// Provides the shared key stored in the configuration file.
///
/// This is the signing key for SAS URLs. Swapping this provider out (for a
/// secret store, say) leaves the rest of the flow untouched.
#[derive(Clone, Debug)]
pub struct ConfigCredentialProvider {
    account_name: String,
    account_key: String,
}

impl ConfigCredentialProvider {
    /// Create a provider from a loaded [`Config`].
    pub fn new(config: &Config) -> Self {
        Self {
            account_name: config.storage_account_name.clone(),
            account_key: config.storage_account_key.clone(),
        }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        if self.account_name.is_empty() || self.account_key.is_empty() {
            debug!("config has an empty account name or key, no credential provided");
            return Ok(None);
        }

        Ok(Some(Credential::with_shared_key(
            &self.account_name,
            &self.account_key,
        )))
    }
}
