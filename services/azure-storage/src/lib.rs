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

//! Azure Blob Storage support for blobsas.
//!
//! This crate provides the three steps of generating a read URL:
//!
//! - [`Config::load`]: read the four required settings from a JSON file
//! - [`exists`]: check the blob exists, authenticated by a connection string
//! - [`build_url`] / [`SasRequest`]: sign a read-only service SAS and render the URL
//!
//! # Example
//!
//! ```rust,no_run
//! use blobsas_azure_storage::{exists, Config, ConfigCredentialProvider, SasRequest};
//! use blobsas_core::{time, Context, ProvideCredential, Result};
//!
//! async fn sas_url(ctx: &Context, blob: &str) -> Result<Option<String>> {
//!     let config = Config::load(ctx, "config.json").await?;
//!
//!     if !exists(ctx, &config.storage_account_connection_string, &config.container_name, blob).await? {
//!         return Ok(None);
//!     }
//!
//!     let Some(cred) = ConfigCredentialProvider::new(&config).provide_credential(ctx).await? else {
//!         return Ok(None);
//!     };
//!     let req = SasRequest::new(&cred, &config.container_name, blob, time::now())?;
//!     Ok(Some(req.build_url()?))
//! }
//! ```

mod constants;

mod config;
pub use config::*;

mod connection_string;
pub use connection_string::ConnectionString;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::RequestSigner;

mod exists;
pub use exists::exists;

mod service_sas;
pub use service_sas::BlobSharedAccessSignature;

mod sas_url;
pub use sas_url::{build_url, SasRequest, SAS_VALIDITY_DAYS};
