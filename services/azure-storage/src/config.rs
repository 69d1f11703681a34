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

use blobsas_core::utils::Redact;
use blobsas_core::{Context, Error, Result};
use log::debug;
use serde_json::{Map, Value};

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub const STORAGE_ACCOUNT_NAME: &str = "storage_account_name";
pub const STORAGE_ACCOUNT_CONNECTION_STRING: &str = "storage_account_connection_string";
pub const STORAGE_ACCOUNT_KEY: &str = "storage_account_key";
pub const CONTAINER_NAME: &str = "container_name";

/// Config carries the four settings needed to check a blob and sign a URL for it.
///
/// Every field is required. Values are taken verbatim, the connection string
/// and key are not validated until they are used.
#[derive(Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// Account name used in the SAS URL host and signature.
    pub storage_account_name: String,
    /// Connection string used to authenticate the existence check.
    pub storage_account_connection_string: String,
    /// Base64 account key used to sign the SAS token.
    pub storage_account_key: String,
    /// Container holding the blobs.
    pub container_name: String,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("storage_account_name", &self.storage_account_name)
            .field(
                "storage_account_connection_string",
                &Redact::from(&self.storage_account_connection_string),
            )
            .field("storage_account_key", &Redact::from(&self.storage_account_key))
            .field("container_name", &self.container_name)
            .finish()
    }
}

impl Config {
    /// Load config from the JSON file at `path`.
    ///
    /// - file can't be read: [`ErrorKind::ConfigNotFound`](blobsas_core::ErrorKind::ConfigNotFound)
    /// - content is not a JSON object: [`ErrorKind::ConfigInvalid`](blobsas_core::ErrorKind::ConfigInvalid)
    /// - a required key is absent: [`ErrorKind::ConfigKeyMissing`](blobsas_core::ErrorKind::ConfigKeyMissing)
    ///
    /// Keys are checked one by one, loading stops at the first absent key.
    pub async fn load(ctx: &Context, path: &str) -> Result<Self> {
        let resolved = ctx.expand_home_dir(path).ok_or_else(|| {
            Error::config_not_found(format!("{path}: home directory is not available"))
        })?;
        debug!("loading config from {resolved}");

        let content = ctx
            .file_read(&resolved)
            .await
            .map_err(|e| Error::config_not_found(e.to_string()).with_source(e))?;

        Self::from_slice(&content, path)
    }

    /// Parse config from raw JSON bytes. `path` is only used in messages.
    pub fn from_slice(content: &[u8], path: &str) -> Result<Self> {
        let value: Value = serde_json::from_slice(content)
            .map_err(|e| Error::config_invalid(e.to_string()).with_source(e))?;
        let Value::Object(map) = value else {
            return Err(Error::config_invalid(format!(
                "expected a JSON object at the top level, got {}",
                json_type(&value)
            )));
        };

        // Field order is the order keys are checked in.
        Ok(Self {
            storage_account_name: fetch_key(&map, STORAGE_ACCOUNT_NAME, path)?,
            storage_account_connection_string: fetch_key(
                &map,
                STORAGE_ACCOUNT_CONNECTION_STRING,
                path,
            )?,
            storage_account_key: fetch_key(&map, STORAGE_ACCOUNT_KEY, path)?,
            container_name: fetch_key(&map, CONTAINER_NAME, path)?,
        })
    }
}

fn fetch_key(map: &Map<String, Value>, key: &str, path: &str) -> Result<String> {
    match map.get(key) {
        None | Some(Value::Null) => Err(Error::config_key_missing(format!(
            "{path} did not have a key named '{key}'"
        ))),
        Some(Value::String(v)) => Ok(v.clone()),
        Some(v) => Err(Error::config_invalid(format!(
            "key '{key}' must be a string, got {}",
            json_type(v)
        ))),
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
