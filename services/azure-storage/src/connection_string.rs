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

use std::collections::HashMap;

use blobsas_core::utils::Redact;
use blobsas_core::{Error, Result};

use crate::constants::DEFAULT_ENDPOINT_SUFFIX;
use crate::Credential;

/// Azurite defaults.
const AZURITE_DEFAULT_STORAGE_ACCOUNT_NAME: &str = "devstoreaccount1";
const AZURITE_DEFAULT_STORAGE_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const AZURITE_DEFAULT_BLOB_URI: &str = "http://127.0.0.1:10000";

/// What a connection string says about reaching the Blob service.
#[derive(Clone, Debug, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ConnectionString {
    /// Blob service endpoint, without trailing `/`.
    pub endpoint: Option<String>,
    /// Credential to authenticate requests with, `None` for anonymous access.
    pub credential: Option<Credential>,
}

impl ConnectionString {
    /// Parses an [Azure connection string][1] for the Blob service.
    ///
    /// An example of a connection string looks like:
    ///
    /// ```txt
    /// DefaultEndpointsProtocol=https;
    /// AccountName=mystorageaccount;
    /// AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;
    /// EndpointSuffix=core.windows.net
    /// ```
    ///
    /// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
    pub fn parse(conn_str: &str) -> Result<Self> {
        let key_values = parse_into_key_values(conn_str)?;

        if let Some(development) = collect_development_config(&key_values) {
            return Ok(development);
        }

        Ok(ConnectionString {
            endpoint: collect_endpoint(&key_values)?,
            credential: collect_credentials(&key_values),
        })
    }
}

fn parse_into_key_values(conn_str: &str) -> Result<HashMap<String, String>> {
    conn_str
        .trim()
        .replace('\n', "")
        .split(';')
        .filter(|&field| !field.trim().is_empty())
        .map(|field| {
            let (key, value) = field.trim().split_once('=').ok_or_else(|| {
                Error::credential_invalid(format!(
                    "invalid connection string, expected '=' in field: {:?}",
                    Redact::from(field.trim())
                ))
            })?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Development storage aka Azurite.
fn collect_development_config(key_values: &HashMap<String, String>) -> Option<ConnectionString> {
    if key_values.get("UseDevelopmentStorage").map(String::as_str) != Some("true") {
        return None;
    }

    let account_name = key_values
        .get("AccountName")
        .cloned()
        .unwrap_or(AZURITE_DEFAULT_STORAGE_ACCOUNT_NAME.to_string());
    let account_key = key_values
        .get("AccountKey")
        .cloned()
        .unwrap_or(AZURITE_DEFAULT_STORAGE_ACCOUNT_KEY.to_string());
    let development_proxy_uri = key_values
        .get("DevelopmentStorageProxyUri")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or(AZURITE_DEFAULT_BLOB_URI.to_string());

    Some(ConnectionString {
        endpoint: Some(format!("{development_proxy_uri}/{account_name}")),
        credential: Some(Credential::SharedKey {
            account_name,
            account_key,
        }),
    })
}

/// An explicit `BlobEndpoint` wins, otherwise the endpoint is built from the account name.
fn collect_endpoint(key_values: &HashMap<String, String>) -> Result<Option<String>> {
    if let Some(endpoint) = key_values.get("BlobEndpoint") {
        return Ok(Some(endpoint.trim_end_matches('/').to_string()));
    }

    let Some(account_name) = key_values.get("AccountName") else {
        return Ok(None);
    };

    let protocol = key_values
        .get("DefaultEndpointsProtocol")
        .map(String::as_str)
        .unwrap_or("https");
    if protocol != "http" && protocol != "https" {
        return Err(Error::credential_invalid(format!(
            "invalid DefaultEndpointsProtocol: {protocol}"
        )));
    }

    let endpoint_suffix = key_values
        .get("EndpointSuffix")
        .map(String::as_str)
        .unwrap_or(DEFAULT_ENDPOINT_SUFFIX);

    Ok(Some(format!(
        "{protocol}://{account_name}.blob.{endpoint_suffix}"
    )))
}

fn collect_credentials(key_values: &HashMap<String, String>) -> Option<Credential> {
    if let Some(token) = key_values.get("SharedAccessSignature") {
        Some(Credential::with_sas_token(token))
    } else if let (Some(account_name), Some(account_key)) =
        (key_values.get("AccountName"), key_values.get("AccountKey"))
    {
        Some(Credential::with_shared_key(account_name, account_key))
    } else {
        // Not an error: a public container can be checked anonymously.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        let test_cases = vec![
            ("minimal fields",
                "BlobEndpoint=https://testaccount.blob.core.windows.net/",
                Some(ConnectionString {
                    endpoint: Some("https://testaccount.blob.core.windows.net".to_string()),
                    ..Default::default()
                }),
            ),
            ("basic creds and blob endpoint",
                "AccountName=testaccount;AccountKey=testkey;BlobEndpoint=https://testaccount.blob.core.windows.net/",
                Some(ConnectionString {
                    endpoint: Some("https://testaccount.blob.core.windows.net".to_string()),
                    credential: Some(Credential::with_shared_key("testaccount", "testkey")),
                }),
            ),
            ("SAS token",
                "BlobEndpoint=https://testaccount.blob.core.windows.net;SharedAccessSignature=sv=2022-11-02&sig=abc",
                Some(ConnectionString {
                    endpoint: Some("https://testaccount.blob.core.windows.net".to_string()),
                    credential: Some(Credential::with_sas_token("sv=2022-11-02&sig=abc")),
                }),
            ),
            ("endpoint from parts",
                "DefaultEndpointsProtocol=http;AccountName=testaccount;AccountKey=testkey;EndpointSuffix=core.chinacloudapi.cn",
                Some(ConnectionString {
                    endpoint: Some("http://testaccount.blob.core.chinacloudapi.cn".to_string()),
                    credential: Some(Credential::with_shared_key("testaccount", "testkey")),
                }),
            ),
            ("endpoint from account name only",
                "AccountName=testaccount;AccountKey=testkey",
                Some(ConnectionString {
                    // Defaults to https on the public cloud
                    endpoint: Some("https://testaccount.blob.core.windows.net".to_string()),
                    credential: Some(Credential::with_shared_key("testaccount", "testkey")),
                }),
            ),
            ("prefers sas over key",
                "AccountName=testaccount;AccountKey=testkey;SharedAccessSignature=sas_token",
                Some(ConnectionString {
                    endpoint: Some("https://testaccount.blob.core.windows.net".to_string()),
                    credential: Some(Credential::with_sas_token("sas_token")),
                }),
            ),
            ("development storage",
                "UseDevelopmentStorage=true",
                Some(ConnectionString {
                    endpoint: Some("http://127.0.0.1:10000/devstoreaccount1".to_string()),
                    credential: Some(Credential::with_shared_key("devstoreaccount1", AZURITE_DEFAULT_STORAGE_ACCOUNT_KEY)),
                }),
            ),
            ("development storage with custom uri",
                "UseDevelopmentStorage=true;DevelopmentStorageProxyUri=http://127.0.0.1:12345/",
                Some(ConnectionString {
                    endpoint: Some("http://127.0.0.1:12345/devstoreaccount1".to_string()),
                    credential: Some(Credential::with_shared_key("devstoreaccount1", AZURITE_DEFAULT_STORAGE_ACCOUNT_KEY)),
                }),
            ),
            ("unknown key is ignored",
                "SomeUnknownKey=123;BlobEndpoint=https://testaccount.blob.core.windows.net/",
                Some(ConnectionString {
                    endpoint: Some("https://testaccount.blob.core.windows.net".to_string()),
                    ..Default::default()
                }),
            ),
            ("line breaks and stray separators",
                r#";
                    AccountName=testaccount;
                    AccountKey=testkey;
                    EndpointSuffix=core.windows.net;
                    DefaultEndpointsProtocol=https;"#,
                Some(ConnectionString {
                    endpoint: Some("https://testaccount.blob.core.windows.net".to_string()),
                    credential: Some(Credential::with_shared_key("testaccount", "testkey")),
                }),
            ),
            ("key value keeps padding",
                "AccountName=acct;AccountKey=a2V5MTIz==",
                Some(ConnectionString {
                    endpoint: Some("https://acct.blob.core.windows.net".to_string()),
                    credential: Some(Credential::with_shared_key("acct", "a2V5MTIz==")),
                }),
            ),
            ("empty",
                "",
                Some(ConnectionString::default()),
            ),
            ("missing equals",
                "AccountNameexample;AccountKey=example",
                None,
            ),
            ("with invalid protocol",
                "DefaultEndpointsProtocol=ftp;AccountName=example;EndpointSuffix=core.windows.net",
                None,
            ),
        ];

        for (name, conn_str, expected) in test_cases {
            let actual = ConnectionString::parse(conn_str);

            if let Some(expected) = expected {
                assert!(actual.is_ok(), "Failed for case: {}", name);
                assert_eq!(actual.unwrap(), expected, "Failed for case: {}", name);
            } else {
                assert!(actual.is_err(), "Expected error for case: {}", name);
            }
        }
    }

    #[test]
    fn test_malformed_field_is_redacted() {
        let conn_str = format!("AccountName=acct;AccountKey:{AZURITE_DEFAULT_STORAGE_ACCOUNT_KEY}");

        let err = ConnectionString::parse(&conn_str).unwrap_err();

        assert!(!err.to_string().contains(AZURITE_DEFAULT_STORAGE_ACCOUNT_KEY));
        assert!(err.to_string().contains("Acc***w=="), "got {err}");
    }
}
