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

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Headers used in azure services.
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_VERSION: &str = "x-ms-version";
pub const X_MS_ERROR_CODE: &str = "x-ms-error-code";

/// Storage service version sent with requests and stamped into SAS tokens.
///
/// Any version from 2020-12-06 onward shares the service SAS string-to-sign layout.
pub const STORAGE_SERVICE_VERSION: &str = "2022-11-02";

/// Host suffix of the public Azure cloud.
pub const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// AsciiSet for [Azure query parameters](https://learn.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
pub static AZURE_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Blob names may contain `/` to emulate directories, keep it as-is in request paths.
pub static BLOB_PATH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
