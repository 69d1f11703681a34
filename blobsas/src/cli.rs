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

use blobsas_azure_storage::DEFAULT_CONFIG_FILE;
use clap::Parser;

/// Command line of `blobsas`.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "blobsas")]
#[command(about = "Print a read-only SAS URL for an existing Azure Storage blob")]
#[command(version)]
pub struct Cli {
    /// Name of the blob inside the configured container
    pub blob_name: Option<String>,

    /// Path to the JSON config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,
}
