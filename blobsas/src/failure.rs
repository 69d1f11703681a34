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

use blobsas_core::Error;
use clap::error::ContextKind;
use thiserror::Error;

/// Why a run ended without a URL.
///
/// `Display` renders the single line printed on standard output.
#[derive(Error, Debug)]
pub enum Failure {
    /// No blob name was given.
    #[error("Error - no arguments passed")]
    NoArguments,

    /// The command line could not be parsed.
    #[error("Error - {0}")]
    Usage(String),

    /// The config file could not be read.
    #[error("Error reading config file: {0}")]
    ConfigNotFound(#[source] Error),

    /// The config file is not a JSON object of strings.
    #[error("Error decoding JSON in the config file ({path}): {source}")]
    ConfigParse {
        /// Config file path as given.
        path: String,
        /// Parse error.
        source: Error,
    },

    /// A required key is absent from the config file.
    #[error("Error - {0}")]
    MissingConfigKey(#[source] Error),

    /// The existence check could not get an answer.
    #[error("Error checking whether blob {blob_name} exists: {source}")]
    ExistenceCheck {
        /// Blob that was checked.
        blob_name: String,
        /// Transport, status or connection string error.
        source: Error,
    },

    /// The blob is not in the container.
    #[error("Error - blob named {blob_name} not found in the container '{container_name}'")]
    BlobNotFound {
        /// Blob that was checked.
        blob_name: String,
        /// Container it was looked up in.
        container_name: String,
    },

    /// The SAS could not be signed.
    #[error("Error generating SAS for blob {blob_name}: {source}")]
    Signing {
        /// Blob the SAS was for.
        blob_name: String,
        /// Signing error, usually an account key that is not base64.
        source: Error,
    },
}

impl Failure {
    /// Usage failure naming what clap rejected, e.g. `unexpected argument found: 'b.pdf'`.
    pub fn usage(err: &clap::Error) -> Self {
        match err.get(ContextKind::InvalidArg) {
            Some(arg) => Failure::Usage(format!("{}: '{arg}'", err.kind())),
            None => Failure::Usage(err.kind().to_string()),
        }
    }

    /// Process exit status for this failure. Success exits with `0`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Failure::NoArguments | Failure::Usage(_) => 1,
            Failure::ConfigNotFound(_) => 2,
            Failure::ConfigParse { .. } => 3,
            Failure::MissingConfigKey(_) => 4,
            Failure::ExistenceCheck { .. } => 5,
            Failure::BlobNotFound { .. } => 6,
            Failure::Signing { .. } => 7,
        }
    }
}
