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

//! Print a read-only SAS URL for an existing Azure Storage blob.
//!
//! The binary is a thin wrapper around [`run`]: parse the command line with
//! [`Cli`], build a [`Context`](blobsas_core::Context) with
//! [`default_context`], then print either the URL or the [`Failure`] and exit
//! with [`Failure::exit_code`].

pub use blobsas_core::*;

mod cli;
pub use cli::Cli;

mod context;
pub use context::default_context;

mod failure;
pub use failure::Failure;

mod run;
pub use run::run;
