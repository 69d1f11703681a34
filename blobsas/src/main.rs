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

use std::process;

use blobsas::{default_context, run, time, Cli, Failure};
use blobsas_azure_storage::ConfigCredentialProvider;
use clap::error::ErrorKind;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => exit_with(Failure::usage(&e)),
    };

    let ctx = default_context();
    let result = run(
        &ctx,
        cli.blob_name.as_deref(),
        &cli.config,
        time::now(),
        ConfigCredentialProvider::new,
    )
    .await;
    match result {
        Ok(url) => println!("{url}"),
        Err(failure) => exit_with(failure),
    }
}

fn exit_with(failure: Failure) -> ! {
    println!("{failure}");
    process::exit(failure.exit_code())
}
