// Copyright 2025 Kompo Contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use colored::Colorize;
use kompo::cli::machine::{self, MachineError};
use kompo::cli::{commands::Commands, CliArgs, CommandContext};
use kompo::infrastructure::constants::{DEFAULT_APPLICATION, DEFAULT_PROJECT};
use kompo::infrastructure::update::spawn_release_check;
use kompo::shared::error::ComponentError;
use kompo::Preference;
use tracing::debug;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = CliArgs::parse();
    let json_output = args.json_output();

    let preference = match Preference::load() {
        Ok(preference) => preference,
        Err(e) => exit_with_error(e, json_output),
    };

    // Fire-and-forget; the result is polled with zero wait before exit
    // and never affects the outcome of the command.
    let release_check = preference
        .update_notification
        .then(spawn_release_check);

    let ctx = CommandContext {
        application: args
            .app
            .clone()
            .or_else(|| preference.application.clone())
            .unwrap_or_else(|| DEFAULT_APPLICATION.to_string()),
        project: args
            .project
            .clone()
            .or_else(|| preference.project.clone())
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
        kubeconfig: args.kubeconfig.clone(),
        context: args.context.clone(),
    };

    let result = match args.command {
        Commands::Create(cmd) => cmd.execute(&ctx).await,
        Commands::Build(cmd) => cmd.execute(&ctx).await,
        Commands::List(cmd) => cmd.execute(&ctx).await,
        Commands::Describe(cmd) => cmd.execute(&ctx).await,
        Commands::Delete(cmd) => cmd.execute(&ctx).await,
        Commands::Catalog(cmd) => cmd.execute(&ctx).await,
        Commands::Preference(cmd) => cmd.execute(&ctx).await,
        Commands::Version(cmd) => cmd.execute(&ctx).await,
    };

    if let Err(e) = result {
        exit_with_error(e, json_output);
    }

    if let Some(mut rx) = release_check {
        match rx.try_recv() {
            Ok(message) => println!("{}", message),
            Err(_) => debug!("No release information available in time, exiting gracefully"),
        }
    }
}

/// Single boundary deciding presentation of a failure (human prose or a
/// structured JSON object) and the process exit code.
fn exit_with_error(error: ComponentError, json_output: bool) -> ! {
    if json_output {
        machine::output_error(&MachineError::new(error.to_string()));
    } else {
        debug!("Error:\n{:?}", error);
        eprintln!("{} {}", "✗".red(), error);
    }

    std::process::exit(1);
}
