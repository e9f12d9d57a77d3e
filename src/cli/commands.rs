// CLI command definitions

use super::component::{
    BuildCommand, CatalogCommand, CreateCommand, DeleteCommand, DescribeCommand, ListCommand,
    VersionCommand,
};
use super::preference::PreferenceCommand;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kompo",
    version,
    about = "Component management tool for Kubernetes/OpenShift",
    long_about = "A CLI tool for creating, building, and managing application components on a Kubernetes-compatible cluster"
)]
pub struct CliArgs {
    /// Application scope (defaults to the preference file, then 'app')
    #[arg(long, global = true)]
    pub app: Option<String>,

    /// Project scope, mapped to a Kubernetes namespace
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Output format (available: json)
    #[arg(short = 'o', long = "output", global = true, value_parser = ["json"])]
    pub output: Option<String>,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn json_output(&self) -> bool {
        self.output.as_deref() == Some("json")
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create a new component and deploy it to the cluster
    Create(CreateCommand),

    /// Trigger a build of an existing component
    Build(BuildCommand),

    /// List components in the current application
    List(ListCommand),

    /// Show details of a component
    Describe(DescribeCommand),

    /// Delete a component and its cluster resources
    Delete(DeleteCommand),

    /// List supported component types
    Catalog(CatalogCommand),

    /// View or change tool preferences
    Preference(PreferenceCommand),

    /// Print version information
    Version(VersionCommand),
}
