//! Component management commands

use crate::cli::display::table::{CatalogRow, ComponentRow};
use crate::cli::display::TableRenderer;
use crate::domain::component::{CreateRequest, Provisioner};
use crate::infrastructure::cluster::{ClusterGateway, ComponentInfo, KubeClusterGateway};
use crate::shared::error::{ComponentError, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Write;

/// Resolved invocation scope, built once in main from the global flags
/// and the preference file.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub application: String,
    pub project: String,
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
}

impl CommandContext {
    async fn connect(&self) -> Result<KubeClusterGateway> {
        if self.kubeconfig.is_some() || self.context.is_some() {
            KubeClusterGateway::new_with_config(
                self.project.clone(),
                self.kubeconfig.clone(),
                self.context.clone(),
            )
            .await
        } else {
            KubeClusterGateway::new(self.project.clone()).await
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(after_help = "\
Examples:
  # Create a Node.js component with the source in the current directory
  kompo create nodejs

  # Create a Node.js component named 'frontend' with the source in './frontend'
  kompo create nodejs frontend --local ./frontend

  # Create a component built from a remote git repository
  kompo create nodejs --git https://github.com/openshift/nodejs-ex.git

  # Create a WildFly component from a war file
  kompo create wildfly backend --binary ./downloads/sample.war")]
pub struct CreateCommand {
    /// Component type (see 'kompo catalog')
    pub component_type: String,

    /// Component name; defaults to the component type
    pub component_name: Option<String>,

    /// Use a binary artifact as the component source
    #[arg(long, value_name = "PATH")]
    pub binary: Option<String>,

    /// Use a git repository as the component source
    #[arg(long, value_name = "URL")]
    pub git: Option<String>,

    /// Use a local directory as the component source
    #[arg(long, value_name = "PATH")]
    pub local: Option<String>,
}

#[derive(Parser, Debug)]
pub struct BuildCommand {
    /// Component name; defaults to the active component
    pub component_name: Option<String>,

    /// Do not wait for the build to complete
    #[arg(long)]
    pub no_wait: bool,

    /// Suppress build progress output
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct ListCommand {}

#[derive(Parser, Debug)]
pub struct DescribeCommand {
    /// Component name; defaults to the active component
    pub component_name: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DeleteCommand {
    /// Component name
    pub component_name: String,

    /// Delete without confirmation
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct CatalogCommand {}

#[derive(Parser, Debug)]
pub struct VersionCommand {}

impl CreateCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateway = ctx.connect().await?;

        let request = CreateRequest {
            component_type: self.component_type.clone(),
            component_name: self.component_name.clone(),
            git: self.git.clone(),
            local: self.local.clone(),
            binary: self.binary.clone(),
            application: ctx.application.clone(),
            project: ctx.project.clone(),
        };

        let provisioner = Provisioner::new(&gateway);
        provisioner.provision(&request).await?;
        Ok(())
    }
}

impl BuildCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateway = ctx.connect().await?;
        let name = resolve_component_name(&gateway, ctx, self.component_name.as_deref()).await?;

        gateway
            .build(&name, &ctx.application, !self.no_wait, !self.quiet)
            .await?;
        Ok(())
    }
}

impl ListCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateway = ctx.connect().await?;
        let components = gateway
            .list_components(&ctx.application, &ctx.project)
            .await?;

        let rows: Vec<ComponentRow> = components.iter().map(to_row).collect();
        let renderer = TableRenderer::new();
        println!(
            "{}",
            renderer.render_components_list(&ctx.application, &ctx.project, &rows)
        );
        Ok(())
    }
}

impl DescribeCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateway = ctx.connect().await?;
        let name = resolve_component_name(&gateway, ctx, self.component_name.as_deref()).await?;

        let component = gateway
            .get_component(&name, &ctx.application, &ctx.project)
            .await?;

        let renderer = TableRenderer::new();
        println!("{}", renderer.render_component_describe(&to_row(&component)));
        Ok(())
    }
}

impl DeleteCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.force && !confirm_deletion(&self.component_name)? {
            println!("Aborting deletion of component: {}", self.component_name);
            return Ok(());
        }

        let gateway = ctx.connect().await?;
        gateway
            .delete_component(&self.component_name, &ctx.application, &ctx.project)
            .await?;

        println!(
            "Component {} from application {} has been deleted",
            self.component_name.green(),
            ctx.application
        );
        Ok(())
    }
}

impl CatalogCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let gateway = ctx.connect().await?;

        let rows: Vec<CatalogRow> = gateway
            .catalog()
            .iter()
            .map(|entry| CatalogRow {
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                builder_image: entry.builder_image.to_string(),
            })
            .collect();

        let renderer = TableRenderer::new();
        println!("{}", renderer.render_catalog(&rows));
        Ok(())
    }
}

impl VersionCommand {
    pub async fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("kompo v{}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}

async fn resolve_component_name(
    gateway: &KubeClusterGateway,
    ctx: &CommandContext,
    explicit: Option<&str>,
) -> Result<String> {
    if let Some(name) = explicit {
        return Ok(name.to_string());
    }

    gateway
        .current_component(&ctx.application, &ctx.project)
        .await?
        .ok_or_else(|| {
            ComponentError::config(format!(
                "No component is set as active in application '{}'. \
                 Specify a component name or create one first",
                ctx.application
            ))
        })
}

fn to_row(component: &ComponentInfo) -> ComponentRow {
    ComponentRow {
        name: component.descriptor.name.clone(),
        component_type: component.descriptor.component_type.clone(),
        source_kind: component.descriptor.source.kind.as_str().to_string(),
        source_location: component.descriptor.source.location.clone(),
        ready: component.ready_replicas,
        replicas: component.replicas,
        active: component.active,
    }
}

fn confirm_deletion(name: &str) -> Result<bool> {
    print!(
        "Are you sure you want to delete the component '{}'? [y/N]: ",
        name
    );
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
