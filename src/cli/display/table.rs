//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Component information for list display
#[derive(Debug, Clone)]
pub struct ComponentRow {
    pub name: String,
    pub component_type: String,
    pub source_kind: String,
    pub source_location: String,
    pub ready: u32,
    pub replicas: u32,
    pub active: bool,
}

/// Catalog entry for catalog display
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub name: String,
    pub description: String,
    pub builder_image: String,
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the component list as a formatted table
    pub fn render_components_list(
        &self,
        application: &str,
        project: &str,
        components: &[ComponentRow],
    ) -> String {
        if components.is_empty() {
            return format!(
                "No components found in application '{}' (project '{}')",
                application, project
            );
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("").set_alignment(CellAlignment::Center),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("TYPE").set_alignment(CellAlignment::Left),
                Cell::new("SOURCE").set_alignment(CellAlignment::Left),
                Cell::new("STATE").set_alignment(CellAlignment::Center),
            ]);

        for component in components {
            let icon = StatusIcon::get_readiness_icon(component.ready, component.replicas);
            let state = StatusIcon::get_state_text(component.ready, component.replicas);
            let state_color = self
                .theme
                .get_readiness_color(component.ready, component.replicas);

            let active_marker = if component.active {
                StatusIcon::ACTIVE
            } else {
                ""
            };

            table.add_row(vec![
                Cell::new(active_marker).fg(Color::Cyan),
                Cell::new(&component.name),
                Cell::new(&component.component_type),
                Cell::new(format!(
                    "{} ({})",
                    component.source_location, component.source_kind
                )),
                Cell::new(format!("{} {}", icon, state)).fg(state_color),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "Components in application '{}' (project '{}') {}\n",
            application,
            project,
            format!("[{} components]", components.len())
                .bright_black()
                .to_string()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} active  {} Running  {} Degraded  {} Failed\n",
            StatusIcon::ACTIVE.cyan(),
            StatusIcon::SUCCESS.green(),
            StatusIcon::WARNING.yellow(),
            StatusIcon::ERROR.red()
        ));

        output
    }

    /// Render the catalog of supported component types
    pub fn render_catalog(&self, entries: &[CatalogRow]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("DESCRIPTION").set_alignment(CellAlignment::Left),
                Cell::new("BUILDER IMAGE").set_alignment(CellAlignment::Left),
            ]);

        for entry in entries {
            table.add_row(vec![
                Cell::new(&entry.name).fg(Color::Cyan),
                Cell::new(&entry.description),
                Cell::new(&entry.builder_image),
            ]);
        }

        format!("Supported component types:\n{}", table)
    }

    /// Render one component's details
    pub fn render_component_describe(&self, component: &ComponentRow) -> String {
        let state = StatusIcon::get_state_text(component.ready, component.replicas);
        let state_color = self
            .theme
            .get_readiness_color(component.ready, component.replicas);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.add_row(vec![
            Cell::new("Component Name"),
            Cell::new(&component.name),
        ]);
        table.add_row(vec![
            Cell::new("Type"),
            Cell::new(&component.component_type),
        ]);
        table.add_row(vec![
            Cell::new("Source"),
            Cell::new(format!(
                "{} ({})",
                component.source_location, component.source_kind
            )),
        ]);
        table.add_row(vec![
            Cell::new("State"),
            Cell::new(format!(
                "{} ({}/{} ready)",
                state, component.ready, component.replicas
            ))
            .fg(state_color),
        ]);
        table.add_row(vec![
            Cell::new("Active"),
            Cell::new(if component.active { "yes" } else { "no" }),
        ]);

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ComponentRow {
        ComponentRow {
            name: "frontend".to_string(),
            component_type: "nodejs".to_string(),
            source_kind: "git".to_string(),
            source_location: "https://github.com/openshift/nodejs-ex.git".to_string(),
            ready: 1,
            replicas: 1,
            active: true,
        }
    }

    #[test]
    fn test_render_empty_components() {
        let renderer = TableRenderer::new();
        let output = renderer.render_components_list("app", "default", &[]);
        assert!(output.contains("No components found"));
    }

    #[test]
    fn test_render_single_component() {
        let renderer = TableRenderer::new();
        let output = renderer.render_components_list("app", "default", &[sample_row()]);
        assert!(output.contains("frontend"));
        assert!(output.contains("nodejs"));
        assert!(output.contains("Running"));
    }

    #[test]
    fn test_render_describe() {
        let renderer = TableRenderer::new();
        let output = renderer.render_component_describe(&sample_row());
        assert!(output.contains("Component Name"));
        assert!(output.contains("frontend"));
        assert!(output.contains("yes"));
    }

    #[test]
    fn test_render_catalog() {
        let renderer = TableRenderer::new();
        let rows = vec![CatalogRow {
            name: "nodejs".to_string(),
            description: "Node.js runtime".to_string(),
            builder_image: "registry.access.redhat.com/ubi9/nodejs-20".to_string(),
        }];
        let output = renderer.render_catalog(&rows);
        assert!(output.contains("nodejs"));
        assert!(output.contains("BUILDER IMAGE"));
    }
}
