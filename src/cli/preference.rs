//! Preference management commands

use crate::cli::CommandContext;
use crate::domain::config::Preference;
use crate::shared::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(after_help = "\
Examples:
  # Show the current preference values
  kompo preference view

  # Set a default project scope
  kompo preference set project staging

  # Turn off the release check at startup
  kompo preference set update_notification false

  # Reset a value back to its default
  kompo preference unset project")]
pub struct PreferenceCommand {
    #[command(subcommand)]
    pub action: PreferenceAction,
}

#[derive(clap::Subcommand, Debug)]
pub enum PreferenceAction {
    /// Show the current preference values
    View,

    /// Set a preference value
    Set { key: String, value: String },

    /// Reset a preference value to its default
    Unset { key: String },
}

impl PreferenceCommand {
    pub async fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        match &self.action {
            PreferenceAction::View => {
                let preference = Preference::load()?;
                println!(
                    "update_notification: {}",
                    preference.update_notification
                );
                println!(
                    "application: {}",
                    preference.application.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "project: {}",
                    preference.project.as_deref().unwrap_or("(not set)")
                );
            }
            PreferenceAction::Set { key, value } => {
                let mut preference = Preference::load()?;
                preference.set(key, value)?;
                preference.save()?;
                println!("Preference '{}' set to '{}'", key, value);
            }
            PreferenceAction::Unset { key } => {
                let mut preference = Preference::load()?;
                preference.unset(key)?;
                preference.save()?;
                println!("Preference '{}' reset to its default", key);
            }
        }
        Ok(())
    }
}
