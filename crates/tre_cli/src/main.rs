//! Admin entry point for workspace services.
//!
//! # Responsibility
//! - Wire configuration, logging and the SQLite store into the core services.
//! - Print results as pretty JSON for scripting.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde_json::Value;
use tre_core::db::open_db;
use tre_core::{
    init_logging, ResourceTemplateRepository, SchemaTemplateValidator, SqliteDocumentStore,
    TemplateParameters, TreConfig, WorkspaceServiceInCreate, WorkspaceServiceOps,
    RESOURCES_CONTAINER, RESOURCE_TEMPLATES_CONTAINER,
};

#[derive(Debug, Parser)]
#[command(name = "tre", version, about = "Inspect and manage TRE workspace services")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List live services of a workspace
    List { workspace_id: String },
    /// Show one service
    Show {
        workspace_id: String,
        service_id: String,
    },
    /// Create a service from a template inside a deployed workspace
    Create {
        workspace_id: String,
        template: String,
        /// Template parameter as `key=value`; JSON values are parsed, anything else is a string
        #[arg(long = "property", value_parser = parse_property)]
        properties: Vec<(String, Value)>,
    },
    /// Enable a service
    Enable {
        workspace_id: String,
        service_id: String,
    },
    /// Disable a service
    Disable {
        workspace_id: String,
        service_id: String,
    },
}

fn parse_property(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("property key is empty in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TreConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.effective_log_level(), log_dir)?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open store at `{}`", config.db_path))?;
    let resources = SqliteDocumentStore::try_new(&conn, RESOURCES_CONTAINER)?;
    let validator = SchemaTemplateValidator::new(ResourceTemplateRepository::new(
        SqliteDocumentStore::try_new(&conn, RESOURCE_TEMPLATES_CONTAINER)?,
    ));
    let ops = WorkspaceServiceOps::new(&resources, validator, config.id.as_str());

    let output = match cli.command {
        Command::List { workspace_id } => {
            serde_json::to_value(ops.list_workspace_services(&workspace_id)?)?
        }
        Command::Show {
            workspace_id,
            service_id,
        } => serde_json::to_value(ops.get_workspace_service(&workspace_id, &service_id)?)?,
        Command::Create {
            workspace_id,
            template,
            properties,
        } => {
            let request = WorkspaceServiceInCreate {
                workspace_service_type: template,
                properties: properties.into_iter().collect::<TemplateParameters>(),
            };
            serde_json::to_value(ops.create_workspace_service(&workspace_id, &request)?)?
        }
        Command::Enable {
            workspace_id,
            service_id,
        } => serde_json::to_value(ops.set_workspace_service_enabled(
            &workspace_id,
            &service_id,
            true,
        )?)?,
        Command::Disable {
            workspace_id,
            service_id,
        } => serde_json::to_value(ops.set_workspace_service_enabled(
            &workspace_id,
            &service_id,
            false,
        )?)?,
    };

    info!("event=cli_command module=cli status=ok");
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_property, Cli};
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_property_reads_json_and_falls_back_to_string() {
        assert_eq!(
            parse_property("enabled=true").unwrap(),
            ("enabled".to_string(), json!(true))
        );
        assert_eq!(
            parse_property("display_name=My desktop").unwrap(),
            ("display_name".to_string(), json!("My desktop"))
        );
        assert!(parse_property("novalue").is_err());
        assert!(parse_property("=x").is_err());
    }
}
