//! # CLI Commands
//!
//! One subcommand per store operation, plus `upload-config` for checking the
//! image upload setup.
//!
//! ## Command → Store Operation
//! ```text
//! ┌──────────────────────────────────────┬──────────────────────────────────┐
//! │ vitrine-admin list --page 2          │ store.fetch_list(query)          │
//! │ vitrine-admin show <id>              │ store.fetch_detail(id)           │
//! │ vitrine-admin create --field k=v ... │ store.create(form)               │
//! │ vitrine-admin edit <id> --field k=v  │ store.edit(id, form)             │
//! │ vitrine-admin delete <id>            │ store.delete(id)                 │
//! │ vitrine-admin upload-config          │ UploadWidgetConfig (no request)  │
//! └──────────────────────────────────────┴──────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use vitrine_client::ProductStore;
use vitrine_core::{ProductForm, ProductId, ProductQuery};

#[derive(Debug, Parser)]
#[command(name = "vitrine-admin", version, about = "Manage products of a Vitrine shop")]
pub struct Cli {
    /// Path to vitrine.toml (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides the API base URL from the config file and environment.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one page of products.
    List {
        #[arg(long)]
        page: Option<u32>,

        /// Name filter.
        #[arg(long)]
        name: Option<String>,

        /// Extra query parameter, repeatable.
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Fetch one product.
    Show { id: String },

    /// Create a product from `--field key=value` pairs.
    Create {
        #[arg(long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, Value)>,
    },

    /// Update a product from `--field key=value` pairs.
    Edit {
        id: String,

        #[arg(long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, Value)>,
    },

    /// Delete a product.
    Delete { id: String },

    /// Print the upload widget options built from the configuration.
    UploadConfig,
}

impl Command {
    /// Runs a store-backed command. `UploadConfig` is handled by the caller.
    pub async fn run(self, store: &ProductStore) -> Result<(), String> {
        match self {
            Command::List { page, name, params } => {
                let mut query = ProductQuery {
                    page,
                    ..Default::default()
                };
                if let Some(name) = name {
                    query = query.with_name(name);
                }
                for (key, value) in params {
                    query = query.with_param(key, value);
                }
                store.fetch_list(query).await
            }
            Command::Show { id } => store.fetch_detail(ProductId::from(id)).await,
            Command::Create { fields } => store.create(form(fields)).await,
            Command::Edit { id, fields } => store.edit(ProductId::from(id), form(fields)).await,
            Command::Delete { id } => store.delete(ProductId::from(id)).await,
            Command::UploadConfig => Ok(()),
        }
    }
}

fn form(fields: Vec<(String, Value)>) -> ProductForm {
    let mut form = ProductForm::new();
    for (key, value) in fields {
        form.insert(key, value);
    }
    form
}

fn split_pair(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = split_pair(raw)?;
    Ok((key.to_string(), value.to_string()))
}

/// `price=1200` is a number, `stock={"M":3}` an object, `name=Linen` a string.
fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = split_pair(raw)?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_field_values() {
        assert_eq!(parse_field("price=1200").unwrap(), ("price".into(), json!(1200)));
        assert_eq!(parse_field("name=Linen Shirt").unwrap(), ("name".into(), json!("Linen Shirt")));
        assert_eq!(
            parse_field(r#"stock={"M":3}"#).unwrap(),
            ("stock".into(), json!({ "M": 3 }))
        );
        assert_eq!(parse_field("note=").unwrap(), ("note".into(), json!("")));
        assert!(parse_field("=x").is_err());
        assert!(parse_field("novalue").is_err());
    }

    #[test]
    fn test_cli_parses_list() {
        let cli = Cli::try_parse_from([
            "vitrine-admin", "list", "--page", "2", "--param", "category=top",
        ])
        .unwrap();

        match cli.command {
            Command::List { page, name, params } => {
                assert_eq!(page, Some(2));
                assert_eq!(name, None);
                assert_eq!(params, vec![("category".to_string(), "top".to_string())]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_create_requires_fields() {
        assert!(Cli::try_parse_from(["vitrine-admin", "create"]).is_err());
        assert!(Cli::try_parse_from(["vitrine-admin", "create", "--field", "name=A"]).is_ok());
    }
}
