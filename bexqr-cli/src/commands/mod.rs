//! CLI command implementations

pub mod qr;
pub mod uri;

use anyhow::{Context, Result};
use bexqr_lib::validation::validate_amount;
use bexqr_lib::PaymentQr;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Payment request input shared by the rendering commands.
///
/// Flags override the matching keys of the request file.
#[derive(clap::Args, Debug, Default)]
pub struct RequestArgs {
    /// JSON file with address, amount, label, vendorField, size and showLogo
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// Recipient address
    #[arg(long)]
    pub address: Option<String>,

    /// Amount to request
    #[arg(long)]
    pub amount: Option<f64>,

    /// Label for the recipient
    #[arg(long)]
    pub label: Option<String>,

    /// Vendor field (memo), at most 64 characters
    #[arg(long)]
    pub vendor_field: Option<String>,

    /// QR size in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Reserve room for a centre logo (requires --size 150 or more)
    #[arg(long)]
    pub show_logo: bool,
}

impl RequestArgs {
    /// Merge the request file and flags into a single JSON object.
    pub fn to_value(&self) -> Result<Value> {
        let mut object = match &self.request {
            Some(path) => read_request_file(path)?,
            None => Map::new(),
        };

        if let Some(address) = &self.address {
            object.insert("address".into(), Value::from(address.as_str()));
        }
        if let Some(amount) = self.amount {
            // serde_json stores NaN and infinities as null, which reads as "no amount"
            validate_amount(amount)?;
            object.insert("amount".into(), Value::from(amount));
        }
        if let Some(label) = &self.label {
            object.insert("label".into(), Value::from(label.as_str()));
        }
        if let Some(vendor_field) = &self.vendor_field {
            object.insert("vendorField".into(), Value::from(vendor_field.as_str()));
        }
        if let Some(size) = self.size {
            object.insert("size".into(), Value::from(size));
        }
        if self.show_logo {
            object.insert("showLogo".into(), Value::Bool(true));
        }

        Ok(Value::Object(object))
    }

    /// Build and validate the payment payload.
    pub fn load(&self) -> Result<PaymentQr> {
        let value = self.to_value()?;
        tracing::debug!("Loading payment request: {}", value);
        PaymentQr::from_value(&value).context("invalid payment request")
    }
}

fn read_request_file(path: &Path) -> Result<Map<String, Value>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request file {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("request file {} is not valid JSON", path.display()))?;

    match value {
        Value::Object(object) => Ok(object),
        _ => anyhow::bail!("request file {} must contain a JSON object", path.display()),
    }
}
