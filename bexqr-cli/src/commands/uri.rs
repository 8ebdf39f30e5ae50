//! Payment URI commands: encode, parse and check

use anyhow::{Context, Result};
use bexqr_lib::uri::{self, parse_query};
use bexqr_lib::PaymentRequest;

use crate::ui;

/// Build a payment URI from flags and print it
#[tracing::instrument(skip(label, vendor_field))]
pub fn encode(
    address: &str,
    amount: Option<f64>,
    label: Option<String>,
    vendor_field: Option<String>,
) -> Result<()> {
    let mut request = PaymentRequest::new(address);
    request.amount = amount;
    if let Some(label) = label {
        request = request.with_label(label);
    }
    if let Some(vendor_field) = vendor_field {
        request = request.with_vendor_field(vendor_field);
    }

    let uri = uri::encode(&request).context("cannot encode payment request")?;
    tracing::debug!("Encoded URI: {}", uri);

    println!("{}", uri);
    Ok(())
}

/// Parse a scanned payment URI and show its fields
pub fn parse(data: &str, as_json: bool, verbose: bool) -> Result<()> {
    let Some(request) = uri::decode(data) else {
        ui::warning("Not an ark payment URI");
        ui::info("Expected: ark:<address>[?amount=<num>][&label=<text>][&vendorField=<text>]");
        anyhow::bail!("unrecognized URI: {}", data);
    };

    if as_json {
        ui::json(&serde_json::to_value(&request)?);
        return Ok(());
    }

    ui::header("Parse URI");
    ui::key_value("Input", data);
    ui::separator();

    ui::success("Ark Payment URI");
    ui::key_value("Address", &request.address);
    if let Some(amount) = request.amount {
        ui::key_value("Amount", &amount.to_string());
    }
    if let Some(label) = &request.label {
        ui::key_value("Label", label);
    }
    if let Some(vendor_field) = &request.vendor_field {
        ui::key_value("Vendor Field", vendor_field);
    }

    if verbose {
        let suffix = uri::query_suffix(data).unwrap_or_default();
        let mut params: Vec<_> = parse_query(suffix).into_iter().collect();
        params.sort();

        ui::separator();
        ui::info("Raw Query Parameters:");
        for (key, value) in params {
            ui::key_value(&format!("  {}", key), value.as_deref().unwrap_or("<none>"));
        }
    }

    if bexqr_lib::validation::validate_address(&request.address).is_err() {
        ui::separator();
        ui::warning("Address prefix is accepted for reading but cannot be re-encoded");
    }

    Ok(())
}

/// Check whether data is a payment URI; fails when it is not
pub fn check(data: &str) -> Result<()> {
    if uri::matches(data) {
        ui::success("Valid ark payment URI");
        Ok(())
    } else {
        anyhow::bail!("not an ark payment URI: {}", data)
    }
}
