//! QR code display and export commands

use anyhow::{Context, Result};
use bexqr_lib::{PaymentQr, SvgRenderer, TextRenderer};
use std::path::Path;

use super::RequestArgs;
use crate::ui;

/// Display a QR code for a payment request in the terminal
#[tracing::instrument(skip(args))]
pub fn show(args: &RequestArgs, verbose: bool) -> Result<()> {
    let qr = args.load()?;
    let uri = qr.uri()?;

    ui::header("Payment Request QR Code");
    describe(&qr, &uri, verbose);

    let rendered = qr
        .render(&TextRenderer::new())
        .context("failed to render QR code")?;
    ui::qr_block(&rendered);

    ui::separator();
    ui::info("Scan this QR code to pay");

    Ok(())
}

/// Write a payment request QR code as an SVG file
#[tracing::instrument(skip(args))]
pub fn svg(args: &RequestArgs, output: &Path, verbose: bool) -> Result<()> {
    let qr = args.load()?;
    let uri = qr.uri()?;

    let rendered = qr.render(&SvgRenderer).context("failed to render QR code")?;
    std::fs::write(output, rendered)
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!("Wrote QR code to {}", output.display());

    ui::header("Payment Request QR Code");
    describe(&qr, &uri, verbose);
    ui::success(&format!("Saved to {}", output.display()));

    Ok(())
}

fn describe(qr: &PaymentQr, uri: &str, verbose: bool) {
    let request = qr.request();

    ui::info("Payment Request:");
    ui::key_value("  Address", &request.address);
    if let Some(amount) = request.amount {
        ui::key_value("  Amount", &amount.to_string());
    }
    if let Some(label) = &request.label {
        ui::key_value("  Label", label);
    }
    if let Some(vendor_field) = &request.vendor_field {
        ui::key_value("  Vendor Field", vendor_field);
    }
    ui::key_value("  URI", uri);

    if verbose {
        let hints = qr.hints();
        ui::key_value("  Size", &format!("{}px", hints.size));
        ui::key_value("  Logo", if hints.show_logo { "yes" } else { "no" });
        ui::key_value("  Error Correction", qr.error_correction().as_str());
    }
}
