use std::path::Path;
use std::process::Command;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{BuilderError, Result};
use crate::render::Snapshot;

/// Embedded Typst template for the invoice document.
/// Uses placeholders that get replaced with the actual data file names.
const INVOICE_TEMPLATE: &str = r##"// Invoice Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
)

#set text(font: "Helvetica", size: 10pt)

#let fmt-int(digits) = {
  let len = digits.len()
  let out = ""
  for (i, digit) in digits.clusters().enumerate() {
    if i > 0 and calc.rem(len - i, 3) == 0 {
      out += ","
    }
    out += digit
  }
  out
}

#let fmt-currency(amount) = {
  let parts = str(calc.round(amount, digits: 2)).split(".")
  let whole = fmt-int(parts.at(0))
  let frac = if parts.len() > 1 { parts.at(1) } else { "00" }
  let frac2 = if frac.len() == 1 { frac + "0" } else { frac }
  data.currency_symbol + whole + "." + frac2
}

#let multiline(s) = s.split("\n").join(linebreak())

#let detail-block(title, body) = block(
  width: 100%,
  inset: 8pt,
  fill: luma(248),
  stroke: 0.5pt + luma(220),
  radius: 2pt,
)[
  #text(weight: "bold", size: 9pt)[#title]
  #v(0.2em)
  #body
]

// Header: logo and invoice identity on the left, issuing company on the right
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [
    #if data.logo_file != none {
      image(data.logo_file, height: 1.6cm)
      v(0.3em)
    }
    #text(size: 24pt, weight: "bold")[INVOICE]
    #v(0.2em)
    \##data.invoice_number \
    Currency: #data.currency
  ],
  [
    #text(size: 14pt, weight: "bold")[#data.company.name]
    #v(0.3em)
    #multiline(data.company.address) \
    #data.company.email \
    #data.company.phone
    #if data.company.tax_id != "" [
      \ Tax ID: #data.company.tax_id
    ]
  ]
)

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

// Bill To on the left, dates and terms on the right
#grid(
  columns: (1fr, 1fr),
  [
    #text(weight: "bold", size: 11pt)[Bill To:]
    #v(0.3em)
    #text(weight: "bold")[#data.client.name]
    \ #multiline(data.client.address)
    \ #data.client.email
    \ #data.client.phone
    #if data.client.tax_id != "" [
      \ Tax ID: #data.client.tax_id
    ]
  ],
  [
    #align(right)[
      #table(
        columns: (auto, auto),
        stroke: none,
        align: (right, left),
        inset: 2pt,
        [*Issue Date:*], [#data.issue_date],
        [*Due Date:*], [#data.due_date],
        [*Payment Terms:*], [#data.payment_terms],
      )
    ]
  ]
)

#v(1.5em)

// Line items table
#table(
  columns: (auto, 1fr, auto, auto, auto),
  align: (center, left, right, right, right),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else if y > 0 { (bottom: 0.5pt + gray) },
  inset: 8pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },

  // Header
  [*\#*], [*Description*], [*Qty*], [*Price*], [*Amount*],

  // Items
  ..data.items.enumerate().map(((i, item)) => (
    str(i + 1),
    item.description,
    str(item.quantity),
    [#fmt-currency(item.price)],
    [#fmt-currency(item.amount)],
  )).flatten()
)

#v(1em)

// Totals: tax and discount both apply to the pre-discount subtotal
#align(right)[
  #table(
    columns: (auto, auto),
    stroke: none,
    align: (right, right),
    inset: 6pt,

    [Subtotal:], [#fmt-currency(data.subtotal)],

    ..if data.tax_rate > 0 {
      ([Tax (#str(calc.round(data.tax_rate, digits: 2))%):], [#fmt-currency(data.tax_amount)])
    } else {
      ()
    },

    ..if data.discount_rate > 0 {
      ([Discount (#str(calc.round(data.discount_rate, digits: 2))%):], [\u{2212}#fmt-currency(data.discount_amount)])
    } else {
      ()
    },

    table.hline(stroke: 1pt),
    [*Total:*], [*#fmt-currency(data.total)*],
  )
]

#v(1.5em)

#if data.notes != "" [
  #text(weight: "bold")[Notes] \
  #multiline(data.notes)
  #v(1em)
]

// Payment information, one block per active method
#let any-method = (
  data.payment_methods.bank_transfer or data.payment_methods.upi or
  data.payment_methods.crypto or data.payment_methods.paypal or
  data.payment_methods.cash or data.payment_methods.payment_link
)

#if any-method [
  #text(weight: "bold", size: 11pt)[Payment Information]
  #v(0.5em)

  #if data.payment_methods.bank_transfer [
    #detail-block("Bank Transfer")[
      Bank: #data.bank_details.bank_name \
      Account Holder: #data.bank_details.account_holder_name \
      Account Number: #data.bank_details.account_number \
      Account Type: #data.bank_details.account_type \
      IFSC/SWIFT: #data.bank_details.swift_code
    ]
    #v(0.5em)
  ]
  #if data.payment_methods.upi [
    #detail-block("UPI")[UPI ID: #data.upi_id]
    #v(0.5em)
  ]
  #if data.payment_methods.paypal [
    #detail-block("PayPal")[PayPal ID: #data.paypal_id]
    #v(0.5em)
  ]
  #if data.payment_methods.crypto [
    #detail-block("Crypto")[Wallet Address: #data.crypto_wallet_address]
    #v(0.5em)
  ]
  #if data.payment_methods.cash [
    #detail-block("Cash")[#multiline(data.cash_instructions)]
    #v(0.5em)
  ]
  #if data.payment_methods.payment_link [
    #detail-block("Payment Link")[#link(data.payment_details)]
    #v(0.5em)
  ]
]

#if data.terms_and_conditions != "" [
  #v(1em)
  #line(length: 100%, stroke: 0.5pt + gray)
  #v(0.5em)
  #text(size: 9pt, fill: gray)[
    #text(weight: "bold")[Terms & Conditions] \
    #multiline(data.terms_and_conditions)
  ]
]
"##;

/// Split a `data:<mime>;base64,<payload>` URI into an image file
/// extension and the decoded bytes.
fn decode_data_uri(uri: &str) -> Result<(&'static str, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| BuilderError::InvalidLogo("missing 'data:' prefix".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| BuilderError::InvalidLogo("missing ',' separator".to_string()))?;

    if !meta.split(';').any(|part| part == "base64") {
        return Err(BuilderError::InvalidLogo(
            "payload is not base64-encoded".to_string(),
        ));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| BuilderError::InvalidLogo(e.to_string()))?;

    let ext = match meta.split(';').next().unwrap_or("") {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        // the browser-style picker only promises image/*; default to png
        _ => "png",
    };

    Ok((ext, bytes))
}

/// Compile the snapshot into a PDF using the Typst CLI.
pub fn export_pdf(snapshot: &Snapshot, output_path: &Path) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();
    if typst_check.is_err() {
        return Err(BuilderError::TypstNotFound);
    }

    // Create temp directory for template and data
    let temp_dir = std::env::temp_dir().join("invoice-builder");
    std::fs::create_dir_all(&temp_dir)?;

    // The logo travels as a data URI; Typst wants a file. Decode it next
    // to the data and hand the template the file name.
    let logo_file = match &snapshot.company_logo {
        Some(uri) => {
            let (ext, bytes) = decode_data_uri(uri)?;
            let name = format!("logo.{ext}");
            std::fs::write(temp_dir.join(&name), bytes)?;
            Some(name)
        }
        None => None,
    };

    let mut data = serde_json::to_value(snapshot)
        .map_err(|e| BuilderError::PdfGeneration(e.to_string()))?;
    data["logo_file"] = serde_json::json!(logo_file);

    let json_path = temp_dir.join("data.json");
    std::fs::write(&json_path, data.to_string())?;

    // Write template with relative JSON path (data.json is in same directory)
    let template_content = INVOICE_TEMPLATE.replace("DATA_JSON_PATH", "data.json");
    let template_path = temp_dir.join("invoice.typ");
    std::fs::write(&template_path, &template_content)?;

    // Run typst compile with root set to temp directory
    let output = Command::new("typst")
        .args([
            "compile",
            "--root",
            temp_dir.to_str().unwrap_or("."),
            template_path.to_str().unwrap_or(""),
            output_path.to_str().unwrap_or(""),
        ])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BuilderError::PdfGeneration(stderr.to_string()));
    }

    // Clean up temp files
    let _ = std::fs::remove_file(&template_path);
    let _ = std::fs::remove_file(&json_path);
    if let Some(name) = logo_file {
        let _ = std::fs::remove_file(temp_dir.join(name));
    }

    Ok(())
}
