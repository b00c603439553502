use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Args, Parser, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use invoice_builder::error::{BuilderError, Result};
use invoice_builder::model::{self, Currency, Invoice, InvoicePatch, ItemField, Party};
use invoice_builder::render::export_pdf;
use invoice_builder::session::Session;
use invoice_builder::totals::format_amount;

#[derive(Parser)]
#[command(name = "invoice-builder")]
#[command(version, about = "Invoice builder with live terminal preview and PDF export", long_about = None)]
struct Cli {
    /// Path to the invoice draft (default: invoice.toml)
    #[arg(short = 'f', long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter invoice draft
    Init,

    /// Render the invoice to the terminal
    Preview {
        #[command(flatten)]
        edits: EditArgs,
    },

    /// Print the derived financial values
    Totals {
        #[command(flatten)]
        edits: EditArgs,
    },

    /// Export the invoice as a PDF
    Export {
        #[command(flatten)]
        edits: EditArgs,

        /// Custom output file path (default: Invoice_<number>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the exported PDF with the system default viewer
        #[arg(long)]
        open: bool,
    },
}

/// One-off edits applied on top of the draft, in order: --set, --item,
/// --remove-item, --logo.
#[derive(Args)]
struct EditArgs {
    /// Field override in 'field=value' form (can be repeated);
    /// also accepts payment_methods.<flag>=true|false
    #[arg(long, value_name = "FIELD=VALUE")]
    set: Vec<String>,

    /// Extra line item in format "description:quantity:price" (can be repeated)
    #[arg(long, value_name = "DESC:QTY:PRICE")]
    item: Vec<String>,

    /// Remove the line item with this id (can be repeated)
    #[arg(long, value_name = "ID")]
    remove_item: Vec<u32>,

    /// Embed an image file as the company logo
    #[arg(long, value_name = "PATH")]
    logo: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let draft = cli.file.unwrap_or_else(|| PathBuf::from("invoice.toml"));

    match cli.command {
        Commands::Init => cmd_init(&draft),
        Commands::Preview { edits } => cmd_preview(&draft, &edits),
        Commands::Totals { edits } => cmd_totals(&draft, &edits),
        Commands::Export {
            edits,
            output,
            open,
        } => cmd_export(&draft, &edits, output, open),
    }
}

/// Write a starter invoice draft
fn cmd_init(draft: &Path) -> Result<()> {
    if draft.exists() {
        return Err(BuilderError::DraftExists(draft.to_path_buf()));
    }

    std::fs::write(draft, model::draft_template(&Invoice::default()))?;

    println!("Wrote invoice draft to: {}", draft.display());
    println!();
    println!("Next steps:");
    println!("  1. Fill in the invoice:   $EDITOR {}", draft.display());
    println!("  2. Check the rendering:   invoice-builder preview");
    println!("  3. Export the PDF:        invoice-builder export");

    Ok(())
}

/// Load the draft and fold the command-line edits into the session.
fn open_session(draft: &Path, edits: &EditArgs) -> Result<Session> {
    let invoice = model::load_draft(draft)?;
    let mut session = Session::with_invoice(invoice);

    for expr in &edits.set {
        let patch = parse_set(session.invoice(), expr)?;
        session.apply(patch);
    }
    for input in &edits.item {
        append_item_input(&mut session, input)?;
    }
    for id in &edits.remove_item {
        // removing the last remaining item is silently skipped
        session.remove_item(*id);
    }
    if let Some(path) = &edits.logo {
        let uri = logo_data_uri(path)?;
        session.apply(InvoicePatch {
            company_logo: Some(Some(uri)),
            ..InvoicePatch::default()
        });
    }

    Ok(session)
}

/// Parse one 'field=value' override into a patch.
fn parse_set(invoice: &Invoice, expr: &str) -> Result<InvoicePatch> {
    let (key, value) = expr
        .split_once('=')
        .ok_or_else(|| BuilderError::InvalidSetExpr(expr.to_string()))?;
    let (key, value) = (key.trim(), value.trim());

    // Payment-method flags live in a nested group that the merge replaces
    // wholesale, so copy the current group and override the one flag.
    if let Some(flag) = key.strip_prefix("payment_methods.") {
        let enabled: bool = value
            .parse()
            .map_err(|_| BuilderError::InvalidSetExpr(expr.to_string()))?;
        let mut methods = invoice.payment_methods;
        match flag {
            "bank_transfer" => methods.bank_transfer = enabled,
            "upi" => methods.upi = enabled,
            "crypto" => methods.crypto = enabled,
            "paypal" => methods.paypal = enabled,
            "cash" => methods.cash = enabled,
            "payment_link" => methods.payment_link = enabled,
            _ => return Err(BuilderError::UnknownField(key.to_string())),
        }
        return Ok(InvoicePatch {
            payment_methods: Some(methods),
            ..InvoicePatch::default()
        });
    }

    let mut patch = InvoicePatch::default();
    match key {
        "invoice_number" => patch.invoice_number = Some(value.to_string()),
        "issue_date" => patch.issue_date = Some(value.to_string()),
        "due_date" => patch.due_date = Some(value.to_string()),
        "payment_terms" => patch.payment_terms = Some(value.to_string()),
        "currency" => patch.currency = Some(Currency::from_code(value)),
        "tax_rate" => patch.tax_rate = Some(model::parse_number(value)),
        "discount_rate" => patch.discount_rate = Some(model::parse_number(value)),
        "notes" => patch.notes = Some(value.to_string()),
        "terms_and_conditions" => patch.terms_and_conditions = Some(value.to_string()),
        "payment_details" => patch.payment_details = Some(value.to_string()),
        "upi_id" => patch.upi_id = Some(value.to_string()),
        "paypal_id" => patch.paypal_id = Some(value.to_string()),
        "crypto_wallet_address" => patch.crypto_wallet_address = Some(value.to_string()),
        "cash_instructions" => patch.cash_instructions = Some(value.to_string()),
        _ => return Err(BuilderError::UnknownField(key.to_string())),
    }

    Ok(patch)
}

/// Append a line item from "description:quantity:price". Quantity and
/// price go through the model's numeric coercion.
fn append_item_input(session: &mut Session, input: &str) -> Result<()> {
    let mut parts = input.rsplitn(3, ':');
    let price = parts.next();
    let quantity = parts.next();
    let description = parts.next();

    let (Some(price), Some(quantity), Some(description)) = (price, quantity, description) else {
        return Err(BuilderError::InvalidItemFormat(input.to_string()));
    };

    let id = session.add_item();
    session.update_item(id, ItemField::Description, description.trim());
    session.update_item(id, ItemField::Quantity, quantity);
    session.update_item(id, ItemField::Price, price);

    Ok(())
}

/// Read an image file into a self-contained data URI.
fn logo_data_uri(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| BuilderError::LogoRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    };

    Ok(format!("data:{mime};base64,{}", STANDARD.encode(&bytes)))
}

// Table row struct for tabled
#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// Splice the financial summary into the bottom of the items table:
/// the first four columns merge into a label cell, AMOUNT keeps its own.
fn add_totals_footer(table: &str, rows: &[(String, String)]) -> String {
    let lines: Vec<&str> = table.lines().collect();
    if lines.len() < 4 {
        return table.to_string();
    }

    // Parse the top border to discover column widths
    let top = lines[0];
    let Some(inner) = top.strip_prefix('╭').and_then(|s| s.strip_suffix('╮')) else {
        return table.to_string();
    };

    let widths: Vec<usize> = inner.split('┬').map(|p| p.chars().count()).collect();
    if widths.len() < 5 {
        return table.to_string();
    }

    let left_width = widths[0] + widths[1] + widths[2] + widths[3] + 3; // +3 for the three ┴ replaced by spaces
    let amount_width = widths[4];

    // Strip the original bottom border and start building
    let mut out = lines[..lines.len() - 1].join("\n");
    out.push('\n');

    // Separator merging the four left columns, keeping AMOUNT
    out.push_str(&format!(
        "├{}┴{}┴{}┴{}┼{}┤\n",
        "─".repeat(widths[0]),
        "─".repeat(widths[1]),
        "─".repeat(widths[2]),
        "─".repeat(widths[3]),
        "─".repeat(amount_width),
    ));

    // Summary rows with separators between them
    for (idx, (label, value)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "│ {:>left$} │ {:>amount$} │\n",
            label,
            value,
            left = left_width - 2,
            amount = amount_width - 2
        ));
        if idx < rows.len() - 1 {
            out.push_str(&format!(
                "├{}┼{}┤\n",
                "─".repeat(left_width),
                "─".repeat(amount_width)
            ));
        }
    }

    // Bottom border
    out.push_str(&format!(
        "╰{}┴{}╯",
        "─".repeat(left_width),
        "─".repeat(amount_width)
    ));

    out
}

/// Rows for the financial footer. Tax and discount only show up once
/// their rates are set, mirroring the exported document.
fn totals_rows(session: &Session) -> Vec<(String, String)> {
    let invoice = session.invoice();
    let totals = session.totals();
    let symbol = invoice.currency.symbol();

    let mut rows = vec![(
        "SUBTOTAL".to_string(),
        format!("{symbol}{}", format_amount(totals.subtotal)),
    )];
    if invoice.tax_rate > 0.0 {
        rows.push((
            format!("(+) TAX ({}%)", invoice.tax_rate),
            format!("{symbol}{}", format_amount(totals.tax_amount)),
        ));
    }
    if invoice.discount_rate > 0.0 {
        rows.push((
            format!("(-) DISCOUNT ({}%)", invoice.discount_rate),
            format!("{symbol}{}", format_amount(totals.discount_amount)),
        ));
    }
    rows.push((
        "(=) TOTAL".to_string(),
        format!("{symbol}{}", format_amount(totals.total)),
    ));
    rows
}

/// Render the invoice to the terminal
fn cmd_preview(draft: &Path, edits: &EditArgs) -> Result<()> {
    let session = open_session(draft, edits)?;
    let snapshot = session.snapshot();
    let invoice = session.invoice();
    let symbol = invoice.currency.symbol();

    println!("INVOICE #{} ({})", snapshot.invoice_number, snapshot.currency);
    match (snapshot.issue_date.as_str(), snapshot.due_date.as_str()) {
        ("", "") => {}
        (issued, "") => println!("Issued: {issued}"),
        ("", due) => println!("Due:    {due}"),
        (issued, due) => println!("Issued: {issued}    Due: {due}"),
    }
    if !snapshot.payment_terms.is_empty() {
        println!("Terms:  {}", snapshot.payment_terms);
    }
    if !snapshot.company.name.is_empty() || !snapshot.client.name.is_empty() {
        println!();
        if !snapshot.company.name.is_empty() {
            println!("From: {}", party_line(&snapshot.company));
        }
        if !snapshot.client.name.is_empty() {
            println!("To:   {}", party_line(&snapshot.client));
        }
    }
    println!();

    let rows: Vec<ItemRow> = snapshot
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| ItemRow {
            index: idx + 1,
            description: item.description.clone(),
            quantity: item.quantity.to_string(),
            price: format!("{symbol}{}", format_amount(item.price)),
            amount: format!("{symbol}{}", format_amount(item.amount)),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    let table = add_totals_footer(&table, &totals_rows(&session));
    println!("{table}");

    if !snapshot.notes.is_empty() {
        println!();
        println!("Notes: {}", snapshot.notes);
    }

    let methods = snapshot.payment_methods.active_labels();
    if !methods.is_empty() {
        println!();
        println!("Payment: {}", methods.join(", "));
        if snapshot.payment_methods.bank_transfer && !snapshot.bank_details.bank_name.is_empty() {
            println!("  Bank:   {} ({})", snapshot.bank_details.bank_name, snapshot.bank_details.account_number);
        }
        if snapshot.payment_methods.upi && !snapshot.upi_id.is_empty() {
            println!("  UPI:    {}", snapshot.upi_id);
        }
        if snapshot.payment_methods.paypal && !snapshot.paypal_id.is_empty() {
            println!("  PayPal: {}", snapshot.paypal_id);
        }
        if snapshot.payment_methods.crypto && !snapshot.crypto_wallet_address.is_empty() {
            println!("  Wallet: {}", snapshot.crypto_wallet_address);
        }
        if snapshot.payment_methods.payment_link && !snapshot.payment_details.is_empty() {
            println!("  Link:   {}", snapshot.payment_details);
        }
    }

    Ok(())
}

fn party_line(party: &Party) -> String {
    if party.email.is_empty() {
        party.name.clone()
    } else {
        format!("{} <{}>", party.name, party.email)
    }
}

/// Print the derived financial values
fn cmd_totals(draft: &Path, edits: &EditArgs) -> Result<()> {
    let session = open_session(draft, edits)?;
    let totals = session.totals();
    let symbol = session.invoice().currency.symbol();

    println!("Subtotal: {symbol}{}", format_amount(totals.subtotal));
    println!("Tax:      {symbol}{}", format_amount(totals.tax_amount));
    println!("Discount: {symbol}{}", format_amount(totals.discount_amount));
    println!("Total:    {symbol}{}", format_amount(totals.total));

    Ok(())
}

/// Export the invoice as a PDF
fn cmd_export(draft: &Path, edits: &EditArgs, output: Option<PathBuf>, open: bool) -> Result<()> {
    let session = open_session(draft, edits)?;
    let snapshot = session.snapshot();

    let pdf_path =
        output.unwrap_or_else(|| PathBuf::from(format!("Invoice_{}.pdf", snapshot.invoice_number)));

    export_pdf(&snapshot, &pdf_path)?;

    let totals = session.totals();
    let symbol = session.invoice().currency.symbol();
    println!("Exported invoice #{}", snapshot.invoice_number);
    println!("  Total: {symbol}{}", format_amount(totals.total));
    println!("  Saved: {}", pdf_path.display());

    if open {
        open_path(&pdf_path)?;
    }

    Ok(())
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .map_err(BuilderError::Io)?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .map_err(BuilderError::Io)?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", path.to_str().unwrap_or("")])
            .spawn()
            .map_err(BuilderError::Io)?;
    }

    Ok(())
}
