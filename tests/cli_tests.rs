use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn builder_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("invoice-builder"))
}

fn write_draft(path: &Path, draft: &str) {
    fs::write(path, draft).unwrap();
}

const WIDGET_DRAFT: &str = r#"invoice_number = "INV-42"
issue_date = "2026-01-10"
due_date = "2026-02-09"
tax_rate = 10.0
discount_rate = 5.0

[company]
name = "Acme LLC"
email = "billing@acme.test"

[client]
name = "Client Co"

[[items]]
description = "Widget"
quantity = 3.0
price = 10.0
"#;

#[test]
fn test_help() {
    builder_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Invoice builder with live terminal preview and PDF export",
        ));
}

#[test]
fn test_version() {
    builder_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("invoice-builder"));
}

#[test]
fn test_init_creates_draft() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");

    builder_cmd()
        .args(["-f", draft.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote invoice draft"));

    let content = fs::read_to_string(&draft).unwrap();
    assert!(content.contains("invoice_number = \"001\""));
    assert!(content.contains("[payment_methods]"));
    assert!(content.contains("[[items]]"));
}

#[test]
fn test_init_fails_if_draft_exists() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");

    builder_cmd()
        .args(["-f", draft.to_str().unwrap(), "init"])
        .assert()
        .success();

    builder_cmd()
        .args(["-f", draft.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_preview_without_draft() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("missing.toml");

    builder_cmd()
        .args(["-f", draft.to_str().unwrap(), "preview"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_preview_renders_items_and_totals() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(&draft, WIDGET_DRAFT);

    builder_cmd()
        .args(["-f", draft.to_str().unwrap(), "preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INVOICE #INV-42 (USD)"))
        .stdout(predicate::str::contains("Issued: January 10, 2026"))
        .stdout(predicate::str::contains("From: Acme LLC <billing@acme.test>"))
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("SUBTOTAL"))
        .stdout(predicate::str::contains("$30.00"))
        .stdout(predicate::str::contains("(+) TAX (10%)"))
        .stdout(predicate::str::contains("(-) DISCOUNT (5%)"))
        .stdout(predicate::str::contains("(=) TOTAL"))
        .stdout(predicate::str::contains("$31.50"));
}

#[test]
fn test_totals_query() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(&draft, WIDGET_DRAFT);

    builder_cmd()
        .args(["-f", draft.to_str().unwrap(), "totals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtotal: $30.00"))
        .stdout(predicate::str::contains("Tax:      $3.00"))
        .stdout(predicate::str::contains("Discount: $1.50"))
        .stdout(predicate::str::contains("Total:    $31.50"));
}

#[test]
fn test_set_overrides_a_field() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(&draft, WIDGET_DRAFT);

    builder_cmd()
        .args([
            "-f",
            draft.to_str().unwrap(),
            "totals",
            "--set",
            "tax_rate=20",
            "--set",
            "discount_rate=0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tax:      $6.00"))
        .stdout(predicate::str::contains("Total:    $36.00"));
}

#[test]
fn test_set_currency_changes_symbol() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(&draft, WIDGET_DRAFT);

    builder_cmd()
        .args([
            "-f",
            draft.to_str().unwrap(),
            "totals",
            "--set",
            "currency=EUR",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtotal: €30.00"));
}

#[test]
fn test_set_unknown_field() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(&draft, WIDGET_DRAFT);

    builder_cmd()
        .args([
            "-f",
            draft.to_str().unwrap(),
            "preview",
            "--set",
            "frobnicate=1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field 'frobnicate'"));
}

#[test]
fn test_payment_flag_set_spreads_the_group() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(
        &draft,
        &format!("{WIDGET_DRAFT}\n[payment_methods]\ncash = true\n"),
    );

    builder_cmd()
        .args([
            "-f",
            draft.to_str().unwrap(),
            "preview",
            "--set",
            "payment_methods.upi=true",
            "--set",
            "upi_id=acme@bank",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payment: UPI, Cash"))
        .stdout(predicate::str::contains("UPI:    acme@bank"));
}

#[test]
fn test_item_appends_with_coercion() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(&draft, WIDGET_DRAFT);

    builder_cmd()
        .args([
            "-f",
            draft.to_str().unwrap(),
            "totals",
            "--item",
            "Design work:2:50",
            "--item",
            "Rush fee:abc:100",
        ])
        .assert()
        .success()
        // "abc" coerces to quantity 0, so only the design work counts
        .stdout(predicate::str::contains("Subtotal: $130.00"));
}

#[test]
fn test_item_rejects_malformed_input() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(&draft, WIDGET_DRAFT);

    builder_cmd()
        .args(["-f", draft.to_str().unwrap(), "totals", "--item", "just-a-name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --item format"));
}

#[test]
fn test_removing_the_sole_item_is_a_noop() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(&draft, WIDGET_DRAFT);

    builder_cmd()
        .args([
            "-f",
            draft.to_str().unwrap(),
            "preview",
            "--remove-item",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("$30.00"));
}

#[test]
fn test_remove_one_of_two_items() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(
        &draft,
        &format!("{WIDGET_DRAFT}\n[[items]]\ndescription = \"Gadget\"\nquantity = 1.0\nprice = 5.0\n"),
    );

    builder_cmd()
        .args([
            "-f",
            draft.to_str().unwrap(),
            "totals",
            "--remove-item",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtotal: $30.00"));
}

#[test]
fn test_export_without_draft() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("missing.toml");

    builder_cmd()
        .args(["-f", draft.to_str().unwrap(), "export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_logo_flag_rejects_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(&draft, WIDGET_DRAFT);

    builder_cmd()
        .args([
            "-f",
            draft.to_str().unwrap(),
            "preview",
            "--logo",
            temp_dir.path().join("nope.png").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read logo file"));
}

#[test]
fn test_empty_dates_render_blank() {
    let temp_dir = TempDir::new().unwrap();
    let draft = temp_dir.path().join("invoice.toml");
    write_draft(
        &draft,
        r#"invoice_number = "X"
issue_date = ""
due_date = "not-a-date"

[[items]]
description = "Widget"
quantity = 1.0
price = 1.0
"#,
    );

    builder_cmd()
        .args(["-f", draft.to_str().unwrap(), "preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Issued:").not())
        .stdout(predicate::str::contains("Due:").not());
}
