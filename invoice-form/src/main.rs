use clap::Parser;
use invoice_form::{FormClient, InvoiceForm};
use std::path::PathBuf;
use std::process::ExitCode;

/// One `--item` argument: `Widget=10` or `Bolt=3x2.50`.
#[derive(Debug, Clone, PartialEq)]
enum ItemArg {
    Priced { description: String, amount: String },
    Quantity { name: String, quantity: String, price: String },
}

fn parse_item(raw: &str) -> Result<ItemArg, String> {
    let (label, value) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected LABEL=AMOUNT or LABEL=QTYxPRICE, got {:?}", raw))?;
    let label = label.trim().to_string();
    Ok(match value.split_once(['x', 'X']) {
        Some((quantity, price)) => ItemArg::Quantity {
            name: label,
            quantity: quantity.trim().to_string(),
            price: price.trim().to_string(),
        },
        None => ItemArg::Priced {
            description: label,
            amount: value.trim().to_string(),
        },
    })
}

#[derive(Parser, Debug)]
#[command(name = "invoice-form", version, about = "Fill in an invoice and download it as PDF")]
struct Cli {
    #[arg(long, default_value = "http://localhost:3000", help = "Invoice server base URL")]
    server: String,
    #[arg(long, help = "Customer name for the Bill To block")]
    customer: String,
    #[arg(
        long = "item",
        value_name = "ITEM",
        value_parser = parse_item,
        help = "Line item as LABEL=AMOUNT or LABEL=QTYxPRICE; repeat for more rows"
    )]
    items: Vec<ItemArg>,
    #[arg(long)]
    invoice_number: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD", help = "Invoice date [default: today]")]
    date: Option<String>,
    #[arg(long, default_value = "USD")]
    currency: String,
    #[arg(long, default_value = "en-US")]
    locale: String,
    #[arg(long, help = "Layout preset [default: server default, itemized for QTYxPRICE items]")]
    layout: Option<String>,
    #[arg(long, default_value = ".", help = "Directory the PDF is saved to")]
    out_dir: PathBuf,
}

fn build_form(cli: &Cli) -> InvoiceForm {
    let mut form = InvoiceForm::new();
    form.customer_name = cli.customer.clone();
    form.invoice_number = cli.invoice_number.clone().unwrap_or_default();
    form.date = cli.date.clone().unwrap_or_default();
    form.currency = cli.currency.clone();
    form.locale = cli.locale.clone();

    let mut has_quantities = false;
    for item in &cli.items {
        match item {
            ItemArg::Priced {
                description,
                amount,
            } => {
                form.add_row(Some(description), Some(amount));
            }
            ItemArg::Quantity {
                name,
                quantity,
                price,
            } => {
                has_quantities = true;
                form.add_quantity_row(Some(name), Some(quantity), Some(price));
            }
        }
    }

    form.layout = cli
        .layout
        .clone()
        .or_else(|| has_quantities.then(|| "itemized".to_string()));
    form.recompute_totals();
    form
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let form = build_form(&cli);

    let totals = form.totals();
    println!("Items:    {}", totals.item_count);
    println!("Subtotal: {}", totals.subtotal);
    println!("Tax:      {}", totals.tax);
    println!("Total:    {}", totals.total);

    let client = FormClient::new(&cli.server);
    match client.submit(&form, &cli.out_dir).await {
        Ok(invoice) => {
            println!("Saved {}", invoice.path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_priced_and_quantity_items() {
        assert_eq!(
            parse_item("Widget=10"),
            Ok(ItemArg::Priced {
                description: "Widget".to_string(),
                amount: "10".to_string()
            })
        );
        assert_eq!(
            parse_item("Hex bolt=3x2.50"),
            Ok(ItemArg::Quantity {
                name: "Hex bolt".to_string(),
                quantity: "3".to_string(),
                price: "2.50".to_string()
            })
        );
        assert!(parse_item("Widget").is_err());
    }

    #[test]
    fn label_may_contain_equals_sign() {
        assert_eq!(
            parse_item("a=b=4"),
            Ok(ItemArg::Priced {
                description: "a=b".to_string(),
                amount: "4".to_string()
            })
        );
    }

    #[test]
    fn quantity_items_pick_itemized_layout() {
        let cli = Cli::parse_from([
            "invoice-form",
            "--customer",
            "Acme",
            "--item",
            "Bolt=3x2.50",
            "--item",
            "Nut=10x0.25",
        ]);
        let form = build_form(&cli);
        assert_eq!(form.layout.as_deref(), Some("itemized"));
        assert_eq!(form.totals().subtotal, "$10.00");
        assert_eq!(form.totals().total, "$11.80");
    }

    #[test]
    fn explicit_layout_wins() {
        let cli = Cli::parse_from([
            "invoice-form",
            "--customer",
            "Acme",
            "--item",
            "Widget=10",
            "--layout",
            "compact",
        ]);
        assert_eq!(build_form(&cli).layout.as_deref(), Some("compact"));
    }
}
