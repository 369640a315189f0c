use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpGateway, OrderComposer, OrderGateway, StaticCredential};
use shared::domain::{CustomerId, ProductId};

mod settings;

#[derive(Parser, Debug)]
#[command(name = "console", about = "Back-office console for the snack distribution backend")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List product snapshots with unit price and available stock.
    Products,
    /// List known customers.
    Customers,
    /// Compose an order from line flags and submit it.
    Order {
        /// Customer id the order is billed to.
        #[arg(long)]
        client: i64,
        /// Order line as PRODUCT_ID:QTY; repeatable.
        #[arg(long = "line", value_name = "PRODUCT_ID:QTY")]
        lines: Vec<String>,
    },
}

fn parse_line(raw: &str) -> Result<(ProductId, u32)> {
    let (product, quantity) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("ligne invalide '{raw}', attendu PRODUCT_ID:QTY"))?;
    let product: i64 = product
        .trim()
        .parse()
        .with_context(|| format!("identifiant produit invalide dans '{raw}'"))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .with_context(|| format!("quantité invalide dans '{raw}'"))?;
    Ok((ProductId(product), quantity))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = settings::load_settings(args.server_url, args.token);

    let credentials = match settings.token {
        Some(token) => StaticCredential::new(token),
        None => StaticCredential::anonymous(),
    };
    let gateway = HttpGateway::new(settings.server_url, Arc::new(credentials));

    match args.command {
        Command::Products => {
            let products = gateway.fetch_products().await?;
            for product in products {
                println!(
                    "{:>5}  {:<32} prix={:<8} stock={}",
                    product.id.0, product.name, product.unit_price, product.available_stock
                );
            }
        }
        Command::Customers => {
            let customers = gateway.fetch_customers().await?;
            for customer in customers {
                println!("{:>5}  {}", customer.id.0, customer.name);
            }
        }
        Command::Order { client, lines } => {
            if lines.is_empty() {
                return Err(anyhow!("au moins une ligne --line est requise"));
            }
            let products = gateway.fetch_products().await?;
            let mut composer = OrderComposer::new(products);
            composer.set_customer(CustomerId(client));

            for raw in &lines {
                let (product, quantity) = parse_line(raw)?;
                let index = composer.add_line_item()?;
                composer.set_line_item_product(index, product)?;
                composer.set_line_item_quantity(index, quantity)?;
            }

            println!("total commande: {}", composer.grand_total());
            let record = composer.submit(&gateway).await?;
            println!(
                "commande {} enregistrée (statut {}, {} lignes)",
                record.id.0,
                record.statut,
                record.details.len()
            );
        }
    }

    Ok(())
}
