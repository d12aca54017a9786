#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use payfee::{
    add_fee_with_breakdown, calculate_fee, calculate_fee_breakdown, calculate_gross_for_net,
    calculate_net_and_fee, format_currency,
    params::{ACH_FEE_PERCENTAGE, ACH_MAX_FEE, CARD_FEE_PERCENTAGE, CARD_FIXED_FEE},
    BigDecimal, Rail,
};
use serde_json::json;
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, info};

use crate::config::Settings;

/// The CLI application that defines all available commands.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The available commands that can be executed by the CLI.
#[derive(Subcommand)]
enum Commands {
    /// Show the fee charged on an amount.
    Fee(AmountArgs),
    /// Show the net received on an amount after the fee, and the fee.
    Net(AmountArgs),
    /// Show the gross to charge so that a desired net is received.
    Gross(AmountArgs),
    /// Show the total to charge when the fee is passed on to the payer.
    Add(AmountArgs),
    /// Show the fee split into percentage and fixed portions.
    Breakdown(AmountArgs),
    /// Show the fee parameters and amount limits of every rail.
    Limits,
}

/// The arguments shared by every calculation command.
#[derive(Debug, Clone, Args)]
struct AmountArgs {
    /// The amount in dollars, e.g. `100.00`.
    #[arg(allow_hyphen_values = true)]
    amount: BigDecimal,
    /// The payment rail: `card` or `ach`.
    #[arg(long, default_value = "card")]
    rail: Rail,
}

/// A single labelled value in the output table.
#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl Row {
    fn money(name: &'static str, value: &BigDecimal) -> Self {
        Self { name, value: format_currency(value) }
    }
}

/// The main entry point for the CLI.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new()?;

    // Initialize logging.
    payfee_logging::init(settings.log_format);

    let (rows, value) = match cli.command {
        Commands::Fee(args) => {
            info!(rail = %args.rail, amount = %args.amount, "Calculating fee");
            let fee = calculate_fee(&args.amount, args.rail)?;
            (
                vec![Row::money("Amount", &args.amount), Row::money("Fee", &fee)],
                json!({ "rail": args.rail, "amount": args.amount, "fee": fee }),
            )
        }
        Commands::Net(args) => {
            info!(rail = %args.rail, amount = %args.amount, "Calculating net after fee");
            let result = calculate_net_and_fee(&args.amount, args.rail)?;
            (
                vec![
                    Row::money("Amount", &args.amount),
                    Row::money("Fee", &result.fee),
                    Row::money("Net", &result.net),
                ],
                json!({ "rail": args.rail, "amount": args.amount, "result": result }),
            )
        }
        Commands::Gross(args) => {
            info!(rail = %args.rail, net = %args.amount, "Calculating gross for net");
            let gross = calculate_gross_for_net(&args.amount, args.rail)?;
            let received = calculate_net_and_fee(&gross, args.rail)?;
            if received.net != args.amount {
                debug!(
                    desired = %args.amount,
                    received = %received.net,
                    "Gross does not reconcile exactly with the desired net"
                );
            }
            (
                vec![
                    Row::money("Desired net", &args.amount),
                    Row::money("Gross", &gross),
                    Row::money("Fee", &received.fee),
                    Row::money("Net received", &received.net),
                ],
                json!({
                    "rail": args.rail,
                    "desired_net": args.amount,
                    "gross": gross,
                    "result": received,
                }),
            )
        }
        Commands::Add(args) => {
            info!(rail = %args.rail, amount = %args.amount, "Adding fee");
            let charge = add_fee_with_breakdown(&args.amount, args.rail)?;
            (
                vec![
                    Row::money("Base amount", &args.amount),
                    Row::money("Fee", &charge.fee),
                    Row::money("Total", &charge.total),
                ],
                json!({ "rail": args.rail, "amount": args.amount, "result": charge }),
            )
        }
        Commands::Breakdown(args) => {
            info!(rail = %args.rail, amount = %args.amount, "Calculating fee breakdown");
            let breakdown = calculate_fee_breakdown(&args.amount, args.rail)?;
            (
                vec![
                    Row::money("Amount", &args.amount),
                    Row::money("Percentage portion", &breakdown.percentage_portion),
                    Row::money("Fixed portion", &breakdown.fixed_portion),
                    Row::money("Total fee", &breakdown.total),
                ],
                json!({ "rail": args.rail, "amount": args.amount, "result": breakdown }),
            )
        }
        Commands::Limits => limits(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        let mut table = Table::new(rows);
        table.with(Style::modern());
        println!("{table}");
    }

    Ok(())
}

/// Builds the output for the `limits` command.
fn limits() -> (Vec<Row>, serde_json::Value) {
    let card = Rail::Card.bounds();
    let ach = Rail::Ach.bounds();

    let rows = vec![
        Row { name: "Card percentage", value: percentage(&CARD_FEE_PERCENTAGE) },
        Row::money("Card fixed fee", &CARD_FIXED_FEE),
        Row::money("Card minimum", card.min),
        Row::money("Card maximum", card.max),
        Row { name: "ACH percentage", value: percentage(&ACH_FEE_PERCENTAGE) },
        Row::money("ACH fee cap", &ACH_MAX_FEE),
        Row::money("ACH minimum", ach.min),
        Row::money("ACH maximum", ach.max),
    ];
    let value = json!({
        "card": {
            "fee_percentage": *CARD_FEE_PERCENTAGE,
            "fixed_fee": *CARD_FIXED_FEE,
            "min_amount": card.min,
            "max_amount": card.max,
        },
        "ach": {
            "fee_percentage": *ACH_FEE_PERCENTAGE,
            "max_fee": *ACH_MAX_FEE,
            "min_amount": ach.min,
            "max_amount": ach.max,
        },
    });

    (rows, value)
}

/// Renders a fraction such as `0.029` as `2.9%`.
fn percentage(fraction: &BigDecimal) -> String {
    format!("{}%", (fraction * &BigDecimal::from(100)).normalized())
}
