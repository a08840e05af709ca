// src/adapter/terminal.rs
// Stdin/stdout surface: command parsing, prompts, dashboard rendering

use std::io::{self, Write};

use chrono::Local;
use rust_decimal::{Decimal, RoundingStrategy};
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::application::controller::UserPrompt;
use crate::application::state::DashboardState;
use crate::domain::models::QuoteSource;
use crate::domain::pricing::{margin_multiplier, suggested_price};

pub const HELP: &str = "\
Commands:
  add <name> <cost>   record a product (cost in USD)
  del <row>           delete the product at that row (asks first)
  margin <pct>        set the global margin percentage
  refresh             re-fetch the rate, inflation and products
  help                show this help
  quit                leave the session
An empty line re-renders the dashboard.";

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Add { name: String, cost: String },
    Delete { row: usize },
    Margin(String),
    Refresh,
    Show,
    Help,
    Quit,
}

/// Parses a session line; `None` means unrecognized input. The margin
/// argument stays raw text so the caller owns the invalid-number alert.
pub fn parse_command(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Some(SessionCommand::Show);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "add" => {
            // the last token is the cost, everything before it the name
            let (name, cost) = rest.rsplit_once(char::is_whitespace)?;
            Some(SessionCommand::Add {
                name: name.trim().to_string(),
                cost: cost.to_string(),
            })
        }
        "del" | "delete" => rest.parse().ok().map(|row| SessionCommand::Delete { row }),
        "margin" => Some(SessionCommand::Margin(rest.to_string())),
        "refresh" => Some(SessionCommand::Refresh),
        "help" => Some(SessionCommand::Help),
        "quit" | "exit" => Some(SessionCommand::Quit),
        _ => None,
    }
}

/// Renders the indicator header, the product table and the footer into
/// one printable block. Prices are recomputed from the current state on
/// every call.
pub fn render_dashboard(state: &DashboardState) -> String {
    let multiplier = margin_multiplier(state.margin_pct);
    let mut out = String::new();

    out.push_str("Remarco - suggested prices from the MEP dollar plus margin\n\n");
    out.push_str(&format!(
        "  MEP (sell):        {} ARS{}\n",
        format_ars(state.rate.sell),
        provenance_tag(state.rate.source),
    ));
    out.push_str(&format!(
        "  Inflation (month): {}{}% INDEC{}\n",
        inflation_sign(state.inflation.monthly_pct),
        state.inflation.monthly_pct,
        provenance_tag(state.inflation.source),
    ));
    out.push_str(&format!("  Global margin:     {}%\n\n", state.margin_pct));

    if state.products.is_empty() {
        out.push_str("No products recorded yet.\n");
    } else {
        let mut table = Table::default().with_cols(vec![
            Col::new(Styles::default().with(MinWidth(3)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(20))),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(16)).with(HAlign::Right)),
        ]);
        table.push_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "#".into(),
                "Product".into(),
                "Cost (USD)".into(),
                "Suggested (ARS)".into(),
            ],
        ));
        for (i, product) in state.products.iter().enumerate() {
            let price = suggested_price(product.cost_base, multiplier, state.rate.sell);
            table.push_row(Row::new(
                Styles::default(),
                vec![
                    (i + 1).to_string().into(),
                    product.name.clone().into(),
                    format_usd(product.cost_base).into(),
                    format_ars(price).into(),
                ],
            ));
        }
        out.push_str(&format!("{}\n", Console::default().render(&table)));
    }

    out.push_str(&format!(
        "\nPricing: (cost x MEP) + margin % | updated {}\n",
        Local::now().format("%d/%m/%Y"),
    ));
    out
}

fn provenance_tag(source: QuoteSource) -> &'static str {
    match source {
        QuoteSource::Primary => "",
        QuoteSource::Secondary => " [backup feed]",
        QuoteSource::Fallback => " [fallback]",
    }
}

fn inflation_sign(pct: Decimal) -> &'static str {
    if pct.is_sign_negative() {
        ""
    } else {
        "+"
    }
}

/// Whole ARS, rounded half away from zero, thousands grouped with dots
/// in the es-AR manner.
fn format_ars(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(".");
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// USD costs keep two decimals.
fn format_usd(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Blocking prompts on the controlling terminal. Confirmation defaults
/// to "no" on EOF or a read error.
pub struct TerminalPrompt;

impl UserPrompt for TerminalPrompt {
    fn alert(&self, message: &str) {
        println!("! {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::domain::models::{InflationReading, Product, RateQuote};

    #[test]
    fn parses_add_with_a_multi_word_name() {
        assert_eq!(
            parse_command("add Mechanical keyboard 104.5"),
            Some(SessionCommand::Add {
                name: "Mechanical keyboard".to_string(),
                cost: "104.5".to_string(),
            })
        );
    }

    #[test]
    fn add_needs_both_a_name_and_a_cost() {
        assert_eq!(parse_command("add 104.5"), None);
        assert_eq!(parse_command("add"), None);
    }

    #[test]
    fn parses_delete_by_row() {
        assert_eq!(
            parse_command("del 2"),
            Some(SessionCommand::Delete { row: 2 })
        );
        assert_eq!(
            parse_command("delete 10"),
            Some(SessionCommand::Delete { row: 10 })
        );
        assert_eq!(parse_command("del two"), None);
    }

    #[test]
    fn margin_keeps_its_raw_argument() {
        assert_eq!(
            parse_command("margin 35.5"),
            Some(SessionCommand::Margin("35.5".to_string()))
        );
        assert_eq!(
            parse_command("margin nonsense"),
            Some(SessionCommand::Margin("nonsense".to_string()))
        );
    }

    #[test]
    fn bare_words_and_blanks() {
        assert_eq!(parse_command("refresh"), Some(SessionCommand::Refresh));
        assert_eq!(parse_command("help"), Some(SessionCommand::Help));
        assert_eq!(parse_command("quit"), Some(SessionCommand::Quit));
        assert_eq!(parse_command("exit"), Some(SessionCommand::Quit));
        assert_eq!(parse_command("   "), Some(SessionCommand::Show));
        assert_eq!(parse_command("frobnicate"), None);
    }

    #[test]
    fn ars_amounts_round_to_whole_units_with_grouping() {
        assert_eq!(format_ars(dec!(162500)), "162.500");
        assert_eq!(format_ars(dec!(1234.5)), "1.235");
        assert_eq!(format_ars(dec!(999.4)), "999");
        assert_eq!(format_ars(dec!(1000000)), "1.000.000");
        assert_eq!(format_ars(dec!(0)), "0");
    }

    #[test]
    fn usd_costs_keep_two_decimals() {
        assert_eq!(format_usd(dec!(12.5)), "12.50");
        assert_eq!(format_usd(dec!(100)), "100.00");
    }

    fn state_with(products: Vec<Product>) -> DashboardState {
        DashboardState {
            rate: RateQuote {
                sell: dec!(1250),
                source: QuoteSource::Primary,
            },
            inflation: InflationReading {
                monthly_pct: dec!(2.7),
                period: None,
                source: QuoteSource::Primary,
            },
            margin_pct: dec!(30),
            products,
            ..DashboardState::default()
        }
    }

    #[test]
    fn empty_dashboard_shows_the_placeholder() {
        let rendered = render_dashboard(&state_with(Vec::new()));
        assert!(rendered.contains("No products recorded yet."));
        assert!(rendered.contains("MEP (sell):        1.250 ARS"));
        assert!(rendered.contains("+2.7% INDEC"));
        assert!(rendered.contains("Global margin:     30%"));
    }

    #[test]
    fn rows_price_live_from_the_current_rate_and_margin() {
        let rendered = render_dashboard(&state_with(vec![Product {
            id: "a1".to_string(),
            name: "Keyboard".to_string(),
            cost_base: dec!(100),
            currency_ref: "MEP".to_string(),
        }]));
        // 100 * 1250 * 1.30
        assert!(rendered.contains("162.500"));
        assert!(rendered.contains("100.00"));
        assert!(rendered.contains("Keyboard"));
    }

    #[test]
    fn fallback_values_are_tagged() {
        let mut state = state_with(Vec::new());
        state.rate = RateQuote::fallback();
        state.inflation = InflationReading::fallback();
        let rendered = render_dashboard(&state);
        assert!(rendered.contains("1.250 ARS [fallback]"));
        assert!(rendered.contains("+4.2% INDEC [fallback]"));
    }
}
