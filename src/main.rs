// src/main.rs
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use remarco::adapter::terminal::{self, SessionCommand, TerminalPrompt};
use remarco::application::controller::{Action, DashboardController, UserPrompt};
use remarco::application::market_data::MarketDataService;
use remarco::config::Config;
use remarco::domain::errors::AppResult;
use remarco::infrastructure::http::HttpClient;
use remarco::infrastructure::market::{ArgentinaDatosSource, DolarApiSource};
use remarco::infrastructure::store::SupabaseProductStore;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting remarco v{}", env!("CARGO_PKG_VERSION"));

    // Wire the feeds and the store. argentinadatos backs up the rate and
    // serves the inflation index.
    let http = HttpClient::new();
    let dolar_api = Arc::new(DolarApiSource::new(http.clone()));
    let argentina_datos = Arc::new(ArgentinaDatosSource::new(http.clone()));
    let market = MarketDataService::new(dolar_api, argentina_datos.clone(), argentina_datos);
    let store = Arc::new(SupabaseProductStore::new(http, &config.store));
    let prompt = Arc::new(TerminalPrompt);

    let mut controller = DashboardController::new(market, store, prompt.clone());

    log::info!("Loading market data and products...");
    controller.refresh_all().await;

    let state = controller.state();
    log::info!("MEP sell rate: {} ({})", state.rate.sell, state.rate.source);
    log::info!(
        "Monthly inflation: {}% ({})",
        state.inflation.monthly_pct,
        state.inflation.source
    );

    println!("{}", terminal::render_dashboard(controller.state()));
    println!("Type `help` for commands.");

    run_session(&mut controller, prompt).await?;

    log::info!("Session closed. Goodbye!");
    Ok(())
}

/// Reads commands until quit or end of input. Every mutation goes
/// through the controller's dispatch.
async fn run_session(
    controller: &mut DashboardController,
    prompt: Arc<TerminalPrompt>,
) -> AppResult<()> {
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let Some(command) = terminal::parse_command(&line) else {
            println!("Unrecognized command. Type `help` for the list.");
            continue;
        };

        match command {
            SessionCommand::Add { name, cost } => {
                controller.dispatch(Action::EditName(name)).await;
                controller.dispatch(Action::EditCost(cost)).await;
                controller.dispatch(Action::Submit).await;
                println!("{}", terminal::render_dashboard(controller.state()));
            }
            SessionCommand::Delete { row } => {
                let id = row
                    .checked_sub(1)
                    .and_then(|i| controller.state().products.get(i))
                    .map(|p| p.id.clone());
                match id {
                    Some(id) => {
                        controller.dispatch(Action::Delete { id }).await;
                        println!("{}", terminal::render_dashboard(controller.state()));
                    }
                    None => println!("No product at row {}.", row),
                }
            }
            SessionCommand::Margin(raw) => match Decimal::from_str(raw.trim()) {
                Ok(pct) => {
                    controller.dispatch(Action::SetMargin(pct)).await;
                    println!("{}", terminal::render_dashboard(controller.state()));
                }
                Err(_) => prompt.alert("Invalid margin"),
            },
            SessionCommand::Refresh => {
                controller.dispatch(Action::Refresh).await;
                println!("{}", terminal::render_dashboard(controller.state()));
            }
            SessionCommand::Show => {
                println!("{}", terminal::render_dashboard(controller.state()))
            }
            SessionCommand::Help => println!("{}", terminal::HELP),
            SessionCommand::Quit => break,
        }
    }
    Ok(())
}
