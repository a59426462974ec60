#![deny(warnings)]

//! Headless CLI: starts a session, sails an automatic trading route and
//! reports how the firm fared.

use anyhow::{Context, Result};
use modkit::ScriptedEncounters;
use std::path::PathBuf;
use taipan_engine::{
    ActionError, Commodity, EncounterResolver, GameConfig, GameEngine, NoEncounters, Port,
    StartingOption,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    firm: Option<String>,
    start: Option<String>,
    seed: Option<u64>,
    voyages: Option<u32>,
    config: Option<PathBuf>,
    mods: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--firm" => args.firm = it.next(),
            "--start" => args.start = it.next(),
            "--seed" => args.seed = it.next().and_then(|s| s.parse().ok()),
            "--voyages" => args.voyages = it.next().and_then(|s| s.parse().ok()),
            "--config" => args.config = it.next().map(PathBuf::from),
            "--mods" => args.mods = it.next().map(PathBuf::from),
            "--json" => args.json = true,
            _ => {}
        }
    }
    args
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.rng_seed = seed;
    }
    Ok(cfg)
}

fn resolver(args: &Args) -> Result<Box<dyn EncounterResolver>> {
    if let Some(root) = &args.mods {
        let mut mods = modkit::load_all(root)?;
        if !mods.is_empty() {
            let m: ScriptedEncounters = mods.remove(0);
            return Ok(Box::new(m));
        }
        warn!(root = %root.display(), "no encounter mods found");
    }
    Ok(Box::new(NoEncounters))
}

/// Sell everything aboard at the current port.
fn sell_all(engine: &mut GameEngine) {
    for commodity in Commodity::ALL {
        let held = engine.ship().hold[commodity];
        if held > 0 {
            if let Err(e) = engine.sell(commodity, held) {
                warn!(%commodity, "sell failed: {e}");
            }
        }
    }
}

/// Fill the hold with the cheapest commodity on offer.
fn buy_cheapest(engine: &mut GameEngine) -> Result<(), ActionError> {
    let (commodity, price) = engine.price_list()?.cheapest();
    let by_cash = engine.player().cash / price.max(1);
    let amount = by_cash.min(engine.ship().available_space());
    let amount = u32::try_from(amount).unwrap_or(u32::MAX);
    if amount == 0 {
        return Ok(());
    }
    match engine.buy(commodity, amount) {
        // The price may have moved since the list was drawn; retry smaller.
        Err(ActionError::InsufficientCash { .. }) if amount > 1 => {
            engine.buy(commodity, amount - amount / 4).map(|_| ())
        }
        other => other.map(|_| ()),
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    info!(?args, "starting CLI");

    let start: StartingOption = args.start.as_deref().unwrap_or("cash").parse()?;
    let firm = args.firm.clone().unwrap_or_else(|| "Taipan Trading Co.".to_string());
    let cfg = load_config(&args)?;
    let mut engine = GameEngine::new_game(firm, start, cfg)?;
    let mut encounters = resolver(&args)?;

    match engine.handle_li_yuen(encounters.as_mut()) {
        Ok(outcome) => info!(?outcome, "Li Yuen"),
        Err(e) => info!(reason = e.code(), "Li Yuen skipped"),
    }

    let route: Vec<Port> = Port::destinations().collect();
    let voyages = args.voyages.unwrap_or(12);
    for leg in 0..voyages {
        if let Err(e) = buy_cheapest(&mut engine) {
            warn!(reason = e.code(), "purchase skipped: {e}");
        }
        let next = route[(leg as usize + 1) % route.len()];
        engine.travel_to(next)?;
        sell_all(&mut engine);
        if engine.ship().condition_percent() < 50 {
            if let Err(e) = engine.repair_ship() {
                warn!(reason = e.code(), "repair skipped: {e}");
            }
        }
    }

    let state = engine.state();
    let player = &state.player;
    println!(
        "Game OK | firm: {} | date: {} | port: {}",
        player.firm_name, state.date, state.current_port
    );
    println!(
        "KPI | voyages: {} | cash: ${} | bank: ${} | debt: ${} | net worth: ${} | guns: {} | hull: {} ({}%)",
        voyages,
        player.cash,
        player.bank,
        player.debt,
        player.net_worth(),
        player.ship.guns,
        player.ship.condition(),
        player.ship.condition_percent()
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(state)?);
    }

    Ok(())
}
