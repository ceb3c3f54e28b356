mod config;

use std::path::PathBuf;

use blackjack_odds::{evaluate, DeckComposition, Evaluation, GameRules, Rank, Situation};
use clap::Parser;

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(
    name = "advise",
    about = "Hit / stand / split odds for a two-card blackjack hand"
)]
struct Args {
    /// The player's two cards (A, 2-10, T, J, Q, K)
    #[arg(num_args = 2, required = true)]
    cards: Vec<Rank>,

    /// Dealer up-card
    #[arg(long, short)]
    dealer: Rank,

    /// Use a preset: single_deck, single_deck_h17, six_deck (wins over --config)
    #[arg(long)]
    preset: Option<String>,

    /// JSON config file with `rules` and an optional custom `deck`
    #[arg(long, env = "BLACKJACK_ODDS_CONFIG")]
    config: Option<PathBuf>,

    /// Number of decks (overrides preset / config)
    #[arg(long)]
    decks: Option<u8>,

    /// Dealer stand threshold (overrides preset / config)
    #[arg(long)]
    stand_on: Option<u8>,

    /// Dealer hits soft 17 (overrides preset / config)
    #[arg(long, action = clap::ArgAction::Set)]
    dealer_hits_soft_17: Option<bool>,

    /// Print the evaluation as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), BoxErr> {
    let (rules, deck) = resolve(args)?;

    log::info!(
        "Decks: {}, dealer stands on {}{}, shoe of {} cards",
        rules.num_decks,
        rules.dealer_stands_on,
        if rules.dealer_hits_soft_17 {
            " (hits soft)"
        } else {
            ""
        },
        deck.total()
    );

    let situation = Situation::new(deck, args.cards.clone(), Some(args.dealer));
    let evaluation = evaluate(&rules, &situation)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    match evaluation {
        Evaluation::Advice(advice) => {
            let p = advice.probabilities;
            println!(
                "Hand: {} {} ({}) vs dealer {}",
                args.cards[0], args.cards[1], advice.player_total, args.dealer
            );
            println!("Hit - Bust:       {:>7.2}%", p.hit_bust * 100.0);
            println!("Hit - Win:        {:>7.2}%", p.hit_win * 100.0);
            println!("Hit - Blackjack:  {:>7.2}%", p.hit_blackjack * 100.0);
            println!("Stand - Win:      {:>7.2}%", p.stand_win * 100.0);
            println!("Stand - Lose:     {:>7.2}%", p.stand_lose * 100.0);
            println!("Split - Win:      {:>7.2}%", p.split_win * 100.0);
            println!("Split - Bust:     {:>7.2}%", p.split_bust * 100.0);
            println!("Recommendation: {}", advice.action);
        }
        Evaluation::NotComputable {
            player_cards,
            dealer_cards,
        } => {
            println!(
                "Not computable: need 2 player cards and 1 dealer card, got {player_cards} and {dealer_cards}"
            );
        }
        Evaluation::InsufficientPopulation(_) => {
            println!("Insufficient population: no unseen cards remain in the configured deck");
        }
    }

    Ok(())
}

/// Rules from preset or config file, then individual flag overrides.
fn resolve(args: &Args) -> Result<(GameRules, DeckComposition), BoxErr> {
    let (mut rules, custom_deck) = if let Some(name) = &args.preset {
        (config::preset(name)?, None)
    } else if let Some(path) = &args.config {
        let config = config::load_config(path)?;
        log::debug!("Loaded config from {}", path.display());
        (config.rules, config.deck)
    } else {
        (GameRules::default(), None)
    };

    if let Some(decks) = args.decks {
        rules.num_decks = decks;
    }
    if let Some(stand_on) = args.stand_on {
        rules.dealer_stands_on = stand_on;
    }
    if let Some(h17) = args.dealer_hits_soft_17 {
        rules.dealer_hits_soft_17 = h17;
    }
    rules.validate()?;

    if rules.num_decks > 6 {
        log::warn!(
            "{}-deck calculation may be slow (memo tables grow with the shoe)",
            rules.num_decks
        );
    }

    let deck = match custom_deck {
        Some(deck) if args.decks.is_none() => deck,
        _ => rules.deck(),
    };
    deck.validate()?;
    Ok((rules, deck))
}
