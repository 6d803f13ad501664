mod display;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use superlotto_db::config::LottoConfig;
use superlotto_db::db::SqliteStore;
use superlotto_db::models::DrawRecord;
use superlotto_db::refresh::refresh_history;
use superlotto_db::source::load_history;
use superlotto_db::store::{FileStore, PredictionStore};
use superlotto_engine::constraints::ConstraintOverrides;
use superlotto_engine::features::{OddEvenRatio, ZoneRatio};
use superlotto_engine::frequency::FrequencyAnalyzer;
use superlotto_engine::pipeline::{compound_sets, run_prediction, PredictionRun};
use superlotto_engine::prize::score_batch;
use superlotto_engine::sampler::{seeded_rng, select_random};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StoreKind {
    #[default]
    File,
    Sqlite,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum FeatureKind {
    All,
    Sum,
    Front,
    Back,
    OddEven,
    Zone,
    Span,
}

#[derive(Parser)]
#[command(name = "superlotto", about = "Analyse des fréquences et filtrage de combinaisons Super Lotto")]
struct Cli {
    /// Fichier de configuration JSON
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Fichier d'historique (remplace celui de la configuration)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Paire arrière imposée (ex: 3,7), répétable
    #[arg(long = "back", value_parser = parse_back_pair)]
    backs: Vec<[u8; 2]>,

    /// Ratio impair:pair imposé (ex: 3:2), répétable
    #[arg(long = "odd-even")]
    odd_even: Vec<OddEvenRatio>,

    /// Ratio de zones imposé (ex: 2:2:1), répétable
    #[arg(long = "zone")]
    zones: Vec<ZoneRatio>,

    /// Écart imposé, répétable
    #[arg(long = "span")]
    spans: Vec<u8>,

    /// Nombre de valeurs les plus fréquentes retenues par dimension
    #[arg(long)]
    top_k: Option<usize>,

    /// Destination des prédictions
    #[arg(long, default_value = "file")]
    store: StoreKind,
}

impl FilterArgs {
    fn overrides(&self) -> ConstraintOverrides {
        fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
            if values.is_empty() {
                None
            } else {
                Some(values.to_vec())
            }
        }
        ConstraintOverrides {
            backs: non_empty(&self.backs),
            odd_even: non_empty(&self.odd_even),
            zones: non_empty(&self.zones),
            spans: non_empty(&self.spans),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Afficher les fréquences des caractéristiques de l'historique
    Stats {
        /// Caractéristique à afficher
        #[arg(short, long, default_value = "all")]
        feature: FeatureKind,

        /// Nombre de lignes par table
        #[arg(short, long, default_value = "20")]
        top: usize,
    },

    /// Générer et enregistrer les combinaisons candidates
    Predict {
        #[command(flatten)]
        filters: FilterArgs,

        /// Nombre de combinaisons à afficher
        #[arg(long, default_value = "20")]
        show: usize,
    },

    /// Générer les candidates puis en tirer quelques-unes au hasard
    Select {
        #[command(flatten)]
        filters: FilterArgs,

        /// Nombre de combinaisons à tirer (défaut: configuration)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Comparer le dernier lot enregistré avec le dernier tirage
    Check,

    /// Télécharger le dernier historique
    Refresh,

    /// Afficher la configuration effective
    Config,
}

fn parse_back_pair(s: &str) -> Result<[u8; 2], String> {
    let nums: Vec<u8> = s
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("paire arrière invalide '{}' : {}", s, e))?;
    match nums.as_slice() {
        [a, b] if a != b => Ok([*a, *b]),
        _ => Err(format!("paire arrière invalide '{}' : deux numéros distincts attendus", s)),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LottoConfig::load(path)?,
        None => LottoConfig::default(),
    };
    if let Some(data) = cli.data {
        config.history_file = data;
    }

    match cli.command {
        Command::Stats { feature, top } => cmd_stats(&config, feature, top),
        Command::Predict { filters, show } => cmd_predict(&config, &filters, show).map(|_| ()),
        Command::Select { filters, count, seed } => cmd_select(&config, &filters, count, seed),
        Command::Check => cmd_check(&config),
        Command::Refresh => cmd_refresh(&config),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn load(config: &LottoConfig) -> Result<Vec<DrawRecord>> {
    let history = load_history(&config.history_file, config)
        .context("Lancez d'abord : superlotto refresh, ou indiquez --data")?;
    if let Some(latest) = history.last() {
        display::display_latest(latest, history.len());
    }
    Ok(history)
}

fn cmd_stats(config: &LottoConfig, feature: FeatureKind, top: usize) -> Result<()> {
    let history = load(config)?;
    let analyzer = FrequencyAnalyzer::new(&history, config.zones);
    let show = |kind: FeatureKind| feature == FeatureKind::All || feature == kind;

    if show(FeatureKind::Sum) {
        display::display_frequency("Somme avant", &analyzer.sum_frequency(), top, |v| v.to_string());
    }
    if show(FeatureKind::Front) {
        display::display_frequency("Grille avant", &analyzer.front_frequency(), top, |v| {
            display::fmt_numbers(v)
        });
    }
    if show(FeatureKind::Back) {
        display::display_frequency("Paire arrière", &analyzer.back_frequency(), top, |v| {
            display::fmt_numbers(v)
        });
    }
    if show(FeatureKind::OddEven) {
        display::display_frequency("Impair:pair", &analyzer.odd_even_frequency(), top, |v| v.to_string());
    }
    if show(FeatureKind::Zone) {
        display::display_frequency("Zones", &analyzer.zone_frequency()?, top, |v| v.to_string());
    }
    if show(FeatureKind::Span) {
        display::display_frequency("Écart", &analyzer.span_frequency(), top, |v| v.to_string());
    }
    Ok(())
}

fn open_store(kind: StoreKind, config: &LottoConfig) -> Result<Box<dyn PredictionStore>> {
    let store: Box<dyn PredictionStore> = match kind {
        StoreKind::File => Box::new(FileStore::new(&config.predict_file)),
        StoreKind::Sqlite => Box::new(
            SqliteStore::open(&config.sqlite_file)
                .with_context(|| format!("Impossible d'ouvrir la base {:?}", config.sqlite_file))?,
        ),
    };
    Ok(store)
}

fn cmd_predict(config: &LottoConfig, filters: &FilterArgs, show: usize) -> Result<PredictionRun> {
    let mut config = config.clone();
    if let Some(k) = filters.top_k {
        if k == 0 {
            bail!("--top-k doit être >= 1");
        }
        config.top_k = k;
    }

    let history = load(&config)?;
    let mut store = open_store(filters.store, &config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.set_message("Énumération des combinaisons...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let timestamp = chrono::Local::now().naive_local();
    let run = run_prediction(&history, &filters.overrides(), &config, store.as_mut(), timestamp);
    spinner.finish_and_clear();
    let run = run?;

    display::display_constraints(&run.constraints);
    display::display_report(&run.report);
    display::display_candidates(&run.batch.candidates, show);
    if !run.batch.candidates.is_empty() {
        let (front, back) = compound_sets(&run.batch.candidates);
        display::display_compound(&front, &back);
    }
    if run.persisted {
        println!("Lot enregistré dans {}", store.name());
    } else {
        println!("⚠ Lot non enregistré (voir le journal)");
    }
    Ok(run)
}

fn cmd_select(config: &LottoConfig, filters: &FilterArgs, count: Option<usize>, seed: Option<u64>) -> Result<()> {
    let run = cmd_predict(config, filters, 0)?;
    let count = count.unwrap_or(config.sample_count);
    let mut rng = seeded_rng(seed);
    let selection = select_random(&run.batch.candidates, count, &mut rng)?;
    display::display_selection(&selection);
    Ok(())
}

fn cmd_check(config: &LottoConfig) -> Result<()> {
    let history = load(config)?;
    let Some(latest) = history.last() else {
        bail!("Historique vide");
    };

    let store = FileStore::new(&config.predict_file);
    let batches = store
        .read_batches()
        .with_context(|| format!("Aucune prédiction lisible dans {:?}", config.predict_file))?;
    let Some(batch) = batches.last() else {
        bail!("Aucun lot dans {:?}. Lancez d'abord : superlotto predict", config.predict_file);
    };

    println!("Dernier lot : {} ({} combinaisons)", batch.timestamp_line(), batch.candidates.len());
    let score = score_batch(&config.prizes, &batch.candidates, latest);
    display::display_score(&score, latest);
    Ok(())
}

fn cmd_refresh(config: &LottoConfig) -> Result<()> {
    let summary = refresh_history(&config.download_url, &config.history_file)?;
    println!(
        "Historique mis à jour ({} octets) dans {:?}. Dernière période : {}, vérifiez qu'elle est correcte.",
        summary.bytes, config.history_file, summary.latest_period
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_back_pair() {
        assert_eq!(parse_back_pair("3,7").unwrap(), [3, 7]);
        assert_eq!(parse_back_pair(" 11 , 2 ").unwrap(), [11, 2]);
        assert!(parse_back_pair("3").is_err());
        assert!(parse_back_pair("3,3").is_err());
        assert!(parse_back_pair("3,x").is_err());
    }

    #[test]
    fn test_filter_args_overrides() {
        let cli = Cli::parse_from([
            "superlotto", "predict", "--back", "3,7", "--back", "1,2", "--odd-even", "3:2", "--span", "28",
        ]);
        let Command::Predict { filters, show } = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(show, 20);
        let overrides = filters.overrides();
        assert_eq!(overrides.backs, Some(vec![[3, 7], [1, 2]]));
        assert_eq!(overrides.odd_even, Some(vec![OddEvenRatio::new(3, 2)]));
        assert_eq!(overrides.zones, None);
        assert_eq!(overrides.spans, Some(vec![28]));
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
