//! Batch self-play over a persisted move tree.
//!
//! - `go-sim simulate --tree tree.json` plays games and folds them into the tree
//! - `go-sim inspect --tree tree.json` prints the tree and the best opening move

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use go_rules::storage::{load_tree, save_tree};
use go_rules::{
    Criterion, GameTree, OutcomePolicy, ScoringTechnique, SimulationConfig, Stone, simulate_games,
};

#[derive(Parser)]
#[command(name = "go-sim")]
#[command(author, version, about = "Capture-Go self-play and move-tree statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a batch of games and record them in the move tree
    Simulate(SimulateArgs),
    /// Print the move tree and its best opening move
    Inspect(InspectArgs),
}

#[derive(clap::Args)]
struct SimulateArgs {
    /// Move tree file; created when missing, updated in place otherwise
    #[arg(short, long, env = "GO_SIM_TREE")]
    tree: PathBuf,

    /// JSON file with simulation settings; flags override its values
    #[arg(short, long, env = "GO_SIM_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, env = "GO_SIM_GAMES")]
    games: Option<usize>,

    /// Board side length
    #[arg(short, long, env = "GO_SIM_SIZE")]
    size: Option<u8>,

    /// Ply limit per game
    #[arg(long, env = "GO_SIM_MAX_MOVES")]
    max_moves: Option<usize>,

    /// `dfs` or `flood_fill`
    #[arg(long, env = "GO_SIM_TECHNIQUE")]
    technique: Option<ScoringTechnique>,

    /// `win_loss` or `score_differential`
    #[arg(long, env = "GO_SIM_OUTCOME")]
    outcome: Option<OutcomePolicy>,

    #[arg(long, env = "GO_SIM_SEED")]
    seed: Option<u64>,
}

impl SimulateArgs {
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(games) = self.games {
            config.games = games;
        }
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(max_moves) = self.max_moves {
            config.max_moves = max_moves;
        }
        if let Some(technique) = self.technique {
            config.technique = technique;
        }
        if let Some(outcome) = self.outcome {
            config.outcome = outcome;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate().context("invalid simulation settings")?;
        Ok(config)
    }
}

#[derive(clap::Args)]
struct InspectArgs {
    #[arg(short, long, env = "GO_SIM_TREE")]
    tree: PathBuf,

    /// Deepest level of the outline to print
    #[arg(short, long, default_value_t = 2)]
    depth: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "go_sim=info,go_rules=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate(args) => run_simulate(&args),
        Commands::Inspect(args) => run_inspect(&args),
    }
}

fn open_tree(path: &Path) -> Result<GameTree> {
    if path.exists() {
        load_tree(path).with_context(|| format!("loading move tree {}", path.display()))
    } else {
        info!(path = %path.display(), "starting a new move tree");
        Ok(GameTree::new())
    }
}

fn run_simulate(args: &SimulateArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let mut tree = open_tree(&args.tree)?;

    info!(
        games = config.games,
        size = config.board_size,
        max_moves = config.max_moves,
        technique = %config.technique,
        "simulating"
    );
    let summary = simulate_games(&mut tree, &config).context("simulation failed")?;
    save_tree(&tree, &args.tree)
        .with_context(|| format!("saving move tree {}", args.tree.display()))?;

    println!("games:      {}", summary.games);
    println!(
        "black wins: {} ({:.1}%)",
        summary.black_wins,
        summary.win_rate(Stone::Black) * 100.0
    );
    println!(
        "white wins: {} ({:.1}%)",
        summary.white_wins,
        summary.win_rate(Stone::White) * 100.0
    );
    println!("tree nodes: {}", tree.len());
    Ok(())
}

fn run_inspect(args: &InspectArgs) -> Result<()> {
    if !args.tree.exists() {
        bail!("no move tree at {}", args.tree.display());
    }
    let tree = open_tree(&args.tree)?;

    let mut outline = String::new();
    tree.write_outline(&mut outline, Some(args.depth))?;
    print!("{outline}");

    match tree.best_child(GameTree::ROOT, Criterion::for_player(Stone::Black)) {
        Some(id) => {
            let node = tree.node(id);
            println!("best opening: {} ({:.3})", node.mv, node.value);
        }
        None => println!("best opening: none recorded"),
    }
    Ok(())
}
