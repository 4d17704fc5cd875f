//! Terminal driver: evolves Blotto strategies and prints each generation's
//! winner.

use blotto_ga::blotto::ScoringMode;
use blotto_ga::ga::{BlottoConfig, Crossover, GeneticAlgorithm, Mutation, Selection};
use blotto_ga::BlottoError;
use clap::{Parser, ValueEnum};
use tracing::Level;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SelectionArg {
    Rank,
    Roulette,
    Tournament,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CrossoverArg {
    SinglePoint,
    Uniform,
    Average,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MutationArg {
    Transfer,
    Neighbor,
}

#[derive(Parser, Debug)]
#[command(about = "Evolve Colonel Blotto strategies with a genetic algorithm")]
struct Args {
    /// Fitness rule: "wins" or "points".
    #[arg(long, default_value_t = ScoringMode::Wins)]
    scoring: ScoringMode,
    #[arg(short, long, default_value_t = 10)]
    generations: u32,
    #[arg(short, long, default_value_t = 1000)]
    population: usize,
    /// Number of castles, worth 1, 2, ..., N points.
    #[arg(short, long, default_value_t = 10)]
    castles: usize,
    #[arg(short, long, default_value_t = 100)]
    soldiers: u32,
    #[arg(long)]
    seed: Option<u64>,
    /// Use the operators of the classic browser puzzle.
    #[arg(long)]
    classic: bool,
    #[arg(long, value_enum)]
    selection: Option<SelectionArg>,
    #[arg(long, default_value_t = 3)]
    tournament_size: usize,
    #[arg(long, value_enum)]
    crossover: Option<CrossoverArg>,
    #[arg(long)]
    crossover_rate: Option<f64>,
    #[arg(long, value_enum)]
    mutation: Option<MutationArg>,
    /// Most soldiers a transfer mutation moves at once.
    #[arg(long, default_value_t = 3)]
    max_transfer: u32,
    #[arg(long)]
    mutation_rate: Option<f64>,
    #[arg(long)]
    elite: Option<usize>,
    /// Evaluate the tournament on a single thread.
    #[arg(long)]
    sequential: bool,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> BlottoConfig {
        let base = if self.classic {
            BlottoConfig::classic()
        } else {
            BlottoConfig::default()
        };
        let castle_points = (1..=self.castles)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .collect();
        let mut config = base
            .with_castle_points(castle_points)
            .with_soldiers(self.soldiers)
            .with_population_size(self.population)
            .with_scoring(self.scoring)
            .with_parallel(!self.sequential);

        if let Some(selection) = self.selection {
            config = config.with_selection(match selection {
                SelectionArg::Rank => Selection::Rank,
                SelectionArg::Roulette => Selection::Roulette,
                SelectionArg::Tournament => Selection::Tournament(self.tournament_size),
            });
        }
        if let Some(crossover) = self.crossover {
            config = config.with_crossover(match crossover {
                CrossoverArg::SinglePoint => Crossover::SinglePoint,
                CrossoverArg::Uniform => Crossover::Uniform,
                CrossoverArg::Average => Crossover::Average,
            });
        }
        if let Some(mutation) = self.mutation {
            config = config.with_mutation(match mutation {
                MutationArg::Transfer => Mutation::Transfer {
                    max_amount: self.max_transfer,
                },
                MutationArg::Neighbor => Mutation::NeighborRebalance,
            });
        }
        if let Some(rate) = self.crossover_rate {
            config = config.with_crossover_rate(rate);
        }
        if let Some(rate) = self.mutation_rate {
            config = config.with_mutation_rate(rate);
        }
        if let Some(elite) = self.elite {
            config = config.with_elite_count(elite);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn main() -> Result<(), BlottoError> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut ga = GeneticAlgorithm::new(args.config())?;
    for generation in 1..=args.generations {
        let result = ga.step()?;
        let (best, score) = result.best();
        println!(
            "Generation {generation} winner: score={score}, strategy={:?}",
            best.soldiers()
        );
    }
    Ok(())
}
