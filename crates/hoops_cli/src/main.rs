//! hoops - run simulated basketball games from the command line
//!
//! ```text
//! hoops simulate --seed 7 --quarter-seconds 180
//! hoops simulate --home harbor.json --away summit.json --json
//! hoops batch --games 200 --threads 8
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use hoops_core::engine::EventKind;
use hoops_core::models::{DefenseTactic, OffenseTactic};
use hoops_core::{EngineConfig, GameResult, Simulation, TeamRoster, TeamTactics};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "Deterministic basketball possession simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game and print the box score
    Simulate {
        #[arg(long, default_value_t = 1)]
        seed: u64,

        #[command(flatten)]
        setup: GameSetup,

        /// Print the full result as JSON
        #[arg(long, default_value = "false")]
        json: bool,

        /// Print every event, not just the last few
        #[arg(long, default_value = "false")]
        play_by_play: bool,
    },

    /// Play many seeds in parallel and print averages
    Batch {
        #[arg(long, default_value_t = 100)]
        games: u64,

        /// First seed; games use consecutive seeds
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Worker threads (0 = rayon default)
        #[arg(long, default_value_t = 0)]
        threads: usize,

        #[command(flatten)]
        setup: GameSetup,
    },
}

#[derive(clap::Args, Clone)]
struct GameSetup {
    /// Home roster JSON (demo roster when omitted)
    #[arg(long)]
    home: Option<PathBuf>,

    /// Away roster JSON (demo roster when omitted)
    #[arg(long)]
    away: Option<PathBuf>,

    /// Engine tuning YAML
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Preset::Realistic)]
    preset: Preset,

    /// Override quarter length in seconds
    #[arg(long)]
    quarter_seconds: Option<f32>,

    #[arg(long, value_enum)]
    home_offense: Option<Offense>,

    #[arg(long, value_enum)]
    away_offense: Option<Offense>,

    #[arg(long, value_enum)]
    home_defense: Option<Defense>,

    #[arg(long, value_enum)]
    away_defense: Option<Defense>,
}

#[derive(Copy, Clone, ValueEnum)]
enum Preset {
    Realistic,
    Arcade,
}

#[derive(Copy, Clone, ValueEnum)]
enum Offense {
    FastBreak,
    Iso,
    Inside,
    Shoot,
    Motion,
}

impl From<Offense> for OffenseTactic {
    fn from(o: Offense) -> Self {
        match o {
            Offense::FastBreak => OffenseTactic::FastBreak,
            Offense::Iso => OffenseTactic::Iso,
            Offense::Inside => OffenseTactic::Inside,
            Offense::Shoot => OffenseTactic::Shoot,
            Offense::Motion => OffenseTactic::Motion,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum Defense {
    Man,
    Zone,
}

impl From<Defense> for DefenseTactic {
    fn from(d: Defense) -> Self {
        match d {
            Defense::Man => DefenseTactic::Man,
            Defense::Zone => DefenseTactic::Zone,
        }
    }
}

fn load_roster(path: Option<&Path>, fallback: &str, base: f32) -> Result<TeamRoster> {
    let Some(path) = path else {
        return Ok(TeamRoster::demo(fallback, base));
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading roster {}", path.display()))?;
    let roster: TeamRoster =
        serde_json::from_str(&text).with_context(|| format!("parsing roster {}", path.display()))?;
    roster.validate().with_context(|| format!("roster {}", path.display()))?;
    Ok(roster)
}

fn apply_tactics(tactics: TeamTactics, offense: Option<Offense>, defense: Option<Defense>) -> TeamTactics {
    TeamTactics {
        offense: offense.map_or(tactics.offense, Into::into),
        defense: defense.map_or(tactics.defense, Into::into),
    }
}

impl GameSetup {
    fn load(&self) -> Result<(TeamRoster, TeamRoster, EngineConfig)> {
        let mut home = load_roster(self.home.as_deref(), "Harbor", 72.0)?;
        let mut away = load_roster(self.away.as_deref(), "Summit", 70.0)?;
        home.tactics = apply_tactics(home.tactics, self.home_offense, self.home_defense);
        away.tactics = apply_tactics(away.tactics, self.away_offense, self.away_defense);

        let mut config = match (&self.config, self.preset) {
            (Some(path), _) => EngineConfig::from_yaml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            (None, Preset::Realistic) => EngineConfig::realistic(),
            (None, Preset::Arcade) => EngineConfig::arcade(),
        };
        if let Some(secs) = self.quarter_seconds {
            config.clock.quarter_seconds = secs.max(1.0);
        }
        Ok((home, away, config))
    }
}

fn run_game(home: &TeamRoster, away: &TeamRoster, config: &EngineConfig, seed: u64) -> Result<GameResult> {
    let mut sim = Simulation::new(home, away, config.clone(), seed)?;
    Ok(sim.run_to_completion())
}

fn print_box_score(result: &GameResult, home: &TeamRoster, away: &TeamRoster) {
    println!(
        "{} {} - {} {}{}",
        result.team_names[0],
        result.score[0],
        result.score[1],
        result.team_names[1],
        if result.finished { "" } else { " (unfinished)" }
    );
    let quarters: Vec<String> = result.quarter_scores.iter().map(|q| format!("{}-{}", q[0], q[1])).collect();
    println!("Quarters: {}", quarters.join("  "));

    for (team, roster) in [home, away].into_iter().enumerate() {
        println!();
        println!("{:<20} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>6} {:>6} {:>6} {:>5}",
            roster.name, "MIN", "PTS", "REB", "AST", "STL", "BLK", "FG", "3P", "FT", "TO");
        for (i, profile) in roster.players.iter().enumerate() {
            let line = result.box_score.player(team * 5 + i);
            println!(
                "{:<20} {:>4.0} {:>4} {:>4} {:>4} {:>4} {:>4} {:>6} {:>6} {:>6} {:>5}",
                profile.name,
                line.minutes(),
                line.points,
                line.rebounds(),
                line.assists,
                line.steals,
                line.blocks,
                format!("{}-{}", line.fgm, line.fga),
                format!("{}-{}", line.tpm, line.tpa),
                format!("{}-{}", line.ftm, line.fta),
                line.turnovers
            );
        }
    }
}

fn simulate(seed: u64, setup: &GameSetup, json: bool, play_by_play: bool) -> Result<()> {
    let (home, away, config) = setup.load()?;
    let result = run_game(&home, &away, &config, seed)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    let shown = if play_by_play { result.events.len() } else { 12 };
    for event in result.events.iter().skip(result.events.len().saturating_sub(shown)) {
        println!("[{}] {}", event.clock_label(), event.text);
    }
    println!();
    print_box_score(&result, &home, &away);
    Ok(())
}

#[derive(Default)]
struct BatchTotals {
    games: u64,
    points: [u64; 2],
    wins: [u64; 2],
    fga: u64,
    fgm: u64,
    tpa: u64,
    tpm: u64,
    turnovers: u64,
    stalls: u64,
    unfinished: u64,
}

impl BatchTotals {
    fn add(mut self, r: &GameResult) -> Self {
        self.games += 1;
        for team in 0..2 {
            self.points[team] += u64::from(r.score[team]);
            let t = r.box_score.team_totals(team);
            self.fga += u64::from(t.fga);
            self.fgm += u64::from(t.fgm);
            self.tpa += u64::from(t.tpa);
            self.tpm += u64::from(t.tpm);
            self.turnovers += u64::from(t.turnovers);
        }
        if let Some(w) = r.winner() {
            self.wins[w] += 1;
        }
        self.stalls += r.events.iter().filter(|e| e.kind == EventKind::Stalled).count() as u64;
        if !r.finished {
            self.unfinished += 1;
        }
        self
    }

    fn merge(mut self, o: Self) -> Self {
        self.games += o.games;
        for t in 0..2 {
            self.points[t] += o.points[t];
            self.wins[t] += o.wins[t];
        }
        self.fga += o.fga;
        self.fgm += o.fgm;
        self.tpa += o.tpa;
        self.tpm += o.tpm;
        self.turnovers += o.turnovers;
        self.stalls += o.stalls;
        self.unfinished += o.unfinished;
        self
    }
}

fn pct(made: u64, att: u64) -> f64 {
    if att == 0 {
        0.0
    } else {
        100.0 * made as f64 / att as f64
    }
}

fn batch(games: u64, first_seed: u64, threads: usize, setup: &GameSetup) -> Result<()> {
    let (home, away, config) = setup.load()?;
    if threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(threads).build_global().context("building thread pool")?;
    }
    tracing::info!(games, first_seed, "running batch");

    let totals = (0..games)
        .into_par_iter()
        .map(|i| run_game(&home, &away, &config, first_seed.wrapping_add(i)))
        .try_fold(BatchTotals::default, |acc, r| r.map(|r| acc.add(&r)))
        .try_reduce(BatchTotals::default, |a, b| Ok(a.merge(b)))?;

    let n = totals.games.max(1) as f64;
    println!("{} games ({} vs {})", totals.games, home.name, away.name);
    println!("Points per game: {:.1} - {:.1}", totals.points[0] as f64 / n, totals.points[1] as f64 / n);
    println!("Wins: {} - {}", totals.wins[0], totals.wins[1]);
    println!("FG%: {:.1}   3P%: {:.1}", pct(totals.fgm, totals.fga), pct(totals.tpm, totals.tpa));
    println!("Turnovers per team-game: {:.1}", totals.turnovers as f64 / (2.0 * n));
    if totals.stalls > 0 || totals.unfinished > 0 {
        tracing::warn!(stalls = totals.stalls, unfinished = totals.unfinished, "batch had stalled possessions");
    }
    Ok(())
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate { seed, setup, json, play_by_play } => simulate(seed, &setup, json, play_by_play),
        Commands::Batch { games, seed, threads, setup } => batch(games, seed, threads, &setup),
    }
}
