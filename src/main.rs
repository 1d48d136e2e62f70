mod display;

use anyhow::Context;
use clap::{Parser, Subcommand};
use display::output::{
    display_ban_table, display_counter_table, display_error, display_hero_profile,
    display_hero_table, display_info, display_lane_table, display_leaderboard,
    display_meta_shift, display_success, display_synergy_table, display_tournaments,
};
use draft_stats::analysis::leaderboard::{
    LaneRanking, Leaderboard, DEFAULT_LIMIT, MIN_LANE_PICKS, MIN_WIN_RATE_PICKS,
};
use draft_stats::analysis::pipeline::{
    aggregate, compare_subsets, exclude_tournament, filter_by_tournament, tournaments,
};
use draft_stats::analysis::profile::HeroProfile;
use draft_stats::analysis::synergy::ComboSize;
use draft_stats::api::{load_matches, LoadOrigin};
use draft_stats::config::Config;
use draft_stats::error::AppError;
use draft_stats::view::rows::{ComboRow, HeroRow, LaneRow, MatchupRow};
use draft_stats::view::{apply_view, FieldMatch, SortDirection, SortSpec, ViewState, ViewStates};
use draft_stats::{Lane, MatchRecord, LANES};
use indicatif::ProgressBar;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "Draft Stats")]
#[command(about = "Hero pick, ban, synergy and counter statistics from drafted matches", long_about = None)]
struct Args {
    /// CSV path or http(s) URL (overrides DRAFT_STATS_SOURCE)
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Download again even if a fresh cached copy exists
    #[arg(long, global = true)]
    refresh: bool,

    /// Only analyze matches from this tournament
    #[arg(short, long, global = true)]
    tournament: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug, Clone)]
struct ViewArgs {
    /// Case-insensitive substring search
    #[arg(long)]
    search: Option<String>,

    /// Column to sort by (e.g. win_rate, pick_count, games)
    #[arg(long)]
    sort: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long)]
    direction: Option<String>,

    /// Only keep rows in this lane (dark, farm, mid, abyssal, support)
    #[arg(long)]
    lane_filter: Option<String>,

    /// Which lane columns must match: first, second, either or both
    #[arg(long, default_value = "either")]
    lane_mode: String,

    /// Number of rows to display
    #[arg(long, default_value = "25")]
    top: usize,
}

impl ViewArgs {
    /// Layer the command-line choices over a view's defaults.
    fn apply(&self, mut state: ViewState) -> Result<ViewState, AppError> {
        if let Some(search) = &self.search {
            state.search = search.clone();
        }

        let direction = match &self.direction {
            Some(raw) => raw.parse::<SortDirection>()?,
            None if self.sort.is_some() => SortDirection::Descending,
            None => state.sort.direction,
        };
        let key = self.sort.clone().unwrap_or_else(|| state.sort.key.clone());
        state.sort = SortSpec::new(&key, direction);

        if let Some(lane) = &self.lane_filter {
            let lane = lane.parse::<Lane>()?;
            let mode = self.lane_mode.parse::<FieldMatch>()?;
            state = state.with_lane_filter(lane, mode);
        }

        Ok(state)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick, win and ban rates for every hero
    Overview {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Hero performance by lane (min 3 picks in the lane)
    Lanes {
        /// Show a single lane instead of all five
        #[arg(long)]
        lane: Option<String>,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Win rates of heroes drafted together
    Synergies {
        /// Heroes per combination: 2, 3 or 4
        #[arg(long, default_value = "2")]
        size: usize,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Win rates of one hero drafted against another
    Counters {
        /// Which hero the search applies to: pick, against or both
        #[arg(long, default_value = "pick")]
        search_in: String,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Most banned heroes
    Bans {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Everything about one hero
    Hero {
        /// Hero name (exact, case-sensitive)
        name: String,
    },
    /// Compare one tournament against another (or against all other matches)
    Meta {
        /// Tournament to treat as the current meta
        #[arg(long)]
        current: String,

        /// Tournament to compare against (default: every other match)
        #[arg(long)]
        compare: Option<String>,
    },
    /// List tournament labels in the dataset
    Tournaments,
    /// Top heroes by pick, win and ban rate, and per lane
    Leaders {
        /// Entries per board
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
}

fn main() {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn require_tournament(records: &[MatchRecord], label: &str) -> Result<(), AppError> {
    if tournaments(records).iter().any(|t| t == label) {
        Ok(())
    } else {
        Err(AppError::UnknownTournament(label.to_string()))
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(source) = args.source {
        config.source = source;
    }

    display_info(&format!("Loading match history from {}", config.source));

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching match history");
    pb.enable_steady_tick(Duration::from_millis(100));
    let loaded = load_matches(&config, args.refresh);
    pb.finish_and_clear();
    let loaded = loaded.context("Failed to load match history")?;

    let origin = match loaded.origin {
        LoadOrigin::LocalFile => "file",
        LoadOrigin::Cache => "cache",
        LoadOrigin::Download => "download",
    };
    display_success(&format!("Loaded {} matches ({})", loaded.records.len(), origin));
    if loaded.skipped > 0 {
        display_info(&format!("Skipped {} unreadable rows", loaded.skipped));
    }

    let all_records = loaded.records;
    let records = match &args.tournament {
        Some(label) => {
            require_tournament(&all_records, label)?;
            let subset = filter_by_tournament(&all_records, label);
            display_info(&format!("Tournament {}: {} matches", label, subset.len()));
            subset
        }
        None => all_records.clone(),
    };

    let views = ViewStates::default();
    let tables = aggregate(&records);

    match args.command {
        Command::Overview { view } => {
            let state = view.apply(views.overview)?;
            let mut rows = apply_view(HeroRow::from_stats(&tables.heroes), &state);
            rows.truncate(view.top);
            display_hero_table(&rows, tables.total_matches);
        }
        Command::Lanes { lane, view } => {
            let state = view.apply(views.lanes)?;
            let lanes = match lane {
                Some(lane) => vec![lane.parse::<Lane>()?],
                None => LANES.to_vec(),
            };
            for lane in lanes {
                let mut rows = apply_view(LaneRow::from_lane(&tables.heroes, lane), &state);
                rows.truncate(view.top);
                display_lane_table(lane, &rows);
            }
        }
        Command::Synergies { size, view } => {
            let size = ComboSize::try_from(size)?;
            let state = view.apply(views.synergies)?;
            let mut rows = apply_view(ComboRow::from_table(tables.synergies(size)), &state);
            rows.truncate(view.top);
            display_synergy_table(size, &rows);
        }
        Command::Counters { search_in, view } => {
            let scope = FieldMatch::counter_search(&search_in)?;
            let state = view.apply(views.counters.with_search("", scope))?;
            let mut rows = apply_view(MatchupRow::from_table(&tables.counters), &state);
            rows.truncate(view.top);
            display_counter_table(&rows);
        }
        Command::Bans { view } => {
            let state = view.apply(views.bans)?;
            let mut rows = apply_view(HeroRow::banned(&tables.heroes), &state);
            rows.truncate(view.top);
            display_ban_table(&rows);
        }
        Command::Hero { name } => {
            if !tables.heroes.contains(&name) {
                display_info(&format!("{} does not appear in these matches", name));
            }
            display_hero_profile(&HeroProfile::build(&tables, &name));
        }
        Command::Meta { current, compare } => {
            require_tournament(&all_records, &current)?;
            let current_records = filter_by_tournament(&all_records, &current);
            let (comparison_records, comparison_label) = match compare {
                Some(label) => {
                    require_tournament(&all_records, &label)?;
                    (filter_by_tournament(&all_records, &label), label)
                }
                None => (
                    exclude_tournament(&all_records, &current),
                    "all other matches".to_string(),
                ),
            };
            let shift = compare_subsets(&current_records, &comparison_records);
            display_meta_shift(&shift, &current, &comparison_label);
        }
        Command::Tournaments => {
            let counts: Vec<(String, usize)> = tournaments(&all_records)
                .into_iter()
                .map(|label| {
                    let matches = filter_by_tournament(&all_records, &label).len();
                    (label, matches)
                })
                .collect();
            display_tournaments(&counts);
        }
        Command::Leaders { limit } => {
            display_leaderboard(
                "MOST PICKED",
                &Leaderboard::top_by_pick_rate(&tables.heroes, limit),
            );
            display_leaderboard(
                &format!("HIGHEST WIN RATE (min {} picks)", MIN_WIN_RATE_PICKS),
                &Leaderboard::top_by_win_rate(&tables.heroes, MIN_WIN_RATE_PICKS, limit),
            );
            display_leaderboard(
                "MOST BANNED",
                &Leaderboard::top_by_ban_rate(&tables.heroes, limit),
            );
            for lane in LANES {
                display_leaderboard(
                    &format!("{} (min {} picks)", lane.display_name().to_uppercase(), MIN_LANE_PICKS),
                    &Leaderboard::top_in_lane(
                        &tables.heroes,
                        lane,
                        LaneRanking::WinRate,
                        MIN_LANE_PICKS,
                        limit,
                    ),
                );
            }
        }
    }

    Ok(())
}
