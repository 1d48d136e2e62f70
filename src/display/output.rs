use colored::*;
use draft_stats::analysis::leaderboard::LeaderEntry;
use draft_stats::analysis::meta_shift::{MetaShift, PickRateChange};
use draft_stats::analysis::profile::HeroProfile;
use draft_stats::analysis::synergy::ComboSize;
use draft_stats::view::rows::{ComboRow, HeroRow, LaneRow, MatchupRow};
use draft_stats::Lane;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct HeroTableRow {
    #[tabled(rename = "#")]
    rank: String,
    hero: String,
    picks: String,
    wins: String,
    win_rate: String,
    pick_rate: String,
    bans: String,
    ban_rate: String,
}

#[derive(Tabled)]
struct BanRow {
    #[tabled(rename = "#")]
    rank: String,
    hero: String,
    bans: String,
    ban_rate: String,
}

#[derive(Tabled)]
struct LaneTableRow {
    #[tabled(rename = "#")]
    rank: String,
    hero: String,
    picks: String,
    wins: String,
    win_rate: String,
}

#[derive(Tabled)]
struct SynergyRow {
    #[tabled(rename = "#")]
    rank: String,
    heroes: String,
    lanes: String,
    games: String,
    wins: String,
    win_rate: String,
}

#[derive(Tabled)]
struct CounterRow {
    #[tabled(rename = "#")]
    rank: String,
    pick: String,
    pick_lane: String,
    against: String,
    against_lane: String,
    games: String,
    win_rate: String,
}

#[derive(Tabled)]
struct LeaderRow {
    #[tabled(rename = "#")]
    rank: String,
    hero: String,
    count: String,
    rate: String,
}

#[derive(Tabled)]
struct ShiftRow {
    hero: String,
    before: String,
    now: String,
    change: String,
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

fn format_change(change: f64) -> String {
    let text = format!("{:+.2}", change);
    if change > 0.0 {
        text.green().to_string()
    } else if change < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

fn lane_label(lane: Option<Lane>) -> String {
    lane.map(|l| l.as_str().to_string()).unwrap_or_else(|| "-".to_string())
}

fn header(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

fn nothing_to_show(rows_empty: bool) -> bool {
    if rows_empty {
        println!("{}", "No entries match the current filters".yellow());
    }
    rows_empty
}

pub fn display_hero_table(rows: &[HeroRow], total_matches: usize) {
    header(&format!("HERO OVERVIEW ({} matches)", total_matches));
    if nothing_to_show(rows.is_empty()) {
        return;
    }

    let table_rows = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| HeroTableRow {
            rank: format!("{}", idx + 1),
            hero: row.hero.clone(),
            picks: row.pick_count.to_string(),
            wins: row.win_count.to_string(),
            win_rate: format_rate(row.win_rate),
            pick_rate: format_rate(row.pick_rate),
            bans: row.ban_count.to_string(),
            ban_rate: format_rate(row.ban_rate),
        })
        .collect();
    print_table::<HeroTableRow>(table_rows);
}

pub fn display_ban_table(rows: &[HeroRow]) {
    header("BANS");
    if nothing_to_show(rows.is_empty()) {
        return;
    }

    let table_rows = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| BanRow {
            rank: format!("{}", idx + 1),
            hero: row.hero.clone(),
            bans: row.ban_count.to_string(),
            ban_rate: format_rate(row.ban_rate),
        })
        .collect();
    print_table::<BanRow>(table_rows);
}

pub fn display_lane_table(lane: Lane, rows: &[LaneRow]) {
    header(&lane.display_name().to_uppercase());
    if nothing_to_show(rows.is_empty()) {
        return;
    }

    let table_rows = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| LaneTableRow {
            rank: format!("{}", idx + 1),
            hero: row.hero.clone(),
            picks: row.pick_count.to_string(),
            wins: row.win_count.to_string(),
            win_rate: format_rate(row.win_rate),
        })
        .collect();
    print_table::<LaneTableRow>(table_rows);
}

pub fn display_synergy_table(size: ComboSize, rows: &[ComboRow]) {
    header(&format!(
        "SYNERGIES: {} (min {} games)",
        size.to_string().to_uppercase(),
        size.min_sample()
    ));
    if nothing_to_show(rows.is_empty()) {
        return;
    }

    let table_rows = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| SynergyRow {
            rank: format!("{}", idx + 1),
            heroes: row.key.clone(),
            lanes: row
                .lanes
                .iter()
                .map(|l| lane_label(*l))
                .collect::<Vec<_>>()
                .join(" + "),
            games: row.games.to_string(),
            wins: row.wins.to_string(),
            win_rate: format_rate(row.win_rate),
        })
        .collect();
    print_table::<SynergyRow>(table_rows);
}

pub fn display_counter_table(rows: &[MatchupRow]) {
    header("COUNTER PICKS (min 3 games)");
    if nothing_to_show(rows.is_empty()) {
        return;
    }

    let table_rows = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| CounterRow {
            rank: format!("{}", idx + 1),
            pick: row.pick.clone(),
            pick_lane: lane_label(row.pick_lane),
            against: row.against.clone(),
            against_lane: lane_label(row.against_lane),
            games: row.games.to_string(),
            win_rate: format_rate(row.win_rate),
        })
        .collect();
    print_table::<CounterRow>(table_rows);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Win rate is for the 'pick' hero's team whenever both heroes met\n");
}

fn leader_rows(entries: &[LeaderEntry]) -> Vec<LeaderRow> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, e)| LeaderRow {
            rank: format!("#{}", idx + 1),
            hero: e.hero.clone(),
            count: e.count.to_string(),
            rate: format_rate(e.rate),
        })
        .collect()
}

pub fn display_leaderboard(title: &str, entries: &[LeaderEntry]) {
    header(title);
    if nothing_to_show(entries.is_empty()) {
        return;
    }
    print_table(leader_rows(entries));
}

pub fn display_hero_profile(profile: &HeroProfile) {
    header(&format!("{} DETAILS", profile.hero.to_uppercase()));

    println!("{} {}", "Total Picks:".bold(), profile.totals.pick_count);
    println!(
        "{} {} W / {} L ({})",
        "Record:".bold(),
        profile.totals.win_count.to_string().green(),
        profile.losses().to_string().red(),
        format_rate(profile.win_rate)
    );
    println!("{} {}", "Ban Count:".bold(), profile.totals.ban_count);
    match profile.popularity_rank {
        Some(rank) => println!("{} #{}", "Popularity Rank:".bold(), rank),
        None => println!("{} N/A", "Popularity Rank:".bold()),
    }
    match profile.win_rate_rank {
        Some(rank) => println!("{} #{}", "Win Rate Rank:".bold(), rank),
        None => println!("{} N/A", "Win Rate Rank:".bold()),
    }

    println!("\n{}", "By Lane".bold().yellow());
    let lane_rows: Vec<LaneTableRow> = profile
        .lanes
        .iter()
        .map(|l| LaneTableRow {
            rank: l.lane.display_name().to_string(),
            hero: profile.hero.clone(),
            picks: l.pick_count.to_string(),
            wins: l.win_count.to_string(),
            win_rate: format_rate(l.win_rate),
        })
        .collect();
    print_table(lane_rows);

    if !profile.synergies.is_empty() {
        println!("\n{}", "Best Partners".bold().yellow());
        let rows: Vec<SynergyRow> = profile
            .synergies
            .iter()
            .enumerate()
            .map(|(idx, s)| SynergyRow {
                rank: format!("{}", idx + 1),
                heroes: s.partner.clone(),
                lanes: format!("{} + {}", lane_label(s.hero_lane), lane_label(s.partner_lane)),
                games: s.games.to_string(),
                wins: s.wins.to_string(),
                win_rate: format_rate(s.win_rate),
            })
            .collect();
        print_table(rows);
    }

    for (title, matchups) in [
        ("Good Against", &profile.good_against),
        ("Struggles Against", &profile.bad_against),
    ] {
        if matchups.is_empty() {
            continue;
        }
        println!("\n{}", title.bold().yellow());
        let rows: Vec<MatchupRow> = matchups.iter().map(MatchupRow::from).collect();
        let table_rows: Vec<CounterRow> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| CounterRow {
                rank: format!("{}", idx + 1),
                pick: row.pick.clone(),
                pick_lane: lane_label(row.pick_lane),
                against: row.against.clone(),
                against_lane: lane_label(row.against_lane),
                games: row.games.to_string(),
                win_rate: format_rate(row.win_rate),
            })
            .collect();
        print_table(table_rows);
    }

    println!();
}

fn pick_shift_rows(changes: &[PickRateChange]) -> Vec<ShiftRow> {
    changes
        .iter()
        .map(|c| ShiftRow {
            hero: c.hero.clone(),
            before: format_rate(c.comparison_pick_rate),
            now: format_rate(c.current_pick_rate),
            change: format_change(c.change),
        })
        .collect()
}

pub fn display_meta_shift(shift: &MetaShift, current: &str, comparison: &str) {
    header(&format!("META SHIFT: {} vs {}", current, comparison));

    println!("{}", "Biggest Win Rate Changes".bold().yellow());
    if !nothing_to_show(shift.win_rate_changes.is_empty()) {
        let rows: Vec<ShiftRow> = shift
            .win_rate_changes
            .iter()
            .map(|c| ShiftRow {
                hero: c.hero.clone(),
                before: format!("{} ({})", format_rate(c.comparison_win_rate), c.comparison_picks),
                now: format!("{} ({})", format_rate(c.current_win_rate), c.current_picks),
                change: format_change(c.change),
            })
            .collect();
        print_table(rows);
    }

    println!("\n{}", "Rising Stars (pick rate)".bold().green());
    if !nothing_to_show(shift.rising.is_empty()) {
        print_table(pick_shift_rows(&shift.rising));
    }

    println!("\n{}", "Falling Stars (pick rate)".bold().red());
    if !nothing_to_show(shift.falling.is_empty()) {
        print_table(pick_shift_rows(&shift.falling));
    }

    println!("\n{}", "Emerging Synergies".bold().yellow());
    if !nothing_to_show(shift.emerging_synergies.is_empty()) {
        let rows: Vec<ShiftRow> = shift
            .emerging_synergies
            .iter()
            .map(|s| ShiftRow {
                hero: s.key.clone(),
                before: format!("{} ({})", format_rate(s.comparison_win_rate), s.comparison_games),
                now: format!("{} ({})", format_rate(s.current_win_rate), s.current_games),
                change: format_change(s.change),
            })
            .collect();
        print_table(rows);
    }

    println!();
}

pub fn display_tournaments(tournaments: &[(String, usize)]) {
    header("TOURNAMENTS");
    if tournaments.is_empty() {
        println!("{}", "No tournament labels in this dataset".yellow());
        return;
    }
    for (label, matches) in tournaments {
        println!("• {} ({} matches)", label.bold(), matches);
    }
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
