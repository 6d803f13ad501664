use std::collections::BTreeSet;

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use superlotto_db::models::{CandidateCombination, DrawRecord};
use superlotto_engine::constraints::ConstraintSet;
use superlotto_engine::frequency::FrequencyTable;
use superlotto_engine::generator::{Filter, FilterReport};
use superlotto_engine::prize::BatchScore;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn fmt_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_frequency<V, F>(title: &str, table: &FrequencyTable<V>, top: usize, label: F)
where
    V: Clone,
    F: Fn(&V) -> String,
{
    println!("\n── {} ({} valeurs distinctes, {} tirages) ──", title, table.len(), table.total());

    let mut out = new_table(vec!["Rang", "Valeur", "Occurrences", "Part"]);
    let total = table.total().max(1) as f64;
    for (rank, (value, count)) in table.entries().iter().take(top).enumerate() {
        out.add_row(vec![
            (rank + 1).to_string(),
            label(value),
            count.to_string(),
            format!("{:.2} %", *count as f64 * 100.0 / total),
        ]);
    }
    println!("{out}");
}

pub fn display_latest(draw: &DrawRecord, count: usize) {
    println!(
        "{} tirages chargés, dernier : {} ({}) {} | {}",
        count,
        draw.period,
        draw.date,
        fmt_numbers(&draw.front),
        fmt_numbers(&draw.back)
    );
}

pub fn display_constraints(constraints: &ConstraintSet) {
    println!("\n🎯 Contraintes retenues\n");
    let mut table = new_table(vec!["Dimension", "Valeurs autorisées"]);
    let join = |values: Vec<String>| values.join(", ");
    table.add_row(vec![
        "Paire arrière".to_string(),
        join(constraints.backs.iter().map(|b| fmt_numbers(b)).collect()),
    ]);
    table.add_row(vec![
        "Impair:pair".to_string(),
        join(constraints.odd_even_ratios.iter().map(|r| r.to_string()).collect()),
    ]);
    table.add_row(vec![
        "Zones".to_string(),
        join(constraints.zone_ratios.iter().map(|r| r.to_string()).collect()),
    ]);
    table.add_row(vec![
        "Écart".to_string(),
        join(constraints.spans.iter().map(|s| s.to_string()).collect()),
    ]);
    println!("{table}");
}

pub fn display_report(report: &FilterReport) {
    let mut table = new_table(vec!["Filtre", "Rejetées"]);
    for filter in Filter::ALL {
        table.add_row(vec![filter.to_string(), report.rejected_by(filter).to_string()]);
    }
    table.add_row(vec![
        Cell::new("Retenues"),
        Cell::new(report.accepted.to_string()).fg(Color::Green),
    ]);
    println!("{table}");
    println!("{} grilles avant examinées", report.examined);
}

pub fn display_candidates(candidates: &[CandidateCombination], show: usize) {
    if candidates.is_empty() {
        println!("Aucune combinaison ne satisfait les contraintes.");
        return;
    }

    println!("\n🎲 Combinaisons retenues\n");
    let mut table = new_table(vec!["#", "Avant", "Arrière"]);
    for (i, combo) in candidates.iter().take(show).enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            fmt_numbers(&combo.front),
            fmt_numbers(&combo.back),
        ]);
    }
    println!("{table}");
    if candidates.len() > show {
        println!("… {} autres combinaisons non affichées", candidates.len() - show);
    }
    println!("Total : {} combinaisons", candidates.len());
}

pub fn display_compound(front: &BTreeSet<u8>, back: &BTreeSet<u8>) {
    let front: Vec<u8> = front.iter().copied().collect();
    let back: Vec<u8> = back.iter().copied().collect();
    println!("Grille multiple avant   : {}", fmt_numbers(&front));
    println!("Grille multiple arrière : {}", fmt_numbers(&back));
}

pub fn display_selection(selection: &[CandidateCombination]) {
    println!("\n🎲 Sélection aléatoire\n");
    let mut table = new_table(vec!["#", "Avant", "Arrière"]);
    for (i, combo) in selection.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            fmt_numbers(&combo.front),
            fmt_numbers(&combo.back),
        ]);
    }
    println!("{table}");
}

pub fn display_score(score: &BatchScore, draw: &DrawRecord) {
    println!(
        "\n💰 Lot comparé au tirage {} : {} | {}\n",
        draw.period,
        fmt_numbers(&draw.front),
        fmt_numbers(&draw.back)
    );
    if score.winners.is_empty() {
        println!("Aucune des {} combinaisons n'est gagnante.", score.examined);
        return;
    }

    let mut table = new_table(vec!["Avant", "Arrière", "Bons numéros", "Gain"]);
    for winner in &score.winners {
        table.add_row(vec![
            Cell::new(fmt_numbers(&winner.combination.front)),
            Cell::new(fmt_numbers(&winner.combination.back)),
            Cell::new(format!("{}+{}", winner.front_hits, winner.back_hits)),
            Cell::new(winner.amount.to_string()).fg(Color::Green),
        ]);
    }
    println!("{table}");
    println!(
        "{} gagnantes sur {}, total {}",
        score.winners.len(),
        score.examined,
        score.total
    );
}
