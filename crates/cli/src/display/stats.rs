//! Affichage des statistiques

use adnseq_core::{BaseComposition, CollectionSummary, ComparisonRow, Describe, HistogramBin};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Largeur maximale d'une barre d'histogramme
const BAR_WIDTH: usize = 40;

/// Encadré des statistiques globales
pub fn display_summary(summary: &CollectionSummary) {
    println!("\n┌────────────────────────────────────────────────┐");
    println!("│ Statistiques Globales                          │");
    println!("├────────────────────────────────────────────────┤");
    println!("│ Nombre de séquences    : {:>8}              │", summary.count);
    println!("│ Longueur totale        : {:>8} pb           │", summary.total_bases);
    println!("│ Longueur moyenne       : {:>8.1} pb           │", summary.mean_length);
    println!("│ Longueur maximale      : {:>8} pb           │", summary.max_length);
    println!("│ GC moyen               : {:>8.1}%             │", summary.mean_gc);
    println!("└────────────────────────────────────────────────┘");
}

/// Statistiques descriptives par colonne numérique
pub fn display_describe(columns: &[(&'static str, Option<Describe>)]) {
    #[derive(Tabled)]
    struct DescribeRow {
        #[tabled(rename = "Colonne")]
        column: &'static str,
        count: usize,
        mean: String,
        std: String,
        min: String,
        #[tabled(rename = "25%")]
        q25: String,
        #[tabled(rename = "50%")]
        q50: String,
        #[tabled(rename = "75%")]
        q75: String,
        max: String,
    }

    let rows = columns.iter().filter_map(|(column, d)| {
        d.as_ref().map(|d| DescribeRow {
            column: *column,
            count: d.count,
            mean: format!("{:.2}", d.mean),
            std: if d.std.is_nan() { "-".to_string() } else { format!("{:.2}", d.std) },
            min: format!("{:.2}", d.min),
            q25: format!("{:.2}", d.q25),
            q50: format!("{:.2}", d.q50),
            q75: format!("{:.2}", d.q75),
            max: format!("{:.2}", d.max),
        })
    });

    println!("\n📈 Statistiques descriptives");
    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Histogramme texte de la distribution GC
pub fn display_histogram(bins: &[HistogramBin]) {
    let Some(peak) = bins.iter().map(|b| b.count).max().filter(|&m| m > 0) else {
        return;
    };

    println!("\n📊 Distribution du contenu GC");
    for bin in bins.iter().filter(|b| b.count > 0) {
        let width = (bin.count * BAR_WIDTH).div_ceil(peak);
        println!(
            "   {:>5.1}-{:<5.1} │{} {}",
            bin.lower,
            bin.upper,
            "█".repeat(width),
            bin.count
        );
    }
}

/// Composition moyenne en bases
pub fn display_composition(comp: &BaseComposition) {
    println!("\n🧪 Composition moyenne");
    println!(
        "   A {:.1}%  T {:.1}%  G {:.1}%  C {:.1}%",
        comp.a, comp.t, comp.g, comp.c
    );
}

/// Comparaison de deux enregistrements côte à côte
pub fn display_comparison(left_name: &str, right_name: &str, rows: &[ComparisonRow]) {
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(["Propriété", left_name, right_name]);
    for row in rows {
        builder.push_record([row.property, row.left.as_str(), row.right.as_str()]);
    }

    println!("{}", builder.build().with(Style::rounded()));
}
