//! Affichage des analyses et des enregistrements

use adnseq_core::{longest_orf, OrfMatch, SequenceMetrics, SequenceRecord};
use console::style;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Affiche les métriques d'une séquence
pub fn display_metrics(title: &str, m: &SequenceMetrics) {
    println!("\n📊 Résultats de l'analyse: {}", style(title).bold());
    println!("   Longueur          : {} pb", m.length);
    println!("   Contenu GC        : {:.1}%", m.gc_content);
    println!("   Contenu AT        : {:.1}%", m.at_content);
    println!("   Tm (Wallace)      : {:.1} °C", m.melting_temp);
    println!("   Bases ambiguës    : {}", m.ambiguous_count);
    println!();
    println!("   A: {}  T: {}  G: {}  C: {}", m.a_count, m.t_count, m.g_count, m.c_count);
    println!(
        "   Purines (A+G): {:.1}%  Pyrimidines (T+C): {:.1}%",
        m.purine_percent(),
        m.pyrimidine_percent()
    );
}

pub fn display_reverse_complement(revcomp: &str) {
    println!("\n🔁 Complément inverse:");
    println!("{revcomp}");
}

/// Tableau des ORF et séquence de la plus longue
pub fn display_orfs(orfs: &[OrfMatch], min_length: usize) {
    #[derive(Tabled)]
    struct OrfRow {
        #[tabled(rename = "Cadre")]
        frame: usize,
        #[tabled(rename = "Début")]
        start: usize,
        #[tabled(rename = "Fin")]
        end: usize,
        #[tabled(rename = "Longueur")]
        length: usize,
    }

    println!("\n🧬 Cadres ouverts de lecture (ORF)");
    let Some(longest) = longest_orf(orfs) else {
        println!("   Aucune ORF significative trouvée (minimum {min_length} pb)");
        return;
    };

    let rows = orfs.iter().map(|o| OrfRow {
        frame: o.frame,
        start: o.start,
        end: o.end,
        length: o.length,
    });
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("Plus longue ORF (cadre {}):", longest.frame);
    println!("{}", longest.sequence);
}

/// Tableau des enregistrements
pub fn display_records(records: &[SequenceRecord]) {
    #[derive(Tabled)]
    struct RecordRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Nom")]
        name: String,
        #[tabled(rename = "Longueur")]
        length: i64,
        #[tabled(rename = "GC%")]
        gc: String,
        #[tabled(rename = "Tm")]
        tm: String,
        #[tabled(rename = "Ajoutée le")]
        date_added: String,
        #[tabled(rename = "Séquence")]
        preview: String,
    }

    if records.is_empty() {
        println!("Aucune séquence enregistrée.");
        return;
    }

    let rows = records.iter().map(|r| RecordRow {
        id: r.id,
        name: r.name.clone(),
        length: r.length,
        gc: format!("{:.1}", r.gc_content),
        tm: r.melting_temp.map(|t| format!("{t:.1}")).unwrap_or_default(),
        date_added: r.date_added.clone(),
        preview: r.preview(30),
    });
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("{} séquence(s)", records.len());
}

/// Métriques enregistrées ; les colonnes facultatives absentes sont omises
fn record_metric_lines(record: &SequenceRecord) -> Vec<String> {
    let mut lines = vec![
        format!("Longueur          : {} pb", record.length),
        format!("Contenu GC        : {:.1}%", record.gc_content),
    ];
    if let Some(at) = record.at_content {
        lines.push(format!("Contenu AT        : {at:.1}%"));
    }
    if let Some(tm) = record.melting_temp {
        lines.push(format!("Tm (Wallace)      : {tm:.1} °C"));
    }
    if let Some(ambiguous) = record.ambiguous_count {
        lines.push(format!("Bases ambiguës    : {ambiguous}"));
    }
    lines.push(format!(
        "A: {}  T: {}  G: {}  C: {}",
        record.a_count, record.t_count, record.g_count, record.c_count
    ));
    lines
}

/// Fiche détaillée d'un enregistrement
pub fn display_record(record: &SequenceRecord) {
    println!("{} {}", style(format!("#{}", record.id)).dim(), style(&record.name).bold());
    println!("   Ajoutée le : {}", record.date_added);
    if let Some(description) = &record.description {
        println!("   Description: {description}");
    }
    println!("   Séquence   : {}", record.sequence);

    println!("\n📊 Métriques enregistrées");
    for line in record_metric_lines(record) {
        println!("   {line}");
    }

    let comp = record.composition();
    println!(
        "   Composition: A {:.1}%  T {:.1}%  G {:.1}%  C {:.1}%",
        comp.a, comp.t, comp.g, comp.c
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SequenceRecord {
        SequenceRecord {
            id: 7,
            name: "gene".to_string(),
            sequence: "ATGCN".to_string(),
            length: 5,
            gc_content: 40.0,
            a_count: 1,
            t_count: 1,
            g_count: 1,
            c_count: 1,
            at_content: Some(40.0),
            melting_temp: Some(12.0),
            ambiguous_count: Some(1),
            date_added: "2024-01-01 10:00:00".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_record_lines_show_stored_metrics() {
        let lines = record_metric_lines(&record());
        assert_eq!(lines[0], "Longueur          : 5 pb");
        assert_eq!(lines[1], "Contenu GC        : 40.0%");
        assert!(lines.contains(&"Contenu AT        : 40.0%".to_string()));
        assert!(lines.contains(&"Tm (Wallace)      : 12.0 °C".to_string()));
        assert!(lines.contains(&"Bases ambiguës    : 1".to_string()));
        assert_eq!(lines.last().unwrap(), "A: 1  T: 1  G: 1  C: 1");
    }

    #[test]
    fn test_record_lines_skip_missing_columns() {
        let legacy = SequenceRecord {
            at_content: None,
            melting_temp: None,
            ambiguous_count: None,
            ..record()
        };
        let lines = record_metric_lines(&legacy);
        assert_eq!(lines.len(), 3);
        assert!(!lines.iter().any(|l| l.starts_with("Tm")));
    }
}
