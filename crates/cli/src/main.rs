//! CLI pour l'analyse et le stockage de séquences ADN

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

mod commands;
mod display;
mod input;

use adnseq_core::{AnalyzerConfig, DEFAULT_MIN_ORF_LENGTH};
use adnseq_storage::{Database, DatabaseConfig, DestructiveAction, RangeFilter};
use commands::{analyze, browse, export, import, remove, stats};

#[derive(Parser)]
#[command(name = "adnseq")]
#[command(about = "Analyse et stockage de séquences ADN", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base SQLite (chemin ou URL sqlite://)
    #[arg(long, global = true, default_value = "sqlite://dna_sequences.db")]
    database: String,

    /// Sortie JSON au lieu des tableaux
    #[arg(long, global = true)]
    json: bool,

    /// Niveau de verbosité
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Options d'affichage des résultats d'analyse
#[derive(Args, Clone, Copy)]
pub struct ReportArgs {
    /// Rechercher les ORF
    #[arg(long)]
    orfs: bool,

    /// Afficher le complément inverse
    #[arg(long)]
    revcomp: bool,

    /// Longueur minimale des ORF (nucléotides)
    #[arg(long, default_value_t = DEFAULT_MIN_ORF_LENGTH)]
    min_orf_length: usize,
}

impl ReportArgs {
    pub fn analyzer_config(&self, allow_ambiguous: bool) -> AnalyzerConfig {
        AnalyzerConfig {
            allow_ambiguous,
            min_orf_length: self.min_orf_length,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse une séquence sans l'enregistrer
    Analyze {
        /// Séquence brute (sinon --file ou l'entrée standard)
        sequence: Option<String>,

        /// Fichier texte contenant la séquence
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Accepter les codes IUPAC ambigus (et ignorer les chiffres)
        #[arg(long)]
        iupac: bool,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Analyse et enregistre une séquence
    Add {
        /// Nom de la séquence
        #[arg(short, long)]
        name: String,

        /// Description libre
        #[arg(short, long)]
        description: Option<String>,

        /// Séquence brute (sinon --file ou l'entrée standard)
        sequence: Option<String>,

        /// Fichier texte contenant la séquence
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Accepter les codes IUPAC ambigus (et ignorer les chiffres)
        #[arg(long)]
        iupac: bool,

        #[command(flatten)]
        report: ReportArgs,
    },

    #[command(flatten)]
    Stored(StoredCommands),
}

/// Commandes travaillant sur la base
#[derive(Subcommand)]
enum StoredCommands {
    /// Importe les enregistrements d'un fichier FASTA
    Import {
        /// Fichier FASTA
        input: PathBuf,

        /// Accepter les codes IUPAC ambigus
        #[arg(long)]
        iupac: bool,
    },

    /// Liste les séquences, les plus récentes d'abord
    List,

    /// Affiche une séquence enregistrée
    Show {
        id: i64,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Recherche les séquences contenant un motif
    Search { pattern: String },

    /// Filtre par longueur et contenu GC (bornes incluses)
    Filter {
        #[arg(long, default_value_t = 0)]
        min_length: i64,

        #[arg(long, default_value_t = 10_000)]
        max_length: i64,

        #[arg(long, default_value_t = 0.0)]
        min_gc: f64,

        #[arg(long, default_value_t = 100.0)]
        max_gc: f64,
    },

    /// Statistiques de la base
    Stats,

    /// Compare deux séquences enregistrées
    Compare { left: i64, right: i64 },

    /// Exporte toute la base en CSV
    Export {
        /// Fichier de sortie (défaut: dna_sequences_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Supprime une séquence (confirmation par jeton)
    Delete {
        id: i64,

        /// Confirmer sans saisir le jeton
        #[arg(short, long)]
        yes: bool,
    },

    /// Vide la base (confirmation par jeton)
    Clear {
        /// Confirmer sans saisir le jeton
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    adnseq_core::init_logging(adnseq_core::logging::level_for_verbosity(cli.verbose));

    match cli.command {
        Commands::Analyze {
            sequence,
            file,
            iupac,
            report,
        } => analyze::run(sequence, file, iupac, report, cli.json),
        Commands::Add {
            name,
            description,
            sequence,
            file,
            iupac,
            report,
        } => {
            let raw = input::read_sequence(sequence, file)?;
            analyze::add(&cli.database, &name, description, &raw, iupac, report, cli.json).await
        }
        Commands::Stored(command) => run_with_database(command, &cli.database, cli.json).await,
    }
}

/// Exécute une commande dans une session de stockage, libérée à la fin
async fn run_with_database(command: StoredCommands, url: &str, json: bool) -> anyhow::Result<()> {
    let db = Database::initialize(&DatabaseConfig {
        url: url.to_string(),
        max_connections: 1,
    })
    .await?;
    let mut session = db.session().await?;

    let result = match command {
        StoredCommands::Import { input, iupac } => import::run(&mut session, &input, iupac).await,
        StoredCommands::List => browse::list(&mut session, json).await,
        StoredCommands::Show { id, report } => browse::show(&mut session, id, report, json).await,
        StoredCommands::Search { pattern } => browse::search(&mut session, &pattern, json).await,
        StoredCommands::Filter {
            min_length,
            max_length,
            min_gc,
            max_gc,
        } => {
            let filter = RangeFilter {
                min_length,
                max_length,
                min_gc,
                max_gc,
            };
            browse::filter(&mut session, &filter, json).await
        }
        StoredCommands::Stats => stats::summary(&mut session, json).await,
        StoredCommands::Compare { left, right } => stats::compare(&mut session, left, right, json).await,
        StoredCommands::Export { output } => export::run(&mut session, output).await,
        StoredCommands::Delete { id, yes } => {
            remove::confirm_and_run(&mut session, DestructiveAction::Delete { id }, yes).await
        }
        StoredCommands::Clear { yes } => {
            remove::confirm_and_run(&mut session, DestructiveAction::DeleteAll, yes).await
        }
    };

    drop(session);
    db.close().await;
    result
}

/// Crée une barre de progression
pub fn create_progress_bar(length: u64, msg: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    pb.set_message(msg.to_string());
    Ok(pb)
}
