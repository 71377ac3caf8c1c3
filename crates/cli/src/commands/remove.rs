//! Suppressions, toujours confirmées par jeton

use adnseq_storage::{execute, ConfirmationGate, DestructiveAction, SequenceStore};
use anyhow::{Context, Result};
use console::{style, Term};
use uuid::Uuid;

/// Émet un jeton, le fait ressaisir (sauf `--yes`) puis exécute l'action
pub async fn confirm_and_run<S>(store: &mut S, action: DestructiveAction, yes: bool) -> Result<()>
where
    S: SequenceStore + ?Sized,
{
    let mut gate = ConfirmationGate::default();
    let issued = gate.request(action);

    let token = if yes {
        issued.token
    } else {
        let term = Term::stdout();
        term.write_line(&format!(
            "{} Vous allez {}. Jeton de confirmation: {}",
            style("⚠").yellow(),
            action,
            style(issued.token).bold()
        ))?;
        term.write_line("Ressaisissez le jeton pour confirmer (vide pour annuler):")?;

        let answer = term.read_line().context("Lecture de la confirmation")?;
        if answer.trim().is_empty() {
            gate.cancel(issued.token);
            println!("Opération annulée.");
            return Ok(());
        }
        Uuid::parse_str(answer.trim()).context("Jeton mal formé")?
    };

    let confirmed = gate.confirm(token)?;
    let removed = execute(store, confirmed).await?;

    match confirmed {
        DestructiveAction::Delete { id } if removed == 0 => {
            println!("Aucune séquence avec l'id {id}: rien à supprimer.")
        }
        _ => println!("{} {} séquence(s) supprimée(s)", style("✓").green(), removed),
    }
    Ok(())
}
