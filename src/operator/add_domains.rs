use crate::operator::Prompter;
use crate::storage::Storage;
use crate::HarvestError;

/// Entry that ends the add-domains loop, matched case-insensitively
pub const DONE_SENTINEL: &str = "done";

/// What an add-domains session did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddDomainsSummary {
    /// Domains inserted, in entry order
    pub added: Vec<String>,

    /// Entries rejected as blank or already present
    pub rejected: Vec<String>,
}

/// Interactively registers seed domains until `done` or end of input
///
/// Entries are trimmed. Blank entries and domains already in the store are
/// rejected with a message and the loop continues.
pub fn add_domains<S, P>(
    storage: &mut S,
    prompter: &mut P,
) -> Result<AddDomainsSummary, HarvestError>
where
    S: Storage + ?Sized,
    P: Prompter + ?Sized,
{
    let prompt = format!("Enter a domain to add (or type '{}' to finish)", DONE_SENTINEL);
    let mut summary = AddDomainsSummary::default();

    while let Some(entry) = prompter.prompt(&prompt)? {
        if entry.eq_ignore_ascii_case(DONE_SENTINEL) {
            break;
        }

        if !entry.is_empty() && storage.add_domain(&entry)? {
            tracing::debug!("Registered seed domain {}", entry);
            prompter.say(&format!("Added: {}", entry))?;
            summary.added.push(entry);
        } else {
            prompter.say(&format!("Already Exists or Invalid Input: {}", entry))?;
            summary.rejected.push(entry);
        }
    }

    Ok(summary)
}
