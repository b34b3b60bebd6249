use crate::operator::Prompter;
use crate::output::format_record;
use crate::storage::Storage;
use crate::HarvestError;
use std::io::Write;

/// Lists every record whose URL starts with `prefix`
///
/// Returns the number of records printed.
pub fn query_prefix<S, W>(storage: &S, prefix: &str, mut output: W) -> Result<usize, HarvestError>
where
    S: Storage + ?Sized,
    W: Write,
{
    let (count, listing) = render_matches(storage, prefix)?;
    write!(output, "{}", listing)?;
    Ok(count)
}

/// Prompts for a prefix, then lists matching records
pub fn prompt_and_query<S, P>(storage: &S, prompter: &mut P) -> Result<usize, HarvestError>
where
    S: Storage + ?Sized,
    P: Prompter + ?Sized,
{
    let Some(prefix) = prompter.prompt("Enter the domain name to fetch data")? else {
        return Ok(0);
    };

    let (count, listing) = render_matches(storage, &prefix)?;
    for line in listing.lines() {
        prompter.say(line)?;
    }

    Ok(count)
}

fn render_matches<S>(storage: &S, prefix: &str) -> Result<(usize, String), HarvestError>
where
    S: Storage + ?Sized,
{
    let records = storage.find_urls_by_prefix(prefix)?;

    if records.is_empty() {
        return Ok((0, format!("No data found for domain: {}\n", prefix)));
    }

    let listing = records.iter().map(format_record).collect();
    Ok((records.len(), listing))
}
