//! List command implementation.

use crate::error::Result;
use crate::output::Formatter;
use wikifacts_domain::traits::ArticleStore;
use wikifacts_store::StoreError;

/// Execute the list command.
pub fn execute_list<S>(store: &S, formatter: &Formatter) -> Result<()>
where
    S: ArticleStore<Error = StoreError>,
{
    let titles = store.list_titles()?;
    println!("{}", formatter.format_titles(&titles)?);
    Ok(())
}
