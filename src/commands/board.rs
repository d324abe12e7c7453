use anyhow::Result;

use crate::board;
use crate::cli::BoardArgs;
use crate::client::ApiService;
use crate::output;
use crate::session::SessionStore;
use crate::store::EntityStore;

pub async fn show(
    api: &dyn ApiService,
    session_store: &SessionStore,
    store: &mut EntityStore,
    args: BoardArgs,
) -> Result<()> {
    super::require_login(session_store)?;
    let project_id = super::resolve_project(args.project, store)?;

    store
        .fetch_issues(api, session_store.current(), project_id)
        .await?;

    // Every render re-partitions the full list; columns are never cached.
    let columns = board::partition(store.issues());

    if output::is_json_output() {
        println!("{}", serde_json::to_string_pretty(&columns)?);
        return Ok(());
    }

    println!("{}", board::render(&columns));

    Ok(())
}
