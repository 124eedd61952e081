//! Handler for the `fetch` command.

use serde_json::json;

use super::command::FetchArgs;
use super::{context, output};
use crate::adapter::outbound::file::SnapshotFile;
use crate::adapter::outbound::hypixel::HypixelClient;
use crate::application::market::acquire_quotes;
use crate::error::Result;
use crate::port::outbound::store::QuoteStore;

/// Execute `fetch`: capture live quotes into `bazaar_info` and the snapshot file.
pub async fn execute(args: &FetchArgs) -> Result<()> {
    let (config, store) = context::prepare(&args.store)?;
    let client = HypixelClient::from_config(&config.market.hypixel);

    output::header(env!("CARGO_PKG_VERSION"));
    let pb = output::spinner("Fetching bazaar quotes");
    let snapshot = match acquire_quotes(&client, None).await {
        Ok(snapshot) => {
            output::spinner_success(&pb, &format!("Fetched {} quotes", snapshot.len()));
            snapshot
        }
        Err(err) => {
            output::spinner_fail(&pb, "Bazaar fetch failed");
            return Err(err);
        }
    };

    let stored = store.replace_quotes(&snapshot)?;
    let snapshot_path = if config.market.write_snapshot && !args.no_snapshot {
        let file = SnapshotFile::new(&config.market.snapshot_path);
        file.write(&snapshot)?;
        Some(config.market.snapshot_path.clone())
    } else {
        None
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "fetch",
            "quotes": stored,
            "captured_at": snapshot.captured_at().to_rfc3339(),
            "snapshot_path": snapshot_path,
        }));
        return Ok(());
    }

    output::section("Bazaar snapshot");
    output::field("Quotes", stored);
    output::field("Captured", snapshot.captured_at().format("%Y-%m-%d %H:%M:%S UTC"));
    if let Some(path) = snapshot_path {
        output::field("Snapshot", path);
    }
    output::success("Stored quotes in bazaar_info");
    Ok(())
}
