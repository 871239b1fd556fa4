use clap::Parser;
use dom_store::DomStore;
use std::error::Error;
use std::thread;
use std::time::Duration;
use vdom::debug::{outline_edit, outline_view};
use vdom::snapshot::SnapshotOptions;
use vdom::{ViewNode, apply, diff_trees, h, mount, props, text};

#[derive(Parser, Debug)]
#[command(name = "reconcile")]
#[command(about = "Re-renders a growing list and patches an in-memory host tree")]
struct DemoConfig {
    /// Number of re-render passes after the initial mount
    #[arg(long, default_value = "7")]
    passes: u32,

    /// Delay before each pass (milliseconds)
    #[arg(long, default_value = "1000")]
    interval_ms: u64,

    /// Maximum outline lines logged per pass
    #[arg(long, default_value = "24")]
    outline_cap: usize,
}

fn view(count: i64) -> ViewNode {
    let items: Vec<ViewNode> = (0..count)
        .map(|n| h("li", None, vec![text("item "), text((count * n).to_string())]))
        .collect();
    h(
        "ul",
        Some(props! { "id" => "filmList", "className" => format!("list-{}", count % 3) }),
        items,
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = DemoConfig::parse();
    let mut store = DomStore::new();
    let root = store.root();
    mount(&mut store, root, &view(0))?;
    log::info!("mounted {} live nodes", store.live_count());
    for line in outline_view(&view(0), config.outline_cap) {
        log::debug!("view {line}");
    }

    for count in 0..i64::from(config.passes) {
        thread::sleep(Duration::from_millis(config.interval_ms));

        let edit = diff_trees(&view(count + 1), &view(count));
        for line in outline_edit(&edit, config.outline_cap) {
            log::debug!("edit {line}");
        }
        let stats = apply(&mut store, root, edit)?;
        log::info!(
            "pass {}: {} mutations ({} created, {} replaced, {} props set)",
            count + 1,
            stats.total_mutations(),
            stats.created,
            stats.replaced,
            stats.props_set
        );

        let snapshot = store.snapshot(root, SnapshotOptions::default())?;
        for line in snapshot.as_lines().iter().take(config.outline_cap) {
            log::info!("  {line}");
        }
    }
    Ok(())
}
