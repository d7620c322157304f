//! Infinite feed example driving a headless list view through a few pages
//! and a pull-to-refresh.
//!
//! Run with: cargo run -p lattice-paging --example infinite_feed
//!
//! Set `RUST_LOG=lattice_paging=debug` to watch the mediator work.

use std::sync::{Arc, Weak};

use lattice_paging::prelude::*;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

const PAGE_SIZE: usize = 15;
const MAX_ITEMS: usize = 45;
/// Event-loop turns a simulated fetch takes.
const LATENCY_TURNS: usize = 3;

struct Feed {
    weak_self: Weak<Feed>,
    items: Mutex<Vec<String>>,
    queue: Arc<SharedTaskQueue>,
    mediator: Mutex<Weak<PagingMediator>>,
}

impl Feed {
    fn new(queue: Arc<SharedTaskQueue>) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            weak_self: weak_self.clone(),
            items: Mutex::new(Vec::new()),
            queue,
            mediator: Mutex::new(Weak::new()),
        })
    }

    fn fetch(&self, more: bool) {
        let feed = self.weak_self.clone();
        let mediator = self.mediator.lock().clone();
        delayed(&self.queue, LATENCY_TURNS, move || {
            if let Some(feed) = feed.upgrade() {
                let mut items = feed.items.lock();
                if !more {
                    items.clear();
                }
                let start = items.len();
                items.extend((start..start + PAGE_SIZE).map(|i| format!("Post #{i}")));
                tracing::info!(items = items.len(), "page arrived");
            }
            if let Some(mediator) = mediator.upgrade() {
                mediator.stop_loading();
            }
        });
    }
}

/// Runs `task` after `turns` event-loop turns.
fn delayed<F>(queue: &Arc<SharedTaskQueue>, turns: usize, task: F)
where
    F: FnOnce() + Send + 'static,
{
    if turns == 0 {
        queue.post(task);
        return;
    }
    let next = queue.clone();
    queue.post(move || delayed(&next, turns - 1, task));
}

impl ContentProvider for Feed {
    fn row_count(&self, _section: usize) -> usize {
        self.items.lock().len()
    }

    fn cell(&self, index: &IndexPath) -> Cell {
        Cell::new(self.items.lock()[index.row()].clone()).with_detail("just now")
    }
}

impl EventObserver for Feed {
    fn load_more(&self, more: bool) -> bool {
        if more && self.items.lock().len() >= MAX_ITEMS {
            tracing::info!("no more posts");
            return false;
        }
        tracing::info!(more, "fetching");
        self.fetch(more);
        true
    }

    fn did_select_row(&self, index: &IndexPath) {
        tracing::info!(%index, "selected");
    }

    fn responds_to(&self, selector: Selector) -> bool {
        matches!(selector, Selector::LoadMore | Selector::DidSelectRow)
    }
}

fn run_until_idle(queue: &SharedTaskQueue, view: &ListView) {
    let mut turn = 0;
    while queue.has_pending() {
        turn += 1;
        queue.process_turn();
        tracing::debug!(turn, rows = view.row_count(0), "turn");
    }
}

fn print_visible(view: &ListView) {
    for (index, cell) in view.visible_cells() {
        println!("  {index} {}", cell.text);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let queue = Arc::new(SharedTaskQueue::new());
    let view = Arc::new(ListView::new().with_viewport_extent(300.0));
    let feed = Feed::new(queue.clone());

    let config = MediatorConfig::from_toml_str(
        r#"
        indicator_text = "Loading more posts..."
        prefetch_distance = 88.0
        "#,
    )?;
    let mediator = PagingMediator::with_config(&view, config)?;
    mediator.register(&feed, &feed);
    *feed.mediator.lock() = Arc::downgrade(&mediator);

    mediator
        .loading_state_changed
        .connect(|loading| tracing::info!(loading, "loading state"));

    // First page, as if the screen just appeared.
    mediator.start_loading_more(true);
    println!("While the first page loads:");
    print_visible(&view);
    run_until_idle(&queue, &view);

    // Keep flinging to the end until the feed runs dry.
    while view.row_count(0) < MAX_ITEMS {
        view.scroll_to_bottom();
        run_until_idle(&queue, &view);
    }
    view.scroll_to_bottom();
    println!("After paging, {} posts:", view.row_count(0));
    print_visible(&view);

    view.select(&IndexPath::new(0, 2));

    view.scroll_to(0.0);
    view.pull_to_refresh();
    run_until_idle(&queue, &view);
    println!("After refresh, {} posts:", view.row_count(0));
    print_visible(&view);

    Ok(())
}
