//! Simulated infinite feed.
//!
//! Walks a viewport down a growing list one item at a time. Each time a
//! sentinel item scrolls into view the controller requests the next page,
//! the "render layer" appends it, and the watches are re-armed for the
//! new indices. Run with `RUST_LOG=debug` to see the arbitration.

use std::cell::Cell;
use std::rc::Rc;

use scrollfetch_core::{
    MemorySessionStore, ScrollFetchController, ScrollFetchOptions, SentinelElement, TriggerPoint,
};
use scrollfetch_testing::FakeViewport;

const PAGE_SIZE: usize = 10;
const MAX_PAGES: usize = 5;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let viewport = FakeViewport::new();
    // The fetch action only signals; the "network" answer is applied by
    // the render loop below. The controller never awaits it.
    let page_requested = Rc::new(Cell::new(false));
    let request_flag = page_requested.clone();

    let mut controller = ScrollFetchController::new(
        Rc::new(viewport.clone()),
        Rc::new(MemorySessionStore::new()),
        ScrollFetchOptions::new().with_trigger_point(TriggerPoint::HALF),
        move || request_flag.set(true),
    );

    let mut item_count = PAGE_SIZE;
    let mut pages = 1;
    render(&mut controller, item_count);
    log::info!("feed starts with {item_count} items");

    let mut position = 0;
    while position < item_count {
        viewport.emit(position, true);

        if page_requested.replace(false) && pages < MAX_PAGES {
            pages += 1;
            item_count += PAGE_SIZE;
            render(&mut controller, item_count);
            let indices = controller.indices().expect("list is non-empty");
            log::info!(
                "item {position} triggered page {pages}; {item_count} items, \
                 sentinels at {} and {}",
                indices.primary,
                indices.fallback
            );
        }

        viewport.emit(position, false);
        position += 1;
    }

    controller.disconnect();
    log::info!("scrolled the whole feed: {pages} pages, {item_count} items");
}

fn render(controller: &mut ScrollFetchController, item_count: usize) {
    controller.reconfigure(item_count, |index| {
        (index < item_count).then(|| SentinelElement::new(index as u64, index))
    });
}
