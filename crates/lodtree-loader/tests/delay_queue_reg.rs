//! Delay queue regression test
//!
//! Drives a delay queue with requests for the chunks of a real octree,
//! the way a renderer would: everything in view is requested, the view
//! moves, and requests for chunks no longer needed are cancelled before
//! they are submitted. The delay itself can come from the build config.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use lodtree_loader::{ChunkRequest, DelayQueue};
use lodtree_octree::{Octree, OctreeConfig, Rect};
use lodtree_test::{RegParams, TestImageFactory};

const LAYER: u64 = 3;

#[test]
fn delay_queue_reg() {
    let mut rp = RegParams::new("delay_queue");
    let mut factory = TestImageFactory::new("delay_queue");

    let source = factory.gradient(64, 64, 1).expect("gradient");
    let config = OctreeConfig::default().with_tile_size(16);
    let tree = Octree::from_image(&source.image, &config).expect("build");

    // --- Test 1: requests arrive after the delay, in order ---
    let (tx, rx) = mpsc::channel();
    let delay = Duration::from_millis(30);
    let queue = DelayQueue::new(delay, move |request: ChunkRequest| {
        tx.send((request, Instant::now())).ok();
    });
    let chunks = tree.chunks_for_level(0).expect("chunks");
    for chunk in &chunks[..4] {
        queue.add(ChunkRequest::for_chunk(LAYER, chunk));
    }
    let mut received = Vec::new();
    for _ in 0..4 {
        let (request, at) = rx.recv_timeout(Duration::from_secs(5)).expect("submitted");
        rp.check(at.duration_since(request.created) >= delay, "held for the delay");
        received.push(request.key);
    }
    let expected: Vec<_> = chunks[..4]
        .iter()
        .map(|c| ChunkRequest::for_chunk(LAYER, c).key)
        .collect();
    rp.check(received == expected, "submitted oldest first");
    rp.check(queue.is_empty(), "queue drained");

    // --- Test 2: cancel requests that left the view ---
    let (tx, rx) = mpsc::channel();
    let queue = DelayQueue::new(Duration::from_secs(60), move |request: ChunkRequest| {
        tx.send(request).ok();
    });
    for chunk in tree.chunks_for_level(0).expect("chunks") {
        queue.add(ChunkRequest::for_chunk(LAYER, &chunk));
    }
    rp.compare_values(16.0, queue.len() as f64, 0.0);

    let view = Rect::new(0.0, 0.0, 0.5, 0.5);
    let cancelled = queue.cancel_requests(|request| {
        let location = request.key.location();
        tree.tile_at(&location).is_ok()
            && !tree
                .visible_chunks(location.level_index, &view)
                .map(|visible| visible.iter().any(|c| c.location() == location))
                .unwrap_or(false)
    });
    rp.compare_values(12.0, cancelled.len() as f64, 0.0);
    rp.compare_values(4.0, queue.len() as f64, 0.0);
    rp.check(rx.try_recv().is_err(), "nothing submitted before flush");

    // --- Test 3: flush submits the rest now ---
    queue.flush();
    let flushed: Vec<ChunkRequest> = rx.try_iter().collect();
    rp.compare_values(4.0, flushed.len() as f64, 0.0);
    let in_view = flushed
        .iter()
        .all(|r| r.key.row < 2 && r.key.col < 2 && r.key.layer_id == LAYER);
    rp.check(in_view, "only chunks in view were submitted");

    // --- Test 4: dropping discards pending requests ---
    queue.add(ChunkRequest::for_chunk(LAYER, &tree.chunks_for_level(1).expect("chunks")[0]));
    drop(queue);
    rp.check(
        matches!(rx.try_recv(), Err(mpsc::TryRecvError::Disconnected)),
        "pending request discarded on drop",
    );

    // --- Test 5: zero delay submits on add ---
    let (tx, rx) = mpsc::channel();
    let queue = DelayQueue::new(Duration::ZERO, move |request: ChunkRequest| {
        tx.send(request).ok();
    });
    let root = tree.chunks_for_level(tree.num_levels() - 1).expect("root chunks");
    queue.add(ChunkRequest::for_chunk(LAYER, &root[0]));
    rp.check(rx.try_recv().is_ok(), "submitted synchronously");
    rp.check(queue.is_empty(), "nothing queued");

    // --- Test 6: delay taken from the build config ---
    let (tx, rx) = mpsc::channel();
    let config = config.with_delay_queue_ms(20);
    let queue = DelayQueue::from_config(&config, move |request: ChunkRequest| {
        tx.send((request, Instant::now())).ok();
    });
    rp.check(queue.delay() == Duration::from_millis(20), "delay read from config");
    queue.add(ChunkRequest::for_chunk(LAYER, &root[0]));
    let (request, at) = rx.recv_timeout(Duration::from_secs(5)).expect("submitted");
    rp.check(
        at.duration_since(request.created) >= config.delay_queue_delay(),
        "held for the configured delay",
    );
    let defaults = DelayQueue::<ChunkRequest>::from_config(&OctreeConfig::default(), |_| {});
    rp.compare_values(100.0, defaults.delay().as_millis() as f64, 0.0);

    assert!(rp.cleanup(), "delay_queue regression test failed");
}
