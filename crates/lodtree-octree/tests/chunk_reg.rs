//! Chunk regression test
//!
//! Chunks of every level lie inside the unit square and tile it without
//! gaps along the level's longer axis. View queries return exactly the
//! chunks whose cells overlap the view.

use lodtree_octree::{ChunkLocation, Octree, OctreeConfig, Rect};
use lodtree_test::{RegParams, TestImageFactory};

const EPS: f64 = 1e-12;

#[test]
fn chunk_reg() {
    let mut rp = RegParams::new("chunk");
    let mut factory = TestImageFactory::new("chunk");
    let config = OctreeConfig::default().with_tile_size(16);

    // --- Test 1: placement inside the unit square ---
    for (height, width) in [(64, 64), (100, 30), (20, 200), (1, 1)] {
        let source = factory.gradient(height, width, 1).expect("gradient");
        let tree = Octree::from_image(&source.image, &config).expect("build");
        for index in 0..tree.num_levels() {
            let level = tree.level(index).expect("level");
            let chunks = tree.chunks_for_level(index).expect("chunks");
            rp.compare_values(level.num_tiles() as f64, chunks.len() as f64, 0.0);

            let size = 1.0 / level.rows().max(level.cols()) as f64;
            let outside = chunks
                .iter()
                .filter(|c| {
                    let (x, y) = c.pos();
                    x < 0.0 || y < 0.0 || x > 1.0 - c.size() + EPS || y > 1.0 - c.size() + EPS
                })
                .count();
            rp.compare_values(0.0, outside as f64, 0.0);
            let wrong_size = chunks.iter().filter(|c| (c.size() - size).abs() > EPS).count();
            rp.compare_values(0.0, wrong_size as f64, 0.0);
        }
    }

    // --- Test 2: square grid uses 1/rows ---
    let source = factory.gradient(64, 64, 3).expect("gradient");
    let tree = Octree::from_image(&source.image, &config).expect("build");
    let chunks = tree.chunks_for_level(0).expect("chunks");
    rp.compare_values(0.25, chunks[0].size(), EPS);
    let last = chunks[15];
    rp.compare_values(0.75, last.pos().0, EPS);
    rp.compare_values(0.75, last.pos().1, EPS);
    rp.check(
        last.location() == ChunkLocation::new(0, 3, 3),
        "last chunk is (3, 3)",
    );
    let tile = tree.tile_at(&last.location()).expect("tile");
    rp.compare_images(tile.data(), last.data());

    // --- Test 3: visible chunks ---
    let view = Rect::new(0.1, 0.6, 0.3, 0.2);
    let visible = tree.visible_chunks(0, &view).expect("visible");
    let locations: Vec<(usize, usize)> = visible
        .iter()
        .map(|c| (c.location().row, c.location().col))
        .collect();
    rp.check(
        locations == vec![(2, 0), (2, 1), (3, 0), (3, 1)],
        "view covers rows 2-3, cols 0-1",
    );

    let full = tree.visible_chunks(0, &Rect::unit()).expect("visible");
    rp.compare_values(16.0, full.len() as f64, 0.0);

    let root = tree.visible_chunks(tree.num_levels() - 1, &view).expect("visible");
    rp.compare_values(1.0, root.len() as f64, 0.0);

    let edge = Rect::new(0.25, 0.0, 0.25, 0.25);
    let touching = tree.visible_chunks(0, &edge).expect("visible");
    rp.compare_values(1.0, touching.len() as f64, 0.0);

    // --- Test 4: chunks agree with parent/child navigation ---
    let location = ChunkLocation::new(0, 3, 2);
    let parent = tree.parent(&location).expect("parent").expect("has parent");
    rp.check(parent == ChunkLocation::new(1, 1, 1), "parent of (3, 2)");
    let children = tree.children(&parent).expect("children");
    rp.check(children.contains(&location), "child list contains (3, 2)");
    let parent_chunk = tree.chunks_for_level(1).expect("chunks")[3];
    let child_chunk = tree.chunks_for_level(0).expect("chunks")[14];
    rp.check(
        parent_chunk.bounds().intersects(&child_chunk.bounds()),
        "child lies inside its parent",
    );

    assert!(rp.cleanup(), "chunk regression test failed");
}
