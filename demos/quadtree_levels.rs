//! Index an arena-owned quadtree by depth and walk it level by level.
//!
//! The tree owns its nodes in a `Vec`; the registry only stores indices into it.
//! Run with `RUST_LOG=debug` to see registry events.
use kopt::{DepthError, DepthRegistry, GridCoord};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Points per leaf before it splits
const LEAF_CAPACITY: usize = 2;
/// Deepest level the demo subdivides to
const MAX_DEPTH: usize = 4;
/// Side length of the unit square grid at the deepest level
const WORLD: u32 = 1 << MAX_DEPTH;

#[derive(Debug)]
struct QuadNode {
    depth: usize,
    x: GridCoord,
    y: GridCoord,
    points: Vec<(u32, u32)>,
    children: Option<[usize; 4]>,
}

struct Quadtree {
    nodes: Vec<QuadNode>,
    registry: DepthRegistry<usize>,
}

impl Quadtree {
    fn new() -> Self {
        let mut registry = DepthRegistry::new();
        registry.add_root(0);
        Self {
            nodes: vec![QuadNode { depth: 0, x: 0, y: 0, points: Vec::new(), children: None }],
            registry,
        }
    }

    fn insert(&mut self, point: (u32, u32)) -> Result<(), DepthError> {
        let mut index = 0;
        while let Some(children) = self.nodes[index].children {
            index = children[self.quadrant(index, point)];
        }
        self.nodes[index].points.push(point);
        if self.nodes[index].points.len() > LEAF_CAPACITY && self.nodes[index].depth < MAX_DEPTH {
            self.subdivide(index)?;
        }
        Ok(())
    }

    fn quadrant(&self, index: usize, (px, py): (u32, u32)) -> usize {
        let node = &self.nodes[index];
        let cell = WORLD >> node.depth;
        let right = px >= u32::from(node.x) * cell + cell / 2;
        let top = py >= u32::from(node.y) * cell + cell / 2;
        usize::from(right) + 2 * usize::from(top)
    }

    fn subdivide(&mut self, index: usize) -> Result<(), DepthError> {
        let (depth, x, y) = {
            let node = &self.nodes[index];
            (node.depth + 1, node.x * 2, node.y * 2)
        };
        let mut children = [0; 4];
        for (quadrant, child) in children.iter_mut().enumerate() {
            let cx = x + GridCoord::from(quadrant % 2 == 1);
            let cy = y + GridCoord::from(quadrant >= 2);
            *child = self.nodes.len();
            self.nodes.push(QuadNode { depth, x: cx, y: cy, points: Vec::new(), children: None });
            let displaced = self.registry.add_node(depth, cx, cy, *child)?;
            debug_assert!(displaced.is_none(), "cell registered twice");
        }
        self.nodes[index].children = Some(children);

        for point in std::mem::take(&mut self.nodes[index].points) {
            let child = children[self.quadrant(index, point)];
            self.nodes[child].points.push(point);
        }
        for child in children {
            if self.nodes[child].points.len() > LEAF_CAPACITY && depth < MAX_DEPTH {
                self.subdivide(child)?;
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), DepthError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = Quadtree::new();
    let points = [(1, 1), (2, 3), (3, 2), (12, 12), (13, 14), (14, 13), (15, 15), (6, 9)];
    for point in points {
        tree.insert(point)?;
    }
    info!(nodes = tree.nodes.len(), registered = tree.registry.len(), "tree built");

    for depth in 0..=MAX_DEPTH {
        let level = tree.registry.get_nodes(depth)?;
        if level.is_empty() {
            continue;
        }
        println!("depth {depth}: {} node(s)", level.len());
        for (key, &index) in level {
            let node = &tree.nodes[index];
            println!(
                "  key {:>4} -> cell ({}, {}) points {:?}",
                key, node.x, node.y, node.points
            );
        }
    }

    let probe = tree.registry.key(3, 3);
    match tree.registry.get_node(2, probe)? {
        Some(index) => println!("cell (3, 3) at depth 2 is node {index}"),
        None => println!("cell (3, 3) at depth 2 is not subdivided"),
    }
    Ok(())
}
