use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Range;
use crate::map::{StarId, Starmap};
use crate::spatial::SpatialIndex;

/// Options controlling how connections are derived from star positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphBuildOptions {
    /// Stars connect to every other star at distance `d` with `min < d <= max`.
    pub connection_range: Range,
    /// Run the spanning pass before the range pass so the graph is connected.
    pub guarantee_connectivity: bool,
}

/// Undirected star connections, stored per star and symmetric by construction.
///
/// Neighbour order is insertion order: spanning edges first, then range edges
/// in star order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<Vec<Vec<StarId>>>,
}

impl Graph {
    /// Build a graph from an explicit edge list. Self-loops and duplicates are
    /// ignored.
    pub fn from_edges(star_count: usize, edges: &[(StarId, StarId)]) -> Self {
        let mut builder = AdjacencyBuilder::new(star_count);
        for &(a, b) in edges {
            builder.connect(a, b);
        }
        builder.finish()
    }

    /// Number of stars the graph covers.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Return the neighbours for a given star.
    pub fn neighbours(&self, star: StarId) -> &[StarId] {
        self.adjacency
            .get(star)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn are_connected(&self, a: StarId, b: StarId) -> bool {
        self.neighbours(a).contains(&b)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns true when every edge is listed on both of its ends.
    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().enumerate().all(|(star, neighbours)| {
            neighbours
                .iter()
                .all(|&other| self.neighbours(other).contains(&star))
        })
    }

    /// Breadth-first reachability from `start`, indexed by star id.
    pub fn reachable_from(&self, start: StarId) -> Vec<bool> {
        let mut visited = vec![false; self.len()];
        if start >= self.len() {
            return visited;
        }

        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(current) = queue.pop_front() {
            for &next in self.neighbours(current) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        visited
    }

    /// Returns true when every star is reachable from every other star.
    pub fn is_connected(&self) -> bool {
        self.is_empty() || self.reachable_from(0).into_iter().all(|seen| seen)
    }

    /// The star with the most connections; the first one wins ties.
    pub fn most_connected(&self) -> Option<StarId> {
        self.adjacency
            .iter()
            .enumerate()
            .fold(None, |best: Option<(StarId, usize)>, (star, neighbours)| {
                match best {
                    Some((_, degree)) if degree >= neighbours.len() => best,
                    _ => Some((star, neighbours.len())),
                }
            })
            .map(|(star, _)| star)
    }
}

/// Derive connections for `starmap`.
///
/// With `guarantee_connectivity` a spanning pass links every star first; the
/// range pass then layers its connections on top, so the result is the union.
pub fn build_graph(starmap: &Starmap, options: &GraphBuildOptions) -> Graph {
    let mut builder = AdjacencyBuilder::new(starmap.len());

    if options.guarantee_connectivity {
        add_spanning_edges(starmap, &mut builder);
    }

    let index = SpatialIndex::build(starmap);
    let fallbacks = add_range_edges(starmap, &index, options.connection_range, &mut builder);

    let graph = builder.finish();
    info!(
        stars = graph.len(),
        edges = graph.edge_count(),
        fallbacks,
        spanning = options.guarantee_connectivity,
        "built star graph"
    );
    graph
}

/// Prim-style spanning pass seeded from star 0: repeatedly link the closest
/// (visited, unvisited) pair until every star is visited.
fn add_spanning_edges(starmap: &Starmap, builder: &mut AdjacencyBuilder) {
    let count = starmap.len();
    if count < 2 {
        return;
    }

    let mut visited = vec![false; count];
    // Closest visited star for every unvisited star.
    let mut best: Vec<Option<(f64, StarId)>> = vec![None; count];

    visited[0] = true;
    relax_from(starmap, 0, &visited, &mut best);

    for _ in 1..count {
        let next = best
            .iter()
            .enumerate()
            .filter(|(star, _)| !visited[*star])
            .filter_map(|(star, entry)| entry.map(|(distance, from)| (star, distance, from)))
            .fold(None, |closest: Option<(StarId, f64, StarId)>, candidate| {
                match closest {
                    Some((_, distance, _)) if distance <= candidate.1 => closest,
                    _ => Some(candidate),
                }
            });

        let Some((star, _, from)) = next else {
            break;
        };

        builder.connect(from, star);
        visited[star] = true;
        relax_from(starmap, star, &visited, &mut best);
    }

    debug!(edges = count - 1, "spanning pass complete");
}

fn relax_from(
    starmap: &Starmap,
    from: StarId,
    visited: &[bool],
    best: &mut [Option<(f64, StarId)>],
) {
    for other in starmap.ids() {
        if visited[other] {
            continue;
        }
        let distance = starmap.distance(from, other);
        match best[other] {
            Some((current, _)) if current <= distance => {}
            _ => best[other] = Some((distance, from)),
        }
    }
}

/// Range pass: connect each star to every star in its `(min, max]` window, or
/// to its nearest star when the window is empty. Returns the fallback count.
fn add_range_edges(
    starmap: &Starmap,
    index: &SpatialIndex,
    range: Range,
    builder: &mut AdjacencyBuilder,
) -> usize {
    let mut fallbacks = 0;

    for star in starmap.stars() {
        let candidates: Vec<StarId> = index
            .within_radius(star.position, range.max)
            .into_iter()
            .filter(|&(other, distance)| other != star.id && distance > range.min)
            .map(|(other, _)| other)
            .collect();

        if candidates.is_empty() {
            if let Some((nearest, distance)) = index.nearest_excluding(star.position, star.id) {
                debug!(
                    star = star.id,
                    nearest,
                    distance,
                    "no stars in range; connecting to nearest"
                );
                builder.connect(star.id, nearest);
                fallbacks += 1;
            }
            continue;
        }

        for other in candidates {
            builder.connect(star.id, other);
        }
    }

    fallbacks
}

struct AdjacencyBuilder {
    adjacency: Vec<Vec<StarId>>,
}

impl AdjacencyBuilder {
    fn new(star_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); star_count],
        }
    }

    /// Add an undirected edge to both ends unless already present.
    fn connect(&mut self, a: StarId, b: StarId) {
        if a == b || a >= self.adjacency.len() || b >= self.adjacency.len() {
            return;
        }
        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
        }
        if !self.adjacency[b].contains(&a) {
            self.adjacency[b].push(a);
        }
    }

    fn finish(self) -> Graph {
        Graph {
            adjacency: Arc::new(self.adjacency),
        }
    }
}
