use crate::deliveries::{DeliveriesProblemInput, RoadCostOracle, Roads};
use crate::search::{Heuristic, HeuristicValue, SearchProblem, Successors, Transition};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

/// Install a subscriber printing through the test harness. Filtered by
/// `RUST_LOG`, so silent by default.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// States `0..=length` on a line, each step forward costs 1.
#[derive(Debug)]
pub struct LineProblem {
    initial_state: u32,
    goal: u32,
    length: u32,
    finalised: u32,
}

impl LineProblem {
    pub fn new(initial_state: u32, goal: u32) -> Self {
        Self {
            initial_state,
            goal,
            length: 100,
            finalised: 0,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// How many searches of this problem have terminated.
    pub fn finalised(&self) -> u32 {
        self.finalised
    }
}

impl SearchProblem for LineProblem {
    type State = u32;

    fn name(&self) -> String {
        format!("Line({} -> {})", self.initial_state, self.goal)
    }

    fn initial_state(&self) -> &u32 {
        &self.initial_state
    }

    fn is_goal(&self, state: &u32) -> bool {
        *state == self.goal
    }

    fn expand<'a>(&'a mut self, state: &'a u32) -> Successors<'a, u32> {
        Box::new(
            (*state < self.length)
                .then(|| Transition::new(state + 1, 1.))
                .into_iter(),
        )
    }

    fn finalise_search(&mut self) {
        self.finalised += 1;
    }
}

/// An explicit weighted digraph over `0..n`, searched from 0.
#[derive(Debug)]
pub struct GraphProblem {
    initial_state: u32,
    goal: u32,
    adjacency: Vec<Vec<(u32, f64)>>,
}

impl GraphProblem {
    pub fn new(node_count: usize, edges: &[(u32, u32, f64)], goal: u32) -> Self {
        let mut adjacency = vec![vec![]; node_count];
        for &(from, to, cost) in edges {
            adjacency[from as usize].push((to, cost));
        }
        Self {
            initial_state: 0,
            goal,
            adjacency,
        }
    }

    /// Two routes to 4: the short one through 1 costs 10, the long one
    /// through 2 and 3 costs 4.
    pub fn diamond() -> Self {
        Self::new(
            5,
            &[(0, 1, 1.), (0, 2, 1.), (1, 4, 9.), (2, 3, 1.), (3, 4, 2.)],
            4,
        )
    }

    /// The goal 5 has no incoming edges.
    pub fn disconnected() -> Self {
        Self::new(6, &[(0, 1, 1.)], 5)
    }

    pub fn line(n: u32) -> Self {
        let edges: Vec<_> = (0..n).map(|i| (i, i + 1, 1.)).collect();
        Self::new(n as usize + 1, &edges, n)
    }

    /// 0 connected to each of `1..=n`, goal `n`.
    pub fn star(n: u32) -> Self {
        let edges: Vec<_> = (1..=n).map(|i| (0, i, 1.)).collect();
        Self::new(n as usize + 1, &edges, n)
    }

    /// `n` by `n` four-connected grid, from corner 0 to corner `n * n - 1`.
    pub fn grid(n: u32) -> Self {
        let mut edges = vec![];
        for row in 0..n {
            for col in 0..n {
                let here = row * n + col;
                if col + 1 < n {
                    edges.push((here, here + 1, 1.));
                    edges.push((here + 1, here, 1.));
                }
                if row + 1 < n {
                    edges.push((here, here + n, 1.));
                    edges.push((here + n, here, 1.));
                }
            }
        }
        Self::new((n * n) as usize, &edges, n * n - 1)
    }
}

impl SearchProblem for GraphProblem {
    type State = u32;

    fn name(&self) -> String {
        format!("Graph(goal: {})", self.goal)
    }

    fn initial_state(&self) -> &u32 {
        &self.initial_state
    }

    fn is_goal(&self, state: &u32) -> bool {
        *state == self.goal
    }

    fn expand<'a>(&'a mut self, state: &'a u32) -> Successors<'a, u32> {
        Box::new(
            self.adjacency[*state as usize]
                .iter()
                .map(|&(to, cost)| Transition::new(to, cost)),
        )
    }
}

/// `|goal - state|`, admissible on [`LineProblem`] and on
/// [`GraphProblem::line`].
#[derive(Debug)]
pub struct IndexDistanceHeuristic {
    goal: u32,
}

impl IndexDistanceHeuristic {
    pub fn new(goal: u32) -> Self {
        Self { goal }
    }
}

impl Heuristic<u32> for IndexDistanceHeuristic {
    fn name(&self) -> &'static str {
        "IndexDistance"
    }

    fn evaluate(&mut self, state: &u32) -> HeuristicValue {
        f64::from(self.goal.abs_diff(*state)).into()
    }
}

/// Fixed values per state, `default` for the rest.
#[derive(Debug)]
pub struct TableHeuristic {
    values: HashMap<u32, f64>,
    default: f64,
}

impl TableHeuristic {
    pub fn new(values: &[(u32, f64)], default: f64) -> Self {
        Self {
            values: values.iter().copied().collect(),
            default,
        }
    }
}

impl Heuristic<u32> for TableHeuristic {
    fn name(&self) -> &'static str {
        "Table"
    }

    fn evaluate(&mut self, state: &u32) -> HeuristicValue {
        self.values
            .get(state)
            .copied()
            .unwrap_or(self.default)
            .into()
    }
}

/// Road costs looked up in a symmetric table, counting how often it is
/// asked. Pairs missing from the table are unreachable.
#[derive(Debug)]
pub struct TableOracle {
    costs: HashMap<(usize, usize), f64>,
    queries: u64,
}

impl TableOracle {
    pub fn new(costs: &[((usize, usize), f64)]) -> Self {
        Self {
            costs: costs
                .iter()
                .map(|&((a, b), cost)| ((a.min(b), a.max(b)), cost))
                .collect(),
            queries: 0,
        }
    }

    pub fn queries(&self) -> u64 {
        self.queries
    }
}

impl RoadCostOracle for TableOracle {
    fn path_cost(&mut self, source: usize, target: usize) -> Option<f64> {
        self.queries += 1;
        self.costs
            .get(&(source.min(target), source.max(target)))
            .copied()
    }
}

/// Unit square 0 (0,0), 1 (1,0), 2 (1,1), 3 (0,1) with roads along
/// its sides, plus junction 4 at (5,5) that no road touches.
pub fn square_roads() -> Roads {
    let mut roads = Roads::new();
    for (x, y) in [(0., 0.), (1., 0.), (1., 1.), (0., 1.), (5., 5.)] {
        roads.add_junction(x, y);
    }
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
        roads.add_link(a, b, 1.).unwrap();
    }
    roads
}

/// 0 (0,0) and 1 (5,0) are only connected through 2 (2,2), by roads of
/// length 3 and 4.
pub fn line_roads() -> Roads {
    let mut roads = Roads::new();
    for (x, y) in [(0., 0.), (5., 0.), (2., 2.)] {
        roads.add_junction(x, y);
    }
    roads.add_link(0, 2, 3.).unwrap();
    roads.add_link(2, 1, 4.).unwrap();
    roads
}

/// Junctions 0, 1, 2, 3 at x = 0, 3, 4, 8 on a straight road.
pub fn corridor_roads() -> Roads {
    let mut roads = Roads::new();
    for x in [0., 3., 4., 8.] {
        roads.add_junction(x, 0.);
    }
    roads.add_link(0, 1, 3.).unwrap();
    roads.add_link(1, 2, 1.).unwrap();
    roads.add_link(2, 3, 4.).unwrap();
    roads
}

/// From 0 to the single drop point 1 on [`line_roads`], 5 km away by air
/// and 7 km by road.
pub fn single_drop_input(fuel: f64) -> DeliveriesProblemInput {
    DeliveriesProblemInput::from_roads("single", &line_roads(), 0, &[1], &[], 10., fuel)
        .unwrap()
}

/// On [`corridor_roads`], start at 0 with 4 liters and a 6 liter tank, drop
/// points 1 and 3, gas station 2. Drop point 3 is only reachable after
/// refuelling.
pub fn gas_detour_input() -> DeliveriesProblemInput {
    DeliveriesProblemInput::from_roads("gas_detour", &corridor_roads(), 0, &[1, 3], &[2], 6., 4.)
        .unwrap()
}

/// Start at (0,0), drop points at (3,0), (3,4) and (0,4), plenty of fuel.
pub fn scattered_input() -> DeliveriesProblemInput {
    let mut roads = Roads::new();
    for (x, y) in [(0., 0.), (3., 0.), (3., 4.), (0., 4.)] {
        roads.add_junction(x, y);
    }
    DeliveriesProblemInput::from_roads("scattered", &roads, 0, &[1, 2, 3], &[], 100., 100.)
        .unwrap()
}
