//! A* search over 8-puzzle boards.
//!
//! The engine is generic over [`Heuristic`]; name-based selection only happens
//! in [`a_star_by_name`]. All bookkeeping lives inside one call, so independent
//! searches can run on separate threads without coordination.
//!
//! # Tie-break policy
//! When several frontier boards share the minimal f-score, the one that entered
//! the frontier earliest is expanded first. A board that was expanded and later
//! re-added counts as a new arrival. This makes the returned path and the
//! expansion count fully deterministic for a given start board and heuristic.
use crate::engine::{neighbors, Board, Move};
use crate::error::{Error, Result};
use crate::heuristics::{Heuristic, HeuristicKind};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use tracing::{debug, trace};

/// Emit a progress trace event every this many expansions.
const PROGRESS_INTERVAL: usize = 10_000;

/// An optimal path found by the solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Boards from the start to the goal, both inclusive.
    pub path: Vec<Board>,
    /// Number of boards popped from the frontier, the goal included.
    pub expanded: usize,
}

impl Solution {
    /// Number of slides in the path.
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The direction of each slide, in order.
    pub fn directions(&self) -> Vec<Move> {
        self.path
            .windows(2)
            .filter_map(|pair| Move::between(&pair[0], &pair[1]))
            .collect()
    }
}

/// Result of one search call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The goal was reached.
    Found(Solution),
    /// The frontier emptied without reaching the goal: the start board is unsolvable.
    NotFound { expanded: usize },
    /// `SearchConfig::max_expansions` was hit before the goal was reached.
    LimitReached { expanded: usize },
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }

    /// Number of expansions performed, whatever the outcome.
    pub fn expanded(&self) -> usize {
        match self {
            SearchOutcome::Found(solution) => solution.expanded,
            SearchOutcome::NotFound { expanded } | SearchOutcome::LimitReached { expanded } => {
                *expanded
            }
        }
    }
}

/// Optional limits on a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Stop with `SearchOutcome::LimitReached` once this many boards were expanded.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    pub fn with_max_expansions(max_expansions: usize) -> Self {
        SearchConfig {
            max_expansions: Some(max_expansions),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct FrontierEntry {
    f: u32,
    seq: u64,
    board: Board,
}

impl Ord for FrontierEntry {
    /// Reversed so that `BinaryHeap` pops the lowest f-score, then the earliest arrival.
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open list: a heap with lazy deletion plus an index of the current members.
///
/// `members` maps each board in the frontier to its arrival number. A heap entry
/// is live only if its board is still a member with the same arrival number and
/// its f-score is the current one; every other entry is skipped when popped.
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    members: HashMap<Board, u64>,
    next_seq: u64,
}

impl Frontier {
    /// Adds `board` with score `f`, or re-scores it if it is already a member.
    fn push(&mut self, board: Board, f: u32) {
        let seq = match self.members.get(&board) {
            Some(&seq) => seq,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.members.insert(board, seq);
                seq
            }
        };
        self.heap.push(FrontierEntry { f, seq, board });
    }

    /// Removes and returns the member with the lowest f-score.
    fn pop_min(&mut self, f_score: &HashMap<Board, u32>) -> Option<Board> {
        while let Some(entry) = self.heap.pop() {
            let live = self.members.get(&entry.board) == Some(&entry.seq)
                && f_score.get(&entry.board) == Some(&entry.f);
            if live {
                self.members.remove(&entry.board);
                return Some(entry.board);
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}

/// Rebuilds the start-to-goal path from the predecessor map.
///
/// Walks back from `goal` until it reaches a board with no predecessor (the
/// start), then reverses.
pub fn reconstruct_path(came_from: &HashMap<Board, Board>, goal: Board) -> Vec<Board> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Runs A* from `start` to the goal without limits.
///
/// `start` is expected to have passed [`crate::engine::is_solvable`]. An
/// unsolvable board is not rejected: the search exhausts its half of the state
/// space and returns `SearchOutcome::NotFound`.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::Manhattan;
/// use eight_puzzle_solver::solver::a_star;
///
/// let start = Board::new([1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// let solution = a_star(&start, &Manhattan::default()).into_solution().unwrap();
/// assert_eq!(solution.path, vec![start, Board::goal()]);
/// ```
pub fn a_star<H: Heuristic + ?Sized>(start: &Board, heuristic: &H) -> SearchOutcome {
    a_star_with_config(start, heuristic, &SearchConfig::default())
}

/// Runs A* with the heuristic selected by name (`"hamming"` or `"manhattan"`).
///
/// # Errors
/// `Error::UnknownHeuristic` for any other name; no search is started.
pub fn a_star_by_name(start: &Board, heuristic_name: &str) -> Result<SearchOutcome> {
    let kind: HeuristicKind = heuristic_name.parse()?;
    Ok(a_star(start, &kind))
}

/// Checks solvability first, then searches.
///
/// # Errors
/// `Error::Unsolvable` if `start` fails the parity check.
pub fn solve_checked<H: Heuristic + ?Sized>(
    start: &Board,
    heuristic: &H,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    if !start.is_solvable() {
        return Err(Error::Unsolvable { board: *start });
    }
    Ok(a_star_with_config(start, heuristic, config))
}

/// Runs A* from `start` to the goal, honoring `config`.
pub fn a_star_with_config<H: Heuristic + ?Sized>(
    start: &Board,
    heuristic: &H,
    config: &SearchConfig,
) -> SearchOutcome {
    let start = *start;
    debug!(heuristic = heuristic.name(), start = ?start.cells(), "starting A* search");

    let mut came_from: HashMap<Board, Board> = HashMap::new();
    let mut g_score: HashMap<Board, u32> = HashMap::new();
    let mut f_score: HashMap<Board, u32> = HashMap::new();
    let mut frontier = Frontier::default();
    let mut expanded = 0;

    g_score.insert(start, 0);
    let start_f = heuristic.estimate(&start);
    f_score.insert(start, start_f);
    frontier.push(start, start_f);

    while let Some(current) = frontier.pop_min(&f_score) {
        if config.max_expansions.is_some_and(|max| expanded >= max) {
            debug!(expanded, "expansion limit reached");
            return SearchOutcome::LimitReached { expanded };
        }
        expanded += 1;
        if expanded % PROGRESS_INTERVAL == 0 {
            trace!(expanded, frontier = frontier.len(), "search progress");
        }

        if current.is_goal() {
            let path = reconstruct_path(&came_from, current);
            debug!(expanded, moves = path.len() - 1, "goal reached");
            return SearchOutcome::Found(Solution { path, expanded });
        }

        let tentative_g = g_score[&current] + 1;
        for neighbor in neighbors(&current) {
            let improves = g_score
                .get(&neighbor)
                .map_or(true, |&known| tentative_g < known);
            if improves {
                let f = tentative_g + heuristic.estimate(&neighbor);
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                f_score.insert(neighbor, f);
                frontier.push(neighbor, f);
            }
        }
    }

    debug!(expanded, "frontier exhausted without reaching the goal");
    SearchOutcome::NotFound { expanded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GOAL;
    use crate::heuristics::{Hamming, Manhattan};
    use std::collections::VecDeque;

    fn board(cells: [u8; 9]) -> Board {
        Board::new(cells).unwrap()
    }

    fn bfs_distance(start: Board) -> Option<usize> {
        let mut seen = HashMap::from([(start, 0usize)]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            let depth = seen[&current];
            if current.is_goal() {
                return Some(depth);
            }
            for next in neighbors(&current) {
                if !seen.contains_key(&next) {
                    seen.insert(next, depth + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    fn assert_valid_path(path: &[Board], start: Board) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&Board::goal()));
        for pair in path.windows(2) {
            assert!(
                neighbors(&pair[0]).contains(&pair[1]),
                "{} -> {} is not a single slide",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_a_star_goal_is_trivial() {
        let outcome = a_star(&Board::goal(), &Manhattan::default());
        let solution = outcome.solution().expect("goal must be found");
        assert_eq!(solution.path, vec![Board::goal()]);
        assert_eq!(solution.expanded, 1);
        assert_eq!(solution.moves(), 0);
        assert!(solution.directions().is_empty());
    }

    #[test]
    fn test_a_star_one_move() {
        let start = board([3, 1, 2, 0, 4, 5, 6, 7, 8]);
        for kind in HeuristicKind::ALL {
            let solution = a_star(&start, &kind).into_solution().unwrap();
            assert_eq!(solution.path, vec![start, Board::goal()]);
            assert_eq!(solution.directions(), vec![Move::Up]);
            assert_eq!(solution.expanded, 2);
        }
    }

    #[test]
    fn test_a_star_known_scenario() {
        let start = board([1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let expected = bfs_distance(start).unwrap();
        assert_eq!(expected, 20);
        for (kind, expanded) in [(HeuristicKind::Hamming, 4399), (HeuristicKind::Manhattan, 686)] {
            let solution = a_star(&start, &kind).into_solution().unwrap();
            assert_eq!(solution.moves(), expected, "heuristic {}", kind);
            assert_eq!(solution.expanded, expanded, "heuristic {}", kind);
            assert_eq!(solution.directions().len(), expected);
            assert_eq!(&solution.directions()[..2], &[Move::Right, Move::Up]);
            assert_valid_path(&solution.path, start);
        }
    }

    #[test]
    fn test_a_star_matches_bfs_on_random_boards() {
        for seed in 0..8 {
            let start = Board::random_solvable_with_seed(seed);
            let expected = bfs_distance(start).unwrap();
            let hamming = a_star(&start, &Hamming).into_solution().unwrap();
            let manhattan = a_star(&start, &Manhattan::default()).into_solution().unwrap();
            assert_eq!(hamming.moves(), expected, "seed {}", seed);
            assert_eq!(manhattan.moves(), expected, "seed {}", seed);
            assert_valid_path(&hamming.path, start);
            assert_valid_path(&manhattan.path, start);
        }
    }

    #[test]
    fn test_a_star_unsolvable_terminates() {
        let start = board([1, 2, 3, 4, 5, 6, 8, 7, 0]);
        assert!(!start.is_solvable());
        let outcome = a_star(&start, &Manhattan::default());
        assert!(outcome.solution().is_none());
        // Every board of the unreachable parity class gets expanded exactly once.
        assert_eq!(outcome, SearchOutcome::NotFound { expanded: 181_440 });
    }

    #[test]
    fn test_a_star_expansion_limit() {
        let start = board([1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let outcome = a_star_with_config(&start, &Hamming, &SearchConfig::with_max_expansions(3));
        assert_eq!(outcome, SearchOutcome::LimitReached { expanded: 3 });
        assert_eq!(outcome.expanded(), 3);

        // A limit that is never reached does not change the result.
        let unlimited = a_star(&start, &Hamming);
        let generous = a_star_with_config(
            &start,
            &Hamming,
            &SearchConfig::with_max_expansions(unlimited.expanded()),
        );
        assert_eq!(generous, unlimited);
    }

    #[test]
    fn test_a_star_is_deterministic() {
        let start = Board::random_solvable_with_seed(7);
        for kind in HeuristicKind::ALL {
            assert_eq!(a_star(&start, &kind), a_star(&start, &kind));
        }
    }

    #[test]
    fn test_a_star_by_name() {
        let start = board([1, 0, 2, 3, 4, 5, 6, 7, 8]);
        let outcome = a_star_by_name(&start, "hamming").unwrap();
        assert_eq!(outcome.solution().unwrap().moves(), 1);
        assert!(a_star_by_name(&start, "manhattan").is_ok());

        let err = a_star_by_name(&start, "euclidean").unwrap_err();
        assert!(matches!(err, Error::UnknownHeuristic { .. }));
    }

    #[test]
    fn test_solve_checked_rejects_unsolvable() {
        let start = board([1, 2, 3, 4, 5, 6, 8, 7, 0]);
        let err = solve_checked(&start, &Manhattan::default(), &SearchConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Unsolvable { board } if board == start));

        let solvable = board([1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let outcome = solve_checked(&solvable, &Manhattan::default(), &SearchConfig::default()).unwrap();
        assert!(outcome.solution().is_some());
    }

    #[test]
    fn test_a_star_with_closure_heuristic() {
        // A zero estimate turns A* into uniform-cost search; the path length is unchanged.
        let start = board([1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let zero = |_: &Board| 0u32;
        let blind = a_star(&start, &zero).into_solution().unwrap();
        let informed = a_star(&start, &Manhattan::default()).into_solution().unwrap();
        assert_eq!(blind.moves(), informed.moves());
        assert!(blind.expanded >= informed.expanded);
    }

    #[test]
    fn test_reconstruct_path_walks_predecessors() {
        let start = board([1, 2, 0, 3, 4, 5, 6, 7, 8]);
        let middle = board([1, 0, 2, 3, 4, 5, 6, 7, 8]);
        let goal = board(GOAL);
        let came_from = HashMap::from([(middle, start), (goal, middle)]);
        assert_eq!(reconstruct_path(&came_from, goal), vec![start, middle, goal]);
        assert_eq!(reconstruct_path(&HashMap::new(), goal), vec![goal]);
    }

    #[test]
    fn test_frontier_breaks_ties_by_arrival() {
        let a = board([1, 0, 2, 3, 4, 5, 6, 7, 8]);
        let b = board([3, 1, 2, 0, 4, 5, 6, 7, 8]);
        let c = board([1, 2, 0, 3, 4, 5, 6, 7, 8]);
        let mut f_score = HashMap::new();
        let mut frontier = Frontier::default();
        for (board, f) in [(a, 5), (b, 5), (c, 4)] {
            f_score.insert(board, f);
            frontier.push(board, f);
        }
        // Re-scoring keeps the original arrival order among equals.
        f_score.insert(a, 4);
        frontier.push(a, 4);

        assert_eq!(frontier.pop_min(&f_score), Some(a));
        assert_eq!(frontier.pop_min(&f_score), Some(c));
        assert_eq!(frontier.pop_min(&f_score), Some(b));
        assert_eq!(frontier.pop_min(&f_score), None);
        assert_eq!(frontier.len(), 0);
    }
}
