/// local_search contains methods that represent a solution and proposing moves in the neighborhood of a solution.
/// Use methods in this module you can discover local minima. This is the LocalSearch part of [1] section 2pages 2 and
/// 3.
///
/// [1] Lourenço, Helena Ramalhinho, Olivier C. Martin and Thomas Stützle. "Iterated Local Search: Framework and
/// Applications." (2010).
use std::time::Instant;

/// Solution is a plain old data object.
pub trait Solution: Clone + Send + std::fmt::Debug {}

/// Score for a solution. Lower is better. `is_feasible` tells the engine it can stop spending iterations: a pure
/// satisfaction problem has no notion of "better than feasible", so reaching feasibility is itself the stopping
/// condition rather than a fixed point the engine has to discover by exhausting its neighbourhood.
pub trait Score: Clone + Send + PartialEq + Eq + PartialOrd + Ord + std::fmt::Debug {
    fn is_feasible(&self) -> bool;
}

#[derive(Derivative)]
#[derivative(Clone, Debug)]
pub struct ScoredSolution<_Solution, _Score>
where
    _Solution: Solution,
    _Score: Score,
{
    pub solution: _Solution,
    pub score: _Score,
}

impl<_Solution, _Score> ScoredSolution<_Solution, _Score>
where
    _Solution: Solution,
    _Score: Score,
{
    pub fn new(solution: _Solution, score: _Score) -> Self {
        Self { solution, score }
    }
}

/// SolutionScoreCalculator calculates the score for a given solution.
///
/// -    A pure satisfaction problem moves from an infeasible configuration and tries to find any feasible
///      solution. Trying to minimize hard score to zero.
/// -    A pure optimization problem always has feasible solutions but move from suboptimal solutions to
///      more optimal solutions. Hard score always zero, trying to minimize soft score to zero.
///      A constraint optimization problem combines both satisfaction and optimization.
pub trait SolutionScoreCalculator {
    type Solution: Solution;
    type Score: Score;

    /// get_score calculates the score of a solution. See SolutionScoreCalculator doc for ideas about what the score
    /// should be.
    fn get_score(&self, solution: &Self::Solution) -> Self::Score;
}

pub trait InitialSolutionGenerator {
    type R: rand::Rng;
    type Solution: Solution;

    /// Generate an initial solution. Does not have to be feasible, i.e. does not have to have a hard score of zero.
    /// However, many local search applications depend on some greedy construction of a mostly-feasible initial
    /// solution so the search converges quickly.
    fn generate_initial_solution(&self, rng: &mut Self::R) -> Self::Solution;
}

/// MoveProposer can give you an initial solution, and promises to let one iterate randomly over the neighborhood of
/// solutions.
pub trait MoveProposer {
    type R: rand::Rng;
    type Solution: Solution;

    /// Iterate over the neighborhood of solutions near a start solution randomly. Must be a finite-sized iterator
    /// that is computationally feasible to fully consume. However, local search will typically not exhaust this
    /// iterator.
    fn iter_local_moves(
        &self,
        start: &Self::Solution,
        rng: &mut Self::R,
    ) -> Box<dyn Iterator<Item = Self::Solution>>;
}

/// LocalSearch lets you find local minima for an optimization problem, bounded by an iteration count and,
/// optionally, a wall-clock deadline.
pub struct LocalSearch<R, _Solution, _Score, SSC, MP>
where
    R: rand::Rng,
    _Solution: Solution,
    _Score: Score,
    SSC: SolutionScoreCalculator<Solution = _Solution, Score = _Score>,
    MP: MoveProposer<R = R, Solution = _Solution>,
{
    move_proposer: MP,
    solution_score_calculator: SSC,
    max_iterations: u64,
    deadline: Option<Instant>,
    rng: R,
}

/// Upper bound on how many candidates from a single `iter_local_moves` call the inner scan will
/// examine before giving up on the current solution's neighbourhood. Move proposers are allowed to
/// be infinite random streams (every `MoveProposer` in this corpus is), so without a cap `.find()`
/// never returns once a local minimum is reached and no improving move exists.
const NEIGHBORHOOD_SAMPLE_SIZE: usize = 256;

impl<R, _Solution, _Score, SSC, MP> LocalSearch<R, _Solution, _Score, SSC, MP>
where
    R: rand::Rng,
    _Solution: Solution,
    _Score: Score,
    SSC: SolutionScoreCalculator<Solution = _Solution, Score = _Score>,
    MP: MoveProposer<R = R, Solution = _Solution>,
{
    pub fn new(move_proposer: MP, solution_score_calculator: SSC, max_iterations: u64, rng: R) -> Self {
        LocalSearch {
            move_proposer,
            solution_score_calculator,
            max_iterations,
            deadline: None,
            rng,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Hill-climb from `start`, taking the first strictly-improving neighbour found each iteration. Stops early
    /// once the current solution is feasible, once `max_iterations` is spent, or once the deadline passes. Each
    /// iteration samples at most `NEIGHBORHOOD_SAMPLE_SIZE` candidates from the move proposer's neighbourhood,
    /// so a local minimum with no improving move in that sample ends the search rather than scanning forever.
    pub fn execute(&mut self, start: _Solution) -> ScoredSolution<_Solution, _Score> {
        let mut current_solution = start;
        let mut current_score = self.solution_score_calculator.get_score(&current_solution);

        for _current_iteration in 0..self.max_iterations {
            if current_score.is_feasible() {
                break;
            }
            if matches!(self.deadline, Some(deadline) if Instant::now() >= deadline) {
                break;
            }

            let mut improving_move = None;
            for candidate in self
                .move_proposer
                .iter_local_moves(&current_solution, &mut self.rng)
                .take(NEIGHBORHOOD_SAMPLE_SIZE)
            {
                if matches!(self.deadline, Some(deadline) if Instant::now() >= deadline) {
                    break;
                }
                let score = self.solution_score_calculator.get_score(&candidate);
                if score < current_score {
                    improving_move = Some((candidate, score));
                    break;
                }
            }

            match improving_move {
                Some((new_solution, new_score)) => {
                    current_solution = new_solution;
                    current_score = new_score;
                }
                None => break,
            }
        }

        ScoredSolution::new(current_solution, current_score)
    }
}
