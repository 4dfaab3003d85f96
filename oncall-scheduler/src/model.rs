use std::sync::Arc;

use itertools::{Itertools, MinMaxResult};
use local_search::local_search::{InitialSolutionGenerator, MoveProposer, Score, Solution, SolutionScoreCalculator};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::calendar::Block;
use crate::staff::{Role, StaffMember};

/// Which target-band rule is currently posted. Threaded as a plain value into the score
/// calculator and initial solution generator rather than mutating staff records and restoring
/// them afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Strict,
    Relaxed,
}

/// The shape of a single day's coverage. Only these two shapes exist, so the coverage rule from
/// the constraint model (one Intermediate-or-Senior solo, or one Senior plus one Junior pair) is
/// true of every `RosterSolution` that type-checks, not just ones that pass a validator.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DayAssignment {
    Solo(usize),
    Pair { senior: usize, junior: usize },
}

impl DayAssignment {
    pub fn staff_indices(&self) -> Vec<usize> {
        match self {
            DayAssignment::Solo(s) => vec![*s],
            DayAssignment::Pair { senior, junior } => vec![*senior, *junior],
        }
    }
}

#[derive(Clone, Debug)]
pub struct RosterSolution {
    pub staff: Arc<Vec<StaffMember>>,
    pub block: Arc<Block>,
    pub days: Vec<DayAssignment>,
}

impl RosterSolution {
    /// For each staff member, the ascending list of day indices they are assigned to.
    pub fn assignments_by_staff(&self) -> Vec<Vec<usize>> {
        let mut by_staff = vec![Vec::new(); self.staff.len()];
        for (day_index, assignment) in self.days.iter().enumerate() {
            for staff_index in assignment.staff_indices() {
                by_staff[staff_index].push(day_index);
            }
        }
        by_staff
    }
}

impl Solution for RosterSolution {}

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct RosterScore {
    pub hard: i64,
    pub soft: i64,
}

impl Score for RosterScore {
    fn is_feasible(&self) -> bool {
        self.hard == 0
    }
}

pub struct RosterScoreCalculator {
    pub phase: Phase,
}

impl SolutionScoreCalculator for RosterScoreCalculator {
    type Solution = RosterSolution;
    type Score = RosterScore;

    fn get_score(&self, solution: &RosterSolution) -> RosterScore {
        let mut hard = 0i64;
        let mut soft = 0i64;

        let by_staff = solution.assignments_by_staff();

        // No back-to-back: consecutive entries in an ascending day list that are themselves
        // calendar-adjacent.
        for days in &by_staff {
            for window in days.windows(2) {
                if window[1] == window[0] + 1 {
                    hard += 1;
                }
            }
        }

        // Unavailability.
        for (staff_index, staff) in solution.staff.iter().enumerate() {
            for day in &by_staff[staff_index] {
                if staff.unavailable_indices.contains(day) {
                    hard += 1;
                }
            }
        }

        // Target band, phase dependent.
        for (staff_index, staff) in solution.staff.iter().enumerate() {
            let actual = by_staff[staff_index].len() as i64;
            let target = staff.target_shifts;
            match self.phase {
                Phase::Strict => {
                    let lower = (target - 1).max(0);
                    let upper = target + 1;
                    if actual < lower {
                        hard += 1;
                        soft += lower - actual;
                    } else if actual > upper {
                        hard += 1;
                        soft += actual - upper;
                    }
                }
                Phase::Relaxed => {
                    if actual == 0 {
                        hard += 1;
                        soft += 1;
                    }
                }
            }
        }

        // Weekend and Friday balance: spread of assigned-day counts across staff, skipped when
        // the block has no such days or fewer than two staff.
        if solution.staff.len() >= 2 {
            score_balance(&by_staff, &solution.block.weekend_indices, &mut hard, &mut soft);
            score_balance(&by_staff, &solution.block.friday_indices, &mut hard, &mut soft);
        }

        RosterScore { hard, soft }
    }
}

fn score_balance(by_staff: &[Vec<usize>], day_type_indices: &[usize], hard: &mut i64, soft: &mut i64) {
    if day_type_indices.is_empty() {
        return;
    }
    let day_type: std::collections::HashSet<usize> = day_type_indices.iter().copied().collect();
    let counts = by_staff
        .iter()
        .map(|days| days.iter().filter(|d| day_type.contains(d)).count() as i64);
    if let MinMaxResult::MinMax(min, max) = counts.minmax() {
        let spread = max - min;
        *hard += (spread - 1).max(0);
        *soft += spread;
    }
}

/// Builds a greedy random initial solution: every day gets a structurally valid shape, chosen
/// from roles actually present on the roster.
pub struct RosterInitialSolutionGenerator {
    pub staff: Arc<Vec<StaffMember>>,
    pub block: Arc<Block>,
}

impl InitialSolutionGenerator for RosterInitialSolutionGenerator {
    type R = rand_chacha::ChaCha20Rng;
    type Solution = RosterSolution;

    fn generate_initial_solution(&self, rng: &mut Self::R) -> RosterSolution {
        let roles = RolePools::new(&self.staff);

        let mut days = Vec::with_capacity(self.block.num_days);
        for _ in 0..self.block.num_days {
            days.push(roles.random_day(rng));
        }

        RosterSolution {
            staff: self.staff.clone(),
            block: self.block.clone(),
            days,
        }
    }
}

struct RolePools {
    solo_eligible: Vec<usize>,
    seniors: Vec<usize>,
    juniors: Vec<usize>,
}

impl RolePools {
    fn new(staff: &[StaffMember]) -> Self {
        let mut solo_eligible = Vec::new();
        let mut seniors = Vec::new();
        let mut juniors = Vec::new();
        for (index, member) in staff.iter().enumerate() {
            match member.role {
                Role::Intermediate => solo_eligible.push(index),
                Role::Senior => {
                    solo_eligible.push(index);
                    seniors.push(index);
                }
                Role::Junior => juniors.push(index),
            }
        }
        RolePools {
            solo_eligible,
            seniors,
            juniors,
        }
    }

    fn random_day(&self, rng: &mut rand_chacha::ChaCha20Rng) -> DayAssignment {
        if !self.juniors.is_empty() && !self.seniors.is_empty() && rng.gen_bool(0.3) {
            DayAssignment::Pair {
                senior: *self.seniors.choose(rng).unwrap(),
                junior: *self.juniors.choose(rng).unwrap(),
            }
        } else {
            DayAssignment::Solo(*self.solo_eligible.choose(rng).unwrap())
        }
    }

    fn can_pair(&self) -> bool {
        !self.seniors.is_empty() && !self.juniors.is_empty()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum RosterMoveKind {
    ReassignSolo,
    ReassignPairSenior,
    ReassignPairJunior,
    SwapDays,
    ConvertShape,
}

pub struct RosterMoveProposer {
    staff: Arc<Vec<StaffMember>>,
    move_kinds: Vec<(RosterMoveKind, u64)>,
}

impl RosterMoveProposer {
    pub fn new(staff: Arc<Vec<StaffMember>>) -> Self {
        Self {
            staff,
            move_kinds: vec![
                (RosterMoveKind::ReassignSolo, 4),
                (RosterMoveKind::ReassignPairSenior, 2),
                (RosterMoveKind::ReassignPairJunior, 2),
                (RosterMoveKind::SwapDays, 3),
                (RosterMoveKind::ConvertShape, 1),
            ],
        }
    }
}

impl MoveProposer for RosterMoveProposer {
    type R = rand_chacha::ChaCha20Rng;
    type Solution = RosterSolution;

    fn iter_local_moves(
        &self,
        start: &Self::Solution,
        rng: &mut Self::R,
    ) -> Box<dyn Iterator<Item = Self::Solution>> {
        struct MoveIterator {
            solution: RosterSolution,
            roles: RolePools,
            move_kinds: Vec<(RosterMoveKind, u64)>,
            rng: rand_chacha::ChaCha20Rng,
        }

        impl Iterator for MoveIterator {
            type Item = RosterSolution;

            fn next(&mut self) -> Option<Self::Item> {
                let num_days = self.solution.days.len();
                let mut candidate_kinds = self.move_kinds.clone();
                if !self.roles.can_pair() {
                    candidate_kinds.retain(|(kind, _)| {
                        !matches!(
                            kind,
                            RosterMoveKind::ReassignPairSenior
                                | RosterMoveKind::ReassignPairJunior
                                | RosterMoveKind::ConvertShape
                        )
                    });
                }
                let kind = candidate_kinds.choose_weighted(&mut self.rng, |s| s.1).unwrap().0;
                let mut next_solution = self.solution.clone();

                match kind {
                    RosterMoveKind::ReassignSolo => {
                        let solo_days: Vec<usize> = (0..num_days)
                            .filter(|d| matches!(self.solution.days[*d], DayAssignment::Solo(_)))
                            .collect();
                        let Some(&day) = solo_days.choose(&mut self.rng) else {
                            return Some(next_solution);
                        };
                        let replacement = *self.roles.solo_eligible.choose(&mut self.rng).unwrap();
                        next_solution.days[day] = DayAssignment::Solo(replacement);
                    }
                    RosterMoveKind::ReassignPairSenior => {
                        if let Some(day) = random_pair_day(&self.solution, &mut self.rng) {
                            if let DayAssignment::Pair { junior, .. } = self.solution.days[day] {
                                let senior = *self.roles.seniors.choose(&mut self.rng).unwrap();
                                next_solution.days[day] = DayAssignment::Pair { senior, junior };
                            }
                        }
                    }
                    RosterMoveKind::ReassignPairJunior => {
                        if let Some(day) = random_pair_day(&self.solution, &mut self.rng) {
                            if let DayAssignment::Pair { senior, .. } = self.solution.days[day] {
                                let junior = *self.roles.juniors.choose(&mut self.rng).unwrap();
                                next_solution.days[day] = DayAssignment::Pair { senior, junior };
                            }
                        }
                    }
                    RosterMoveKind::SwapDays => {
                        if num_days >= 2 {
                            let indices: Vec<usize> = (0..num_days).collect();
                            let chosen: Vec<&usize> = indices.choose_multiple(&mut self.rng, 2).collect();
                            let (day_a, day_b) = (*chosen[0], *chosen[1]);
                            next_solution.days.swap(day_a, day_b);
                        }
                    }
                    RosterMoveKind::ConvertShape => {
                        let day = self.rng.gen_range(0..num_days);
                        next_solution.days[day] = match self.solution.days[day] {
                            DayAssignment::Solo(_) => DayAssignment::Pair {
                                senior: *self.roles.seniors.choose(&mut self.rng).unwrap(),
                                junior: *self.roles.juniors.choose(&mut self.rng).unwrap(),
                            },
                            DayAssignment::Pair { .. } => {
                                DayAssignment::Solo(*self.roles.solo_eligible.choose(&mut self.rng).unwrap())
                            }
                        };
                    }
                }

                Some(next_solution)
            }
        }

        fn random_pair_day(solution: &RosterSolution, rng: &mut rand_chacha::ChaCha20Rng) -> Option<usize> {
            let pair_days: Vec<usize> = (0..solution.days.len())
                .filter(|d| matches!(solution.days[*d], DayAssignment::Pair { .. }))
                .collect();
            pair_days.choose(rng).copied()
        }

        Box::new(MoveIterator {
            solution: start.clone(),
            roles: RolePools::new(&self.staff),
            move_kinds: self.move_kinds.clone(),
            rng: rng.clone(),
        })
    }
}
