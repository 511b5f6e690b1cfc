//! Iterative-deepening NegaMax search
//!
//! The driver runs one full alpha-beta pass per depth, keeps the last
//! completed result and stops before starting a depth once the time budget
//! is spent - time is never checked mid-search, so a returned move is
//! always the product of a fully completed depth.
//!
//! At every node the score is relative to the side to move; each recursive
//! call negates the child score and swaps the negated bounds. Draw rules
//! are evaluated at every node over the copy-extended `DrawState`, and a
//! branch-local hash path breaks cycles through transpositions so search
//! over kings-only endgames always terminates.
//!
//! The engine is synchronous and single-threaded. Callers that preempt an
//! in-flight computation discard the stale result via their own generation
//! token, but must still reclaim the engine (and with it the table buffer)
//! once the stale call returns.

use crate::difficulty::DifficultyProfile;
use crate::draw::DrawState;
use crate::error::EngineError;
use crate::eval::evaluate;
use crate::movegen::generate_legal_moves;
use crate::position::Position;
use crate::tt::{Bound, DEFAULT_TABLE_MB, TranspositionTable};
use crate::types::{Move, Side, Square};
use crate::zobrist::Zobrist;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::Instant;

/// Score bounds
pub const INFINITY: i32 = 1_000_000;
/// Base score of a won game; distance from root is subtracted so the
/// search prefers faster wins
pub const WIN_SCORE: i32 = 100_000;
const DRAW_SCORE: i32 = 0;

/// Deepest ply killer moves are tracked for
const MAX_PLY: usize = 64;

/// Outcome of a completed search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// The selected move
    pub mv: Move,
    /// Score of `mv` from the requesting side's perspective
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    /// Nodes visited
    pub nodes: u64,
}

/// What the engine decided for a move request.
#[derive(Clone, Debug)]
pub enum MoveDecision {
    Play(SearchResult),
    /// The side to move has no legal move and has lost. A game outcome,
    /// not an error.
    NoLegalMoves,
}

/// The search engine. Created once and reused across successive move
/// computations so the transposition table stays warm.
pub struct SearchEngine {
    zobrist: Zobrist,
    tt: TranspositionTable,
    killers: Vec<[Option<(Square, Square)>; 2]>,
    rng: Xoshiro256PlusPlus,
    nodes: u64,
}

impl SearchEngine {
    /// Engine with a table of `table_mb` megabytes and an entropy-seeded RNG
    pub fn new(table_mb: usize) -> SearchEngine {
        SearchEngine::from_table(TranspositionTable::new(table_mb), rand::rng().random())
    }

    /// Engine with a deterministic RNG seed (reproducible noise/blunders)
    pub fn with_seed(table_mb: usize, seed: u64) -> SearchEngine {
        SearchEngine::from_table(TranspositionTable::new(table_mb), seed)
    }

    /// Engine adopting an existing table, e.g. one transferred back from a
    /// worker context
    pub fn from_table(tt: TranspositionTable, seed: u64) -> SearchEngine {
        SearchEngine {
            zobrist: Zobrist::new(),
            tt,
            killers: vec![[None; 2]; MAX_PLY],
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            nodes: 0,
        }
    }

    /// Release the transposition table so the owner can reclaim or transfer
    /// the buffer, including after a preempted computation
    pub fn into_table(self) -> TranspositionTable {
        self.tt
    }

    /// Drop all cached search results
    pub fn clear_table(&mut self) {
        self.tt.clear();
    }

    /// Hash of `(pos, side)` under this engine's key table
    pub fn position_hash(&self, pos: &Position, side: Side) -> u32 {
        self.zobrist.compute(pos, side)
    }

    /// Draw state extended by `side` playing `mv` on `pos`; convenience for
    /// game loops that thread [`DrawState`] between requests.
    pub fn advance_draw_state(
        &self,
        draw: &DrawState,
        pos: &Position,
        side: Side,
        mv: &Move,
    ) -> Result<DrawState, EngineError> {
        let moved = pos.piece_at(mv.from()).ok_or(EngineError::IllegalMove)?.kind;
        let hash = self.zobrist.compute(pos, side);
        let hash_after = self.zobrist.apply_move(hash, pos, side, mv);
        let pos_after = pos.apply(mv, side);
        Ok(draw.after_move(&pos_after, mv, moved, hash_after))
    }

    /// Select a move for `side`. The single entry point for callers.
    pub fn request_move(
        &mut self,
        pos: &Position,
        side: Side,
        profile: &DifficultyProfile,
        draw: &DrawState,
    ) -> MoveDecision {
        let moves = generate_legal_moves(pos, side);
        if moves.is_empty() {
            return MoveDecision::NoLegalMoves;
        }

        self.nodes = 0;
        for slot in self.killers.iter_mut() {
            *slot = [None; 2];
        }

        if let [only] = moves.as_slice() {
            // Nothing to choose; report the static score without burning
            // the time budget
            let score = evaluate(pos, side, profile.feature_scale);
            return MoveDecision::Play(SearchResult {
                mv: only.clone(),
                score,
                depth: 0,
                nodes: 0,
            });
        }

        let root_hash = self.zobrist.compute(pos, side);
        let start = Instant::now();
        let max_depth = profile.max_depth.max(1);
        let mut best_index = 0;
        let mut best_score = 0;
        let mut completed = 0;

        for depth in 1..=max_depth {
            let (index, score) =
                self.search_root(pos, side, &moves, depth, root_hash, draw, profile);
            best_index = index;
            best_score = score;
            completed = depth;
            log::debug!(
                "depth {depth}: best {} score {score} nodes {}",
                moves[index],
                self.nodes
            );
            // Time is only consulted between completed depths
            if start.elapsed().as_millis() as u64 >= profile.time_limit_ms {
                break;
            }
        }

        if profile.blunder_probability > 0.0
            && self.rng.random::<f64>() < profile.blunder_probability
        {
            let (index, score) = self.glance_pick(pos, side, &moves, profile);
            log::debug!("blunder: {} replaces {}", moves[index], moves[best_index]);
            best_index = index;
            best_score = score;
        }

        MoveDecision::Play(SearchResult {
            mv: moves[best_index].clone(),
            score: best_score,
            depth: completed,
            nodes: self.nodes,
        })
    }

    /// One full-width alpha-beta pass over the root moves
    fn search_root(
        &mut self,
        pos: &Position,
        side: Side,
        moves: &[Move],
        depth: u8,
        root_hash: u32,
        draw: &DrawState,
        profile: &DifficultyProfile,
    ) -> (usize, i32) {
        let tt_index = self
            .tt
            .probe(root_hash)
            .map(|e| e.best_move_index())
            .filter(|&index| index >= 0);
        let order = self.move_order(moves, tt_index, 0);
        let mut path = vec![root_hash];
        let mut alpha = -INFINITY;
        let mut best_index = order[0];

        for index in order {
            let mv = &moves[index];
            let (child, child_hash, child_draw) = self.make_child(pos, side, mv, root_hash, draw);
            let score = -self.negamax(
                &child,
                side.opponent(),
                depth - 1,
                1,
                -INFINITY,
                -alpha,
                child_hash,
                &child_draw,
                &mut path,
                profile,
            );
            if score > alpha {
                alpha = score;
                best_index = index;
            }
        }

        self.tt.store(root_hash, alpha, depth, Bound::Exact, best_index as i16);
        (best_index, alpha)
    }

    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        pos: &Position,
        side: Side,
        depth: u8,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
        hash: u32,
        draw: &DrawState,
        path: &mut Vec<u32>,
        profile: &DifficultyProfile,
    ) -> i32 {
        self.nodes += 1;

        // Draw rules are terminal at any node, which lets the search seek
        // or avoid draws instead of looping through them
        if draw.draw_reason().is_some() {
            return DRAW_SCORE;
        }
        // Branch-local cycle check, distinct from the game history above
        if path.contains(&hash) {
            return DRAW_SCORE;
        }

        let mut tt_index = None;
        if let Some(entry) = self.tt.probe(hash) {
            if entry.best_move_index() >= 0 {
                tt_index = Some(entry.best_move_index());
            }
            if entry.depth() >= depth {
                let score = entry.score();
                match entry.bound() {
                    Bound::Exact => return score,
                    Bound::Lower => {
                        if score >= beta {
                            return score;
                        }
                        alpha = alpha.max(score);
                    }
                    Bound::Upper => {
                        if score <= alpha {
                            return score;
                        }
                        beta = beta.min(score);
                    }
                    Bound::None => {}
                }
            }
        }

        if depth == 0 {
            return self.evaluate_leaf(pos, side, profile);
        }

        let moves = generate_legal_moves(pos, side);
        if moves.is_empty() {
            // Lost: no legal move. Prefer distant losses / near wins.
            return -(WIN_SCORE - ply as i32);
        }

        let order = self.move_order(&moves, tt_index, ply);
        path.push(hash);

        let alpha_original = alpha;
        let mut best_score = -INFINITY;
        let mut best_index = order[0];

        for index in order {
            let mv = &moves[index];
            let (child, child_hash, child_draw) = self.make_child(pos, side, mv, hash, draw);
            let score = -self.negamax(
                &child,
                side.opponent(),
                depth - 1,
                ply + 1,
                -beta,
                -alpha,
                child_hash,
                &child_draw,
                path,
                profile,
            );

            if score > best_score {
                best_score = score;
                best_index = index;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.record_killer(mv, ply);
                break;
            }
        }

        path.pop();

        let bound = if best_score <= alpha_original {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(hash, best_score, depth, bound, best_index as i16);
        best_score
    }

    /// Static leaf score plus the profile's noise term. Noise is applied
    /// here, inside the search, so it genuinely changes which branch the
    /// minimax backs up rather than cosmetically shifting a final score.
    fn evaluate_leaf(&mut self, pos: &Position, side: Side, profile: &DifficultyProfile) -> i32 {
        let mut score = evaluate(pos, side, profile.feature_scale);
        if profile.noise_amplitude > 0 {
            score += self.rng.random_range(-profile.noise_amplitude..=profile.noise_amplitude);
        }
        score
    }

    /// Child position, its incrementally updated hash, and the extended
    /// draw state
    fn make_child(
        &self,
        pos: &Position,
        side: Side,
        mv: &Move,
        hash: u32,
        draw: &DrawState,
    ) -> (Position, u32, DrawState) {
        let moved = pos.piece_at(mv.from()).expect("legal move origin is occupied").kind;
        let child_hash = self.zobrist.apply_move(hash, pos, side, mv);
        let child = pos.apply(mv, side);
        let child_draw = draw.after_move(&child, mv, moved, child_hash);
        (child, child_hash, child_draw)
    }

    /// Iteration order over move-list indices: TT move, then captures (the
    /// generator already restricts them to maximal length), then killers
    /// recorded at this ply, then the remaining quiet moves. The sort is
    /// stable, so generation order breaks ties.
    fn move_order(&self, moves: &[Move], tt_index: Option<i16>, ply: usize) -> Vec<usize> {
        let killers = if ply < MAX_PLY { self.killers[ply] } else { [None; 2] };
        let mut order: Vec<usize> = (0..moves.len()).collect();
        order.sort_by_key(|&i| {
            if tt_index == Some(i as i16) {
                return 0u8;
            }
            match &moves[i] {
                Move::Capture { .. } => 1,
                Move::Quiet { from, to } => {
                    if killers[0] == Some((*from, *to)) {
                        2
                    } else if killers[1] == Some((*from, *to)) {
                        3
                    } else {
                        4
                    }
                }
            }
        });
        order
    }

    /// Remember a quiet move that caused a cutoff at `ply`
    fn record_killer(&mut self, mv: &Move, ply: usize) {
        if ply >= MAX_PLY {
            return;
        }
        if let Move::Quiet { from, to } = mv {
            let pair = (*from, *to);
            if self.killers[ply][0] != Some(pair) {
                self.killers[ply][1] = self.killers[ply][0];
                self.killers[ply][0] = Some(pair);
            }
        }
    }

    /// Blunder selection: statically evaluate every root move (no deep
    /// search, no noise) and pick uniformly among those within the margin
    /// of the best static score.
    fn glance_pick(
        &mut self,
        pos: &Position,
        side: Side,
        moves: &[Move],
        profile: &DifficultyProfile,
    ) -> (usize, i32) {
        let scores: Vec<i32> = moves
            .iter()
            .map(|mv| evaluate(&pos.apply(mv, side), side, profile.feature_scale))
            .collect();
        let best = *scores.iter().max().expect("at least one root move");
        let candidates: Vec<usize> = (0..moves.len())
            .filter(|&i| best - scores[i] <= profile.blunder_margin)
            .collect();
        let pick = candidates[self.rng.random_range(0..candidates.len())];
        (pick, scores[pick])
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(DEFAULT_TABLE_MB)
    }
}
