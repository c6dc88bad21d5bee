use crate::board::Board;
use crate::cell::{Axis, Cell};
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::hand::{Hand, HandOpt};
use crate::hands::Hands;
use crate::moves::Move;
use crate::remote::{MoveSource, RemoteError, RemotePolicy, fetch_remote_move};
use crate::rules::IllegalMove;
use crate::tile::Tile;
use crate::tiles::Tiles;
use crate::turns::Turns;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// What happened when a move was committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub hand: String,
    pub points: u32,
    /// Extra points for going out
    pub bonus: u32,
    /// Tiles drawn from the stock bag afterwards
    pub drawn: usize,
    pub went_out: bool,
    /// Time the hand spent on this turn
    pub elapsed_ms: u64,
}

/// One game: the stock bag, the board, every hand and the turn log.
///
/// All state is owned here and mutated only through [`Game::finish_turn`],
/// so front-ends compose a [`Move`] for [`Game::active_hand`], check it with
/// [`Game::legality`], then commit it.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    stock: Tiles,
    board: Board,
    hands: Hands,
    turns: Turns,
    rng: SmallRng,
}

impl Game {
    /// Fill the stock bag, deal every hand, and seat first the hand holding
    /// the longest run.
    pub fn new(config: GameConfig, opts: Vec<HandOpt>) -> Result<Self> {
        config.validate()?;
        if opts.is_empty() {
            return Err(Error::config("a game needs at least one hand"));
        }
        let mut names = HashSet::new();
        if let Some(opt) = opts.iter().find(|o| !names.insert(o.name.as_str())) {
            return Err(Error::config(format!("hand name '{}' is used twice", opt.name)));
        }
        if config.tile_count() < opts.len() * config.hand_size {
            return Err(Error::config("not enough tiles to deal every hand"));
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut stock = Tiles::full_set(&config);
        let mut hands = Vec::with_capacity(opts.len());
        for opt in opts {
            let mut hand = Hand::new(opt);
            hand.draw_tiles(config.hand_size, &mut stock, &mut rng)?;
            hands.push(hand);
        }
        let mut hands = Hands::new(hands);
        let first = hands.index_of_longest_run().unwrap_or(0);
        hands.set_current(first);
        hands.current_mut().start_clock();

        log::info!(
            "{:<32}{} hands, {} tiles in stock",
            "dealt",
            hands.len(),
            stock.count()
        );
        log::info!("{:<32}{}", "first to play", hands.current().name());

        Ok(Game {
            board: Board::new(config.max_line_length()),
            config,
            stock,
            hands,
            turns: Turns::new(),
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    pub fn turns(&self) -> &Turns {
        &self.turns
    }

    pub fn stock(&self) -> &Tiles {
        &self.stock
    }

    /// The hand whose turn it is
    pub fn active_hand(&self) -> &Hand {
        self.hands.current()
    }

    /// Someone went out, everyone resigned, or the working hands have
    /// gone `stalemate_rounds` full rounds without a play.
    pub fn is_over(&self) -> bool {
        if self.hands.has_any_gone_out() || self.hands.have_all_resigned() {
            return true;
        }
        let working = self.hands.count_working();
        self.turns.trailing_non_plays() >= self.config.stalemate_rounds * working
    }

    /// Why the active hand may not make `m`, if anything.
    pub fn legality(&self, m: &Move) -> Option<IllegalMove> {
        let rack = self.hands.current().tiles();
        if m.is_resign() {
            return (m.tiles() != *rack).then_some(IllegalMove::ResignMismatch);
        }
        if m.repeats_tile() {
            return Some(IllegalMove::RepeatsTile);
        }
        if m.repeats_cell() {
            return Some(IllegalMove::RepeatsCell);
        }
        if let Some(entry) = m.entries().find(|e| !rack.contains(e.tile())) {
            return Some(IllegalMove::NotInRack {
                id: entry.tile().id(),
            });
        }
        if m.is_play() && m.involves_swap() {
            return Some(IllegalMove::PlayAndSwap);
        }
        if m.is_pure_swap() && m.count_swap() > self.stock.count() {
            return Some(IllegalMove::SwapExceedsStock {
                wanted: m.count_swap(),
                available: self.stock.count(),
            });
        }
        if m.is_play() {
            return self.board.check_play(m).err();
        }
        None
    }

    pub fn is_legal_move(&self, m: &Move) -> bool {
        self.legality(m).is_none()
    }

    /// Commit the active hand's move and pass the turn on.
    pub fn finish_turn(&mut self, m: Move) -> Result<TurnReport> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        if let Some(reason) = self.legality(&m) {
            log::warn!("{:<32}{} ({})", "rejected move", m, reason);
            return Err(Error::IllegalMove {
                reason: reason.to_string(),
            });
        }

        let index = self.hands.current_index();
        let elapsed_ms = if self.hands[index].is_clock_running() {
            self.hands[index].stop_clock()
        } else {
            0
        };
        let mut points = 0;
        let mut bonus = 0;
        let mut drawn = 0;
        let mut went_out = false;

        if m.is_resign() {
            self.hands[index].resign(&mut self.stock)?;
        } else if m.is_play() {
            points = self.board.score_play(&m);
            self.board.place(&m);
            let hand = &mut self.hands[index];
            hand.remove_tiles(&m.played_tiles())?;
            hand.add_score(points);
            let needed = self.config.hand_size.saturating_sub(hand.count_tiles());
            drawn = hand.draw_tiles(needed, &mut self.stock, &mut self.rng)?.count();

            if self.hands[index].count_tiles() == 0 {
                bonus = self
                    .hands
                    .iter()
                    .filter(|h| !h.has_resigned())
                    .map(|h| h.count_tiles() as u32)
                    .sum();
                let hand = &mut self.hands[index];
                hand.add_score(bonus);
                hand.go_out();
                went_out = true;
            }
        } else if m.is_pure_swap() {
            let swapped = m.swapped_tiles();
            let hand = &mut self.hands[index];
            hand.remove_tiles(&swapped)?;
            // Draw before returning the swapped tiles so none come straight back
            drawn = hand
                .draw_tiles(swapped.count(), &mut self.stock, &mut self.rng)?
                .count();
            self.stock.add_tiles(&swapped)?;
        }

        let report = TurnReport {
            hand: self.hands[index].name().to_string(),
            points,
            bonus,
            drawn,
            went_out,
            elapsed_ms,
        };
        log::debug!("{:<32}{} {}", "turn", report.hand, m);
        self.turns.push(m);

        if self.is_over() {
            log::info!("{:<32}after {} turns", "game over", self.turns.len());
        } else {
            self.hands.advance_working();
            self.hands.current_mut().start_clock();
        }
        Ok(report)
    }

    /// Block until the active remote hand's move arrives from `source`,
    /// using the configured timeout and retry count.
    pub fn receive_remote_move<S: MoveSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> std::result::Result<Move, RemoteError> {
        let hand = self.hands.current();
        assert!(hand.is_remote(), "{} is not a remote hand", hand.name());
        fetch_remote_move(source, hand, &RemotePolicy::from_config(&self.config))
    }

    /// Hands with the top score among those that did not resign
    pub fn winners(&self) -> Vec<&Hand> {
        let working = || self.hands.iter().filter(|h| !h.has_resigned());
        let Some(best) = working().map(Hand::score).max() else {
            return Vec::new();
        };
        working().filter(|h| h.score() == best).collect()
    }

    /// The built-in policy for the active hand.
    ///
    /// Passes with the hand's skip probability. Otherwise opens with the
    /// longest run on an empty board, or grows the best single-tile play
    /// into a line. Swaps as much as the stock allows when nothing fits.
    pub fn suggest_move(&mut self) -> Move {
        let skip = self.hands.current().skip_probability().clamp(0.0, 1.0);
        if skip > 0.0 && self.rng.random_bool(skip) {
            return Move::pass();
        }
        let rack = self.hands.current().tiles().clone();

        if self.board.is_empty() {
            let mut m = Move::pass();
            for (offset, tile) in rack.longest_run().iter().enumerate() {
                m.add_cell(tile.clone(), Cell::ORIGIN.step(Axis::Row, offset as i32));
            }
            if !m.is_pass() {
                return m;
            }
        } else if let Some(m) = self.best_play(&rack) {
            return m;
        }

        let mut m = Move::pass();
        for tile in rack.iter().take(self.stock.count()) {
            m.add_swap_tile(tile.clone());
        }
        m
    }

    fn best_play(&self, rack: &Tiles) -> Option<Move> {
        let candidates = rack.unique_tiles();
        let mut best: Option<(u32, Move)> = None;
        for cell in self.board.frontier() {
            for tile in candidates.iter() {
                let mut m = Move::pass();
                m.add_cell(tile.clone(), cell);
                if self.board.check_play(&m).is_err() {
                    continue;
                }
                let m = self.extend_play(m, cell, rack);
                let points = self.board.score_play(&m);
                if best.as_ref().is_none_or(|(b, _)| points > *b) {
                    best = Some((points, m));
                }
            }
        }
        best.map(|(_, m)| m)
    }

    /// Greedily add rack tiles at either end of a line through `anchor`
    /// while the play stays legal.
    fn extend_play(&self, seed: Move, anchor: Cell, rack: &Tiles) -> Move {
        let mut best = seed.clone();
        let mut best_points = self.board.score_play(&seed);
        for axis in [Axis::Row, Axis::Column] {
            let mut m = seed.clone();
            loop {
                let used = m.tiles();
                let ends = [
                    line_end(&self.board, &m, anchor, axis, -1),
                    line_end(&self.board, &m, anchor, axis, 1),
                ];
                let next = ends.iter().find_map(|&cell| {
                    rack.iter()
                        .filter(|t: &&Tile| !used.contains_id(t.id()))
                        .find_map(|tile| {
                            let mut trial = m.clone();
                            trial.add_cell(tile.clone(), cell);
                            self.board.check_play(&trial).is_ok().then_some(trial)
                        })
                });
                match next {
                    Some(trial) => m = trial,
                    None => break,
                }
            }
            let points = self.board.score_play(&m);
            if points > best_points {
                best = m;
                best_points = points;
            }
        }
        best
    }
}

/// First empty cell past the occupied run through `anchor`, in `direction`.
fn line_end(board: &Board, m: &Move, anchor: Cell, axis: Axis, direction: i32) -> Cell {
    let cells = m.cells();
    let mut at = anchor;
    while !board.is_empty_cell(at) || cells.contains(&at) {
        at = at.step(axis, direction);
    }
    at
}
