//! Match orchestration: sets, match winner, undo across set boundaries,
//! statistics and persistence hooks.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use tracing::{debug, info, warn};

use crate::config::format::{MatchConfig, MatchFormat};
use crate::domain::participants::Participant;
use crate::domain::point::{Outcome, Point};
use crate::domain::rules::match_winner;
use crate::domain::serving::ServeTurn;
use crate::domain::set::Set;
use crate::domain::sides::{Member, Seat, Slot};
use crate::domain::snapshot::{self, MatchSnapshot};
use crate::domain::stats::{PointRecord, StatsBook};
use crate::errors::domain::DomainError;
use crate::persistence::MatchStore;

/// Caller input for one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCall {
    pub winner: Slot,
    pub outcome: Outcome,
    /// Doubles only: the player who struck the deciding shot or made the error.
    pub scorer: Option<Seat>,
    /// `Some(false)` marks a point played on a second serve.
    pub first_serve: Option<bool>,
}

impl PointCall {
    pub fn new(winner: Slot, outcome: Outcome) -> Self {
        Self {
            winner,
            outcome,
            scorer: None,
            first_serve: None,
        }
    }

    pub fn scored_by(mut self, seat: Seat) -> Self {
        self.scorer = Some(seat);
        self
    }

    pub fn on_first_serve(mut self, first_serve: bool) -> Self {
        self.first_serve = Some(first_serve);
        self
    }

    fn fault(&self) -> bool {
        self.outcome == Outcome::DoubleFault || self.first_serve == Some(false)
    }
}

/// A singles or doubles match, driven only by `score_point` / `remove_point`.
pub struct Match {
    config: MatchConfig,
    set_score: [u8; 2],
    sets: Vec<Set>,
    set: Set,
    winner: Option<Slot>,
    stats: StatsBook,
    store: Option<Box<dyn MatchStore>>,
}

impl Debug for Match {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Match")
            .field("config", &self.config)
            .field("set_score", &self.set_score)
            .field("sets", &self.sets)
            .field("set", &self.set)
            .field("winner", &self.winner)
            .field("stats", &self.stats)
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl Match {
    /// Start a match. Rejects even set counts and mixed singles/doubles lineups.
    pub fn new(config: MatchConfig) -> Result<Self, DomainError> {
        let opening = config.opening_serve()?;
        let stats = StatsBook::new(&config.participants);
        debug!(
            one = %config.participants[0].id,
            two = %config.participants[1].id,
            sets = config.format.sets(),
            doubles = config.is_doubles(),
            "match created"
        );
        Ok(Self {
            config,
            set_score: [0; 2],
            sets: Vec::new(),
            set: Set::new(opening),
            winner: None,
            stats,
            store: None,
        })
    }

    /// Start a match that saves a snapshot after every mutation.
    pub fn with_store(
        config: MatchConfig,
        store: Box<dyn MatchStore>,
    ) -> Result<Self, DomainError> {
        let mut m = Self::new(config)?;
        m.store = Some(store);
        m.persist();
        Ok(m)
    }

    /// Rebuild the match saved in `store`, if any, and keep saving into it.
    pub fn restore(store: Box<dyn MatchStore>) -> Result<Option<Self>, DomainError> {
        let loaded = store
            .load()
            .map_err(|e| DomainError::restore(format!("failed to load snapshot: {e}")))?;
        let Some(snap) = loaded else {
            return Ok(None);
        };
        let mut m = snapshot::rebuild(&snap)?;
        m.store = Some(store);
        info!(points = m.point_count(), "match restored from snapshot");
        Ok(Some(m))
    }

    /// Score a point with no extra detail.
    pub fn score_point(&mut self, winner: Slot, outcome: Outcome) -> bool {
        self.score_call(PointCall::new(winner, outcome))
    }

    /// Score a point. A completed match ignores the call and returns `false`.
    pub fn score_call(&mut self, call: PointCall) -> bool {
        let scored = self.apply_call(call);
        if scored {
            self.persist();
        }
        scored
    }

    /// Undo the most recent point anywhere in the match.
    ///
    /// Statistics are not rolled back. The match is always left in progress.
    pub fn remove_point(&mut self) -> Option<Point> {
        if self.set.is_empty() {
            if let Some(previous) = self.sets.pop() {
                if let Some(winner) = previous.winner() {
                    let sets = &mut self.set_score[winner.index()];
                    debug_assert!(*sets > 0, "set score out of step with set history");
                    *sets = sets.saturating_sub(1);
                }
                debug!(sets = ?self.set_score, "reopened completed set");
                self.set = previous;
            }
        }

        self.winner = None;
        let removed = self.set.remove_point();
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    pub(crate) fn apply_call(&mut self, call: PointCall) -> bool {
        if let Some(winner) = self.winner {
            warn!(%winner, "point ignored: match already complete");
            return false;
        }
        let Some(serve) = self.set.current_serve() else {
            debug_assert!(false, "active set has no serve holder");
            return false;
        };

        let scorer = match serve {
            ServeTurn::Singles { .. } => None,
            ServeTurn::Doubles { .. } => call.scorer,
        };
        let break_point =
            !self.set.in_tiebreak() && self.set.game().is_some_and(|g| g.is_break_point());
        let games_before = self.set.games().len();

        if !self.set.score_point(call.winner, call.outcome, call.fault(), scorer) {
            return false;
        }

        let game_completed = self.set.games().len() > games_before;
        self.record_stats(call, serve, scorer, break_point, game_completed);
        self.update_match();
        true
    }

    fn record_stats(
        &mut self,
        call: PointCall,
        serve: ServeTurn,
        scorer: Option<Seat>,
        break_point: bool,
        game_completed: bool,
    ) {
        let server_slot = serve.slot();
        // The server owns serve-decided points unless someone else was named.
        let attributed =
            scorer.or_else(|| serve.seat().filter(|_| call.outcome.is_serve_decided()));

        let [one, two] = &self.config.participants;
        let id_of = |slot: Slot| match slot {
            Slot::One => one.id.as_str(),
            Slot::Two => two.id.as_str(),
        };
        let player_id_of = |seat: Seat| {
            self.config
                .participant(seat.slot)
                .player(seat.member)
                .map(|p| p.id.as_str())
        };
        let scorer_id = attributed.and_then(player_id_of);
        let server_player_id = serve.seat().and_then(player_id_of);

        self.stats.record_point(PointRecord {
            winner_id: id_of(call.winner),
            loser_id: id_of(call.winner.other()),
            outcome: call.outcome,
            server_id: id_of(server_slot),
            server_player_id,
            scorer_id,
            first_serve: call.first_serve,
        });

        let receiver_slot = server_slot.other();
        if break_point {
            self.stats.record_break_point(
                id_of(server_slot),
                id_of(receiver_slot),
                call.winner == receiver_slot,
            );
        }
        if game_completed {
            self.stats.record_service_game(
                id_of(server_slot),
                id_of(receiver_slot),
                call.winner == server_slot,
            );
        }
    }

    fn update_match(&mut self) {
        let Some(set_winner) = self.set.winner() else {
            return;
        };
        let Some(next) = self.set.next_set_serve() else {
            debug_assert!(false, "won set has no following serve holder");
            return;
        };

        let done = std::mem::replace(&mut self.set, Set::new(next));
        self.sets.push(done);
        self.set_score[set_winner.index()] += 1;
        debug!(winner = %set_winner, sets = ?self.set_score, "set complete");

        self.winner = match_winner(self.set_score, self.config.format.sets());
        if let Some(winner) = self.winner {
            info!(%winner, sets = ?self.set_score, "match complete");
        }
    }

    fn persist(&self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if let Err(e) = store.save(&snapshot::capture(self)) {
            warn!(error = %e, "failed to persist match snapshot");
        }
    }

    pub(crate) fn replace_stats(&mut self, stats: StatsBook) {
        self.stats = stats;
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn format(&self) -> MatchFormat {
        self.config.format
    }

    pub fn participants(&self) -> &[Participant; 2] {
        &self.config.participants
    }

    pub fn participant(&self, slot: Slot) -> &Participant {
        self.config.participant(slot)
    }

    pub fn is_doubles(&self) -> bool {
        self.config.is_doubles()
    }

    pub fn winner(&self) -> Option<Slot> {
        self.winner
    }

    pub fn is_complete(&self) -> bool {
        self.winner.is_some()
    }

    pub fn set_score(&self) -> [u8; 2] {
        self.set_score
    }

    pub fn completed_sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn current_set(&self) -> &Set {
        &self.set
    }

    /// Games in the active set.
    pub fn current_games(&self) -> [u8; 2] {
        self.set.score()
    }

    /// Raw points in the active game or tiebreak.
    pub fn current_points(&self) -> [u16; 2] {
        match (self.set.tiebreak(), self.set.game()) {
            (Some(tiebreak), _) => tiebreak.score(),
            (None, Some(game)) => game.raw_score(),
            (None, None) => [0; 2],
        }
    }

    pub fn in_tiebreak(&self) -> bool {
        self.set.in_tiebreak()
    }

    /// Serve holder for the next point.
    pub fn current_server(&self) -> Option<ServeTurn> {
        self.set.current_serve()
    }

    /// Participant id (singles) or player id (doubles) of the next server.
    pub fn current_server_id(&self) -> Option<&str> {
        let serve = self.current_server()?;
        match serve.seat() {
            Some(seat) => self.player_id(seat),
            None => Some(self.participant(serve.slot()).id.as_str()),
        }
    }

    /// Doubles serving order as player ids.
    pub fn rotation_ids(&self) -> Option<Vec<&str>> {
        match self.current_server()? {
            ServeTurn::Singles { .. } => None,
            ServeTurn::Doubles { rotation, .. } => rotation
                .order()
                .iter()
                .map(|seat| self.player_id(*seat))
                .collect(),
        }
    }

    pub fn player_id(&self, seat: Seat) -> Option<&str> {
        self.participant(seat.slot)
            .player(seat.member)
            .map(|p| p.id.as_str())
    }

    /// Seat of a doubles player by id.
    pub fn seat_of(&self, player_id: &str) -> Option<Seat> {
        Slot::BOTH.into_iter().find_map(|slot| {
            [Member::A, Member::B]
                .into_iter()
                .map(|member| Seat::new(slot, member))
                .find(|seat| self.player_id(*seat) == Some(player_id))
        })
    }

    pub fn stats(&self) -> &StatsBook {
        &self.stats
    }

    /// Every point of the match in play order.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.sets
            .iter()
            .flat_map(Set::points)
            .chain(self.set.points())
    }

    pub fn point_count(&self) -> usize {
        self.points().count()
    }
}
