//! Resumable stop search
//!
//! A search steps through every rotor position: each iteration advances all
//! drums by one (slow rotor first), increments `combs`, and reports a stop
//! when the live wire no longer reaches every junction of the test register.
//! The run yields every `render` iterations so a caller can redraw, cancel,
//! or simply keep stepping. A stop or a cancellation leaves the drums where
//! they are, so calling `start_search` again with the returned `combs`
//! continues from there.

use super::events::SEARCH_COMPONENT;
use super::{Bombe, BombeError, BombeLogEvent, BombeResult, Capability};
use serde::{Deserialize, Serialize};

/// Search configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Iterations per chunk before yielding
    pub render: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { render: 1 }
    }
}

/// Observable search state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
    Idle,
    SteppingLooping { combs: u64 },
    Found { combs: u64 },
    Exhausted { combs: u64 },
}

/// Result of running one chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchPoll {
    /// Chunk finished without a stop; call `step_search` again
    Pending { combs: u64 },
    /// Stop found after `combs` iterations
    Stop { combs: u64 },
    /// All N³ positions tried
    Exhausted { combs: u64 },
    /// There are no drum columns to rotate
    NoDrums { combs: u64 },
    /// Cancelled at a chunk boundary
    Cancelled { combs: u64 },
}

impl SearchPoll {
    pub fn combs(&self) -> u64 {
        match *self {
            SearchPoll::Pending { combs }
            | SearchPoll::Stop { combs }
            | SearchPoll::Exhausted { combs }
            | SearchPoll::NoDrums { combs }
            | SearchPoll::Cancelled { combs } => combs,
        }
    }

    /// The run is over (anything but `Pending`)
    pub fn is_finished(&self) -> bool {
        !matches!(self, SearchPoll::Pending { .. })
    }

    fn outcome(&self) -> &'static str {
        match self {
            SearchPoll::Pending { .. } => "pending",
            SearchPoll::Stop { .. } => "stop",
            SearchPoll::Exhausted { .. } => "exhausted",
            SearchPoll::NoDrums { .. } => "no_drums",
            SearchPoll::Cancelled { .. } => "cancelled",
        }
    }
}

/// An active run
#[derive(Debug, Clone)]
pub(crate) struct SearchRun {
    wire: usize,
    combs: u64,
    render: u64,
    cancel_requested: bool,
}

impl Bombe {
    pub fn search_state(&self) -> SearchState {
        self.search_state
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Begin a search on live wire `wire`, counting from `combs`
    ///
    /// Only one search may be active; a second request fails without
    /// touching the running one.
    pub fn start_search(&mut self, wire: usize, combs: u64, config: SearchConfig) -> BombeResult<()> {
        let result = self.begin_search(wire, combs, config);
        let event = match &result {
            Ok(()) => BombeLogEvent::new(SEARCH_COMPONENT, "search_started", "ok").with_combs(combs),
            Err(e) => BombeLogEvent::new(SEARCH_COMPONENT, "search_started", "rejected")
                .with_error_code(e.error_code()),
        };
        self.log(event);
        result
    }

    fn begin_search(&mut self, wire: usize, combs: u64, config: SearchConfig) -> BombeResult<()> {
        if self.search.is_some() {
            return Err(BombeError::SearchActive);
        }
        self.require(Capability::Search)?;
        self.check_wire(wire)?;
        if config.render == 0 {
            return Err(BombeError::InvalidRender);
        }

        self.search = Some(SearchRun {
            wire,
            combs,
            render: config.render,
            cancel_requested: false,
        });
        self.search_state = SearchState::SteppingLooping { combs };
        Ok(())
    }

    /// Run one chunk of the active search
    pub fn step_search(&mut self) -> BombeResult<SearchPoll> {
        let mut run = self.search.take().ok_or(BombeError::NoActiveSearch)?;

        let poll = match self.run_chunk(&mut run) {
            Ok(poll) => poll,
            Err(e) => {
                // A failed chunk ends the run at the last completed position
                self.search_state = SearchState::Idle;
                return Err(e);
            }
        };

        self.search_state = match poll {
            SearchPoll::Pending { combs } => SearchState::SteppingLooping { combs },
            SearchPoll::Stop { combs } => SearchState::Found { combs },
            SearchPoll::Exhausted { combs } | SearchPoll::NoDrums { combs } => {
                SearchState::Exhausted { combs }
            }
            SearchPoll::Cancelled { .. } => SearchState::Idle,
        };

        if poll.is_finished() {
            self.log(
                BombeLogEvent::new(SEARCH_COMPONENT, "search_finished", poll.outcome())
                    .with_combs(poll.combs()),
            );
        } else {
            self.search = Some(run);
        }
        Ok(poll)
    }

    fn run_chunk(&mut self, run: &mut SearchRun) -> BombeResult<SearchPoll> {
        if run.cancel_requested {
            return Ok(SearchPoll::Cancelled { combs: run.combs });
        }

        let size = self.size();
        loop {
            if run.combs >= self.positions() {
                return Ok(SearchPoll::Exhausted { combs: run.combs });
            }
            if self.drums.is_empty() {
                return Ok(SearchPoll::NoDrums { combs: run.combs });
            }

            self.advance_drums(1)?;
            run.combs += 1;

            if self.test_register.connected_set(&self.circuit, run.wire)?.len() != size {
                return Ok(SearchPoll::Stop { combs: run.combs });
            }
            if run.combs % run.render == 0 {
                return Ok(SearchPoll::Pending { combs: run.combs });
            }
        }
    }

    /// Ask the active search to stop at its next chunk boundary
    pub fn cancel_search(&mut self) -> BombeResult<()> {
        let result = match self.search.as_mut() {
            Some(run) => {
                run.cancel_requested = true;
                Ok(())
            }
            None => Err(BombeError::NoActiveSearch),
        };
        self.logged(SEARCH_COMPONENT, "search_cancel_requested", result)
    }

    /// Run a search to its next stop or terminal condition
    pub fn search(&mut self, wire: usize, combs: u64, config: SearchConfig) -> BombeResult<SearchPoll> {
        self.start_search(wire, combs, config)?;
        loop {
            let poll = self.step_search()?;
            if poll.is_finished() {
                return Ok(poll);
            }
        }
    }

    /// Every stop from `combs` up to exhaustion, as iteration counts
    pub fn collect_stops(&mut self, wire: usize, combs: u64, config: SearchConfig) -> BombeResult<Vec<u64>> {
        let mut stops = Vec::new();
        let mut combs = combs;
        loop {
            match self.search(wire, combs, config)? {
                SearchPoll::Stop { combs: at } => {
                    stops.push(at);
                    combs = at;
                }
                _ => return Ok(stops),
            }
        }
    }
}
