//! The dashboard session: two selection slots and their analyses.
//!
//! The session never performs I/O of its own. Collaborators are passed in
//! per call, and every analytics request is represented by a ticket so an
//! answer arriving after the user has moved on can be recognised and
//! dropped.

use placesense_core::{
    AnalysisReport, AnalyticsError, AnalyticsService, ComparisonOutcome, ComparisonReport,
    FocalPlace, MapsProvider, PersistedSelection, Place, PlaceComparator, PlaceRecord, Review,
    SearchQuery, SelectionStore, plan_markers,
};

use crate::{
    AnalysisTicket, Audience, ComparisonState, ComparisonTicket, Completion, PlaceAnalysis,
    SessionConfig, SessionConfigError, SessionError, Slot, SlotState,
};

#[derive(Debug, Default)]
struct SlotEntry {
    generation: u64,
    state: SlotState,
}

impl SlotEntry {
    fn assign(&mut self, slot: Slot, place: Place) -> AnalysisTicket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = AnalysisTicket {
            slot,
            generation: self.generation,
            place_id: place.id.clone(),
        };
        self.state = SlotState::Pending(place);
        ticket
    }

    fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state = SlotState::Empty;
    }

    fn ticket(&self, slot: Slot) -> Option<AnalysisTicket> {
        self.state.place().map(|place| AnalysisTicket {
            slot,
            generation: self.generation,
            place_id: place.id.clone(),
        })
    }

    fn is_current(&self, ticket: &AnalysisTicket) -> bool {
        self.generation == ticket.generation
            && self
                .state
                .place()
                .is_some_and(|place| place.id == ticket.place_id)
    }
}

/// State behind the comparison dashboard.
///
/// # Examples
/// ```
/// use placesense_core::{Place, PlaceId};
/// use placesense_core::test_support::MemorySelectionStore;
/// use placesense_session::{Session, SessionConfig, Slot};
///
/// let mut session = Session::new(SessionConfig::default(), MemorySelectionStore::default())
///     .expect("default config is valid");
/// let place = Place::new(PlaceId::new("q1").expect("valid id"), "Queen's Hotel");
/// let ticket = session.select(Slot::First, place);
/// assert_eq!(ticket.place_id().as_str(), "q1");
/// ```
#[derive(Debug)]
pub struct Session<S> {
    config: SessionConfig,
    comparator: PlaceComparator,
    store: S,
    first: SlotEntry,
    second: SlotEntry,
    comparison: ComparisonState,
    comparison_request: u64,
}

impl<S: SelectionStore> Session<S> {
    /// Start an empty session.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] when `config` fails validation.
    pub fn new(config: SessionConfig, store: S) -> Result<Self, SessionError> {
        let validated = config.validate()?;
        let comparator =
            PlaceComparator::new(validated.comparison).map_err(SessionConfigError::from)?;
        Ok(Self {
            config: validated,
            comparator,
            store,
            first: SlotEntry::default(),
            second: SlotEntry::default(),
            comparison: ComparisonState::Idle,
            comparison_request: 0,
        })
    }

    /// Start a session from the store's last saved state.
    ///
    /// Restored places come back pending; the returned tickets are the
    /// analysis requests to issue for them. An unreadable store is logged
    /// and treated as empty.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] when `config` fails validation.
    pub fn restore(
        config: SessionConfig,
        store: S,
    ) -> Result<(Self, Vec<AnalysisTicket>), SessionError> {
        let mut session = Self::new(config, store)?;
        let saved = session.store.load().unwrap_or_else(|err| {
            log::warn!("Ignoring unreadable saved selection: {err}");
            PersistedSelection::default()
        });
        let mut tickets = Vec::new();
        if let Some(place) = saved.first {
            tickets.push(session.first.assign(Slot::First, place));
        }
        if let Some(place) = saved.second {
            tickets.push(session.second.assign(Slot::Second, place));
        }
        if let Some(report) = saved.comparison {
            session.comparison = ComparisonState::Ready(Box::new(report));
        }
        Ok((session, tickets))
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// End the session, handing back its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// What `slot` currently shows.
    #[must_use]
    pub const fn slot(&self, slot: Slot) -> &SlotState {
        &self.entry(slot).state
    }

    /// Progress of the two-place comparison.
    #[must_use]
    pub const fn comparison(&self) -> &ComparisonState {
        &self.comparison
    }

    /// Put `place` into `slot` and return the analysis request to issue.
    ///
    /// Any earlier answer for the slot is cleared immediately, requests
    /// still in flight for it become stale and the previous comparison is
    /// discarded. The new selection is saved to the store.
    pub fn select(&mut self, slot: Slot, place: Place) -> AnalysisTicket {
        let ticket = self.entry_mut(slot).assign(slot, place);
        self.reset_comparison();
        self.persist();
        ticket
    }

    /// Empty `slot`, invalidating its in-flight request.
    pub fn clear(&mut self, slot: Slot) {
        self.entry_mut(slot).clear();
        self.reset_comparison();
        self.persist();
    }

    /// Record the analytics service's answer for `ticket`.
    ///
    /// Returns [`Completion::Stale`] without touching the slot when the
    /// slot has been reassigned since the ticket was issued.
    pub fn complete_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        result: Result<AnalysisReport, AnalyticsError>,
    ) -> Completion {
        let entry = match ticket.slot {
            Slot::First => &mut self.first,
            Slot::Second => &mut self.second,
        };
        let place = match entry.state.place() {
            Some(place) if entry.is_current(ticket) => place.clone(),
            _ => {
                log::debug!(
                    "Discarding stale analysis of {} for the {} slot",
                    ticket.place_id,
                    ticket.slot
                );
                return Completion::Stale;
            }
        };
        match result {
            Ok(report) => {
                let analysis = PlaceAnalysis::new(place, report, &self.config.excluded_emotions);
                entry.state = SlotState::Ready(Box::new(analysis));
                Completion::Applied
            }
            Err(err) => {
                log::warn!("Analysis of {} failed: {err}", ticket.place_id);
                entry.state = SlotState::Failed {
                    place,
                    message: err.to_string(),
                };
                Completion::Failed
            }
        }
    }

    /// Issue `ticket` against `service` and record the answer.
    pub fn fetch_analysis<A>(&mut self, service: &A, ticket: &AnalysisTicket) -> Completion
    where
        A: AnalyticsService + ?Sized,
    {
        let result = service.analyze(&ticket.place_id);
        self.complete_analysis(ticket, result)
    }

    /// Request a comparison of the two selected places.
    ///
    /// # Errors
    /// Returns [`SessionError::IncompleteSelection`] unless both slots hold
    /// a place.
    pub fn begin_comparison(&mut self) -> Result<ComparisonTicket, SessionError> {
        let (Some(first), Some(second)) = (
            self.first.ticket(Slot::First),
            self.second.ticket(Slot::Second),
        ) else {
            return Err(SessionError::IncompleteSelection);
        };
        self.comparison_request = self.comparison_request.wrapping_add(1);
        self.comparison = ComparisonState::Pending;
        Ok(ComparisonTicket {
            first,
            second,
            request: self.comparison_request,
        })
    }

    /// Record the answer to a comparison request.
    ///
    /// The answer is dropped as stale when either slot changed or a newer
    /// comparison was requested. A stored comparison is saved.
    pub fn complete_comparison(
        &mut self,
        ticket: &ComparisonTicket,
        result: Result<ComparisonReport, AnalyticsError>,
    ) -> Completion {
        let current = ticket.request == self.comparison_request
            && self.first.is_current(&ticket.first)
            && self.second.is_current(&ticket.second);
        if !current {
            log::debug!(
                "Discarding stale comparison of {} and {}",
                ticket.first(),
                ticket.second()
            );
            return Completion::Stale;
        }
        match result {
            Ok(report) => {
                self.comparison = ComparisonState::Ready(Box::new(report));
                self.persist();
                Completion::Applied
            }
            Err(err) => {
                log::warn!(
                    "Comparison of {} and {} failed: {err}",
                    ticket.first(),
                    ticket.second()
                );
                self.comparison = ComparisonState::Failed(err.to_string());
                Completion::Failed
            }
        }
    }

    /// Issue `ticket` against `service` and record the answer.
    pub fn fetch_comparison<A>(&mut self, service: &A, ticket: &ComparisonTicket) -> Completion
    where
        A: AnalyticsService + ?Sized,
    {
        let result = service.compare(ticket.first(), ticket.second());
        self.complete_comparison(ticket, result)
    }

    /// Flip one recommendation's checked flag in `slot`.
    ///
    /// # Errors
    /// Returns [`SessionError::NotAnalysed`] when the slot has no analysis
    /// and [`SessionError::Recommendation`] for an unknown index.
    pub fn toggle_recommendation(
        &mut self,
        slot: Slot,
        audience: Audience,
        index: usize,
    ) -> Result<(), SessionError> {
        let SlotState::Ready(analysis) = &mut self.entry_mut(slot).state else {
            return Err(SessionError::NotAnalysed(slot));
        };
        let toggled = analysis.checklist(audience).toggled(index)?;
        *analysis.checklist_mut(audience) = toggled;
        Ok(())
    }

    /// Compare the place in `slot` with places around it.
    ///
    /// Searches within the configured radius and keyword, then partitions
    /// the results against the selected place's rating and categories.
    ///
    /// # Errors
    /// Returns [`SessionError::EmptySlot`] or
    /// [`SessionError::MissingLocation`] when there is nothing to search
    /// around, and [`SessionError::Provider`] when the search fails.
    pub fn nearby<P>(&self, provider: &P, slot: Slot) -> Result<ComparisonOutcome, SessionError>
    where
        P: MapsProvider + ?Sized,
    {
        let place = self
            .entry(slot)
            .state
            .place()
            .ok_or(SessionError::EmptySlot(slot))?;
        let location = place
            .location
            .ok_or_else(|| SessionError::MissingLocation(place.id.clone()))?;
        let query = SearchQuery::Nearby {
            location,
            radius_m: self.config.nearby_radius_m,
            keyword: self.config.nearby_keyword.clone(),
        };
        let records = provider.search(&query).inspect_err(|err| {
            log::warn!("Nearby search around {} failed: {err}", place.id);
        })?;
        let candidates: Vec<Place> = records.iter().map(PlaceRecord::to_place).collect();
        Ok(self.comparator.compare(&FocalPlace::from(place), &candidates))
    }

    /// Run a text search, show the results and select the last match.
    ///
    /// Returns the analysis request for the newly selected place, or
    /// `None` when nothing usable was found.
    ///
    /// # Errors
    /// Returns [`SessionError::Provider`] when searching or rendering fails.
    pub fn search<P>(
        &mut self,
        provider: &P,
        slot: Slot,
        text: &str,
    ) -> Result<Option<AnalysisTicket>, SessionError>
    where
        P: MapsProvider + ?Sized,
    {
        let records = provider.search(&SearchQuery::Text(text.to_owned()))?;
        if records.is_empty() {
            log::debug!("Search for '{text}' returned no places");
            return Ok(None);
        }
        let view = plan_markers(&records);
        provider.render(&view)?;
        Ok(view.selected.map(|place| self.select(slot, place)))
    }

    /// Reviews of the place in `slot`.
    ///
    /// # Errors
    /// Returns [`SessionError::EmptySlot`] for an empty slot and
    /// [`SessionError::Provider`] when the lookup fails.
    pub fn reviews<P>(&self, provider: &P, slot: Slot) -> Result<Vec<Review>, SessionError>
    where
        P: MapsProvider + ?Sized,
    {
        let place = self
            .entry(slot)
            .state
            .place()
            .ok_or(SessionError::EmptySlot(slot))?;
        Ok(provider.details(&place.id)?)
    }

    const fn entry(&self, slot: Slot) -> &SlotEntry {
        match slot {
            Slot::First => &self.first,
            Slot::Second => &self.second,
        }
    }

    const fn entry_mut(&mut self, slot: Slot) -> &mut SlotEntry {
        match slot {
            Slot::First => &mut self.first,
            Slot::Second => &mut self.second,
        }
    }

    fn reset_comparison(&mut self) {
        self.comparison_request = self.comparison_request.wrapping_add(1);
        self.comparison = ComparisonState::Idle;
    }

    fn persist(&self) {
        let state = PersistedSelection {
            first: self.first.state.place().cloned(),
            second: self.second.state.place().cloned(),
            comparison: self.comparison.report().cloned(),
        };
        if let Err(err) = self.store.save(&state) {
            log::warn!("Failed to save selection: {err}");
        }
    }
}
