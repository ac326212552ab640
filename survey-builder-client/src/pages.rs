//! Infinite-scroll loading of paginated listings.

use std::sync::{Mutex, MutexGuard, PoisonError};

use survey_builder::{Page, PageSource, QuestionAnalytics, ResponseRecord, SurveyId};
use tokio_util::sync::CancellationToken;

use crate::{ApiClient, ClientError};

/// What a call to [`PageLoader::load_more`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page arrived and this many items were appended.
    Loaded(usize),
    /// Another page is still in flight; nothing was requested.
    Busy,
    /// Every page has been loaded.
    Exhausted,
    /// The loader was cancelled or reset while the page was in flight.
    Cancelled,
}

/// Loads a listing page by page, appending in order.
///
/// At most one page is in flight at a time. The loader owns a
/// [`CancellationToken`]: once cancelled, an in-flight request is abandoned
/// and any result that still arrives is dropped. [`reset`](Self::reset)
/// discards everything and starts over with a fresh token.
#[derive(Debug)]
pub struct PageLoader<S, T> {
    source: S,
    page_size: u32,
    state: Mutex<LoaderState<T>>,
}

#[derive(Debug)]
struct LoaderState<T> {
    items: Vec<T>,
    next_page: u32,
    exhausted: bool,
    in_flight: bool,
    generation: u64,
    token: CancellationToken,
}

impl<T> LoaderState<T> {
    fn fresh(generation: u64) -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            exhausted: false,
            in_flight: false,
            generation,
            token: CancellationToken::new(),
        }
    }
}

/// Clears `in_flight` if the request future is dropped before it finishes.
struct InFlight<'a, T> {
    state: &'a Mutex<LoaderState<T>>,
    generation: u64,
    armed: bool,
}

impl<T> InFlight<'_, T> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation {
            log::debug!("page request abandoned by its caller");
            state.in_flight = false;
        }
    }
}

impl<S, T> PageLoader<S, T>
where
    S: PageSource<T>,
{
    /// Create a loader that has not fetched anything yet.
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            state: Mutex::new(LoaderState::fresh(0)),
        }
    }

    /// Request the next page unless one is in flight or none remain.
    pub async fn load_more(&self) -> Result<LoadOutcome, S::Error> {
        let (page, generation, token) = {
            let mut state = self.lock();
            if state.in_flight {
                log::trace!("page {} already in flight", state.next_page);
                return Ok(LoadOutcome::Busy);
            }
            if state.exhausted {
                return Ok(LoadOutcome::Exhausted);
            }
            if state.token.is_cancelled() {
                return Ok(LoadOutcome::Cancelled);
            }
            state.in_flight = true;
            (state.next_page, state.generation, state.token.clone())
        };
        let in_flight = InFlight {
            state: &self.state,
            generation,
            armed: true,
        };

        let result = tokio::select! {
            _ = token.cancelled() => None,
            result = self.source.fetch_page(page, self.page_size) => Some(result),
        };

        in_flight.disarm();
        let mut state = self.lock();
        if state.generation != generation {
            log::debug!("dropping page {page} fetched before a reset");
            return Ok(LoadOutcome::Cancelled);
        }
        state.in_flight = false;

        let fetched = match result {
            Some(Ok(fetched)) if !token.is_cancelled() => fetched,
            Some(Err(err)) => return Err(err),
            _ => {
                log::debug!("page {page} cancelled");
                return Ok(LoadOutcome::Cancelled);
            }
        };

        let count = fetched.items.len();
        state.exhausted = !fetched.has_more() || count == 0;
        state.next_page = page + 1;
        state.items.extend(fetched.items);
        log::debug!("loaded page {page} with {count} items");
        Ok(LoadOutcome::Loaded(count))
    }

    /// Abandon the in-flight request, if any, and stop loading.
    pub fn cancel(&self) {
        self.lock().token.cancel();
    }

    /// A handle that cancels this loader until the next reset.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.lock().token.clone()
    }

    /// Cancel, drop all loaded items and start again from the first page.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.token.cancel();
        let generation = state.generation + 1;
        *state = LoaderState::fresh(generation);
    }

    /// Switch to a different listing, discarding the current one.
    pub fn replace_source(&mut self, source: S) {
        self.reset();
        self.source = source;
    }

    /// A copy of the items loaded so far.
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().items.clone()
    }

    /// Number of items loaded so far.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Check if nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if more pages may remain.
    pub fn has_more(&self) -> bool {
        !self.lock().exhausted
    }

    /// Check if a page is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight
    }

    /// Check if the loader has been cancelled since the last reset.
    pub fn is_cancelled(&self) -> bool {
        self.lock().token.is_cancelled()
    }

    /// Take the loaded items, leaving the loader empty but positioned
    /// where it was.
    pub fn take_items(&self) -> Vec<T> {
        std::mem::take(&mut self.lock().items)
    }

    fn lock(&self) -> MutexGuard<'_, LoaderState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Question analytics of one survey as a page source.
#[derive(Debug, Clone)]
pub struct QuestionAnalyticsPages {
    client: ApiClient,
    survey: SurveyId,
}

impl QuestionAnalyticsPages {
    pub fn new(client: ApiClient, survey: SurveyId) -> Self {
        Self { client, survey }
    }
}

impl PageSource<QuestionAnalytics> for QuestionAnalyticsPages {
    type Error = ClientError;

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Page<QuestionAnalytics>, Self::Error> {
        self.client
            .question_analytics_page(self.survey, page, page_size)
            .await
    }
}

/// Responses to one survey as a page source.
#[derive(Debug, Clone)]
pub struct ResponsePages {
    client: ApiClient,
    survey: SurveyId,
}

impl ResponsePages {
    pub fn new(client: ApiClient, survey: SurveyId) -> Self {
        Self { client, survey }
    }
}

impl PageSource<ResponseRecord> for ResponsePages {
    type Error = ClientError;

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Page<ResponseRecord>, Self::Error> {
        self.client.responses_page(self.survey, page, page_size).await
    }
}
