use std::collections::HashMap;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use yomu_client::{AnalyzeBackend, AnalyzeError, AnalyzeRequest};
use yomu_types::{PageResult, Source};

use crate::state::ReaderState;

/// Result of one spawned page fetch, delivered back to the controller
#[derive(Debug)]
pub struct FetchCompletion {
    pub request_id: u64,
    pub page: usize,
    pub result: Result<PageResult, AnalyzeError>,
}

struct InFlight {
    request_id: u64,
    cancel: CancellationToken,
}

/// Source selection, pagination and prefetch cache.
///
/// All state lives here and is only changed by the methods below. Fetches run
/// as tokio tasks; their outcomes come back as [`FetchCompletion`]s which the
/// owner feeds to [`PageController::apply`], so results are applied in one place
/// and in arrival order.
pub struct PageController {
    backend: Arc<dyn AnalyzeBackend>,
    page_size: usize,
    prefetch_pages: usize,
    state: ReaderState,
    /// Pages fetched for the current source
    cache: HashMap<usize, PageResult>,
    /// At most one fetch per page index, primary or background
    in_flight: HashMap<usize, InFlight>,
    /// Page whose fetch drives the loading indicator
    primary: Option<usize>,
    /// Parent of every fetch token for the current source
    session: CancellationToken,
    next_request_id: u64,
    completion_tx: AsyncSender<FetchCompletion>,
    completion_rx: AsyncReceiver<FetchCompletion>,
}

impl PageController {
    pub fn new(backend: Arc<dyn AnalyzeBackend>, page_size: usize, prefetch_pages: usize) -> Self {
        let (completion_tx, completion_rx) = kanal::unbounded_async();

        Self {
            backend,
            page_size: page_size.max(1),
            prefetch_pages,
            state: ReaderState::default(),
            cache: HashMap::new(),
            in_flight: HashMap::new(),
            primary: None,
            session: CancellationToken::new(),
            next_request_id: 0,
            completion_tx,
            completion_rx,
        }
    }

    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.state.page_count(self.page_size)
    }

    pub fn is_cached(&self, page: usize) -> bool {
        self.cache.contains_key(&page)
    }

    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Receiver of fetch outcomes. Every item must be handed to [`Self::apply`]
    pub fn completions(&self) -> AsyncReceiver<FetchCompletion> {
        self.completion_rx.clone()
    }

    pub fn select_file(&mut self, name: impl Into<String>, content: Vec<u8>) {
        self.select_source(Source::file(name, content));
    }

    pub fn select_preset(&mut self, id: impl Into<String>) {
        self.select_source(Source::preset(id));
    }

    fn select_source(&mut self, source: Source) {
        tracing::info!("Selected source: {}", source.display_name());
        self.clear_session();
        self.state.source = Some(source);
        self.state.current_page = 0;
        self.state.page = None;
        self.state.displayed_page = None;
        self.state.total_length = 0;
        self.state.last_error = None;
        self.load_page(0);
    }

    /// Drop the source, the displayed page and all fetched or pending pages
    pub fn reset(&mut self) {
        tracing::info!("Reader reset");
        self.clear_session();
        self.state = ReaderState::default();
    }

    fn clear_session(&mut self) {
        self.session.cancel();
        self.session = CancellationToken::new();
        self.in_flight.clear();
        self.primary = None;
        self.state.loading = false;
        self.cache.clear();
    }

    /// Show `index`, from the cache when possible, then prefetch ahead of it
    pub fn load_page(&mut self, index: usize) {
        if self.state.source.is_none() {
            return;
        }
        self.state.current_page = index;

        if let Some(cached) = self.cache.get(&index) {
            tracing::debug!("Page {index} served from cache");
            self.state.page = Some(cached.clone());
            self.state.displayed_page = Some(index);
            if self.state.total_length == 0 {
                self.state.total_length = cached.total_length;
            }
            self.primary = None;
            self.state.loading = false;
            self.prefetch(index);
            return;
        }

        if self.in_flight.contains_key(&index) {
            tracing::debug!("Page {index} already in flight, waiting on it");
        } else {
            self.spawn_fetch(index);
        }
        self.primary = Some(index);
        self.state.loading = true;
    }

    /// Fetch the next pages in the background. They land in the cache only
    pub fn prefetch(&mut self, current: usize) {
        for offset in 1..=self.prefetch_pages {
            let target = current + offset;
            if target * self.page_size >= self.state.total_length {
                break;
            }
            if self.cache.contains_key(&target) || self.in_flight.contains_key(&target) {
                continue;
            }
            tracing::debug!("Prefetching page {target}");
            self.spawn_fetch(target);
        }
    }

    /// Returns false when already on the last page
    pub fn next_page(&mut self) -> bool {
        if !self.state.has_next(self.page_size) {
            return false;
        }
        self.load_page(self.state.current_page + 1);
        true
    }

    /// Returns false on the first page
    pub fn prev_page(&mut self) -> bool {
        if !self.state.has_prev() {
            return false;
        }
        self.load_page(self.state.current_page - 1);
        true
    }

    /// Abort the fetch behind the loading indicator. Background fetches keep running
    pub fn cancel(&mut self) {
        if let Some(page) = self.primary.take() {
            if let Some(in_flight) = self.in_flight.remove(&page) {
                in_flight.cancel.cancel();
            }
            tracing::info!("Request for page {page} cancelled");
        }
        self.state.loading = false;
    }

    /// Cycle furigana/translation on a word of the displayed page.
    ///
    /// The change is saved under the displayed page's index, which differs from
    /// `current_page` while a newer page is loading, cancelled or failed.
    pub fn toggle_token(&mut self, id: u64) -> bool {
        let (Some(page), Some(index)) = (self.state.page.as_mut(), self.state.displayed_page)
        else {
            return false;
        };
        let Some(token) = page.token_mut(id) else {
            return false;
        };
        token.toggle();
        self.cache.insert(index, page.clone());
        true
    }

    fn spawn_fetch(&mut self, page: usize) {
        let Some(source) = self.state.source.clone() else {
            return;
        };

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let cancel = self.session.child_token();
        self.in_flight.insert(
            page,
            InFlight {
                request_id,
                cancel: cancel.clone(),
            },
        );

        let request = AnalyzeRequest::for_page(source, page, self.page_size);
        let backend = Arc::clone(&self.backend);
        let tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => Err(AnalyzeError::Cancelled),
                result = backend.analyze(&request) => result,
            };

            if tx
                .send(FetchCompletion {
                    request_id,
                    page,
                    result,
                })
                .await
                .is_err()
            {
                tracing::debug!("Controller gone, dropping result for page {page}");
            }
        });
    }

    /// Fold a finished fetch into the state.
    ///
    /// Results of cancelled or superseded requests are dropped. A result for a
    /// page the user has since left is cached but not displayed. Returns true
    /// when what is on screen changed.
    pub fn apply(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion {
            request_id,
            page,
            result,
        } = completion;

        let live = self
            .in_flight
            .get(&page)
            .is_some_and(|in_flight| in_flight.request_id == request_id);
        if !live {
            tracing::debug!("Discarding stale result for page {page} (request {request_id})");
            return false;
        }
        self.in_flight.remove(&page);

        let is_primary = self.primary == Some(page);
        if is_primary {
            self.primary = None;
            self.state.loading = false;
        }

        match result {
            Ok(result) => {
                self.record_total_length(result.total_length);
                self.cache.insert(page, result.clone());

                if is_primary && page == self.state.current_page {
                    tracing::debug!("Displaying page {page} ({} words)", result.word_count());
                    self.state.page = Some(result);
                    self.state.displayed_page = Some(page);
                    self.state.last_error = None;
                    self.prefetch(page);
                }
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!("Request for page {page} aborted");
            }
            Err(e) => {
                tracing::error!("Error fetching page {page}: {e}");
                if is_primary {
                    self.state.last_error = Some(e.to_string());
                }
            }
        }

        is_primary
    }

    fn record_total_length(&mut self, total_length: usize) {
        if self.state.total_length == 0 {
            self.state.total_length = total_length;
        } else if self.state.total_length != total_length {
            tracing::warn!(
                "Backend reported total length {total_length}, keeping {}",
                self.state.total_length
            );
        }
    }

    /// Apply completions until the page behind the loading indicator has resolved
    pub async fn wait_for_page(&mut self) {
        let completions = self.completions();
        while self.state.loading {
            match completions.recv().await {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(_) => break,
            }
        }
    }

    /// Apply completions until no fetch is outstanding
    pub async fn settle(&mut self) {
        let completions = self.completions();
        while self.has_in_flight() {
            match completions.recv().await {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(_) => break,
            }
        }
    }
}
