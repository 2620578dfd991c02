//! Quote service owning the collection, filter, and display state.
//!
//! Every mutation runs "read current state, compute next state, persist,
//! publish" while holding one lock, so overlapping syncs, imports, and adds
//! never interleave their writes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{watch, Mutex};

use crate::category::{render_options, CategoryFilter, FilterOption};
use crate::display::{show_random, Display};
use crate::error::Result;
use crate::export::{self, IMPORT_SUCCESS_MESSAGE};
use crate::form::QuoteForm;
use crate::models::Quote;
use crate::repository::QuoteRepository;
use crate::store::QuoteStore;
use crate::sync::{merge_quotes, QuoteRemote, SyncOutcome, SYNC_SUCCESS_MESSAGE};

/// Snapshot of everything a front end renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    /// Category filter options, "all" first
    pub options: Vec<FilterOption>,
    /// Currently selected filter value
    pub selected: String,
    /// Display region content
    pub display: Display,
    /// Acknowledgment produced by the update that published this view
    pub notice: Option<&'static str>,
    /// Number of quotes in the collection
    pub total: usize,
}

/// Outcome of submitting the add-quote form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A field was blank; nothing changed
    Rejected,
    /// The quote was stored; `sync` is `None` when the follow-up sync failed
    Added {
        quote: Quote,
        sync: Option<SyncOutcome>,
    },
}

struct QuoteState {
    repository: QuoteRepository,
    filter: CategoryFilter,
    display: Display,
    rng: StdRng,
}

impl QuoteState {
    fn view(&self, notice: Option<&'static str>) -> QuoteView {
        QuoteView {
            options: render_options(self.repository.categories()),
            selected: self.filter.selected().to_string(),
            display: self.display.clone(),
            notice,
            total: self.repository.len(),
        }
    }
}

/// Thread-safe controller for all quote operations.
#[derive(Clone)]
pub struct QuoteService {
    state: Arc<Mutex<QuoteState>>,
    store: Arc<QuoteStore>,
    remote: Arc<dyn QuoteRemote>,
    views: Arc<watch::Sender<QuoteView>>,
}

impl QuoteService {
    /// Open the service, loading the persisted collection.
    ///
    /// When a collection was stored, a random quote is drawn right away.
    pub fn open(store: QuoteStore, remote: Arc<dyn QuoteRemote>) -> Result<Self> {
        Self::open_with_rng(store, remote, StdRng::from_entropy())
    }

    /// Open the service with a caller-supplied random source.
    pub fn open_with_rng(
        store: QuoteStore,
        remote: Arc<dyn QuoteRemote>,
        rng: StdRng,
    ) -> Result<Self> {
        let loaded = store.load()?;
        let mut state = QuoteState {
            repository: QuoteRepository::new(),
            filter: CategoryFilter::new(),
            display: Display::Blank,
            rng,
        };

        if let Some(quotes) = loaded {
            tracing::info!("Loaded {} stored quotes", quotes.len());
            state.repository.replace_all(quotes);
            Self::redraw_with(&store, &mut state)?;
        }

        let (views, _) = watch::channel(state.view(None));
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            store: Arc::new(store),
            remote,
            views: Arc::new(views),
        })
    }

    /// Receive every published view.
    pub fn subscribe(&self) -> watch::Receiver<QuoteView> {
        self.views.subscribe()
    }

    /// Current view snapshot.
    pub async fn view(&self) -> QuoteView {
        self.state.lock().await.view(None)
    }

    pub async fn quotes(&self) -> Vec<Quote> {
        self.state.lock().await.repository.quotes().to_vec()
    }

    pub async fn categories(&self) -> Vec<String> {
        self.state.lock().await.repository.categories().to_vec()
    }

    pub async fn filter_options(&self) -> Vec<FilterOption> {
        render_options(self.state.lock().await.repository.categories())
    }

    /// The quote most recently displayed in this session.
    pub fn last_viewed(&self) -> Result<Option<Quote>> {
        self.store.last_viewed()
    }

    /// Drop session-scoped state when the owning session ends.
    pub fn end_session(&self) -> Result<()> {
        self.store.clear_session()
    }

    /// Draw a new random quote under the current filter.
    pub async fn show_random(&self) -> Result<Display> {
        let mut state = self.state.lock().await;
        let display = Self::redraw_with(&self.store, &mut state)?;
        self.publish(&state, None);
        Ok(display)
    }

    /// Redraw under the current filter; alias of [`Self::show_random`].
    pub async fn filter(&self) -> Result<Display> {
        self.show_random().await
    }

    /// Change the category filter and immediately redraw from the new pool.
    pub async fn select_category(&self, category: &str) -> Result<Display> {
        let mut state = self.state.lock().await;
        state.filter.select(category);
        let display = Self::redraw_with(&self.store, &mut state)?;
        self.publish(&state, None);
        Ok(display)
    }

    /// Add a quote, persist, and redraw, without syncing.
    ///
    /// Returns `false` when either field is blank.
    pub async fn add_quote(&self, quote: Quote) -> Result<bool> {
        let mut state = self.state.lock().await;
        let mut next = state.repository.clone();
        if !next.add(quote) {
            return Ok(false);
        }

        self.store.save(next.quotes())?;
        state.repository = next;
        Self::redraw_with(&self.store, &mut state)?;
        self.publish(&state, None);
        Ok(true)
    }

    /// Submit the add-quote form.
    ///
    /// Blank fields are ignored silently. A stored quote clears the form and
    /// is pushed to the server through an immediate sync.
    pub async fn submit_form(&self, form: &mut QuoteForm) -> Result<Submission> {
        let Some(quote) = form.submit() else {
            return Ok(Submission::Rejected);
        };

        if !self.add_quote(quote.clone()).await? {
            return Ok(Submission::Rejected);
        }
        form.reset();

        let sync = self.sync(Some(quote.clone())).await.ok();
        Ok(Submission::Added { quote, sync })
    }

    /// Read a file and import its quotes.
    pub async fn import_file(&self, path: &Path) -> Result<usize> {
        let raw = tokio::fs::read_to_string(path).await?;
        self.import_str(&raw).await
    }

    /// Append every quote in an exported JSON body, without deduplication.
    ///
    /// Malformed input leaves the collection untouched.
    pub async fn import_str(&self, raw: &str) -> Result<usize> {
        let imported = export::parse_import(raw)?;
        let count = imported.len();

        let mut state = self.state.lock().await;
        let mut next = state.repository.clone();
        next.extend(imported);

        self.store.save(next.quotes())?;
        state.repository = next;
        Self::redraw_with(&self.store, &mut state)?;
        self.publish(&state, Some(IMPORT_SUCCESS_MESSAGE));

        tracing::info!("Imported {count} quotes");
        Ok(count)
    }

    /// Export the collection as `quotes.json` (see [`export::export_to_path`]).
    pub async fn export_to_path(&self, target: Option<&Path>) -> Result<PathBuf> {
        let quotes = self.quotes().await;
        export::export_to_path(&quotes, target)
    }

    /// Sync with the quote server.
    ///
    /// Fetches the server collection, pushes `new_quote` when given, then
    /// merges. Any failure aborts the whole attempt with local state and
    /// storage unchanged; failures are logged here.
    pub async fn sync(&self, new_quote: Option<Quote>) -> Result<SyncOutcome> {
        match self.try_sync(new_quote).await {
            Ok(outcome) => {
                tracing::info!(
                    "Synced with server: fetched={}, added={}, total={}",
                    outcome.fetched,
                    outcome.added,
                    outcome.total
                );
                Ok(outcome)
            }
            Err(error) => {
                tracing::error!("Error syncing with server: {error}");
                Err(error)
            }
        }
    }

    async fn try_sync(&self, new_quote: Option<Quote>) -> Result<SyncOutcome> {
        let remote_quotes = self.remote.fetch_quotes().await?;
        if let Some(quote) = &new_quote {
            self.remote.post_quote(quote).await?;
        }

        let mut state = self.state.lock().await;
        let local = state.repository.quotes();
        let local_distinct = merge_quotes(local, &[]).len();
        let merged = merge_quotes(local, &remote_quotes);

        self.store.save(&merged)?;
        let outcome = SyncOutcome {
            fetched: remote_quotes.len(),
            added: merged.len() - local_distinct,
            total: merged.len(),
        };
        state.repository.replace_all(merged);
        Self::redraw_with(&self.store, &mut state)?;
        self.publish(&state, Some(SYNC_SUCCESS_MESSAGE));

        Ok(outcome)
    }

    fn redraw_with(store: &QuoteStore, state: &mut QuoteState) -> Result<Display> {
        let display = show_random(
            state.repository.quotes(),
            state.filter.selected(),
            &mut state.rng,
        );
        if let Display::Quote(quote) = &display {
            store.save_last_viewed(quote)?;
        }
        state.display = display.clone();
        Ok(display)
    }

    fn publish(&self, state: &QuoteState, notice: Option<&'static str>) {
        self.views.send_replace(state.view(notice));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;
    use crate::store::{KeyValueStore, MemoryKeyValueStore, QUOTES_KEY};

    fn quote(text: &str, category: &str) -> Quote {
        Quote::new(text, category).unwrap()
    }

    #[derive(Default)]
    struct FakeRemote {
        quotes: StdMutex<Vec<Quote>>,
        posted: StdMutex<Vec<Quote>>,
        offline: std::sync::atomic::AtomicBool,
        fetches: AtomicUsize,
    }

    impl FakeRemote {
        fn with_quotes(quotes: Vec<Quote>) -> Arc<Self> {
            let remote = Self::default();
            *remote.quotes.lock().unwrap() = quotes;
            Arc::new(remote)
        }

        fn go_offline(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl QuoteRemote for FakeRemote {
        async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                return Err(Error::Remote("unreachable".to_string()));
            }
            Ok(self.quotes.lock().unwrap().clone())
        }

        async fn post_quote(&self, quote: &Quote) -> Result<()> {
            self.posted.lock().unwrap().push(quote.clone());
            Ok(())
        }
    }

    /// Durable store shared between the service and the test body.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<MemoryKeyValueStore>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }

    fn open_service(
        durable: &SharedStore,
        remote: Arc<FakeRemote>,
    ) -> (QuoteService, SharedStore) {
        let session = SharedStore::default();
        let store = QuoteStore::new(durable.clone(), session.clone());
        let service =
            QuoteService::open_with_rng(store, remote, StdRng::seed_from_u64(42)).unwrap();
        (service, session)
    }

    fn seeded(durable: &SharedStore, quotes: &[Quote]) {
        durable
            .set(QUOTES_KEY, &serde_json::to_string(quotes).unwrap())
            .unwrap();
    }

    #[tokio::test]
    async fn open_loads_stored_quotes_and_draws_one() {
        let durable = SharedStore::default();
        seeded(&durable, &[quote("A", "X"), quote("B", "Y")]);

        let (service, _) = open_service(&durable, FakeRemote::with_quotes(vec![]));

        let view = service.view().await;
        assert_eq!(view.total, 2);
        assert!(view.display.quote().is_some());
        assert_eq!(service.categories().await, vec!["X", "Y"]);
        assert!(service.last_viewed().unwrap().is_some());
    }

    #[tokio::test]
    async fn open_with_empty_storage_shows_nothing() {
        let durable = SharedStore::default();
        let (service, _) = open_service(&durable, FakeRemote::with_quotes(vec![]));

        assert_eq!(service.view().await.display, Display::Blank);
        assert!(service.last_viewed().unwrap().is_none());
    }

    #[tokio::test]
    async fn open_rejects_corrupted_storage() {
        let durable = SharedStore::default();
        durable.set(QUOTES_KEY, "not json").unwrap();

        let store = QuoteStore::new(durable.clone(), MemoryKeyValueStore::new());
        let error = QuoteService::open(store, FakeRemote::with_quotes(vec![]))
            .err()
            .unwrap();

        assert!(error.is_decode());
        assert_eq!(durable.get(QUOTES_KEY).unwrap().as_deref(), Some("not json"));
    }

    #[tokio::test]
    async fn submit_valid_form_adds_persists_and_syncs() {
        let durable = SharedStore::default();
        let remote = FakeRemote::with_quotes(vec![quote("R", "remote")]);
        let (service, _) = open_service(&durable, remote.clone());
        let mut form = QuoteForm::new("  Keep going ", " grit ");

        let submission = service.submit_form(&mut form).await.unwrap();

        let Submission::Added { quote: added, sync } = submission else {
            panic!("expected the quote to be added");
        };
        assert_eq!(added, quote("Keep going", "grit"));
        assert_eq!(sync.unwrap().added, 1);
        assert_eq!(form, QuoteForm::default());
        assert_eq!(*remote.posted.lock().unwrap(), vec![added.clone()]);
        assert_eq!(
            service.quotes().await,
            vec![added, quote("R", "remote")]
        );
        assert_eq!(service.categories().await, vec!["grit", "remote"]);
        assert!(durable.get(QUOTES_KEY).unwrap().unwrap().contains("Keep going"));
    }

    #[tokio::test]
    async fn submit_blank_form_changes_nothing() {
        let durable = SharedStore::default();
        seeded(&durable, &[quote("A", "X")]);
        let remote = FakeRemote::with_quotes(vec![]);
        let (service, _) = open_service(&durable, remote.clone());
        let stored_before = durable.get(QUOTES_KEY).unwrap();

        for (text, category) in [("", "X"), ("B", "   "), (" ", "")] {
            let mut form = QuoteForm::new(text, category);
            let submission = service.submit_form(&mut form).await.unwrap();
            assert_eq!(submission, Submission::Rejected);
            assert_eq!(form, QuoteForm::new(text, category));
        }

        assert_eq!(service.quotes().await, vec![quote("A", "X")]);
        assert_eq!(service.categories().await, vec!["X"]);
        assert_eq!(durable.get(QUOTES_KEY).unwrap(), stored_before);
        assert_eq!(remote.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submit_keeps_quote_when_follow_up_sync_fails() {
        let durable = SharedStore::default();
        let remote = FakeRemote::with_quotes(vec![]);
        remote.go_offline();
        let (service, _) = open_service(&durable, remote);

        let submission = service
            .submit_form(&mut QuoteForm::new("A", "X"))
            .await
            .unwrap();

        assert_eq!(
            submission,
            Submission::Added {
                quote: quote("A", "X"),
                sync: None
            }
        );
        assert_eq!(service.quotes().await, vec![quote("A", "X")]);
    }

    #[tokio::test]
    async fn sync_merges_local_first_without_duplicates() {
        let durable = SharedStore::default();
        seeded(&durable, &[quote("A", "X")]);
        let remote = FakeRemote::with_quotes(vec![quote("A", "X"), quote("B", "Y")]);
        let (service, _) = open_service(&durable, remote.clone());

        let outcome = service.sync(None).await.unwrap();

        assert_eq!(
            service.quotes().await,
            vec![quote("A", "X"), quote("B", "Y")]
        );
        assert_eq!(outcome.fetched, 2);
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.message(), SYNC_SUCCESS_MESSAGE);
        assert!(remote.posted.lock().unwrap().is_empty());

        let stored: Vec<Quote> =
            serde_json::from_str(&durable.get(QUOTES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, vec![quote("A", "X"), quote("B", "Y")]);
    }

    #[tokio::test]
    async fn failed_sync_leaves_collection_and_storage_untouched() {
        let durable = SharedStore::default();
        seeded(&durable, &[quote("A", "X"), quote("A", "X")]);
        let remote = FakeRemote::with_quotes(vec![quote("B", "Y")]);
        remote.go_offline();
        let (service, _) = open_service(&durable, remote);
        let views = service.subscribe();
        let stored_before = durable.get(QUOTES_KEY).unwrap();

        let error = service.sync(None).await.unwrap_err();

        assert!(matches!(error, Error::Remote(_)));
        assert_eq!(
            service.quotes().await,
            vec![quote("A", "X"), quote("A", "X")]
        );
        assert_eq!(durable.get(QUOTES_KEY).unwrap(), stored_before);
        assert!(!views.has_changed().unwrap());
    }

    #[tokio::test]
    async fn sync_publishes_acknowledgment() {
        let durable = SharedStore::default();
        let (service, _) =
            open_service(&durable, FakeRemote::with_quotes(vec![quote("B", "Y")]));
        let views = service.subscribe();

        service.sync(None).await.unwrap();

        let view = views.borrow().clone();
        assert_eq!(view.notice, Some(SYNC_SUCCESS_MESSAGE));
        assert_eq!(view.total, 1);
        assert_eq!(view.options.len(), 2);
    }

    #[tokio::test]
    async fn empty_filter_pool_does_not_touch_session_storage() {
        let durable = SharedStore::default();
        seeded(&durable, &[quote("A", "X")]);
        let (service, session) = open_service(&durable, FakeRemote::with_quotes(vec![]));
        let last_before = session.get(crate::store::LAST_VIEWED_KEY).unwrap();

        let display = service.select_category("Y").await.unwrap();

        assert_eq!(display, Display::Empty);
        assert_eq!(
            display.render(),
            "No quotes available for this category."
        );
        assert_eq!(
            session.get(crate::store::LAST_VIEWED_KEY).unwrap(),
            last_before
        );
    }

    #[tokio::test]
    async fn selecting_a_category_narrows_every_draw() {
        let durable = SharedStore::default();
        seeded(
            &durable,
            &[quote("A", "X"), quote("B", "Y"), quote("C", "X")],
        );
        let (service, _) = open_service(&durable, FakeRemote::with_quotes(vec![]));

        let first = service.select_category("X").await.unwrap();
        assert_eq!(first.quote().unwrap().category, "X");
        for _ in 0..50 {
            let display = service.filter().await.unwrap();
            assert_eq!(display.quote().unwrap().category, "X");
            assert_eq!(service.last_viewed().unwrap().as_ref(), display.quote());
        }
    }

    #[tokio::test]
    async fn import_appends_without_dedup_and_acknowledges() {
        let durable = SharedStore::default();
        seeded(&durable, &[quote("A", "X")]);
        let (service, _) = open_service(&durable, FakeRemote::with_quotes(vec![]));
        let views = service.subscribe();

        let count = service
            .import_str(r#"[{"text":"A","category":"X"},{"text":"B","category":"Y"}]"#)
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            service.quotes().await,
            vec![quote("A", "X"), quote("A", "X"), quote("B", "Y")]
        );
        assert_eq!(views.borrow().notice, Some(IMPORT_SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn imported_padded_category_stays_selectable() {
        let durable = SharedStore::default();
        let (service, _) = open_service(&durable, FakeRemote::with_quotes(vec![]));
        service
            .import_str(r#"[{"text":"A","category":" X "}]"#)
            .await
            .unwrap();

        let options = service.filter_options().await;
        assert_eq!(options[1].value, " X ");

        let display = service.select_category(&options[1].value).await.unwrap();

        assert_eq!(display.quote().map(|quote| quote.text.as_str()), Some("A"));
        assert_eq!(service.view().await.selected, " X ");
    }

    #[tokio::test]
    async fn malformed_import_preserves_state() {
        let durable = SharedStore::default();
        seeded(&durable, &[quote("A", "X")]);
        let (service, _) = open_service(&durable, FakeRemote::with_quotes(vec![]));

        let error = service.import_str("[{\"text\": 1}]").await.unwrap_err();

        assert!(error.is_decode());
        assert_eq!(service.quotes().await, vec![quote("A", "X")]);
    }

    #[tokio::test]
    async fn export_then_import_into_empty_service_round_trips() {
        let temp = tempfile::tempdir().unwrap();
        let original = vec![quote("B", "Y"), quote("A", "X"), quote("B", "Y")];

        let source_store = SharedStore::default();
        seeded(&source_store, &original);
        let (source, _) = open_service(&source_store, FakeRemote::with_quotes(vec![]));
        let path = source.export_to_path(Some(temp.path())).await.unwrap();

        let (target, _) =
            open_service(&SharedStore::default(), FakeRemote::with_quotes(vec![]));
        target.import_file(&path).await.unwrap();

        assert_eq!(target.quotes().await, original);
    }

    #[tokio::test]
    async fn concurrent_adds_and_syncs_lose_nothing() {
        let durable = SharedStore::default();
        let remote = FakeRemote::with_quotes(vec![quote("R", "remote")]);
        let (service, _) = open_service(&durable, remote);

        let mut tasks = Vec::new();
        for index in 0..10 {
            let service = service.clone();
            tasks.push(tokio::spawn(async move {
                service
                    .add_quote(quote(&format!("local {index}"), "mine"))
                    .await
                    .unwrap();
                service.sync(None).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let quotes = service.quotes().await;
        assert_eq!(quotes.len(), 11);
        let stored: Vec<Quote> =
            serde_json::from_str(&durable.get(QUOTES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, quotes);
    }
}
