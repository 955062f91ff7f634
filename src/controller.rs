//! Widget lifecycle and event wiring
//!
//! The [`Controller`] loads the dataset once, renders it, and then turns search
//! field events into filtered renders: typing is debounced, submitting is
//! immediate and cancels any pending debounced search.

use crate::debounce::{Debounce, Debouncer};
use crate::render::Renderer;
use crate::search::{SearchQuery, search};
use crate::store::DataStore;
use crate::ui::InputEvent;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Default quiet period before a typed query is searched
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub struct Controller {
    store: DataStore,
    renderer: Renderer,
    debouncer: Box<dyn Debounce>,
    debounce_delay: Duration,
    state: Mutex<ControllerState>,
}

impl Controller {
    pub fn new(store: DataStore, renderer: Renderer, debounce_delay: Duration) -> Self {
        Self::with_debouncer(store, renderer, Box::new(Debouncer::new()), debounce_delay)
    }

    pub fn with_debouncer(
        store: DataStore,
        renderer: Renderer,
        debouncer: Box<dyn Debounce>,
        debounce_delay: Duration,
    ) -> Self {
        Self {
            store,
            renderer,
            debouncer,
            debounce_delay,
            state: Mutex::new(ControllerState::Idle),
        }
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, next: ControllerState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("Controller state {} -> {}", *state, next);
        *state = next;
    }

    #[must_use]
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Whether a typed query is still waiting for its quiet period
    #[must_use]
    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    #[must_use]
    pub fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }

    /// Load the dataset and render the outcome. Only the first call loads.
    pub async fn start(&self) -> ControllerState {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state != ControllerState::Idle {
                warn!("Controller already started ({})", *state);
                return *state;
            }
            *state = ControllerState::Loading;
        }
        self.renderer.render_loading();

        match self.store.load().await {
            Ok(()) => {
                self.set_state(ControllerState::Ready);
                self.renderer.render_results(&self.store.all());
                ControllerState::Ready
            }
            Err(e) => {
                self.set_state(ControllerState::Failed);
                self.renderer.render_error(&e.user_message());
                ControllerState::Failed
            }
        }
    }

    /// Search field text changed: search once typing pauses
    pub fn on_input_change(self: &Arc<Self>, value: String) {
        let controller = Arc::downgrade(self);
        self.debouncer.schedule_boxed(
            Box::new(move || {
                if let Some(controller) = controller.upgrade() {
                    controller.search_and_render(&value);
                }
            }),
            self.debounce_delay,
        );
    }

    /// Enter or search button: search right away
    pub fn on_submit(&self, value: &str) {
        if self.debouncer.cancel_pending() {
            debug!("Submit superseded a pending search");
        }
        self.search_and_render(value);
    }

    pub fn handle(self: &Arc<Self>, event: InputEvent) {
        match event {
            InputEvent::Changed(value) => self.on_input_change(value),
            InputEvent::Submit(value) => self.on_submit(&value),
        }
    }

    /// Normalise `raw`, filter the current dataset and render the result
    pub fn search_and_render(&self, raw: &str) {
        let query = SearchQuery::new(raw);
        let cities = self.store.all();
        let start_time = Instant::now();

        if query.is_empty() {
            self.renderer.render_results(&cities);
            debug!("Rendered all {} cities", cities.len());
            return;
        }

        let matches = search(&cities, &query);
        self.renderer.render_results(&matches);
        debug!(
            "Query '{}' matched {} of {} cities in {:?}",
            query,
            matches.len(),
            cities.len(),
            start_time.elapsed()
        );
    }

    /// Dispatch events until the sender side closes
    pub async fn run(self: &Arc<Self>, mut events: mpsc::Receiver<InputEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        debug!("Input channel closed");
    }

    /// Accept input and load the dataset concurrently; input that arrives while
    /// loading is searched against the still-empty dataset.
    pub async fn serve(self: &Arc<Self>, events: mpsc::Receiver<InputEvent>) -> ControllerState {
        let (state, ()) = tokio::join!(self.start(), self.run(events));
        info!("Session ended in state {}", state);
        state
    }

    /// Spawn [`serve`](Self::serve) onto the runtime
    pub fn launch(
        self: &Arc<Self>,
        events: mpsc::Receiver<InputEvent>,
    ) -> JoinHandle<ControllerState> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.serve(events).await })
    }
}
