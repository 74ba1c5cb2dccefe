//! # Application Orchestrator
//!
//! The [`App`] struct owns the application state and coordinates user actions,
//! background tasks and the results they send back.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Owner (CLI / view layer)                   │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │  App (orchestrator)                                  │   │
//! │  │  - handle_*() - user actions                         │   │
//! │  │  - on_tick() / process_next_event() - task results   │   │
//! │  └────────────┬─────────────────────────────────────────┘   │
//! │               │                                             │
//! │  ┌────────────▼─────────────────────────────────────────┐   │
//! │  │  State: Arc<RwLock<AppState>>                        │   │
//! │  │  - session, dashboard, listings, forms               │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ async_channel (unbounded)
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │                    Tokio tasks                              │
//! │  - login            -> AppEvent::LoginResult                │
//! │  - revenue fetch    -> AppEvent::RevenueLoaded { seq, .. }  │
//! │  - listings, forms  -> AppEvent::*Loaded / UserCreated / .. │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Revenue dashboard
//!
//! `Idle -> Loading` on first entry to the home screen, on a valid filter or
//! date change and on refresh. `Loading -> Loaded` or `Loading -> Errored`
//! when the latest fetch completes. Invalid selections raise the alert and
//! leave the state where it was; a fetch rejected by the date check on
//! dispatch does the same, putting back the status it replaced.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dashboard::app::{App, AppServices};
//! use dashboard::core::SystemClock;
//! use dashboard::services::{api::ApiClient, revenue::RetryPolicy, storage::FileTokenStore};
//! use shared::FilterType;
//!
//! # async fn run() -> dashboard::core::Result<()> {
//! let services = AppServices::new(
//!     Arc::new(ApiClient::new("http://127.0.0.1:5000/api", 10)?),
//!     Arc::new(FileTokenStore::new(".dashboard")),
//!     Arc::new(SystemClock),
//!     RetryPolicy::default(),
//! );
//! let mut app = App::new(services);
//!
//! app.handle_filter_change(FilterType::Month);
//! while app.state.read().dashboard.is_loading() {
//!     app.process_next_event().await;
//! }
//! println!("{:?}", app.state.read().dashboard.kpis());
//! # Ok(())
//! # }
//! ```

mod event_handler;
mod events;
mod handlers;
mod state;
mod tasks;

pub use event_handler::{PASSWORD_CHANGED, USER_CREATED};
pub use events::AppEvent;
pub use state::*;

use crate::core::clock::Clock;
use crate::core::service::{ApiService, TokenStore};
use crate::services::revenue::{RetryPolicy, RevenueService};
use crate::services::session::SessionService;
use async_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use shared::{ChangePasswordRequest, CreateUserRequest, FilterType};
use std::sync::Arc;

/// Services shared by handlers and background tasks.
#[derive(Clone)]
pub struct AppServices {
    pub api: Arc<dyn ApiService>,
    pub tokens: Arc<dyn TokenStore>,
    pub clock: Arc<dyn Clock>,
    pub session: SessionService,
    pub revenue: RevenueService,
}

impl AppServices {
    pub fn new(
        api: Arc<dyn ApiService>,
        tokens: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            session: SessionService::new(api.clone(), tokens.clone()),
            revenue: RevenueService::new(api.clone(), tokens.clone(), clock.clone(), retry),
            api,
            tokens,
            clock,
        }
    }
}

/// Main application orchestrator.
pub struct App {
    /// Thread-safe shared application state.
    ///
    /// Hold locks for the duration of a read or update only; handlers never
    /// keep a lock across an `.await`.
    pub state: Arc<RwLock<AppState>>,

    /// Channel receiver for async task results.
    pub event_rx: Receiver<AppEvent>,

    /// Cloned into every spawned task.
    event_tx: Sender<AppEvent>,

    services: AppServices,
}

impl App {
    /// Create the application, restoring the session from storage.
    ///
    /// A stored token marks the session authenticated and opens the home
    /// screen; nothing is fetched until a screen is entered.
    pub fn new(services: AppServices) -> Self {
        let snapshot = services.session.check_auth_state().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read stored session, starting signed out");
            Default::default()
        });
        let today = lib_utils::start_of_day_millis(services.clock.today());
        let state = AppState::new(SessionState::restore(snapshot), today);

        let (event_tx, event_rx) = unbounded();

        tracing::info!(
            authenticated = state.is_authenticated(),
            screen = state.current_screen.title(),
            "App state initialized"
        );

        App {
            state: Arc::new(RwLock::new(state)),
            event_rx,
            event_tx,
            services,
        }
    }

    pub fn services(&self) -> &AppServices {
        &self.services
    }

    /// Apply every event already received, without waiting.
    pub fn on_tick(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next task result and apply it.
    ///
    /// Returns `false` if the channel is closed.
    pub async fn process_next_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Ok(event) => {
                self.handle_event(event);
                true
            }
            Err(_) => false,
        }
    }

    /// Tabs shown for the current session.
    pub fn visible_tabs(&self) -> Vec<Tab> {
        self.state.read().visible_tabs()
    }

    pub fn handle_login_click(&self, username: String, password: String) {
        handlers::auth::handle_login_click(
            self.state.clone(),
            &self.services,
            self.event_tx.clone(),
            username,
            password,
        );
    }

    pub fn handle_logout(&self) {
        handlers::auth::handle_logout(self.state.clone(), &self.services);
    }

    pub fn handle_screen_change(&self, screen: Screen) {
        handlers::navigation::handle_screen_change(
            self.state.clone(),
            &self.services,
            self.event_tx.clone(),
            screen,
        );
    }

    pub fn handle_tab_change(&self, tab: Tab) {
        handlers::navigation::handle_tab_change(
            self.state.clone(),
            &self.services,
            self.event_tx.clone(),
            tab,
        );
    }

    pub fn handle_filter_change(&self, filter: FilterType) {
        handlers::dashboard::handle_filter_change(
            self.state.clone(),
            &self.services,
            self.event_tx.clone(),
            filter,
        );
    }

    /// Confirm a date from the picker, as an epoch-millisecond instant.
    pub fn handle_date_confirm(&self, selected_date_ms: i64) {
        handlers::dashboard::handle_date_confirm(
            self.state.clone(),
            &self.services,
            self.event_tx.clone(),
            selected_date_ms,
        );
    }

    /// Apply a filter type and a date at once.
    pub fn handle_report_select(&self, filter: FilterType, selected_date_ms: i64) {
        handlers::dashboard::handle_report_select(
            self.state.clone(),
            &self.services,
            self.event_tx.clone(),
            filter,
            selected_date_ms,
        );
    }

    /// Re-run the current fetch; also the retry action of the error state.
    pub fn handle_refresh(&self) -> u64 {
        handlers::dashboard::handle_refresh(self.state.clone(), &self.services, self.event_tx.clone())
    }

    pub fn open_date_picker(&self) {
        handlers::dashboard::set_picker_visible(self.state.clone(), true);
    }

    pub fn close_date_picker(&self) {
        handlers::dashboard::set_picker_visible(self.state.clone(), false);
    }

    pub fn open_filter_modal(&self) {
        handlers::dashboard::set_filter_modal_visible(self.state.clone(), true);
    }

    pub fn close_filter_modal(&self) {
        handlers::dashboard::set_filter_modal_visible(self.state.clone(), false);
    }

    pub fn dismiss_alert(&self) {
        handlers::dashboard::dismiss_alert(self.state.clone());
    }

    pub fn clear_error(&self) {
        handlers::dashboard::clear_error(self.state.clone());
    }

    pub fn load_products(&self) {
        tasks::catalog::fetch_products(self.state.clone(), &self.services, self.event_tx.clone());
    }

    pub fn load_users(&self) {
        tasks::catalog::fetch_users(self.state.clone(), &self.services, self.event_tx.clone());
    }

    pub fn handle_create_user(&self, request: CreateUserRequest) {
        tasks::catalog::submit_create_user(
            self.state.clone(),
            &self.services,
            self.event_tx.clone(),
            request,
        );
    }

    pub fn handle_change_password(&self, request: ChangePasswordRequest) {
        tasks::catalog::submit_change_password(
            self.state.clone(),
            &self.services,
            self.event_tx.clone(),
            request,
        );
    }
}
