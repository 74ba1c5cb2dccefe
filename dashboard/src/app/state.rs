//! # Application State Types
//!
//! Screens, session, revenue dashboard and listing state. Everything here is
//! plain data mutated by the handlers and the event handler while holding the
//! `RwLock` around [`AppState`].

use chrono::{DateTime, Local, NaiveDate};
use shared::{FilterType, Product, RevenueResult, Role, User};

use crate::core::error::Result;
use crate::services::revenue::RevenueQuery;
use crate::services::session::SessionSnapshot;

/// Share of revenue reported as profit on the KPI cards.
pub const PROFIT_RATIO: f64 = 0.2;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Sign-in form
    Login,
    /// Revenue dashboard
    Home,
    /// Product list
    Products,
    /// One product, by id
    ProductDetail(i64),
    /// User list
    Users,
    /// One user, by id
    UserDetail(i64),
    /// Current user's profile and password change
    Profile,
}

impl Screen {
    /// Get screen title for header display
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign in",
            Screen::Home => "Revenue",
            Screen::Products => "Products",
            Screen::ProductDetail(_) => "Product",
            Screen::Users => "Users",
            Screen::UserDetail(_) => "User",
            Screen::Profile => "Profile",
        }
    }

    /// Tab the screen belongs to. `None` for the login screen.
    pub fn tab(&self) -> Option<Tab> {
        match self {
            Screen::Login => None,
            Screen::Home => Some(Tab::Home),
            Screen::Products | Screen::ProductDetail(_) => Some(Tab::Products),
            Screen::Users | Screen::UserDetail(_) => Some(Tab::Users),
            Screen::Profile => Some(Tab::Profile),
        }
    }
}

/// Bottom navigation tabs of a signed-in session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Products,
    Users,
    Profile,
}

impl Tab {
    /// Get all tabs in display order
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Products, Tab::Users, Tab::Profile]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Products => "Products",
            Tab::Users => "Users",
            Tab::Profile => "Profile",
        }
    }

    /// Root screen of the tab
    pub fn screen(&self) -> Screen {
        match self {
            Tab::Home => Screen::Home,
            Tab::Products => Screen::Products,
            Tab::Users => Screen::Users,
            Tab::Profile => Screen::Profile,
        }
    }
}

/// Session sub-state.
///
/// `is_authenticated` implies `token` is present; only [`SessionState::sign_in`],
/// [`SessionState::restore`] and [`SessionState::sign_out`] change either.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    token: Option<String>,
    is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub current_user: Option<User>,
}

impl SessionState {
    pub fn restore(snapshot: SessionSnapshot) -> Self {
        let is_authenticated = snapshot.is_authenticated && snapshot.token.is_some();
        Self {
            token: snapshot.token.filter(|_| is_authenticated),
            is_authenticated,
            ..Default::default()
        }
    }

    pub fn sign_in(&mut self, token: String, user: Option<User>) {
        self.token = Some(token);
        self.is_authenticated = true;
        self.loading = false;
        self.error = None;
        self.current_user = user;
    }

    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Role of the signed-in user, when the login response carried a profile
    /// with role information.
    pub fn role(&self) -> Option<Role> {
        self.current_user
            .as_ref()
            .filter(|u| u.role_id.is_some() || u.role_name.is_some())
            .map(User::role)
    }
}

/// Revenue fetch state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded(RevenueResult),
    Errored(String),
}

/// Figures shown on the KPI cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub revenue: f64,
    pub profit: f64,
}

impl Kpis {
    pub fn from_revenue(revenue: f64) -> Self {
        Self {
            revenue,
            profit: revenue * PROFIT_RATIO,
        }
    }
}

/// Chart series of a breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Revenue dashboard sub-state.
///
/// `selected_date_ms` is an epoch-millisecond instant, read in local time.
/// `latest_seq` is the sequence number of the most recently dispatched fetch;
/// results carrying any other number are stale. `prior_status` is the status
/// a fetch left behind, put back when that fetch is rejected as invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub filter_type: FilterType,
    pub selected_date_ms: i64,
    pub status: FetchStatus,
    pub last_updated: Option<DateTime<Local>>,
    pub picker_visible: bool,
    pub filter_modal_visible: bool,
    /// Blocking alert (validation failures); does not affect `status`
    pub alert: Option<String>,
    pub latest_seq: u64,
    pub prior_status: FetchStatus,
}

impl DashboardState {
    pub fn new(selected_date_ms: i64) -> Self {
        Self {
            filter_type: FilterType::Year,
            selected_date_ms,
            status: FetchStatus::Idle,
            last_updated: None,
            picker_visible: false,
            filter_modal_visible: false,
            alert: None,
            latest_seq: 0,
            prior_status: FetchStatus::Idle,
        }
    }

    pub fn selected_date(&self) -> Result<NaiveDate> {
        Ok(lib_utils::date_from_millis(self.selected_date_ms)?)
    }

    /// Query for the current filter and date.
    pub fn query(&self) -> Result<RevenueQuery> {
        Ok(RevenueQuery::for_date(self.filter_type, self.selected_date()?))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading)
    }

    pub fn result(&self) -> Option<&RevenueResult> {
        match &self.status {
            FetchStatus::Loaded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Errored(message) => Some(message),
            _ => None,
        }
    }

    pub fn kpis(&self) -> Option<Kpis> {
        self.result().map(|r| Kpis::from_revenue(r.total_revenue()))
    }

    /// Breakdown series; `None` for day reports and when nothing is loaded.
    pub fn chart(&self) -> Option<ChartSeries> {
        let details = self.result()?.details.as_ref()?;
        Some(ChartSeries {
            labels: details.labels(),
            values: details.values(),
        })
    }
}

/// Items addressable by id on a detail screen
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Product {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for User {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A fetched list with its selection
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<i64>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            selected: None,
        }
    }
}

impl<T: Identified> ListState<T> {
    pub fn find(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|id| self.find(id))
    }
}

/// Submission state of a form (create user, change password)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub submitting: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl FormState {
    pub fn start(&mut self) {
        self.submitting = true;
        self.message = None;
        self.error = None;
    }
}

/// Main application state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub current_screen: Screen,
    pub session: SessionState,
    pub dashboard: DashboardState,
    pub products: ListState<Product>,
    pub users: ListState<User>,
    pub create_user: FormState,
    pub change_password: FormState,
}

impl AppState {
    pub fn new(session: SessionState, selected_date_ms: i64) -> Self {
        let current_screen = if session.is_authenticated() {
            Screen::Home
        } else {
            Screen::Login
        };

        Self {
            current_screen,
            session,
            dashboard: DashboardState::new(selected_date_ms),
            products: ListState::default(),
            users: ListState::default(),
            create_user: FormState::default(),
            change_password: FormState::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Check if a screen requires authentication
    pub fn requires_auth(screen: Screen) -> bool {
        !matches!(screen, Screen::Login)
    }

    /// Tabs shown for the current session. Empty when signed out; the Users
    /// tab is hidden for a known member profile.
    pub fn visible_tabs(&self) -> Vec<Tab> {
        if !self.is_authenticated() {
            return Vec::new();
        }
        let member = self.session.role() == Some(Role::Member);
        Tab::all()
            .iter()
            .copied()
            .filter(|tab| !(member && *tab == Tab::Users))
            .collect()
    }

    pub fn can_open(&self, screen: Screen) -> bool {
        if Self::requires_auth(screen) && !self.is_authenticated() {
            return false;
        }
        match screen.tab() {
            Some(tab) => self.visible_tabs().contains(&tab),
            None => !self.is_authenticated(),
        }
    }

    /// Drop everything tied to the signed-in session.
    ///
    /// `latest_seq` keeps counting across the reset, so fetches still in
    /// flight from the old session never match a later dispatch.
    pub fn reset_session(&mut self, selected_date_ms: i64) {
        let latest_seq = self.dashboard.latest_seq;
        *self = Self::new(SessionState::default(), selected_date_ms);
        self.dashboard.latest_seq = latest_seq + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{RevenueDetails, RevenueSummary, WeeklyRevenue};

    fn signed_in(role_id: Option<i64>) -> AppState {
        let mut session = SessionState::default();
        let user = role_id.map(|id| User {
            id: 1,
            username: "u".into(),
            role_id: Some(id),
            ..Default::default()
        });
        session.sign_in("tok".into(), user);
        AppState::new(session, 0)
    }

    #[test]
    fn test_restore_requires_token() {
        let state = SessionState::restore(SessionSnapshot {
            token: None,
            is_authenticated: true,
        });
        assert!(!state.is_authenticated());

        let state = SessionState::restore(SessionSnapshot {
            token: Some("t".into()),
            is_authenticated: true,
        });
        assert!(state.is_authenticated());
        assert_eq!(state.token(), Some("t"));
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let mut session = SessionState::default();
        session.sign_in("t".into(), None);
        session.error = Some("x".into());
        session.sign_out();
        assert_eq!(session, SessionState::default());
    }

    #[test]
    fn test_reset_session_invalidates_pending_fetches() {
        let mut state = signed_in(Some(1));
        state.dashboard.latest_seq = 4;
        state.dashboard.status = FetchStatus::Loading;

        state.reset_session(0);

        assert!(!state.is_authenticated());
        assert_eq!(state.current_screen, Screen::Login);
        assert_eq!(state.dashboard.status, FetchStatus::Idle);
        assert!(state.dashboard.latest_seq > 4);
    }

    #[test]
    fn test_visible_tabs_by_role() {
        let signed_out = AppState::new(SessionState::default(), 0);
        assert!(signed_out.visible_tabs().is_empty());
        assert_eq!(signed_out.current_screen, Screen::Login);

        assert_eq!(signed_in(None).visible_tabs().len(), 4);
        assert_eq!(signed_in(Some(1)).visible_tabs().len(), 4);
        assert_eq!(
            signed_in(Some(3)).visible_tabs(),
            vec![Tab::Home, Tab::Products, Tab::Profile]
        );
    }

    #[test]
    fn test_can_open() {
        let member = signed_in(Some(3));
        assert!(member.can_open(Screen::ProductDetail(4)));
        assert!(!member.can_open(Screen::UserDetail(4)));
        assert!(!member.can_open(Screen::Login));

        let signed_out = AppState::new(SessionState::default(), 0);
        assert!(signed_out.can_open(Screen::Login));
        assert!(!signed_out.can_open(Screen::Home));
    }

    #[test]
    fn test_kpis_and_chart() {
        let mut dashboard = DashboardState::new(0);
        assert_eq!(dashboard.kpis(), None);

        dashboard.status = FetchStatus::Loaded(RevenueResult {
            summary: RevenueSummary::new(90000.0),
            details: Some(RevenueDetails::Weekly(vec![WeeklyRevenue {
                week_of_month: 1,
                revenue: 20000.0,
            }])),
        });
        let kpis = dashboard.kpis().unwrap();
        assert_eq!(kpis.revenue, 90000.0);
        assert!((kpis.profit - 18000.0).abs() < 1e-9);

        let chart = dashboard.chart().unwrap();
        assert_eq!(chart.labels, vec!["Week 1".to_string()]);
        assert_eq!(chart.values, vec![20000.0]);
    }

    #[test]
    fn test_list_selection() {
        let list = ListState {
            items: vec![Product {
                id: 7,
                name: "Tea".into(),
                ..Default::default()
            }],
            selected: Some(7),
            ..Default::default()
        };
        assert_eq!(list.selected_item().map(|p| p.name.as_str()), Some("Tea"));
        assert!(list.find(8).is_none());
    }
}
