use super::{
    Activation, Dashboard, Instruction, Loader, NewInstruction, SectionKind, SectionRouter,
    Settings, SystemHealth,
    dashboard::DashboardLoader,
    instructions::{self, InstructionsLoader},
    settings::{self, SettingsLoader},
    subscriptions::{self, SubscriptionsView},
    system::SystemHealthLoader,
    users::UsersView,
};
use crate::{
    Result,
    api::ApiClient,
    session::{self, Prompt},
};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// What each section last displayed.
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub dashboard: Option<Dashboard>,
    pub users: UsersView,
    pub subscriptions: SubscriptionsView,
    pub instructions: Option<Vec<Instruction>>,
    pub settings: Option<Settings>,
    pub system: Option<SystemHealth>,
}

/// Section controller. Loads go through the router so a response that
/// arrives after its section was left or reloaded never touches the state.
#[derive(Clone)]
pub struct Panel {
    api: ApiClient,
    router: SectionRouter,
    state: Arc<Mutex<PanelState>>,
}

impl Panel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            router: SectionRouter::new(),
            state: Arc::new(Mutex::new(PanelState::default())),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn router(&self) -> &SectionRouter {
        &self.router
    }

    pub fn snapshot(&self) -> PanelState {
        self.lock_state().clone()
    }

    pub async fn show(&self, kind: SectionKind) -> Result<()> {
        let activation = self.router.activate(kind);
        self.load(&activation).await
    }

    pub async fn refresh(&self) -> Result<()> {
        let activation = self.router.refresh();
        self.load(&activation).await
    }

    pub async fn show_users_page(&self, page: u32) -> Result<()> {
        let activation = self.router.activate(SectionKind::Users);
        self.load_users(&activation, page).await
    }

    pub async fn show_subscriptions_page(&self, page: u32) -> Result<()> {
        let activation = self.router.activate(SectionKind::Subscriptions);
        self.load_subscriptions(&activation, page).await
    }

    /// Filters the users table by `term` and reloads it from the first page.
    pub async fn search_users(&self, term: &str) -> Result<()> {
        {
            let mut state = self.lock_state();
            state.users.search = term.trim().to_string();
            state.users.page = 1;
        }
        self.show_users_page(1).await
    }

    pub async fn set_user_filter(&self, filter: &str) -> Result<()> {
        {
            let mut state = self.lock_state();
            state.users.filter = filter.to_string();
            state.users.page = 1;
        }
        self.show_users_page(1).await
    }

    pub async fn set_subscription_filter(&self, filter: &str) -> Result<()> {
        {
            let mut state = self.lock_state();
            state.subscriptions.filter = filter.to_string();
            state.subscriptions.page = 1;
        }
        self.show_subscriptions_page(1).await
    }

    pub async fn create_instruction(&self, instruction: NewInstruction) -> Result<()> {
        instructions::create(&self.api, instruction).await?;
        self.reload_if_showing(SectionKind::Instructions).await
    }

    pub async fn extend_subscription(&self, user_id: i64, days: i64) -> Result<()> {
        subscriptions::extend(&self.api, user_id, days).await?;
        self.reload_if_showing(SectionKind::Subscriptions).await
    }

    pub async fn save_settings(&self, form: &Settings) -> Result<()> {
        settings::save(&self.api, form).await?;
        Ok(())
    }

    pub fn logout(&self, prompt: &dyn Prompt) -> bool {
        session::logout(&self.api, prompt)
    }

    async fn load(&self, activation: &Activation) -> Result<()> {
        match activation.kind() {
            SectionKind::Dashboard => {
                self.apply(activation, DashboardLoader, |state, dashboard| {
                    state.dashboard = Some(dashboard)
                })
                .await
            }
            SectionKind::Users => {
                let page = self.lock_state().users.page;
                self.load_users(activation, page).await
            }
            SectionKind::Subscriptions => {
                let page = self.lock_state().subscriptions.page;
                self.load_subscriptions(activation, page).await
            }
            SectionKind::Instructions => {
                self.apply(activation, InstructionsLoader, |state, list| {
                    state.instructions = Some(list.instructions)
                })
                .await
            }
            SectionKind::Settings => {
                self.apply(activation, SettingsLoader, |state, settings| {
                    state.settings = Some(settings)
                })
                .await
            }
            SectionKind::System => {
                self.apply(activation, SystemHealthLoader, |state, health| {
                    state.system = Some(health)
                })
                .await
            }
        }
    }

    async fn load_users(&self, activation: &Activation, page: u32) -> Result<()> {
        let query = self.lock_state().users.query(page);
        self.apply(activation, query, move |state, data| {
            state.users.page = page;
            state.users.data = Some(data);
        })
        .await
    }

    async fn load_subscriptions(&self, activation: &Activation, page: u32) -> Result<()> {
        let query = self.lock_state().subscriptions.query(page);
        self.apply(activation, query, move |state, data| {
            state.subscriptions.page = page;
            state.subscriptions.data = Some(data);
        })
        .await
    }

    async fn apply<L, F>(&self, activation: &Activation, loader: L, update: F) -> Result<()>
    where
        L: Loader,
        F: FnOnce(&mut PanelState, L::Output) + Send,
    {
        let output = loader.load(&self.api).await?;
        activation.ensure_current()?;
        update(&mut *self.lock_state(), output);
        debug!("Section {} updated", activation.kind());
        Ok(())
    }

    async fn reload_if_showing(&self, kind: SectionKind) -> Result<()> {
        if self.router.current() == kind {
            self.refresh().await
        } else {
            Ok(())
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
