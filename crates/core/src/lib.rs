pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use models::{
    analysis::FinancialAnalysis,
    budget::{FinancialData, FixedCategory, FixedExpense, VariableCategory, VariableExpense},
    dashboard::{Dashboard, Screen},
    personal::PersonalData,
    profile::UserProfile,
    settings::Settings,
    subscription::{CancellationRecord, SubscriptionData},
};
use providers::{static_feed::StaticMarketFeed, traits::MarketFeed};
use services::{
    allocation_service::AllocationService, budget_service::BudgetService,
    order_service::OrderService, subscription_service::SubscriptionService,
};
use storage::{manager::StorageManager, traits::KeyValueStore};
use tracing::{debug, info};

use errors::CoreError;

/// Main entry point for the InvestMind core library.
///
/// Owns the injected key-value store and wires the pure engines to it.
/// Every mutation is persisted before the call returns.
#[must_use]
pub struct InvestMind<S: KeyValueStore> {
    store: S,
    settings: Settings,
    storage: StorageManager,
    feed: Box<dyn MarketFeed>,
    allocation_service: AllocationService,
    order_service: OrderService,
    budget_service: BudgetService,
    subscription_service: SubscriptionService,
}

impl<S: KeyValueStore> std::fmt::Debug for InvestMind<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestMind")
            .field("settings", &self.settings)
            .field("feed", &self.feed.name())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> InvestMind<S> {
    /// Open with default settings on top of `store`.
    pub fn new(store: S) -> Self {
        Self::build(store, Settings::default())
    }

    /// Open with explicit settings. Settings are validated first.
    pub fn with_settings(store: S, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(store, settings))
    }

    /// Replace the market feed (defaults to the static catalogs).
    pub fn with_feed(mut self, feed: Box<dyn MarketFeed>) -> Self {
        self.feed = feed;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Onboarding & Dashboard ──────────────────────────────────────

    /// Validate and persist a finished questionnaire, then build the dashboard.
    /// Nothing is written if validation fails.
    pub fn complete_onboarding(
        &mut self,
        profile: UserProfile,
        now: DateTime<Utc>,
    ) -> Result<Dashboard, CoreError> {
        profile.validate()?;
        self.storage.save(&mut self.store, &profile)?;
        info!(goal = %profile.investment_goal, horizon = %profile.investment_horizon, "onboarding completed");
        Ok(self.build_dashboard(profile, now))
    }

    /// Saved profile, if any.
    pub fn profile(&self) -> Result<Option<UserProfile>, CoreError> {
        self.storage.load(&self.store)
    }

    /// Rebuild the dashboard from the saved profile. Allocation and orders
    /// are recomputed, never read back from storage.
    pub fn load_dashboard(&self, now: DateTime<Utc>) -> Result<Option<Dashboard>, CoreError> {
        Ok(self.profile()?.map(|p| self.build_dashboard(p, now)))
    }

    /// Like `load_dashboard`, but a missing profile is an error.
    pub fn dashboard(&self, now: DateTime<Utc>) -> Result<Dashboard, CoreError> {
        self.load_dashboard(now)?.ok_or(CoreError::ProfileMissing)
    }

    /// Regenerate the news catalog once it is older than the refresh interval.
    /// Returns `true` if the dashboard was refreshed.
    pub fn refresh_news(&self, dashboard: &mut Dashboard, now: DateTime<Utc>) -> bool {
        let interval = Duration::seconds(self.settings.news_refresh_secs);
        if !dashboard.is_stale(now, interval) {
            return false;
        }
        dashboard.news = self.feed.news(now);
        dashboard.generated_at = now;
        debug!(feed = self.feed.name(), "news refreshed");
        true
    }

    /// Forget the profile. Budget, contact and subscription records are kept.
    pub fn logout(&mut self) -> Result<(), CoreError> {
        self.storage.clear::<UserProfile, _>(&mut self.store)?;
        info!("profile cleared");
        Ok(())
    }

    /// Resolve the top-level screen: paywall, then onboarding, then dashboard.
    pub fn current_screen(&self, now: DateTime<Utc>) -> Result<Screen, CoreError> {
        if self.settings.require_subscription && !self.has_active_subscription(now)? {
            return Ok(Screen::Paywall);
        }
        if self.profile()?.is_none() {
            return Ok(Screen::Onboarding);
        }
        Ok(Screen::Dashboard)
    }

    // ── Budget ──────────────────────────────────────────────────────

    /// The saved budget record, or an empty default.
    pub fn financial_data(&self) -> Result<FinancialData, CoreError> {
        Ok(self.storage.load(&self.store)?.unwrap_or_default())
    }

    pub fn set_monthly_income(&mut self, income: f64) -> Result<(), CoreError> {
        self.update_financial_data(|svc, data| svc.set_monthly_income(data, income))
    }

    pub fn set_salary_date(&mut self, day: u8) -> Result<(), CoreError> {
        self.update_financial_data(|svc, data| svc.set_salary_date(data, day))
    }

    /// Add a recurring bill. Returns the new expense id.
    pub fn add_fixed_expense(
        &mut self,
        name: impl Into<String>,
        amount: f64,
        due_date: u8,
        category: FixedCategory,
    ) -> Result<String, CoreError> {
        let expense = FixedExpense::new(name, amount, due_date, category);
        let id = expense.id.clone();
        self.update_financial_data(|svc, data| svc.add_fixed_expense(data, expense))?;
        Ok(id)
    }

    /// Add a one-off expense for a calendar month. Returns the new expense id.
    pub fn add_variable_expense(
        &mut self,
        name: impl Into<String>,
        amount: f64,
        category: VariableCategory,
        month: u32,
        year: i32,
    ) -> Result<String, CoreError> {
        let expense = VariableExpense::new(name, amount, category, month, year);
        let id = expense.id.clone();
        self.update_financial_data(|svc, data| svc.add_variable_expense(data, expense))?;
        Ok(id)
    }

    pub fn remove_fixed_expense(&mut self, id: &str) -> Result<FixedExpense, CoreError> {
        self.update_financial_data(|svc, data| svc.remove_fixed_expense(data, id))
    }

    pub fn remove_variable_expense(&mut self, id: &str) -> Result<VariableExpense, CoreError> {
        self.update_financial_data(|svc, data| svc.remove_variable_expense(data, id))
    }

    /// Budget analysis as of `today`. `None` until an income has been entered.
    pub fn financial_analysis(&self, today: NaiveDate) -> Result<Option<FinancialAnalysis>, CoreError> {
        let data = self.financial_data()?;
        if data.monthly_income <= 0.0 {
            return Ok(None);
        }
        Ok(Some(self.budget_service.analyze_financial_data(&data, today)))
    }

    pub fn clear_financial_data(&mut self) -> Result<(), CoreError> {
        self.storage.clear::<FinancialData, _>(&mut self.store)
    }

    // ── Personal Data ───────────────────────────────────────────────

    /// Saved contact details, or empty fields.
    pub fn personal_data(&self) -> Result<PersonalData, CoreError> {
        Ok(self.storage.load(&self.store)?.unwrap_or_default())
    }

    /// Mask and persist contact details. Returns what was stored.
    pub fn save_personal_data(&mut self, data: PersonalData) -> Result<PersonalData, CoreError> {
        let masked = data.masked();
        self.storage.save(&mut self.store, &masked)?;
        Ok(masked)
    }

    // ── Subscription ────────────────────────────────────────────────

    /// Start a new subscription period and drop any cancellation marker.
    pub fn activate_subscription(&mut self, now: DateTime<Utc>) -> Result<SubscriptionData, CoreError> {
        let subscription = self.subscription_service.activate(now)?;
        self.storage.save(&mut self.store, &subscription)?;
        self.storage.clear::<CancellationRecord, _>(&mut self.store)?;
        info!(expiry = %subscription.expiry_date, "subscription activated");
        Ok(subscription)
    }

    pub fn subscription(&self) -> Result<Option<SubscriptionData>, CoreError> {
        self.storage.load(&self.store)
    }

    pub fn has_active_subscription(&self, now: DateTime<Utc>) -> Result<bool, CoreError> {
        let subscription = self.subscription()?;
        Ok(self.subscription_service.is_active(subscription.as_ref(), now))
    }

    /// Soft-cancel: record the marker with a snapshot of the contact details.
    /// Access continues until the current period expires.
    pub fn cancel_subscription(
        &mut self,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<CancellationRecord, CoreError> {
        let snapshot = self.storage.load::<PersonalData, _>(&self.store)?;
        let record = self.subscription_service.cancel(reason, snapshot, now);
        self.storage.save(&mut self.store, &record)?;
        info!("subscription cancelled");
        Ok(record)
    }

    /// A cancellation marker is present (its content is not inspected).
    pub fn is_subscription_cancelled(&self) -> Result<bool, CoreError> {
        self.storage.exists::<CancellationRecord, _>(&self.store)
    }

    pub fn cancellation(&self) -> Result<Option<CancellationRecord>, CoreError> {
        self.storage.load(&self.store)
    }

    /// Undo a cancellation by removing the marker.
    pub fn reactivate_subscription(&mut self) -> Result<(), CoreError> {
        self.storage.clear::<CancellationRecord, _>(&mut self.store)
    }

    pub fn subscription_days_remaining(&self, now: DateTime<Utc>) -> Result<i64, CoreError> {
        let subscription = self.subscription()?;
        Ok(self.subscription_service.days_remaining(subscription.as_ref(), now))
    }

    /// Expiry as `dd/mm/yyyy`, empty without a subscription.
    pub fn subscription_expiry_label(&self) -> Result<String, CoreError> {
        let subscription = self.subscription()?;
        Ok(self.subscription_service.format_expiry(subscription.as_ref()))
    }

    /// Drop the subscription record. The cancellation marker is untouched.
    pub fn clear_subscription(&mut self) -> Result<(), CoreError> {
        self.storage.clear::<SubscriptionData, _>(&mut self.store)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build_dashboard(&self, profile: UserProfile, now: DateTime<Utc>) -> Dashboard {
        let allocation = self.allocation_service.calculate_allocation(&profile);
        let investor_profile = self.allocation_service.classify_investor(&profile);
        let orders = self.order_service.generate_orders(&allocation, &profile);
        Dashboard {
            investor_profile,
            allocation,
            trends: self.feed.trends(),
            orders,
            news: self.feed.news(now),
            opportunities: self.feed.opportunities(),
            generated_at: now,
            profile,
        }
    }

    /// Load → mutate → save. Nothing is written if `f` fails.
    fn update_financial_data<T>(
        &mut self,
        f: impl FnOnce(&BudgetService, &mut FinancialData) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut data = self.financial_data()?;
        let out = f(&self.budget_service, &mut data)?;
        self.storage.save(&mut self.store, &data)?;
        Ok(out)
    }

    fn build(store: S, settings: Settings) -> Self {
        let storage = StorageManager::new(settings.key_prefix.clone());
        let subscription_service = SubscriptionService::new(
            settings.subscription_duration_days,
            settings.subscription_price,
        );

        Self {
            store,
            settings,
            storage,
            feed: Box::new(StaticMarketFeed::new()),
            allocation_service: AllocationService::new(),
            order_service: OrderService::new(),
            budget_service: BudgetService::new(),
            subscription_service,
        }
    }
}
