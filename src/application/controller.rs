// src/application/controller.rs
// Single dispatch entry point for every user action

use std::str::FromStr;
use std::sync::Arc;

use futures_util::future;
use rust_decimal::Decimal;

use crate::application::market_data::MarketDataService;
use crate::application::state::DashboardState;
use crate::domain::models::NewProduct;
use crate::domain::repository::ProductRepository;

/// Blocking interaction with the person at the screen.
pub trait UserPrompt {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

/// Everything a user can do to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EditName(String),
    EditCost(String),
    SetMargin(Decimal),
    Submit,
    Delete { id: String },
    Refresh,
}

/// Owns the state container and routes every mutation through
/// [`DashboardController::dispatch`]. No failure here is fatal; the
/// session stays interactive on every error path.
pub struct DashboardController {
    state: DashboardState,
    market: MarketDataService,
    store: Arc<dyn ProductRepository + Send + Sync>,
    prompt: Arc<dyn UserPrompt + Send + Sync>,
}

impl DashboardController {
    pub fn new(
        market: MarketDataService,
        store: Arc<dyn ProductRepository + Send + Sync>,
        prompt: Arc<dyn UserPrompt + Send + Sync>,
    ) -> Self {
        Self {
            state: DashboardState::default(),
            market,
            store,
            prompt,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Loads the rate, the inflation index and the product list
    /// concurrently. Each result lands in its own state slice;
    /// completion order does not matter.
    pub async fn refresh_all(&mut self) {
        let (rate, inflation, products) = future::join3(
            self.market.fetch_rate(),
            self.market.fetch_inflation(),
            self.store.list(),
        )
        .await;

        self.state.rate = rate;
        self.state.inflation = inflation;
        match products {
            Ok(products) => self.state.products = products,
            // stale list kept
            Err(e) => log::error!("Failed to load products: {}", e),
        }
    }

    pub async fn dispatch(&mut self, action: Action) {
        match action {
            Action::EditName(name) => self.state.form.name = name,
            Action::EditCost(cost) => self.state.form.cost = cost,
            Action::SetMargin(pct) => self.state.margin_pct = pct,
            Action::Submit => self.submit().await,
            Action::Delete { id } => self.delete(&id).await,
            Action::Refresh => self.refresh_all().await,
        }
    }

    /// Validates the form, inserts, then re-reads the list. The cost must
    /// parse to a positive number and the name must be non-empty before
    /// any network call happens.
    async fn submit(&mut self) {
        if self.state.saving {
            // a save is already in flight
            return;
        }

        let cost = match Decimal::from_str(self.state.form.cost.trim()) {
            Ok(c) if c > Decimal::ZERO => c,
            _ => {
                self.prompt.alert("Invalid cost");
                return;
            }
        };
        let name = self.state.form.name.trim().to_string();
        if name.is_empty() {
            self.prompt.alert("Product name is required");
            return;
        }

        self.state.saving = true;
        match self.store.insert(NewProduct::new(name, cost)).await {
            Ok(()) => {
                self.state.form.clear();
                self.refresh_products().await;
            }
            // form kept so the user can retry as typed
            Err(e) => log::debug!("Insert failed: {}", e),
        }
        self.state.saving = false;
    }

    /// Deletes after an interactive confirmation; a declined prompt makes
    /// no call at all. Failed deletes leave the list untouched.
    async fn delete(&mut self, id: &str) {
        if !self.prompt.confirm("Are you sure you want to delete this product?") {
            return;
        }
        match self.store.delete(id).await {
            Ok(()) => self.refresh_products().await,
            Err(_) => {}
        }
    }

    async fn refresh_products(&mut self) {
        match self.store.list().await {
            Ok(products) => self.state.products = products,
            Err(e) => log::error!("Failed to load products: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::domain::errors::{MarketDataError, MarketDataResult, StoreError, StoreResult};
    use crate::domain::models::{InflationSample, Product, QuoteSource};
    use crate::domain::repository::{ExchangeRateSource, InflationSource};

    #[derive(Default)]
    struct RecordingStore {
        products: Mutex<Vec<Product>>,
        fail_inserts: bool,
        fail_lists: bool,
        inserts: AtomicUsize,
        deletes: AtomicUsize,
        lists: AtomicUsize,
    }

    impl RecordingStore {
        fn seeded(products: Vec<Product>) -> Self {
            Self {
                products: Mutex::new(products),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ProductRepository for RecordingStore {
        async fn list(&self) -> StoreResult<Vec<Product>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            if self.fail_lists {
                return Err(StoreError::Request("store is down".to_string()));
            }
            Ok(self.products.lock().unwrap().clone())
        }

        async fn insert(&self, product: NewProduct) -> StoreResult<()> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            if self.fail_inserts {
                return Err(StoreError::Rejected {
                    status: 401,
                    body: "bad key".to_string(),
                });
            }
            let mut products = self.products.lock().unwrap();
            let id = (products.len() + 1).to_string();
            products.push(Product {
                id,
                name: product.name,
                cost_base: product.cost_base,
                currency_ref: product.currency_ref,
            });
            Ok(())
        }

        async fn delete(&self, id: &str) -> StoreResult<()> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.products.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }
    }

    struct ScriptedPrompt {
        confirm_answer: bool,
        alerts: Mutex<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn new(confirm_answer: bool) -> Self {
            Self {
                confirm_answer,
                alerts: Mutex::new(Vec::new()),
            }
        }

        fn alerts(&self) -> Vec<String> {
            self.alerts.lock().unwrap().clone()
        }
    }

    impl UserPrompt for ScriptedPrompt {
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }

        fn confirm(&self, _message: &str) -> bool {
            self.confirm_answer
        }
    }

    struct Dead;

    #[async_trait]
    impl ExchangeRateSource for Dead {
        fn name(&self) -> &str {
            "dead"
        }

        async fn sell_rate(&self) -> MarketDataResult<Decimal> {
            Err(MarketDataError::Network("unreachable".to_string()))
        }
    }

    #[async_trait]
    impl InflationSource for Dead {
        fn name(&self) -> &str {
            "dead"
        }

        async fn latest_monthly(&self) -> MarketDataResult<InflationSample> {
            Err(MarketDataError::Network("unreachable".to_string()))
        }
    }

    fn dead_market() -> MarketDataService {
        MarketDataService::new(Arc::new(Dead), Arc::new(Dead), Arc::new(Dead))
    }

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            cost_base: dec!(10),
            currency_ref: "MEP".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_inserts_then_clears_the_form() {
        let store = Arc::new(RecordingStore::default());
        let prompt = Arc::new(ScriptedPrompt::new(true));
        let mut controller = DashboardController::new(dead_market(), store.clone(), prompt);

        controller.dispatch(Action::EditName("Keyboard".to_string())).await;
        controller.dispatch(Action::EditCost("100".to_string())).await;
        controller.dispatch(Action::Submit).await;

        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
        assert!(controller.state().form.is_empty());
        assert_eq!(controller.state().products.len(), 1);
        assert_eq!(controller.state().products[0].name, "Keyboard");
        assert!(!controller.state().saving);
    }

    #[tokio::test]
    async fn submit_with_non_positive_cost_never_reaches_the_store() {
        for cost in ["0", "-5", "abc", ""] {
            let store = Arc::new(RecordingStore::default());
            let prompt = Arc::new(ScriptedPrompt::new(true));
            let mut controller =
                DashboardController::new(dead_market(), store.clone(), prompt.clone());

            controller.dispatch(Action::EditName("Keyboard".to_string())).await;
            controller.dispatch(Action::EditCost(cost.to_string())).await;
            controller.dispatch(Action::Submit).await;

            assert_eq!(store.inserts.load(Ordering::SeqCst), 0, "cost {:?}", cost);
            assert_eq!(prompt.alerts(), vec!["Invalid cost".to_string()]);
        }
    }

    #[tokio::test]
    async fn submit_with_empty_name_never_reaches_the_store() {
        let store = Arc::new(RecordingStore::default());
        let prompt = Arc::new(ScriptedPrompt::new(true));
        let mut controller =
            DashboardController::new(dead_market(), store.clone(), prompt.clone());

        controller.dispatch(Action::EditCost("12.5".to_string())).await;
        controller.dispatch(Action::Submit).await;

        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
        assert_eq!(prompt.alerts(), vec!["Product name is required".to_string()]);
    }

    #[tokio::test]
    async fn failed_insert_keeps_the_form_contents() {
        let store = Arc::new(RecordingStore {
            fail_inserts: true,
            ..Default::default()
        });
        let prompt = Arc::new(ScriptedPrompt::new(true));
        let mut controller =
            DashboardController::new(dead_market(), store.clone(), prompt.clone());

        controller.dispatch(Action::EditName("Keyboard".to_string())).await;
        controller.dispatch(Action::EditCost("100".to_string())).await;
        controller.dispatch(Action::Submit).await;

        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state().form.name, "Keyboard");
        assert_eq!(controller.state().form.cost, "100");
        assert!(controller.state().products.is_empty());
        assert!(!controller.state().saving);
        assert!(prompt.alerts().is_empty());
    }

    #[tokio::test]
    async fn submit_is_ignored_while_a_save_is_in_flight() {
        let store = Arc::new(RecordingStore::default());
        let prompt = Arc::new(ScriptedPrompt::new(true));
        let mut controller = DashboardController::new(dead_market(), store.clone(), prompt);

        controller.dispatch(Action::EditName("Keyboard".to_string())).await;
        controller.dispatch(Action::EditCost("100".to_string())).await;
        controller.state.saving = true;
        controller.dispatch(Action::Submit).await;

        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
        assert_eq!(controller.state().form.name, "Keyboard");
    }

    #[tokio::test]
    async fn declined_confirmation_never_reaches_the_store() {
        let store = Arc::new(RecordingStore::seeded(vec![product("1", "Keyboard")]));
        let prompt = Arc::new(ScriptedPrompt::new(false));
        let mut controller = DashboardController::new(dead_market(), store.clone(), prompt);

        controller
            .dispatch(Action::Delete { id: "1".to_string() })
            .await;

        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_refetches() {
        let store = Arc::new(RecordingStore::seeded(vec![
            product("1", "Keyboard"),
            product("2", "Mouse"),
        ]));
        let prompt = Arc::new(ScriptedPrompt::new(true));
        let mut controller = DashboardController::new(dead_market(), store.clone(), prompt);

        controller.refresh_all().await;
        assert_eq!(controller.state().products.len(), 2);

        controller
            .dispatch(Action::Delete { id: "1".to_string() })
            .await;

        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state().products.len(), 1);
        assert_eq!(controller.state().products[0].id, "2");
    }

    #[tokio::test]
    async fn failed_list_keeps_the_stale_products() {
        let store = Arc::new(RecordingStore {
            fail_lists: true,
            ..Default::default()
        });
        let prompt = Arc::new(ScriptedPrompt::new(true));
        let mut controller = DashboardController::new(dead_market(), store.clone(), prompt);
        controller.state.products = vec![product("1", "Keyboard")];

        controller.dispatch(Action::Refresh).await;

        assert_eq!(controller.state().products.len(), 1);
        assert_eq!(controller.state().rate.source, QuoteSource::Fallback);
        assert_eq!(controller.state().inflation.source, QuoteSource::Fallback);
    }

    #[tokio::test]
    async fn margin_edits_apply_unvalidated() {
        let store = Arc::new(RecordingStore::default());
        let prompt = Arc::new(ScriptedPrompt::new(true));
        let mut controller = DashboardController::new(dead_market(), store, prompt);

        controller.dispatch(Action::SetMargin(dec!(45))).await;
        assert_eq!(controller.state().margin_pct, dec!(45));

        controller.dispatch(Action::SetMargin(dec!(-20))).await;
        assert_eq!(controller.state().margin_pct, dec!(-20));
    }
}
