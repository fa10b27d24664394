use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pricewatch_core::{PriceHistoryProvider, PricewatchError, ProductId, RawPriceHistory};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after sleeping.
    Delayed(Duration, T),
    /// Fail immediately with the provided error.
    Fail(PricewatchError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<ProductId, MockBehavior<RawPriceHistory>>,
    calls: HashMap<ProductId, usize>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `price_history` calls for a specific product.
    pub async fn set_history_behavior(
        &self,
        product: ProductId,
        behavior: MockBehavior<RawPriceHistory>,
    ) {
        let mut guard = self.state.lock().await;
        guard.history_rules.insert(product, behavior);
    }

    /// How many times `price_history` was called for `product`.
    pub async fn calls(&self, product: &ProductId) -> usize {
        let guard = self.state.lock().await;
        guard.calls.get(product).copied().unwrap_or(0)
    }

    /// Total `price_history` calls across all products.
    pub async fn total_calls(&self) -> usize {
        let guard = self.state.lock().await;
        guard.calls.values().sum()
    }

    /// Clear all configured behaviors and call counts.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_rules.clear();
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Products without a configured behavior answer `Unsupported("history")`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PriceHistoryProvider>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PriceHistoryProvider>, controller)
    }
}

#[async_trait]
impl PriceHistoryProvider for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    async fn price_history(
        &self,
        product: &ProductId,
    ) -> Result<RawPriceHistory, PricewatchError> {
        // Count the call and snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard.calls.entry(product.clone()).or_insert(0) += 1;
            guard.history_rules.get(product).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(raw)) => Ok(raw),
            Some(MockBehavior::Delayed(after, raw)) => {
                tokio::time::sleep(after).await;
                Ok(raw)
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(PricewatchError::unsupported("history")),
        }
    }
}
