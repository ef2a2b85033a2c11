//! Cart ledger: the session-scoped owner of the cart state.
//!
//! The ledger composes the pure cart transitions from `storefront-cart` with
//! a [`CartPersistence`] backend and an [`EventBus`] for change notifications:
//!
//! ```text
//! start()                      add(product)
//!   ├─ load task ──► loaded      │
//!   │                 │          ▼
//!   │                 └──► state cell (watch) ──► observers
//!   │                                │
//!   │                                └──► CartEvent ──► bus
//!   └─ writer task ◄── save queue ◄─ every transition while loaded
//! ```
//!
//! - **Fail-open load**: a load error leaves the cart empty but loaded.
//! - **One persistence trigger**: each transition that happens while loaded
//!   enqueues exactly one save of the full item list.
//! - **Ordered writes**: a single writer task drains the save queue, so
//!   storage sees saves in the order the transitions happened.
//! - **Early adds**: products added before the load resolves are kept and
//!   replayed on top of the loaded items instead of being overwritten.
//!
//! The ledger is constructed explicitly and handed to whatever needs it; it
//! is not a process-wide singleton.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use storefront_cart::{CartEvent, CartLineItem, CartState};
use storefront_catalog::Product;
use storefront_events::{EventBus, Subscription};

use crate::persistence::CartPersistence;

type SaveRequest = Vec<CartLineItem>;

#[derive(Debug)]
struct LedgerCore {
    state: CartState,
    /// Products added before the persisted cart was loaded.
    early_adds: Vec<Product>,
    /// `None` once the ledger is shutting down.
    saves: Option<mpsc::UnboundedSender<SaveRequest>>,
}

impl LedgerCore {
    fn enqueue_save(&self, state: &CartState) {
        let Some(saves) = &self.saves else {
            debug!("ledger shutting down; save dropped");
            return;
        };
        if saves.send(state.items().to_vec()).is_err() {
            warn!("cart writer stopped; save dropped");
        }
    }
}

#[derive(Debug)]
struct LedgerInner<B> {
    core: Mutex<LedgerCore>,
    state_tx: watch::Sender<CartState>,
    bus: B,
}

impl<B> LedgerInner<B>
where
    B: EventBus<CartEvent>,
{
    fn lock_core(&self) -> MutexGuard<'_, LedgerCore> {
        // The core holds plain values; a panic elsewhere cannot leave it half-updated.
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the current state and notify observers. Caller holds the core lock.
    fn commit(&self, core: &mut LedgerCore, next: CartState, event: CartEvent) {
        core.state = next.clone();
        self.state_tx.send_replace(next);
        if let Err(err) = self.bus.publish(event) {
            warn!(error = ?err, "failed to publish cart event");
        }
    }

    fn add(&self, product: Product) -> CartState {
        let mut core = self.lock_core();
        let next = core.state.with_added(product.clone());

        if next.is_loaded() {
            core.enqueue_save(&next);
        } else {
            core.early_adds.push(product.clone());
        }

        let event = CartEvent::item_added(&product, &next);
        self.commit(&mut core, next.clone(), event);
        next
    }

    fn complete_load(&self, items: Vec<CartLineItem>, recovered: bool) {
        let mut core = self.lock_core();
        if core.state.is_loaded() {
            return;
        }

        let persisted_lines = items.len();
        let loaded = CartState::loaded_with(items);
        let folded = loaded.items().len() != persisted_lines;
        if folded {
            warn!(
                persisted_lines,
                lines = loaded.items().len(),
                "persisted cart repeated products; lines folded"
            );
        }

        let early_adds = std::mem::take(&mut core.early_adds);
        let replayed = !early_adds.is_empty();
        let next = loaded.with_all_added(early_adds);

        if replayed || folded {
            core.enqueue_save(&next);
        }

        info!(
            items = next.items().len(),
            units = next.count(),
            recovered,
            replayed,
            "cart ready"
        );
        let event = CartEvent::loaded(&next, recovered);
        self.commit(&mut core, next, event);
    }
}

/// Session-scoped cart state owner.
///
/// Must be started inside a tokio runtime. Dropping the ledger without
/// [`CartLedger::shutdown`] lets queued saves finish in the background.
#[derive(Debug)]
pub struct CartLedger<B> {
    inner: Arc<LedgerInner<B>>,
    load_task: JoinHandle<()>,
    writer_task: JoinHandle<()>,
}

impl<B> CartLedger<B>
where
    B: EventBus<CartEvent> + 'static,
{
    /// Create an empty, not-yet-loaded ledger and start loading the persisted cart.
    pub fn start<P>(persistence: Arc<P>, bus: B) -> Self
    where
        P: CartPersistence + ?Sized + 'static,
    {
        let (save_tx, save_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(CartState::new());

        let inner = Arc::new(LedgerInner {
            core: Mutex::new(LedgerCore {
                state: CartState::new(),
                early_adds: Vec::new(),
                saves: Some(save_tx),
            }),
            state_tx,
            bus,
        });

        let writer_task = tokio::spawn(run_writer(persistence.clone(), save_rx));
        let load_task = tokio::spawn(run_load(inner.clone(), persistence));

        Self {
            inner,
            load_task,
            writer_task,
        }
    }

    /// Add one unit of `product` and return the resulting state.
    ///
    /// Never fails: persistence happens in the background and its errors are
    /// only logged.
    pub fn add(&self, product: Product) -> CartState {
        self.inner.add(product)
    }

    /// Current state snapshot.
    pub fn state(&self) -> CartState {
        self.inner.lock_core().state.clone()
    }

    /// Total units in the cart.
    pub fn count(&self) -> u64 {
        self.inner.lock_core().state.count()
    }

    pub fn items(&self) -> Vec<CartLineItem> {
        self.inner.lock_core().state.items().to_vec()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.lock_core().state.is_loaded()
    }

    /// Observe state transitions; the receiver always holds the latest state.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.state_tx.subscribe()
    }

    /// Receive a [`CartEvent`] for every transition from now on.
    pub fn events(&self) -> Subscription<CartEvent> {
        self.inner.bus.subscribe()
    }

    /// Resolve once the persisted cart has been loaded (or failed to load).
    pub async fn wait_until_loaded(&self) -> CartState {
        let mut rx = self.subscribe();
        let loaded = match rx.wait_for(CartState::is_loaded).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        loaded.unwrap_or_else(|| self.state())
    }

    /// Stop background work: abandon an unfinished load, then flush every
    /// queued save before returning.
    pub async fn shutdown(self) {
        self.load_task.abort();
        let _ = self.load_task.await;

        self.inner.lock_core().saves.take();

        if let Err(err) = self.writer_task.await {
            warn!(error = %err, "cart writer task failed");
        }
        debug!("cart ledger stopped");
    }
}

async fn run_load<P, B>(inner: Arc<LedgerInner<B>>, persistence: Arc<P>)
where
    P: CartPersistence + ?Sized,
    B: EventBus<CartEvent>,
{
    match persistence.load_cart_items().await {
        Ok(items) => inner.complete_load(items, false),
        Err(err) => {
            warn!(error = %err, "failed to load persisted cart; starting empty");
            inner.complete_load(Vec::new(), true);
        }
    }
}

async fn run_writer<P>(persistence: Arc<P>, mut saves: mpsc::UnboundedReceiver<SaveRequest>)
where
    P: CartPersistence + ?Sized,
{
    while let Some(items) = saves.recv().await {
        match persistence.save_cart_items(&items).await {
            Ok(()) => debug!(items = items.len(), "cart saved"),
            Err(err) => warn!(error = %err, items = items.len(), "failed to save cart"),
        }
    }
}
