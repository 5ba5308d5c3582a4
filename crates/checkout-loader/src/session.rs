//! # Checkout Session
//!
//! Owns the catalog for one checkout table and tracks whether it is loaded.
//!
//! ## Load States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────┐  start()  ┌─────────┐   Ok    ┌────────────────────┐         │
//! │   │ Idle │ ────────► │ Loading │ ──────► │ Loaded(Catalog)    │         │
//! │   └──────┘           └────┬────┘         └────────────────────┘         │
//! │                           │ Err                                         │
//! │                           ▼                                             │
//! │                      ┌────────────────┐                                 │
//! │                      │ Failed(reason) │  terminal, no retry             │
//! │                      └────────────────┘                                 │
//! │                                                                         │
//! │  Exactly one state at a time. The loading indicator is "phase ==        │
//! │  Loading"; the table is only interactive in Loaded.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Observing the phase
//! [`CheckoutSession::subscribe`] hands out a `watch` receiver carrying the
//! current [`LoadPhase`], so a renderer can show or hide its loading
//! indicator without holding the session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use checkout_core::display::{CheckoutView, ProductRow};
use checkout_core::{engine, Catalog, DiscountPolicy, OrderSummary, ProductId};

use crate::error::LoadError;
use crate::loader::CatalogLoader;
use crate::provider::ProductProvider;

// =============================================================================
// Load State
// =============================================================================

/// Where the session is in its single load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Not started.
    Idle,
    /// Waiting on the provider.
    Loading,
    /// Catalog available; quantity updates apply.
    Loaded {
        catalog: Catalog,
        loaded_at: DateTime<Utc>,
    },
    /// The load failed; the message is the error's display form.
    Failed(String),
}

impl LoadState {
    /// The state without its payload.
    pub fn phase(&self) -> LoadPhase {
        match self {
            LoadState::Idle => LoadPhase::Idle,
            LoadState::Loading => LoadPhase::Loading,
            LoadState::Loaded { .. } => LoadPhase::Loaded,
            LoadState::Failed(_) => LoadPhase::Failed,
        }
    }
}

/// Payload-free mirror of [`LoadState`], broadcast to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

// =============================================================================
// Checkout Session
// =============================================================================

/// A checkout table's state: one load, then quantity updates.
#[derive(Debug)]
pub struct CheckoutSession {
    state: LoadState,
    policy: DiscountPolicy,
    loader: CatalogLoader,
    phase_tx: watch::Sender<LoadPhase>,
}

impl CheckoutSession {
    /// Creates an idle session using the default discount policy.
    pub fn new(loader: CatalogLoader) -> Self {
        Self::with_policy(loader, DiscountPolicy::default())
    }

    /// Creates an idle session with a custom discount policy.
    pub fn with_policy(loader: CatalogLoader, policy: DiscountPolicy) -> Self {
        let (phase_tx, _) = watch::channel(LoadPhase::Idle);
        CheckoutSession {
            state: LoadState::Idle,
            policy,
            loader,
            phase_tx,
        }
    }

    /// Subscribes to phase changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadPhase> {
        self.phase_tx.subscribe()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn phase(&self) -> LoadPhase {
        self.state.phase()
    }

    /// Whether the loading indicator should be shown.
    pub fn is_loading(&self) -> bool {
        self.phase() == LoadPhase::Loading
    }

    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }

    /// When the catalog finished loading, if it has.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            LoadState::Loaded { loaded_at, .. } => Some(*loaded_at),
            _ => None,
        }
    }

    /// The loaded catalog, if any.
    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.state {
            LoadState::Loaded { catalog, .. } => Some(catalog),
            _ => None,
        }
    }

    /// Runs the one load.
    ///
    /// Moves Idle → Loading → Loaded or Failed and returns the outcome. A
    /// session that has already started ignores further calls and returns
    /// its current catalog, or the recorded failure for a failed session.
    pub async fn start<P>(&mut self, provider: &P) -> Result<&Catalog, StartError<P::Error>>
    where
        P: ProductProvider,
    {
        match &self.state {
            LoadState::Idle => {}
            LoadState::Loaded { .. } | LoadState::Loading => {
                warn!(phase = ?self.phase(), "Checkout session already started");
                return self.catalog().ok_or(StartError::AlreadyStarted);
            }
            LoadState::Failed(reason) => {
                return Err(StartError::PreviouslyFailed(reason.clone()));
            }
        }

        self.set_state(LoadState::Loading);

        match self.loader.load(provider).await {
            Ok(catalog) => {
                let loaded_at = Utc::now();
                info!(products = catalog.len(), %loaded_at, "Checkout session ready");
                self.set_state(LoadState::Loaded { catalog, loaded_at });
                self.catalog().ok_or(StartError::AlreadyStarted)
            }
            Err(e) => {
                error!(error = %e, "Catalog load failed");
                self.set_state(LoadState::Failed(e.to_string()));
                Err(StartError::Load(e))
            }
        }
    }

    /// Orders one more unit of `id`. No-op unless loaded.
    pub fn increment(&mut self, id: &ProductId) -> &mut Self {
        self.apply(id, "increment", engine::increment)
    }

    /// Takes one unit of `id` off the order. No-op unless loaded.
    pub fn decrement(&mut self, id: &ProductId) -> &mut Self {
        self.apply(id, "decrement", engine::decrement)
    }

    /// Order totals for the current catalog (all zero until loaded).
    pub fn summary(&self) -> OrderSummary {
        match self.catalog() {
            Some(catalog) => OrderSummary::with_policy(catalog, &self.policy),
            None => OrderSummary::with_policy(&Catalog::empty(), &self.policy),
        }
    }

    /// Table rows for the current catalog (empty until loaded).
    pub fn rows(&self) -> Vec<ProductRow> {
        self.catalog()
            .map(|c| c.iter().map(ProductRow::from).collect())
            .unwrap_or_default()
    }

    /// Full view for the current catalog.
    pub fn view(&self) -> CheckoutView {
        match self.catalog() {
            Some(catalog) => CheckoutView::build(catalog, &self.policy),
            None => CheckoutView::build(&Catalog::empty(), &self.policy),
        }
    }

    fn apply(&mut self, id: &ProductId, action: &str, op: fn(&Catalog, &ProductId) -> Catalog) -> &mut Self {
        let phase = self.state.phase();
        if let LoadState::Loaded { catalog, .. } = &mut self.state {
            let next = op(catalog, id);
            if next.shares_storage_with(catalog) {
                warn!(%id, action, "Quantity unchanged");
            } else {
                let quantity = next.find_by_id(id).map(|p| p.ordered_quantity());
                debug!(%id, action, ?quantity, "Quantity updated");
                *catalog = next;
            }
        } else {
            warn!(%id, action, ?phase, "Ignoring quantity change before catalog is loaded");
        }
        self
    }

    fn set_state(&mut self, state: LoadState) {
        let phase = state.phase();
        self.state = state;
        // send_replace never fails, even with no receivers
        self.phase_tx.send_replace(phase);
        debug!(?phase, "Checkout session phase changed");
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new(CatalogLoader::default())
    }
}

/// Why [`CheckoutSession::start`] did not produce a catalog.
#[derive(Debug, thiserror::Error)]
pub enum StartError<E>
where
    E: std::error::Error + 'static,
{
    /// This call performed the load and it failed.
    #[error(transparent)]
    Load(#[from] LoadError<E>),

    /// An earlier load already failed; loads are not retried.
    #[error("Catalog load already failed: {0}")]
    PreviouslyFailed(String),

    /// The session is already loading.
    #[error("Catalog load already in progress")]
    AlreadyStarted,
}
