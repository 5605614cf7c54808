//! # Cashdesk Session
//!
//! The checkout coordinator: consumes key events, drives identifier
//! resolution and payment submission, and owns the running cart.
//!
//! All state changes happen on one task; the two asynchronous backend calls
//! run as spawned tasks that post their completion back onto the session's
//! event channel, so completions interleave with new key events in arrival
//! order. Neither call is cancelled or deduplicated; a stale resolution is
//! applied to whatever cart is current when it arrives.

use crate::input::{BufferAction, InputBuffer};
use desk_core::{
    BoxedBackend, Cart, DeskResult, Identifiable, KeyMap, PaymentTransaction,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Events driving the cashdesk session state machine
#[derive(Debug)]
pub enum SessionEvent {
    /// A raw key code from the terminal
    Key(u32),
    /// Completion of an identifier resolution
    Resolved(DeskResult<Identifiable>),
    /// Completion of a payment submission
    PaymentSettled(DeskResult<PaymentTransaction>),
    /// Operator abort command: discard the cart
    Abort,
}

/// One operator session at the cashdesk
pub struct CashdeskSession {
    backend: BoxedBackend,
    input: InputBuffer,
    cart: Cart,
    events: mpsc::UnboundedSender<SessionEvent>,
    wait_identifier: bool,
    wait_checkout: bool,
    alert_identifier_not_found: bool,
    alert_payment_failed: bool,
}

impl CashdeskSession {
    /// Create a session with a fresh empty cart.
    ///
    /// Returns the session and the receiving end of its event channel; the
    /// caller owns the receive loop and feeds every event back through
    /// [`CashdeskSession::handle_event`].
    pub fn new(
        backend: BoxedBackend,
        keymap: Arc<KeyMap>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let session = Self {
            backend,
            input: InputBuffer::new(keymap),
            cart: Cart::new(),
            events,
            wait_identifier: false,
            wait_checkout: false,
            alert_identifier_not_found: false,
            alert_payment_failed: false,
        };
        (session, receiver)
    }

    /// Handle for enqueueing events from outside (the terminal key loop)
    pub fn events(&self) -> mpsc::UnboundedSender<SessionEvent> {
        self.events.clone()
    }

    /// Process one event to completion
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Key(code) => self.on_key(code),
            SessionEvent::Resolved(result) => self.on_resolved(result),
            SessionEvent::PaymentSettled(result) => self.on_payment_settled(result),
            SessionEvent::Abort => self.abort(),
        }
    }

    fn on_key(&mut self, code: u32) {
        match self.input.on_key(code) {
            BufferAction::Appended(_) => {
                self.alert_identifier_not_found = false;
                self.alert_payment_failed = false;
            }
            BufferAction::DeletedLast | BufferAction::Ignored => {}
            BufferAction::Resolve(identifier) => self.confirm_input(identifier),
            BufferAction::Checkout => self.pay_cart(),
        }
    }

    /// Start resolving a submitted identifier.
    ///
    /// A submit while another resolution is pending is issued as well; the
    /// wait flag only tracks the UI state, it does not gate submission.
    fn confirm_input(&mut self, identifier: String) {
        self.wait_identifier = true;
        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = backend.resolve_identifier(&identifier).await;
            // A closed channel means the session ended; drop the result.
            let _ = events.send(SessionEvent::Resolved(result));
        });
    }

    fn on_resolved(&mut self, result: DeskResult<Identifiable>) {
        self.wait_identifier = false;
        match result {
            Ok(Identifiable::Product(product)) => {
                // TODO: select the proper pricing tier instead of the first
                match product.default_pricing().cloned() {
                    Some(pricing) => {
                        info!("Adding {} to cart", product.name);
                        self.cart.add_to_cart(product, pricing);
                    }
                    None => {
                        warn!("Product {} has no pricings, cannot add it", product.id);
                        self.alert_identifier_not_found = true;
                    }
                }
            }
            Ok(Identifiable::User(user)) => {
                info!("Cart now belongs to {}", user.name);
                self.cart.set_user(user);
            }
            Err(e) => {
                // True misses and transport failures raise the same operator
                // alert; the cause survives in the log.
                warn!("Identifier resolution failed: {}", e);
                self.alert_identifier_not_found = true;
            }
        }
    }

    /// Start payment submission for the current cart.
    ///
    /// At most one payment is in flight per cart; a checkout request while
    /// one is pending is dropped. An empty cart is not submitted.
    fn pay_cart(&mut self) {
        if self.wait_checkout {
            debug!("Payment already in flight, ignoring checkout request");
            return;
        }
        if self.cart.is_empty() {
            debug!("Cart is empty, nothing to pay");
            return;
        }

        self.wait_checkout = true;
        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        let cart = self.cart.clone();
        tokio::spawn(async move {
            let result = submit_cart(backend, cart).await;
            let _ = events.send(SessionEvent::PaymentSettled(result));
        });
    }

    fn on_payment_settled(&mut self, result: DeskResult<PaymentTransaction>) {
        self.wait_checkout = false;
        match result {
            Ok(transaction) => {
                info!("Checkout complete: transaction {}", transaction.id);
                self.cart = Cart::new();
            }
            Err(e) => {
                // The cart is only reset on confirmed success
                error!("Payment failed: {}", e);
                self.alert_payment_failed = true;
            }
        }
    }

    /// Discard the cart and return to an idle session
    fn abort(&mut self) {
        info!("Session aborted, discarding cart");
        self.cart = Cart::new();
        self.wait_identifier = false;
        self.wait_checkout = false;
        self.alert_identifier_not_found = false;
        self.alert_payment_failed = false;
    }

    /// The running cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current identifier input
    pub fn buffer(&self) -> &str {
        self.input.as_str()
    }

    /// Whether an asynchronous operation is in flight (the UI wait flag)
    pub fn waiting(&self) -> bool {
        self.wait_identifier || self.wait_checkout
    }

    /// Latched alert: the last submitted identifier could not be resolved
    pub fn identifier_not_found(&self) -> bool {
        self.alert_identifier_not_found
    }

    /// Latched alert: the last payment submission failed
    pub fn payment_failed(&self) -> bool {
        self.alert_payment_failed
    }
}

/// Persist the cart (the backend assigns the identity on first store),
/// then submit it for payment.
async fn submit_cart(backend: BoxedBackend, cart: Cart) -> DeskResult<PaymentTransaction> {
    let stored = backend.create_or_update_cart(&cart).await?;
    backend.pay_cart(&stored).await
}
