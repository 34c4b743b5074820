//! Session
//!
//! The order lifecycle manager for a single logged-in employee. Owns the
//! working cart, the Drafts and Sent collections and the active-draft
//! reference; every mutation runs to completion before the next, and only
//! [`Session::submit_order`] touches the outside world.
//!
//! Collections are read from storage once when the session opens and are
//! authoritative in memory afterwards; each mutation writes the affected
//! slot back synchronously.

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartError},
    directory::{Directory, Employee},
    orders::{Order, OrderId, OrderIds, OrderStatus},
    pricing::{self, OrderTotals},
    products::{Product, ProductId},
    promotions::{self, FeeBreakdown},
    storage::{OrderStore, StoreSlot},
    transport::{DeliveryOutcome, OrderPayload, OrderTransport},
};

/// Errors surfaced to the employee by lifecycle operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Save was attempted with no lines in the cart.
    #[error("cannot save an empty order as a draft")]
    EmptyCart,

    /// Submit was attempted without a customer code and name.
    #[error("customer code and name are required before submitting")]
    MissingCustomer,

    /// The transport reported a failure; the cart is untouched and the
    /// submit can be retried as-is.
    #[error("{0}")]
    Delivery(String),
}

/// Derived lifecycle state of the working cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    /// No lines.
    Empty,

    /// At least one line, not editing a saved draft.
    Building,

    /// At least one line, editing the draft referenced by `active_draft`.
    EditingDraft,
}

/// A logged-in employee's order-entry session.
#[derive(Debug)]
pub struct Session<S, T> {
    employee: Employee,
    directory: Directory,
    cart: Cart,
    drafts: Vec<Order>,
    sent: Vec<Order>,
    active_draft: Option<OrderId>,
    ids: OrderIds,
    store: S,
    transport: T,
}

impl<S: OrderStore, T: OrderTransport> Session<S, T> {
    /// Open a session for a logged-in employee, loading both order
    /// collections from storage.
    pub fn open(employee: Employee, directory: Directory, store: S, transport: T) -> Self {
        let drafts = store.load(StoreSlot::Drafts);
        let sent = store.load(StoreSlot::Sent);

        debug!(
            employee = %employee.code,
            drafts = drafts.len(),
            sent = sent.len(),
            "session opened"
        );

        Session {
            employee,
            directory,
            cart: Cart::new(),
            drafts,
            sent,
            active_draft: None,
            ids: OrderIds::new(),
            store,
            transport,
        }
    }

    /// The logged-in employee.
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// The working cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Saved drafts, newest first.
    pub fn drafts(&self) -> &[Order] {
        &self.drafts
    }

    /// Sent orders, newest first.
    pub fn sent(&self) -> &[Order] {
        &self.sent
    }

    /// The draft currently being edited, if any.
    pub fn active_draft(&self) -> Option<OrderId> {
        self.active_draft
    }

    /// Derived lifecycle state of the cart.
    pub fn state(&self) -> CartState {
        if self.cart.is_empty() {
            CartState::Empty
        } else if self.active_draft.is_some() {
            CartState::EditingDraft
        } else {
            CartState::Building
        }
    }

    /// Current order totals, recomputed on every call.
    pub fn totals(&self) -> OrderTotals {
        pricing::order_totals(self.cart.lines(), self.cart.is_new_customer())
    }

    /// Current per-category fee ceilings, recomputed on every call.
    pub fn fee_breakdown(&self) -> FeeBreakdown {
        promotions::fee_breakdown(self.cart.lines(), self.cart.is_new_customer())
    }

    /// Add product units to the cart. See [`Cart::add_line`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityBelowMinimum`] for an invalid quantity;
    /// the cart is not mutated.
    pub fn add_line(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        self.cart.add_line(product, quantity)
    }

    /// Remove a product's line. See [`Cart::remove_line`].
    pub fn remove_line(&mut self, id: ProductId) {
        self.cart.remove_line(id);
    }

    /// Change a line's quantity. See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) {
        self.cart.update_quantity(id, quantity);
    }

    /// Remove every line and detach from the active draft, so the next save
    /// cannot silently overwrite a draft with an empty cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear_lines();
        self.active_draft = None;
    }

    /// Toggle the new-customer discount. See [`Cart::set_new_customer`].
    pub fn set_new_customer(&mut self, is_new_customer: bool) {
        self.cart.set_new_customer(is_new_customer);
    }

    /// Set the customer code and autofill the customer name from the
    /// directory. An unknown code clears the name.
    pub fn set_customer_code(&mut self, code: impl Into<String>) {
        let code = code.into();

        let name = self
            .directory
            .customer_by_code(&code)
            .map(|customer| customer.name.clone())
            .unwrap_or_default();

        self.cart.set_customer_code(code);
        self.cart.set_customer_name(name);
    }

    /// Set the customer name directly.
    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.cart.set_customer_name(name);
    }

    /// Replace the order note with user-authored text.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.cart.set_note(note);
    }

    /// Save the cart as a draft.
    ///
    /// While a draft is active it is overwritten in place, keeping its id and
    /// its original creation time. Otherwise a fresh draft is prepended to
    /// the Drafts collection and becomes active. The collection is persisted
    /// after every save.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCart`] when the cart has no lines;
    /// nothing is mutated.
    pub fn save_draft(&mut self) -> Result<OrderId, SessionError> {
        if self.cart.is_empty() {
            return Err(SessionError::EmptyCart);
        }

        if let Some(active) = self.active_draft
            && let Some(existing) = self.drafts.iter_mut().find(|draft| draft.id == active)
        {
            *existing = Order::snapshot(active, existing.created_at, OrderStatus::Draft, &self.cart);
            self.store.save(StoreSlot::Drafts, &self.drafts);

            debug!(draft = %active, "draft updated in place");
            return Ok(active);
        }

        let id = self.ids.next_id();
        let draft = Order::snapshot(id, id.0, OrderStatus::Draft, &self.cart);

        self.drafts.insert(0, draft);
        self.active_draft = Some(id);
        self.store.save(StoreSlot::Drafts, &self.drafts);

        debug!(draft = %id, "draft created");
        Ok(id)
    }

    /// Submit the cart to the order-collection endpoint.
    ///
    /// On acceptance the cart is snapshotted into the Sent collection, the
    /// active draft (if any) is removed from Drafts, both slots are
    /// persisted and the cart resets to empty. On failure no state changes
    /// at all, so the submit can be retried without re-entering data.
    ///
    /// # Errors
    ///
    /// - [`SessionError::MissingCustomer`] when the trimmed customer code or
    ///   name is blank; no side effects.
    /// - [`SessionError::Delivery`] when the transport reports a failure; no
    ///   side effects.
    pub fn submit_order(&mut self) -> Result<OrderId, SessionError> {
        if self.cart.customer_code().trim().is_empty()
            || self.cart.customer_name().trim().is_empty()
        {
            return Err(SessionError::MissingCustomer);
        }

        let payload = OrderPayload {
            employee_name: self.employee.name.clone(),
            employee_code: self.employee.code.clone(),
            customer_code: self.cart.customer_code().to_string(),
            customer_name: self.cart.customer_name().to_string(),
            note: self.cart.note().to_string(),
            items: self.cart.lines().to_vec(),
        };

        match self.transport.deliver(&payload) {
            DeliveryOutcome::Failed(message) => Err(SessionError::Delivery(message)),
            DeliveryOutcome::Accepted => {
                let id = self.ids.next_id();
                let order = Order::snapshot(id, id.0, OrderStatus::Sent, &self.cart);

                self.sent.insert(0, order);
                self.store.save(StoreSlot::Sent, &self.sent);

                if let Some(active) = self.active_draft.take() {
                    self.drafts.retain(|draft| draft.id != active);
                    self.store.save(StoreSlot::Drafts, &self.drafts);
                }

                self.cart.reset();

                info!(order = %id, "order submitted");
                Ok(id)
            }
        }
    }

    /// Replace the working cart with a draft's snapshot and make it the
    /// active draft. Returns `false` (a no-op) when the id is unknown.
    pub fn load_draft(&mut self, id: OrderId) -> bool {
        let Some(draft) = self.drafts.iter().find(|draft| draft.id == id) else {
            return false;
        };

        self.cart = Cart::from_snapshot(
            draft.customer_code.clone(),
            draft.customer_name.clone(),
            draft.note.clone(),
            draft.is_new_customer,
            draft.items.clone(),
        );
        self.active_draft = Some(id);

        debug!(draft = %id, "draft loaded");
        true
    }

    /// Delete a draft. Deleting the active draft also resets the cart.
    pub fn delete_draft(&mut self, id: OrderId) {
        self.drafts.retain(|draft| draft.id != id);
        self.store.save(StoreSlot::Drafts, &self.drafts);

        if self.active_draft == Some(id) {
            self.reset();
        }
    }

    /// Reset the cart and customer state, e.g. on logout. Saved collections
    /// are untouched.
    pub fn reset(&mut self) {
        self.cart.reset();
        self.active_draft = None;
    }
}
