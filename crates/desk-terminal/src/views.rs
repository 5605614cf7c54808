//! # List and Edit Views
//!
//! Display glue around the backend: product list with selection, product
//! edit with tag growth, user list with a live filter. No checkout logic
//! lives here.

use desk_core::{BoxedBackend, DeskResult, Product, User};

/// The product list with an optional selection
pub struct ProductListView {
    backend: BoxedBackend,
    pub products: Vec<Product>,
    pub selected: Option<Product>,
}

impl ProductListView {
    pub fn new(backend: BoxedBackend) -> Self {
        Self {
            backend,
            products: Vec::new(),
            selected: None,
        }
    }

    /// Fetch the product list
    pub async fn load(&mut self) -> DeskResult<()> {
        self.products = self.backend.get_products().await?;
        Ok(())
    }

    pub fn select(&mut self, product: Product) {
        self.selected = Some(product);
    }
}

/// Edit view for a single product; tags may grow, nothing shrinks here
pub struct ProductEditView {
    backend: BoxedBackend,
    pub product: Product,
}

impl ProductEditView {
    /// Open the edit view for a product by id
    pub async fn open(backend: BoxedBackend, id: u64) -> DeskResult<Self> {
        let product = backend.get_product(id).await?;
        Ok(Self { backend, product })
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.product.add_tag(tag);
    }

    /// Persist the edited product and adopt the stored version
    pub async fn save(&mut self) -> DeskResult<()> {
        self.product = self.backend.save_product(&self.product).await?;
        Ok(())
    }
}

/// The user list with a live substring filter over names and identifiers
pub struct UserListView {
    backend: BoxedBackend,
    users: Vec<User>,
    filter: String,
    pub filtered: Vec<User>,
}

impl UserListView {
    pub fn new(backend: BoxedBackend) -> Self {
        Self {
            backend,
            users: Vec::new(),
            filter: String::new(),
            filtered: Vec::new(),
        }
    }

    /// Fetch the user list and apply the current filter
    pub async fn load(&mut self) -> DeskResult<()> {
        self.users = self.backend.get_users().await?;
        self.apply_filter();
        Ok(())
    }

    /// Update the filter and recompute the visible users
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.apply_filter();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    fn apply_filter(&mut self) {
        self.filtered = self
            .users
            .iter()
            .filter(|user| user.matches_filter(&self.filter))
            .cloned()
            .collect();
    }
}
