//! View filter over the product collection.
//!
//! Filtering never mutates the collection; it yields the matching products in
//! collection order. The stock summary always covers the whole collection.

use crate::models::{Product, LOW_STOCK_THRESHOLD};

/// Category filter value that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// Stock-level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    /// In stock but fewer than 10 units
    Low,
    Out,
    In,
}

impl StockFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockFilter::All => "all",
            StockFilter::Low => "low",
            StockFilter::Out => "out",
            StockFilter::In => "in",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(StockFilter::All),
            "low" => Some(StockFilter::Low),
            "out" => Some(StockFilter::Out),
            "in" => Some(StockFilter::In),
            _ => None,
        }
    }

    pub fn matches(&self, stock_quantity: u32) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::Low => stock_quantity > 0 && stock_quantity < LOW_STOCK_THRESHOLD,
            StockFilter::Out => stock_quantity == 0,
            StockFilter::In => stock_quantity > 0,
        }
    }
}

/// Active search, category and stock criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFilter {
    pub search: String,
    pub category: String,
    pub stock: StockFilter,
}

impl Default for ViewFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            stock: StockFilter::All,
        }
    }
}

impl ViewFilter {
    /// Name or brand contains the search term, ignoring case.
    pub fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        product.name.to_lowercase().contains(&term) || product.brand.to_lowercase().contains(&term)
    }

    pub fn matches_category(&self, product: &Product) -> bool {
        self.category == ALL_CATEGORIES || product.category == self.category
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.matches_category(product)
            && self.stock.matches(product.stock_quantity)
    }

    /// Products passing every criterion, in collection order.
    pub fn apply<'a, I>(&self, products: I) -> Vec<&'a Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Stock counters over the unfiltered collection. Low and out of stock are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockSummary {
    pub total: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl StockSummary {
    pub fn compute<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        products
            .into_iter()
            .fold(StockSummary::default(), |mut summary, product| {
                summary.total += 1;
                if StockFilter::Low.matches(product.stock_quantity) {
                    summary.low_stock += 1;
                }
                if StockFilter::Out.matches(product.stock_quantity) {
                    summary.out_of_stock += 1;
                }
                summary
            })
    }
}
