//! # Catalog
//!
//! The fixed, ordered list of products a bundle can be built from.
//!
//! The catalog is validated once when it is built and never changes
//! afterwards: there are no add/remove-from-catalog operations. Display order
//! is the order the products were given in.

use std::collections::HashSet;

use crate::error::{BundleResult, ValidationError};
use crate::types::{Product, ProductId};
use crate::validation::{validate_price_cents, validate_product_id, validate_product_name};

/// Ordered, immutable product catalog with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, validating every product.
    ///
    /// ## Rules
    /// - Ids are positive and unique
    /// - Names are non-empty
    /// - Prices are non-negative
    ///
    /// ```rust
    /// use bundle_core::{Catalog, Money, Product};
    ///
    /// let catalog = Catalog::new(vec![
    ///     Product::new(1, "Tie-Dye Lounge Set", Money::from_cents(15000), "product1.svg"),
    ///     Product::new(2, "Sunburst Tracksuit", Money::from_cents(15000), "product2.png"),
    /// ])
    /// .unwrap();
    /// assert_eq!(catalog.len(), 2);
    ///
    /// let duplicate = Catalog::new(vec![
    ///     Product::new(1, "A", Money::from_cents(100), "a.svg"),
    ///     Product::new(1, "B", Money::from_cents(100), "b.svg"),
    /// ]);
    /// assert!(duplicate.is_err());
    /// ```
    pub fn new(products: Vec<Product>) -> BundleResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            validate_product_id(product.id)?;
            validate_product_name(&product.name)?;
            validate_price_cents(product.price_cents)?;

            if !seen.insert(product.id) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.get().to_string(),
                }
                .into());
            }
        }

        Ok(Catalog { products })
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Products flagged to start out selected.
    pub fn preselected(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.preselected)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
