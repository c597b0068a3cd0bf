//! In-memory product registry.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};

use catalog_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{Product, ProductDetails, ProductType};

/// Catalog storage abstraction used by the HTTP layer.
///
/// Implementations never fail for business reasons; an `Err` is always an
/// invariant violation and should be treated as fatal by the caller.
pub trait ProductCatalog: Send + Sync {
    /// Store `details` under a freshly assigned id and return that id.
    ///
    /// The product is visible to `list` before this returns.
    fn create(&self, details: ProductDetails) -> DomainResult<ProductId>;

    /// Snapshot of stored products in insertion order, optionally restricted
    /// to one product type.
    fn list(&self, filter: Option<ProductType>) -> DomainResult<Vec<Product>>;
}

impl<S> ProductCatalog for Arc<S>
where
    S: ProductCatalog + ?Sized,
{
    fn create(&self, details: ProductDetails) -> DomainResult<ProductId> {
        (**self).create(details)
    }

    fn list(&self, filter: Option<ProductType>) -> DomainResult<Vec<Product>> {
        (**self).list(filter)
    }
}

/// Process-lifetime product storage.
///
/// Ids come from a single atomic counter; the counter is advanced while the
/// write lock is held, so id order and insertion order are the same.
#[derive(Debug)]
pub struct InMemoryProductRegistry {
    next_id: AtomicU32,
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRegistry {
    pub fn new() -> Self {
        Self::starting_at(ProductId::FIRST)
    }

    fn starting_at(first: ProductId) -> Self {
        Self {
            next_id: AtomicU32::new(first.get()),
            products: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reserve_id(&self) -> DomainResult<ProductId> {
        self.next_id
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(1))
            .map(ProductId::new)
            .map_err(|_| DomainError::invariant("product id space exhausted"))
    }
}

impl Default for InMemoryProductRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCatalog for InMemoryProductRegistry {
    fn create(&self, details: ProductDetails) -> DomainResult<ProductId> {
        let mut products = self
            .products
            .write()
            .map_err(|_| DomainError::invariant("product registry lock poisoned"))?;

        let id = self.reserve_id()?;

        // Ids must strictly increase along the sequence.
        if let Some(last) = products.last() {
            if last.id() >= id {
                return Err(DomainError::invariant(format!(
                    "product id {id} not greater than last stored id {}",
                    last.id()
                )));
            }
        }

        products.push(Product::new(id, details));
        tracing::debug!(product_id = %id, total = products.len(), "product stored");

        Ok(id)
    }

    fn list(&self, filter: Option<ProductType>) -> DomainResult<Vec<Product>> {
        let products = self
            .products
            .read()
            .map_err(|_| DomainError::invariant("product registry lock poisoned"))?;

        Ok(match filter {
            Some(t) => products
                .iter()
                .filter(|p| p.product_type() == t)
                .cloned()
                .collect(),
            None => products.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn details(name: &str, product_type: ProductType) -> ProductDetails {
        ProductDetails::new(name, product_type, 10, Decimal::new(199, 2)).unwrap()
    }

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id().get()).collect()
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let registry = InMemoryProductRegistry::new();
        assert!(registry.is_empty());

        let a = registry.create(details("A", ProductType::Book)).unwrap();
        let b = registry.create(details("B", ProductType::Food)).unwrap();
        let c = registry.create(details("C", ProductType::Book)).unwrap();

        assert_eq!((a.get(), b.get(), c.get()), (1, 2, 3));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn list_without_filter_preserves_insertion_order() {
        let registry = InMemoryProductRegistry::new();
        for (name, t) in [
            ("A", ProductType::Gadget),
            ("B", ProductType::Book),
            ("C", ProductType::Other),
        ] {
            registry.create(details(name, t)).unwrap();
        }

        let all = registry.list(None).unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.details().name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(ids(&all), vec![1, 2, 3]);
    }

    #[test]
    fn list_with_filter_returns_matching_subset_in_order() {
        let registry = InMemoryProductRegistry::new();
        registry.create(details("Book 1", ProductType::Book)).unwrap();
        registry.create(details("Apple", ProductType::Food)).unwrap();
        registry.create(details("Book 2", ProductType::Book)).unwrap();

        let books = registry.list(Some(ProductType::Book)).unwrap();
        assert_eq!(ids(&books), vec![1, 3]);
        assert!(books.iter().all(|p| p.product_type() == ProductType::Book));

        assert!(registry.list(Some(ProductType::Gadget)).unwrap().is_empty());
    }

    #[test]
    fn list_returns_a_snapshot() {
        let registry = InMemoryProductRegistry::new();
        registry.create(details("A", ProductType::Book)).unwrap();

        let snapshot = registry.list(None).unwrap();
        registry.create(details("B", ProductType::Book)).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.list(None).unwrap().len(), 2);
    }

    #[test]
    fn exhausted_id_space_is_an_invariant_violation() {
        let registry = InMemoryProductRegistry::starting_at(ProductId::new(u32::MAX - 1));
        let last = registry.create(details("Last", ProductType::Other)).unwrap();
        assert_eq!(last.get(), u32::MAX - 1);

        let err = registry.create(details("Overflow", ProductType::Other)).unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn arc_wrapped_registry_delegates() {
        let registry: Arc<dyn ProductCatalog> = Arc::new(InMemoryProductRegistry::new());
        let shared = Arc::clone(&registry);

        let id = shared.create(details("A", ProductType::Food)).unwrap();
        assert_eq!(ids(&registry.list(None).unwrap()), vec![id.get()]);
    }

    #[test]
    fn concurrent_creates_yield_unique_ids() {
        const THREADS: usize = 100;
        const PER_THREAD: usize = 10;

        let registry = InMemoryProductRegistry::new();

        std::thread::scope(|s| {
            for t in 0..THREADS {
                let registry = &registry;
                s.spawn(move || {
                    for i in 0..PER_THREAD {
                        let name = format!("Product-{t}-{i}");
                        registry.create(details(&name, ProductType::Gadget)).unwrap();
                    }
                });
            }
        });

        let all = registry.list(None).unwrap();
        assert_eq!(all.len(), THREADS * PER_THREAD);

        let unique: HashSet<u32> = ids(&all).into_iter().collect();
        assert_eq!(unique.len(), THREADS * PER_THREAD);
        assert!(unique.iter().all(|id| *id >= 1));

        // Insertion order matches id order.
        assert!(ids(&all).windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn readers_never_see_partial_state_during_writes() {
        let registry = InMemoryProductRegistry::new();

        std::thread::scope(|s| {
            let writer = &registry;
            s.spawn(move || {
                for i in 0..500 {
                    writer.create(details(&format!("P{i}"), ProductType::Food)).unwrap();
                }
            });

            let reader = &registry;
            s.spawn(move || {
                for _ in 0..200 {
                    let snapshot = reader.list(None).unwrap();
                    // A prefix of 1..=n with no gaps or duplicates.
                    let expected: Vec<u32> = (1..=snapshot.len() as u32).collect();
                    assert_eq!(ids(&snapshot), expected);
                }
            });
        });

        assert_eq!(registry.len(), 500);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn product_type() -> impl Strategy<Value = ProductType> {
            prop_oneof![
                Just(ProductType::Book),
                Just(ProductType::Food),
                Just(ProductType::Gadget),
                Just(ProductType::Other),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: list(t) is exactly the ordered subset of list(None) with type t.
            #[test]
            fn filter_is_ordered_subset(
                types in proptest::collection::vec(product_type(), 0..60),
                filter in product_type(),
            ) {
                let registry = InMemoryProductRegistry::new();
                for (i, t) in types.iter().enumerate() {
                    registry.create(details(&format!("P{i}"), *t)).unwrap();
                }

                let all = registry.list(None).unwrap();
                let expected: Vec<Product> = all
                    .iter()
                    .filter(|p| p.product_type() == filter)
                    .cloned()
                    .collect();

                prop_assert_eq!(registry.list(Some(filter)).unwrap(), expected);
                prop_assert_eq!(all.len(), types.len());
            }
        }
    }
}
