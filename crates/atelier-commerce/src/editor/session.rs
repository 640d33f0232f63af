//! Staged variant edits with soft deletion.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, Variant};
use crate::error::ValidationError;
use crate::ids::{ProductId, VariantId};

/// What a save sends to the backend.
///
/// Variants with an id are updates, variants without one are creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    pub variants: Vec<Variant>,
    pub variants_to_delete: Vec<VariantId>,
}

impl SavePayload {
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty() && self.variants_to_delete.is_empty()
    }
}

/// Working copy of a product's variants.
///
/// Removing a saved variant only tombstones it: the entry stays in the list,
/// flagged, until [`EditingSession::reconcile_after_save`] runs after the
/// backend confirmed the save. Unsaved variants are dropped at once.
///
/// Active entries never share a `(size, color)` pair; every edit that would
/// break that fails and leaves the session untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingSession {
    product_id: ProductId,
    entries: Vec<Variant>,
    tombstones: BTreeSet<VariantId>,
}

impl EditingSession {
    /// Start editing `product`'s variants.
    pub fn open(product: &Product) -> Self {
        Self {
            product_id: product.id,
            entries: product.variants.clone(),
            tombstones: BTreeSet::new(),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Every entry, including those pending deletion, in working order.
    pub fn entries(&self) -> &[Variant] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_pending_deletion(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .is_some_and(|variant| self.is_tombstoned(variant))
    }

    fn is_tombstoned(&self, variant: &Variant) -> bool {
        variant.id.is_some_and(|id| self.tombstones.contains(&id))
    }

    /// Entries that will survive the next save.
    pub fn active_variants(&self) -> Vec<&Variant> {
        self.entries
            .iter()
            .filter(|variant| !self.is_tombstoned(variant))
            .collect()
    }

    /// Ids of saved variants pending deletion.
    pub fn deletion_ids(&self) -> Vec<VariantId> {
        self.tombstones.iter().copied().collect()
    }

    /// Stock the product will carry after the save.
    pub fn total_inventory(&self) -> u64 {
        self.active_variants()
            .iter()
            .map(|v| u64::from(v.inventory_quantity))
            .sum()
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(ValidationError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }

    /// Reject `candidate` if an active entry other than `skip` has its pair.
    fn check_unique(&self, candidate: &Variant, skip: Option<usize>) -> Result<(), ValidationError> {
        if !candidate.has_axis() {
            return Err(ValidationError::MissingAxis);
        }
        let clash = self.entries.iter().enumerate().any(|(position, existing)| {
            Some(position) != skip
                && !self.is_tombstoned(existing)
                && existing.key() == candidate.key()
        });
        if clash {
            return Err(ValidationError::DuplicateVariant {
                size_id: candidate.size_id,
                color_id: candidate.color_id,
            });
        }
        Ok(())
    }

    /// Append a new, unsaved variant. Any id on `variant` is discarded.
    pub fn add(&mut self, mut variant: Variant) -> Result<usize, ValidationError> {
        variant.id = None;
        if let Err(err) = self.check_unique(&variant, None) {
            tracing::debug!(product_id = %self.product_id, %err, "rejected new variant");
            return Err(err);
        }
        self.entries.push(variant);
        Ok(self.entries.len() - 1)
    }

    /// Replace the entry at `index`, keeping its id.
    pub fn update(&mut self, index: usize, mut variant: Variant) -> Result<(), ValidationError> {
        self.check_index(index)?;
        if let Err(err) = self.check_unique(&variant, Some(index)) {
            tracing::debug!(product_id = %self.product_id, index, %err, "rejected variant edit");
            return Err(err);
        }
        variant.id = self.entries[index].id;
        self.entries[index] = variant;
        Ok(())
    }

    /// Remove the entry at `index`.
    ///
    /// A saved entry is tombstoned and stays listed; an unsaved one is
    /// discarded. Removing an entry already pending deletion does nothing.
    pub fn remove(&mut self, index: usize) -> Result<(), ValidationError> {
        self.check_index(index)?;
        match self.entries[index].id {
            Some(id) => {
                if self.tombstones.insert(id) {
                    tracing::debug!(product_id = %self.product_id, variant_id = %id, "variant marked for deletion");
                }
            }
            None => {
                self.entries.remove(index);
                tracing::debug!(product_id = %self.product_id, index, "unsaved variant discarded");
            }
        }
        Ok(())
    }

    /// Take back a pending deletion.
    ///
    /// Fails if another active entry has taken the pair in the meantime.
    pub fn restore(&mut self, index: usize) -> Result<(), ValidationError> {
        self.check_index(index)?;
        let variant = &self.entries[index];
        let Some(id) = variant.id.filter(|id| self.tombstones.contains(id)) else {
            return Ok(());
        };
        self.check_unique(variant, Some(index))?;
        self.tombstones.remove(&id);
        tracing::debug!(product_id = %self.product_id, variant_id = %id, "variant restored");
        Ok(())
    }

    /// The request body for a save.
    pub fn save_payload(&self) -> SavePayload {
        SavePayload {
            variants: self.active_variants().into_iter().cloned().collect(),
            variants_to_delete: self.deletion_ids(),
        }
    }

    /// Settle the session after the backend confirmed a save: tombstoned
    /// entries are dropped and the tombstones cleared.
    pub fn reconcile_after_save(&mut self) {
        let tombstones = std::mem::take(&mut self.tombstones);
        self.entries
            .retain(|variant| !variant.id.is_some_and(|id| tombstones.contains(&id)));
        tracing::debug!(
            product_id = %self.product_id,
            deleted = tombstones.len(),
            remaining = self.entries.len(),
            "editing session reconciled"
        );
    }
}


#[cfg(test)]
mod proptests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::catalog::fixtures::*;
    use crate::ids::{ColorId, SizeId};
    use crate::money::{Currency, Money};

    #[derive(Debug, Clone)]
    enum Edit {
        Add(Option<SizeId>, Option<ColorId>, u32),
        Update(usize, Option<SizeId>, Option<ColorId>, u32),
        Remove(usize),
        Restore(usize),
    }

    fn arb_size() -> impl Strategy<Value = Option<SizeId>> {
        prop_oneof![Just(None), Just(Some(S)), Just(Some(M)), Just(Some(L))]
    }

    fn arb_color() -> impl Strategy<Value = Option<ColorId>> {
        prop_oneof![Just(None), Just(Some(RED)), Just(Some(BLUE))]
    }

    fn arb_edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (arb_size(), arb_color(), 0u32..5).prop_map(|(s, c, q)| Edit::Add(s, c, q)),
            (0usize..8, arb_size(), arb_color(), 0u32..5)
                .prop_map(|(i, s, c, q)| Edit::Update(i, s, c, q)),
            (0usize..8).prop_map(Edit::Remove),
            (0usize..8).prop_map(Edit::Restore),
        ]
    }

    fn session() -> EditingSession {
        let variants = tee_variants()
            .into_iter()
            .zip(1..)
            .map(|(variant, id)| variant.with_id(VariantId::new(id)))
            .collect();
        let product = Product::new(ProductId::new(1), "Tee", Money::new(100, Currency::COP), 0)
            .with_variants(variants);
        EditingSession::open(&product)
    }

    fn apply(session: &mut EditingSession, edit: &Edit) {
        let _ = match *edit {
            Edit::Add(s, c, q) => session.add(Variant::new(s, c, q)).map(|_| ()),
            Edit::Update(i, s, c, q) => session.update(i, Variant::new(s, c, q)),
            Edit::Remove(i) => session.remove(i),
            Edit::Restore(i) => session.restore(i),
        };
    }

    proptest! {
        #[test]
        fn active_pairs_stay_unique(edits in prop::collection::vec(arb_edit(), 0..24)) {
            let mut session = session();
            for edit in &edits {
                apply(&mut session, edit);
                let active = session.active_variants();
                let keys: HashSet<_> = active.iter().map(|v| v.key()).collect();
                prop_assert_eq!(keys.len(), active.len());
            }
        }

        #[test]
        fn unsaved_entries_are_never_tombstoned(edits in prop::collection::vec(arb_edit(), 0..24)) {
            let mut session = session();
            for edit in &edits {
                apply(&mut session, edit);
            }
            for (index, variant) in session.entries().iter().enumerate() {
                if variant.id.is_none() {
                    prop_assert!(!session.is_pending_deletion(index));
                }
            }
        }

        #[test]
        fn reconcile_empties_tombstones(edits in prop::collection::vec(arb_edit(), 0..24)) {
            let mut session = session();
            for edit in &edits {
                apply(&mut session, edit);
            }
            let active_before = session.active_variants().len();
            session.reconcile_after_save();
            prop_assert!(session.deletion_ids().is_empty());
            prop_assert_eq!(session.len(), active_before);
        }
    }
}
