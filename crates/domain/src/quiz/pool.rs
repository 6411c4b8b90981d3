//! Eligible pool - the contacts a session may draw rounds from

use crate::entities::Contact;
use crate::quiz::OPTIONS_PER_ROUND;
use crate::value_objects::FilterSelection;
use crate::ContactId;

/// Minimum pool size for a session to start or continue.
pub const MIN_POOL_SIZE: usize = OPTIONS_PER_ROUND;

/// Contacts matching the active filter that can be quizzed, in source order.
///
/// Recomputed from scratch whenever the contact list or the filter changes;
/// never mutated in place. An undersized pool is a normal state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligiblePool {
    contacts: Vec<Contact>,
}

impl EligiblePool {
    /// Derive the pool from a contact snapshot and a filter selection.
    ///
    /// A contact is eligible when its category is selected, it shares at least
    /// one tag with the tag filter (if any), and it has a photo or a hint.
    /// An inactive filter always yields an empty pool.
    pub fn compute(contacts: &[Contact], filter: &FilterSelection) -> Self {
        if !filter.is_active() {
            return Self::default();
        }
        let contacts = contacts
            .iter()
            .filter(|c| filter.matches(c) && c.is_quizzable())
            .cloned()
            .collect();
        Self { contacts }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Whether a round can be generated from this pool.
    pub fn is_playable(&self) -> bool {
        self.contacts.len() >= MIN_POOL_SIZE
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = ContactId> + '_ {
        self.contacts.iter().map(Contact::id)
    }
}

/// Free-function form of [`EligiblePool::compute`].
pub fn compute_eligible_pool(contacts: &[Contact], filter: &FilterSelection) -> EligiblePool {
    EligiblePool::compute(contacts, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ContactCategory;
    use crate::value_objects::{DisplayName, Hint, PhotoRef, Tag};

    fn tag(s: &str) -> Tag {
        Tag::new(s).expect("valid tag")
    }

    fn contact(name: &str, category: ContactCategory) -> Contact {
        Contact::new(
            ContactId::new(),
            DisplayName::new(name).expect("valid name"),
            category,
        )
    }

    fn with_photo(c: Contact) -> Contact {
        let photo = format!("photos/{}.jpg", c.display_name());
        c.with_photo(PhotoRef::new(photo))
    }

    #[test]
    fn empty_contacts_yield_empty_pool() {
        let filter = FilterSelection::new([ContactCategory::Family], []);
        let pool = compute_eligible_pool(&[], &filter);
        assert!(pool.is_empty());
        assert!(!pool.is_playable());
    }

    #[test]
    fn inactive_filter_yields_empty_pool() {
        let contacts = vec![with_photo(contact("Ada", ContactCategory::Family))];
        let pool = compute_eligible_pool(&contacts, &FilterSelection::empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn keeps_only_matching_quizzable_contacts_in_order() {
        let a = with_photo(contact("Ada", ContactCategory::Family));
        let b = contact("Ben", ContactCategory::Family);
        let c = contact("Cy", ContactCategory::Family).with_hint(Hint::new("Tall").expect("hint"));
        let d = with_photo(contact("Dee", ContactCategory::Work));
        let contacts = vec![a.clone(), b, c.clone(), d];

        let filter = FilterSelection::new([ContactCategory::Family], []);
        let pool = compute_eligible_pool(&contacts, &filter);

        let ids: Vec<_> = pool.ids().collect();
        assert_eq!(ids, vec![a.id(), c.id()]);
    }

    #[test]
    fn tag_filter_narrows_pool() {
        let a = with_photo(contact("Ada", ContactCategory::Friend)).with_tag(tag("chess"));
        let b = with_photo(contact("Ben", ContactCategory::Friend)).with_tag(tag("running"));
        let c = with_photo(contact("Cy", ContactCategory::Friend));
        let contacts = vec![a.clone(), b, c];

        let filter = FilterSelection::new([ContactCategory::Friend], [tag("chess")]);
        let pool = compute_eligible_pool(&contacts, &filter);

        assert_eq!(pool.len(), 1);
        assert!(pool.contains(a.id()));
    }

    #[test]
    fn every_pool_member_matches_filter_and_is_quizzable() {
        let categories = ContactCategory::ALL;
        let tags = ["chess", "running", "school"];
        let mut contacts = Vec::new();
        for (i, category) in categories.iter().enumerate() {
            for j in 0..6 {
                let mut c = contact(&format!("C{}-{}", i, j), *category)
                    .with_tag(tag(tags[(i + j) % tags.len()]));
                if j % 3 == 0 {
                    c = with_photo(c);
                } else if j % 3 == 1 {
                    c = c.with_hint(Hint::new("hint").expect("hint"));
                }
                contacts.push(c);
            }
        }

        let filters = [
            FilterSelection::new([ContactCategory::Family, ContactCategory::Work], []),
            FilterSelection::new([ContactCategory::Friend], [tag("chess")]),
            FilterSelection::new(ContactCategory::ALL, [tag("school"), tag("running")]),
        ];
        for filter in &filters {
            let pool = compute_eligible_pool(&contacts, filter);
            for c in pool.contacts() {
                assert!(filter.matches(c));
                assert!(c.is_quizzable());
            }
            let expected = contacts
                .iter()
                .filter(|c| filter.matches(c) && c.is_quizzable())
                .count();
            assert_eq!(pool.len(), expected);
        }
    }

    #[test]
    fn blank_photo_ref_keeps_contact_out_of_pool() {
        let json = r#"[
            {"id": "0b6f4a52-1c2e-4d3b-9a8f-5e7d6c4b3a21", "displayName": "Ada", "photoRef": "", "category": "family"},
            {"id": "9d8c7b6a-5f4e-4d3c-8b2a-1f0e9d8c7b6a", "displayName": "Ben", "photoRef": "photos/ben.jpg", "category": "family"}
        ]"#;
        let contacts: Vec<Contact> = serde_json::from_str(json).expect("valid contacts json");
        let blank = with_photo(contact("Cy", ContactCategory::Family)).with_photo(PhotoRef::new(" "));

        let mut all = contacts.clone();
        all.push(blank);
        let filter = FilterSelection::new([ContactCategory::Family], []);
        let pool = compute_eligible_pool(&all, &filter);

        assert_eq!(pool.len(), 1);
        assert!(pool.contains(contacts[1].id()));
    }

    #[test]
    fn playable_at_exactly_five() {
        let filter = FilterSelection::new([ContactCategory::Work], []);
        let mut contacts: Vec<_> = (0..4)
            .map(|i| with_photo(contact(&format!("W{}", i), ContactCategory::Work)))
            .collect();
        assert!(!compute_eligible_pool(&contacts, &filter).is_playable());

        contacts.push(with_photo(contact("W4", ContactCategory::Work)));
        assert!(compute_eligible_pool(&contacts, &filter).is_playable());
    }
}
