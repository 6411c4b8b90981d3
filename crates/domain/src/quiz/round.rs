//! Round generation - one prompt contact plus its shuffled answer options
//!
//! Randomness is injected as a closure `gen_range(min, max)` returning an
//! index in the inclusive range `[min, max]`, so tests can drive exact
//! orderings and the engine can plug in its `RandomPort`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;
use crate::quiz::pool::{EligiblePool, MIN_POOL_SIZE};
use crate::quiz::OPTIONS_PER_ROUND;
use crate::ContactId;

/// One "who is this?" round.
///
/// # Invariants
///
/// - `option_ids` holds exactly `OPTIONS_PER_ROUND` distinct ids
/// - `option_ids[correct_index]` is the prompt contact
///
/// Immutable once created; a new round replaces it on advance or replay.
/// Deserialization goes through [`Round::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    option_ids: [ContactId; OPTIONS_PER_ROUND],
    correct_index: usize,
}

impl Round {
    /// Build a round from explicit parts, validating the invariants.
    pub fn from_parts(
        option_ids: [ContactId; OPTIONS_PER_ROUND],
        correct_index: usize,
    ) -> Result<Self, DomainError> {
        if correct_index >= OPTIONS_PER_ROUND {
            return Err(DomainError::validation(format!(
                "Correct index {} out of range for {} options",
                correct_index, OPTIONS_PER_ROUND
            )));
        }
        for (i, id) in option_ids.iter().enumerate() {
            if option_ids[..i].contains(id) {
                return Err(DomainError::validation(format!(
                    "Duplicate option id in round: {}",
                    id
                )));
            }
        }
        Ok(Self {
            option_ids,
            correct_index,
        })
    }

    pub fn prompt_contact_id(&self) -> ContactId {
        self.option_ids[self.correct_index]
    }

    pub fn option_ids(&self) -> &[ContactId] {
        &self.option_ids
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.option_ids.contains(&id)
    }
}

impl<'de> Deserialize<'de> for Round {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Parts {
            option_ids: [ContactId; OPTIONS_PER_ROUND],
            correct_index: usize,
        }

        let parts = Parts::deserialize(deserializer)?;
        Round::from_parts(parts.option_ids, parts.correct_index).map_err(serde::de::Error::custom)
    }
}

/// Generate a round from the eligible pool.
///
/// 1. Uniformly shuffle the pool (Fisher-Yates).
/// 2. If the first contact is `exclude_prompt` (the previous round's prompt),
///    swap it with a uniformly chosen other position so consecutive rounds
///    never share a prompt.
/// 3. Take the first contact as the prompt and the next four as distractors.
/// 4. Shuffle those five again for display order and record where the prompt landed.
///
/// # Errors
///
/// Returns `DomainError::InsufficientPool` when the pool holds fewer than
/// `MIN_POOL_SIZE` contacts. The session state machine checks the pool before
/// calling, so reaching this is a programming fault.
pub fn generate_round<R>(
    pool: &EligiblePool,
    exclude_prompt: Option<ContactId>,
    gen_range: &mut R,
) -> Result<Round, DomainError>
where
    R: FnMut(usize, usize) -> usize,
{
    if !pool.is_playable() {
        return Err(DomainError::insufficient_pool(MIN_POOL_SIZE, pool.len()));
    }

    let contacts = pool.contacts();
    let mut order: Vec<usize> = (0..contacts.len()).collect();
    shuffle(&mut order, gen_range);

    if let Some(excluded) = exclude_prompt {
        if contacts[order[0]].id() == excluded {
            let swap_with = pick(gen_range, 1, order.len() - 1);
            order.swap(0, swap_with);
        }
    }

    let prompt = contacts[order[0]].id();
    let mut option_ids: [ContactId; OPTIONS_PER_ROUND] =
        std::array::from_fn(|i| contacts[order[i]].id());
    shuffle(&mut option_ids, gen_range);

    let correct_index = option_ids
        .iter()
        .position(|id| *id == prompt)
        .unwrap_or_default();

    Ok(Round {
        option_ids,
        correct_index,
    })
}

fn shuffle<T, R>(items: &mut [T], gen_range: &mut R)
where
    R: FnMut(usize, usize) -> usize,
{
    for i in (1..items.len()).rev() {
        let j = pick(gen_range, 0, i);
        items.swap(i, j);
    }
}

// Out-of-range draws from an injected source are clamped.
fn pick<R>(gen_range: &mut R, min: usize, max: usize) -> usize
where
    R: FnMut(usize, usize) -> usize,
{
    gen_range(min, max).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::entities::{Contact, ContactCategory};
    use crate::value_objects::{DisplayName, FilterSelection, PhotoRef};

    fn pool_of(size: usize) -> EligiblePool {
        let contacts: Vec<Contact> = (0..size)
            .map(|i| {
                Contact::new(
                    ContactId::new(),
                    DisplayName::new(format!("Contact {}", i)).expect("valid name"),
                    ContactCategory::Friend,
                )
                .with_photo(PhotoRef::new(format!("photo-{}", i)))
            })
            .collect();
        EligiblePool::compute(&contacts, &FilterSelection::new([ContactCategory::Friend], []))
    }

    fn seeded(seed: u64) -> impl FnMut(usize, usize) -> usize {
        let mut rng = StdRng::seed_from_u64(seed);
        move |min, max| rng.gen_range(min..=max)
    }

    fn assert_well_formed(round: &Round, pool: &EligiblePool) {
        let distinct: HashSet<_> = round.option_ids().iter().collect();
        assert_eq!(round.option_ids().len(), OPTIONS_PER_ROUND);
        assert_eq!(distinct.len(), OPTIONS_PER_ROUND);
        assert!(round.option_ids().iter().all(|id| pool.contains(*id)));
        assert_eq!(
            round.option_ids()[round.correct_index()],
            round.prompt_contact_id()
        );
    }

    #[test]
    fn undersized_pool_is_rejected() {
        let pool = pool_of(4);
        let result = generate_round(&pool, None, &mut seeded(1));
        assert_eq!(
            result,
            Err(DomainError::InsufficientPool {
                required: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn rounds_are_well_formed_for_many_pool_sizes() {
        for size in 5..=20 {
            let pool = pool_of(size);
            let mut rng = seeded(size as u64);
            let mut previous = None;
            for _ in 0..50 {
                let round = generate_round(&pool, previous, &mut rng).expect("playable pool");
                assert_well_formed(&round, &pool);
                previous = Some(round.prompt_contact_id());
            }
        }
    }

    #[test]
    fn pool_of_five_uses_every_contact() {
        let pool = pool_of(5);
        let round = generate_round(&pool, None, &mut seeded(7)).expect("playable pool");
        let options: HashSet<_> = round.option_ids().iter().copied().collect();
        let all: HashSet<_> = pool.ids().collect();
        assert_eq!(options, all);
    }

    #[test]
    fn identity_source_keeps_pool_order() {
        let pool = pool_of(6);
        // Always drawing the upper bound makes every Fisher-Yates step a no-op.
        let round = generate_round(&pool, None, &mut |_min, max| max).expect("playable pool");
        let expected: Vec<_> = pool.ids().take(OPTIONS_PER_ROUND).collect();
        assert_eq!(round.option_ids(), expected.as_slice());
        assert_eq!(round.correct_index(), 0);
    }

    #[test]
    fn lower_bound_source_rotates_options() {
        let pool = pool_of(5);
        let ids: Vec<_> = pool.ids().collect();
        let round = generate_round(&pool, None, &mut |min, _max| min).expect("playable pool");

        assert_eq!(round.prompt_contact_id(), ids[1]);
        assert_eq!(
            round.option_ids(),
            &[ids[2], ids[3], ids[4], ids[0], ids[1]]
        );
        assert_eq!(round.correct_index(), 4);
    }

    #[test]
    fn excluded_prompt_is_swapped_out() {
        let pool = pool_of(6);
        let ids: Vec<_> = pool.ids().collect();
        let round =
            generate_round(&pool, Some(ids[0]), &mut |_min, max| max).expect("playable pool");

        assert_eq!(round.prompt_contact_id(), ids[5]);
        assert_eq!(round.option_ids(), &[ids[5], ids[1], ids[2], ids[3], ids[4]]);
        assert!(round.contains(ids[1]));
    }

    #[test]
    fn consecutive_prompts_differ_when_pool_larger_than_five() {
        for size in 6..=10 {
            let pool = pool_of(size);
            let mut rng = seeded(100 + size as u64);
            let mut previous: Option<ContactId> = None;
            for _ in 0..200 {
                let round = generate_round(&pool, previous, &mut rng).expect("playable pool");
                if let Some(prev) = previous {
                    assert_ne!(round.prompt_contact_id(), prev);
                }
                previous = Some(round.prompt_contact_id());
            }
        }
    }

    #[test]
    fn prompts_are_spread_across_pool() {
        let pool = pool_of(8);
        let mut rng = seeded(42);
        let mut counts: HashMap<ContactId, usize> = HashMap::new();
        for _ in 0..4000 {
            let round = generate_round(&pool, None, &mut rng).expect("playable pool");
            *counts.entry(round.prompt_contact_id()).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        // Expected 500 each; allow a wide band so the test is not flaky.
        assert!(counts.values().all(|&n| (350..=650).contains(&n)));
    }

    #[test]
    fn out_of_range_draws_are_clamped() {
        let pool = pool_of(5);
        let round = generate_round(&pool, None, &mut |_min, _max| usize::MAX).expect("playable");
        assert_well_formed(&round, &pool);
    }

    #[test]
    fn from_parts_validates() {
        let ids: [ContactId; OPTIONS_PER_ROUND] = std::array::from_fn(|_| ContactId::new());
        assert!(Round::from_parts(ids, 2).is_ok());
        assert!(Round::from_parts(ids, 5).is_err());

        let mut dup = ids;
        dup[4] = dup[0];
        assert!(Round::from_parts(dup, 0).is_err());
    }

    #[test]
    fn deserialization_rejects_malformed_rounds() {
        let ids: [ContactId; OPTIONS_PER_ROUND] = std::array::from_fn(|_| ContactId::new());
        let round = Round::from_parts(ids, 3).expect("valid round");
        let json = serde_json::to_string(&round).expect("serializable");
        let parsed: Round = serde_json::from_str(&json).expect("valid round json");
        assert_eq!(parsed, round);

        let out_of_range = serde_json::json!({ "optionIds": ids, "correctIndex": 9 });
        assert!(serde_json::from_value::<Round>(out_of_range).is_err());

        let mut dup = ids;
        dup[1] = dup[3];
        let duplicated = serde_json::json!({ "optionIds": dup, "correctIndex": 0 });
        assert!(serde_json::from_value::<Round>(duplicated).is_err());
    }
}
