use std::collections::{HashMap, HashSet};

use civic_result::Result;

use crate::{Database, Profile};

/// Row paired with the profile of its author, if one exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joined<E, P> {
    pub entity: E,
    pub profile: Option<P>,
}

/// Distinct author ids referenced by the rows, in order of first appearance
pub fn author_ids<E, K>(entities: &[E], key: K) -> Vec<String>
where
    K: Fn(&E) -> &str,
{
    let mut seen = HashSet::new();
    entities
        .iter()
        .map(&key)
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Attach to each row the profile whose id equals the row's author reference
///
/// Row order is kept. Rows without a matching profile get `None`.
pub fn merge<E, P, K, PK>(
    entities: Vec<E>,
    profiles: Vec<P>,
    key: K,
    profile_key: PK,
) -> Vec<Joined<E, P>>
where
    P: Clone,
    K: Fn(&E) -> &str,
    PK: Fn(&P) -> &str,
{
    let mut by_id: HashMap<String, P> = HashMap::new();
    for profile in profiles {
        by_id
            .entry(profile_key(&profile).to_string())
            .or_insert(profile);
    }

    entities
        .into_iter()
        .map(|entity| {
            let profile = by_id.get(key(&entity)).cloned();
            Joined { entity, profile }
        })
        .collect()
}

/// Fetch the profiles of the rows' authors and merge them in
pub async fn join_authors<E, K>(
    db: &Database,
    entities: Vec<E>,
    key: K,
) -> Result<Vec<Joined<E, Profile>>>
where
    K: Fn(&E) -> &str,
{
    let ids = author_ids(&entities, &key);
    let profiles = if ids.is_empty() {
        vec![]
    } else {
        db.fetch_profiles(&ids).await?
    };

    Ok(merge(entities, profiles, key, |profile: &Profile| profile.id.as_str()))
}
