use crate::engine::error::VwfoError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:?}", self.0)
            }
        }
    };
}

string_id! {
    /// Opaque identifier of a design. Equality is plain string equality.
    DesignId
}

string_id! {
    /// Opaque identifier of a scenario (an analysis stage).
    ScenarioId
}

/// An ordered (current, following) pair of scenarios.
///
/// The pair is only metadata for selecting a transition graph; nothing here
/// checks that the two scenarios are adjacent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioPair {
    pub current: ScenarioId,
    pub following: ScenarioId,
}

impl ScenarioPair {
    pub fn new(current: impl Into<ScenarioId>, following: impl Into<ScenarioId>) -> Self {
        Self {
            current: current.into(),
            following: following.into(),
        }
    }

    /// The `"{current}_{following}"` key used to name transition matrices.
    pub fn key(&self) -> String {
        format!("{}_{}", self.current, self.following)
    }
}

/// Fails if two distinct pairs map to the same key.
///
/// Keys join scenario names with `_`, so names that contain underscores can
/// collide (`a_b -> a_b_a` and `a_b_a -> b_a` both give `a_b_a_b_a`).
pub fn ensure_distinct_keys(pairs: &[ScenarioPair]) -> Result<(), VwfoError> {
    let mut seen: HashMap<String, &ScenarioPair> = HashMap::with_capacity(pairs.len());
    for pair in pairs {
        let key = pair.key();
        match seen.get(&key) {
            Some(&first) if first != pair => {
                return Err(VwfoError::AmbiguousTransitionKey {
                    key,
                    first: first.clone(),
                    second: pair.clone(),
                });
            }
            Some(_) => {}
            None => {
                seen.insert(key, pair);
            }
        }
    }
    Ok(())
}

impl fmt::Display for ScenarioPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.current, self.following)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn design_id_lookups_work_with_plain_str() {
        let mut map = HashMap::new();
        map.insert(DesignId::from("A"), 1);
        assert_eq!(map.get("A"), Some(&1));
        assert_eq!(map.get("B"), None);
    }

    #[test]
    fn debug_output_is_the_quoted_identifier() {
        assert_eq!(format!("{:?}", DesignId::from("d1")), "\"d1\"");
        assert_eq!(format!("{:?}", vec![ScenarioId::from("s1")]), "[\"s1\"]");
    }

    #[test]
    fn pair_key_joins_scenarios_with_underscore() {
        let pair = ScenarioPair::new("s1", "s2");
        assert_eq!(pair.key(), "s1_s2");
        assert_eq!(pair.to_string(), "s1 -> s2");
    }

    #[test]
    fn colliding_keys_of_different_pairs_are_rejected() {
        let pairs = [
            ScenarioPair::new("a_b", "a_b_a"),
            ScenarioPair::new("a_b_a", "b_a"),
        ];
        assert_eq!(
            ensure_distinct_keys(&pairs),
            Err(VwfoError::AmbiguousTransitionKey {
                key: "a_b_a_b_a".to_string(),
                first: pairs[0].clone(),
                second: pairs[1].clone(),
            })
        );
    }

    #[test]
    fn repeated_or_distinct_pairs_are_accepted() {
        let pairs = [
            ScenarioPair::new("s1", "s2"),
            ScenarioPair::new("s2", "s3"),
            ScenarioPair::new("s1", "s2"),
        ];
        assert!(ensure_distinct_keys(&pairs).is_ok());
    }

    #[test]
    fn pair_key_keeps_underscores_inside_scenario_names() {
        let pair = ScenarioPair::new("base_2030", "high_2040");
        assert_eq!(pair.key(), "base_2030_high_2040");
    }
}
