use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The size/format class of a store. Every store belongs to exactly one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreType {
    A,
    B,
    C,
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreType::A => write!(f, "A"),
            StoreType::B => write!(f, "B"),
            StoreType::C => write!(f, "C"),
        }
    }
}

impl FromStr for StoreType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(StoreType::A),
            "B" | "b" => Ok(StoreType::B),
            "C" | "c" => Ok(StoreType::C),
            other => Err(CoreError::InvalidInput(
                "store type".to_string(),
                other.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_type_parses_known_classes() {
        assert_eq!("A".parse::<StoreType>().unwrap(), StoreType::A);
        assert_eq!(" b ".parse::<StoreType>().unwrap(), StoreType::B);
        assert!("D".parse::<StoreType>().is_err());
    }

    #[test]
    fn store_type_orders_a_before_c() {
        assert!(StoreType::A < StoreType::B);
        assert!(StoreType::B < StoreType::C);
    }
}
