//! Macro for implementing Display and FromStr for domain enums
//!
//! Eliminates boilerplate for tag-style enum conversions by providing a
//! single implementation for both Display and FromStr traits. Parsing is
//! case-insensitive; output is the canonical lowercase tag.
//!
//! # Example
//!
//! ```rust
//! use eventsift_domain::impl_domain_tag_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ReviewState {
//!     Open,
//!     Closed,
//! }
//!
//! impl_domain_tag_conversions!(ReviewState {
//!     Open => "open",
//!     Closed => "closed",
//! });
//! ```

/// Implements Display and FromStr traits for tag-style enums
///
/// Generates:
/// - Display: converts enum variants to their lowercase tags
/// - FromStr: parses case-insensitive strings back to variants
#[macro_export]
macro_rules! impl_domain_tag_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestTag {
        Alpha,
        Beta,
    }

    impl_domain_tag_conversions!(TestTag {
        Alpha => "alpha",
        Beta => "beta",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestTag::Alpha.to_string(), "alpha");
        assert_eq!(TestTag::Beta.to_string(), "beta");
    }

    #[test]
    fn test_fromstr_case_insensitive() {
        assert_eq!(TestTag::from_str("ALPHA").unwrap(), TestTag::Alpha);
        assert_eq!(TestTag::from_str("Beta").unwrap(), TestTag::Beta);
        assert!(TestTag::from_str("gamma").is_err());
    }
}
