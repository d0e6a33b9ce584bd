//! SQL identifier validation
//!
//! Table and column names reach the PostgreSQL client as plain strings from
//! UI code. They are checked here and always emitted double-quoted, so a name
//! that passes can never change the shape of a statement.

use std::fmt;
use thiserror::Error;

/// PostgreSQL identifier length limit
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Why a name was refused as an identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name '{name}' is {length} bytes long, at most {max_length} are allowed")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },

    #[error("name '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),

    #[error("name '{0}' may only contain ASCII letters, digits and underscores")]
    InvalidCharacters(String),
}

fn check_identifier(name: &str) -> Result<(), ValidationError> {
    let Some(first) = name.chars().next() else {
        return Err(ValidationError::Empty);
    };

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(ValidationError::InvalidStartCharacter(name.to_string()));
    }

    if name.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }

    Ok(())
}

macro_rules! identifier {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: &str) -> Result<Self, ValidationError> {
                check_identifier(name)?;
                Ok(Self(name.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The name in double quotes, ready to be placed into SQL
            pub fn quoted(&self) -> String {
                format!("\"{}\"", self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// A table name that is safe to use in SQL statements
    ValidatedTableName
);

identifier!(
    /// A column name that is safe to use in SQL statements
    ValidatedFieldName
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_tables_are_valid() {
        let longest = "t".repeat(MAX_IDENTIFIER_LENGTH);
        for name in [
            "matches",
            "players",
            "spieler_des_spiels",
            "_staging",
            "season2024",
            longest.as_str(),
        ] {
            assert_eq!(ValidatedTableName::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_reserved_words_are_quoted() {
        // matches.date and bans.type are real columns
        assert_eq!(ValidatedFieldName::new("date").unwrap().quoted(), "\"date\"");
        assert_eq!(ValidatedFieldName::new("type").unwrap().quoted(), "\"type\"");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(ValidatedTableName::new(""), Err(ValidationError::Empty));
        assert_eq!(
            ValidatedFieldName::new("1goal"),
            Err(ValidationError::InvalidStartCharacter("1goal".to_string()))
        );
        assert_eq!(
            ValidatedFieldName::new("goals-a"),
            Err(ValidationError::InvalidCharacters("goals-a".to_string()))
        );
        assert_eq!(
            ValidatedFieldName::new("spieler_größe"),
            Err(ValidationError::InvalidCharacters("spieler_größe".to_string()))
        );
        assert!(matches!(
            ValidatedTableName::new(&"t".repeat(64)),
            Err(ValidationError::TooLong { length: 64, max_length: 63, .. })
        ));
    }

    #[test]
    fn test_injection_attempts_are_rejected() {
        for name in [
            "players; DROP TABLE players; --",
            "players' OR '1'='1",
            "players/**/UNION/**/SELECT",
            "players\"; DELETE FROM bans; --",
            "name\"",
        ] {
            assert!(ValidatedTableName::new(name).is_err(), "accepted {}", name);
            assert!(ValidatedFieldName::new(name).is_err(), "accepted {}", name);
        }
    }
}
