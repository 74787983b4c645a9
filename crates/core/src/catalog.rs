//! Catalog values

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Stored text did not match any variant of a catalog enum.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownCatalogValue {
    /// Which enum was being parsed.
    pub kind: &'static str,

    /// Offending text.
    pub value: String,
}

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $($(#[$variant_meta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            /// Text as stored.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCatalogValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownCatalogValue {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

catalog_enum! {
    /// Language a course is taught in.
    Language as "language" {
        /// Taught in English.
        #[default]
        English => "English",
        /// Taught in Spanish.
        Spanish => "Spanish",
        /// Taught in French.
        French => "French",
    }
}

catalog_enum! {
    /// Course difficulty.
    Level as "level" {
        /// No prior knowledge assumed.
        #[default]
        Beginner => "Beginner",
        /// Builds on the basics.
        Intermediate => "Intermediate",
        /// For experienced learners.
        Advanced => "Advanced",
    }
}

catalog_enum! {
    /// Moderation status set by the platform.
    PlatformStatus as "platform status" {
        /// Not yet submitted.
        Draft => "Draft",
        /// Awaiting moderation.
        Review => "Review",
        /// Turned down by moderation.
        Rejected => "Rejected",
        /// Taken down by the platform.
        Disabled => "Disabled",
        /// Listed on the marketplace.
        #[default]
        Published => "Published",
    }
}

catalog_enum! {
    /// Publication status set by the teacher.
    TeacherCourseStatus as "teacher course status" {
        /// Still being written.
        Draft => "Draft",
        /// Withdrawn by the teacher.
        Disabled => "Disabled",
        /// Offered by the teacher.
        #[default]
        Published => "Published",
    }
}

/// Builds a URL slug from a title: lowercase ASCII alphanumerics separated by single
/// hyphens. Accented letters lose their accents, other non-ASCII characters are dropped
/// and remaining punctuation acts as a separator.
pub fn slugify(title: &str) -> String {
    let ascii: String = title.nfkd().filter(char::is_ascii).collect();
    let mut slug = String::with_capacity(ascii.len());

    for word in ascii
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        if !slug.is_empty() {
            slug.push('-');
        }

        slug.extend(word.chars().map(|c| c.to_ascii_lowercase()));
    }

    slug
}

/// Formats a lesson duration as `"{minutes}m {seconds}s"`, dropping fractional seconds.
pub fn content_duration(duration: Duration) -> String {
    let total = duration.as_secs();

    format!("{}m {}s", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn slug_from_title() {
        assert_eq!(slugify("Intro to Rust: Ownership"), "intro-to-rust-ownership");
        assert_eq!(slugify("  --Async   & Await-- "), "async-await");
        assert_eq!(slugify("Café Basics 101"), "cafe-basics-101");
        assert_eq!(slugify("Über Ñandú"), "uber-nandu");
        assert_eq!(slugify("Straße 日本"), "strae");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn duration_text() {
        assert_eq!(content_duration(Duration::from_secs(0)), "0m 0s");
        assert_eq!(content_duration(Duration::from_millis(125_900)), "2m 5s");
        assert_eq!(content_duration(Duration::from_secs(3_725)), "62m 5s");
    }

    #[test]
    fn defaults_match_new_courses() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Level::default(), Level::Beginner);
        assert_eq!(PlatformStatus::default(), PlatformStatus::Published);
        assert_eq!(TeacherCourseStatus::default(), TeacherCourseStatus::Published);
    }

    #[test]
    fn parses_stored_text() -> TestResult {
        assert_eq!("Advanced".parse::<Level>()?, Level::Advanced);
        assert_eq!("Review".parse::<PlatformStatus>()?, PlatformStatus::Review);

        let error = "Review".parse::<TeacherCourseStatus>();

        assert_eq!(
            error,
            Err(UnknownCatalogValue {
                kind: "teacher course status",
                value: "Review".to_string(),
            })
        );

        Ok(())
    }
}
