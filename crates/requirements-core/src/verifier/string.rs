//! Text checks for `String` and `&str`.

use crate::errors::{ExceptionKind, Result};
use crate::message::builder::ACTUAL;
use crate::message::Describe;

use super::{quote, SizeVerifier, Verifier};

impl<T: AsRef<str> + Describe> Verifier<T> {
    fn check_text(
        self,
        op: &'static str,
        passed: impl FnOnce(&str) -> bool,
        requirement: impl FnOnce() -> String,
        with_actual: bool,
    ) -> Result<Self> {
        self.verify(
            |value| passed(value.as_ref()),
            |v| {
                let failure = v.failure(
                    op,
                    ExceptionKind::InvalidArgument,
                    format!("{} {}.", v.quoted_name(), requirement()),
                );
                if with_actual {
                    failure.add_context(ACTUAL, v.value()).build()
                } else {
                    failure.build()
                }
            },
        )
    }

    fn text_length(self) -> SizeVerifier<T> {
        let length = self.value().as_ref().chars().count();
        SizeVerifier::new(self, length, "length()")
    }
}

macro_rules! text_verifier {
    ($([$($lt:lifetime)?] $ty:ty;)*) => {
        $(
            impl<$($lt)?> Verifier<$ty> {
                /// # Errors
                ///
                /// `InvalidArgument` unless the text is empty.
                pub fn is_empty(self) -> Result<Self> {
                    self.check_text("is_empty", str::is_empty, || "must be empty".to_string(), true)
                }

                /// # Errors
                ///
                /// `InvalidArgument` if the text is empty.
                pub fn is_not_empty(self) -> Result<Self> {
                    self.check_text(
                        "is_not_empty",
                        |text| !text.is_empty(),
                        || "may not be empty".to_string(),
                        false,
                    )
                }

                /// Empty or whitespace-only
                ///
                /// # Errors
                ///
                /// `InvalidArgument` unless the text is blank.
                pub fn is_blank(self) -> Result<Self> {
                    self.check_text("is_blank", is_blank, || "must be blank".to_string(), true)
                }

                /// # Errors
                ///
                /// `InvalidArgument` if the text is empty or whitespace-only.
                pub fn is_not_blank(self) -> Result<Self> {
                    self.check_text(
                        "is_not_blank",
                        |text| !is_blank(text),
                        || "may not be blank".to_string(),
                        true,
                    )
                }

                /// # Errors
                ///
                /// `InvalidArgument` if the text starts or ends with whitespace.
                pub fn is_trimmed(self) -> Result<Self> {
                    self.check_text(
                        "is_trimmed",
                        |text| text.trim() == text,
                        || "may not contain leading or trailing whitespace".to_string(),
                        true,
                    )
                }

                /// # Errors
                ///
                /// `InvalidArgument` unless the text starts with `prefix`.
                pub fn starts_with(self, prefix: &str) -> Result<Self> {
                    self.check_text(
                        "starts_with",
                        |text| text.starts_with(prefix),
                        || format!("must start with {}", quote(prefix)),
                        true,
                    )
                }

                /// # Errors
                ///
                /// `InvalidArgument` if the text starts with `prefix`.
                pub fn does_not_start_with(self, prefix: &str) -> Result<Self> {
                    self.check_text(
                        "does_not_start_with",
                        |text| !text.starts_with(prefix),
                        || format!("may not start with {}", quote(prefix)),
                        true,
                    )
                }

                /// # Errors
                ///
                /// `InvalidArgument` unless the text ends with `suffix`.
                pub fn ends_with(self, suffix: &str) -> Result<Self> {
                    self.check_text(
                        "ends_with",
                        |text| text.ends_with(suffix),
                        || format!("must end with {}", quote(suffix)),
                        true,
                    )
                }

                /// # Errors
                ///
                /// `InvalidArgument` if the text ends with `suffix`.
                pub fn does_not_end_with(self, suffix: &str) -> Result<Self> {
                    self.check_text(
                        "does_not_end_with",
                        |text| !text.ends_with(suffix),
                        || format!("may not end with {}", quote(suffix)),
                        true,
                    )
                }

                /// # Errors
                ///
                /// `InvalidArgument` unless `needle` occurs in the text.
                pub fn contains(self, needle: &str) -> Result<Self> {
                    self.check_text(
                        "contains",
                        |text| text.contains(needle),
                        || format!("must contain {}", quote(needle)),
                        true,
                    )
                }

                /// # Errors
                ///
                /// `InvalidArgument` if `needle` occurs in the text.
                pub fn does_not_contain(self, needle: &str) -> Result<Self> {
                    self.check_text(
                        "does_not_contain",
                        |text| !text.contains(needle),
                        || format!("may not contain {}", quote(needle)),
                        true,
                    )
                }

                /// Verify the number of characters in the text
                pub fn length(self) -> SizeVerifier<$ty> {
                    self.text_length()
                }
            }
        )*
    };
}

text_verifier! {
    [] String;
    ['a] &'a str;
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}
